pub mod commands;
pub mod utils;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "questionnaire")]
#[command(about = "Questionnaire CLI - import question definitions and render forms")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "List known question types with their attribute schemas")]
    Types,

    #[command(about = "Import question definitions from a JSON or YAML file")]
    Import {
        #[arg(help = "Path to a file holding a list of question definitions")]
        file: PathBuf,

        #[arg(long, help = "Validate only, store nothing")]
        dry_run: bool,
    },

    #[command(about = "Render the question list of a form")]
    Render {
        #[arg(help = "Form id")]
        form_id: i64,

        #[arg(long, help = "Render for mobile devices")]
        mobile: bool,

        #[arg(long, help = "Stored values only, no code generation")]
        raw: bool,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Types => commands::types::handle(output_format).await,
        Commands::Import { file, dry_run } => commands::import::handle(file, dry_run, output_format).await,
        Commands::Render { form_id, mobile, raw } => {
            commands::render::handle(form_id, mobile, raw, output_format).await
        }
    }
}
