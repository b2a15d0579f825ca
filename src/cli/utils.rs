use serde::Serialize;
use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::state::AppState;

/// Output a success message in the appropriate format
pub fn output_success(output_format: &OutputFormat, message: &str, data: Option<Value>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let Some(data_value) = data {
                response["data"] = data_value;
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Print `data` as the JSON success envelope
pub fn output_json<T: Serialize>(data: &T) -> anyhow::Result<()> {
    let response = json!({
        "success": true,
        "data": serde_json::to_value(data)?
    });
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

/// Services backed by Postgres; commands that touch stored data need a database
pub async fn database_state(config: &AppConfig) -> anyhow::Result<AppState> {
    if config.database.url.is_none() {
        anyhow::bail!("DATABASE_URL is not set");
    }
    Ok(AppState::from_config(config).await?)
}
