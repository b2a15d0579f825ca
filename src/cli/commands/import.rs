use std::path::{Path, PathBuf};

use anyhow::Context;
use serde_json::json;

use crate::cli::utils::{database_state, output_json, output_success};
use crate::cli::OutputFormat;
use crate::config::config;
use crate::question::{QuestionCreateParams, QuestionNormalizer, QuestionTypeRegistry, RejectedQuestion};

pub async fn handle(file: PathBuf, dry_run: bool, output_format: OutputFormat) -> anyhow::Result<()> {
    let definitions = load_definitions(&file)?;

    if dry_run {
        let normalizer = QuestionNormalizer::new(std::sync::Arc::new(QuestionTypeRegistry::standard()));
        let report = normalizer.normalize_batch(&definitions);
        let rejected = report.rejected();
        return match output_format {
            OutputFormat::Json => output_json(&json!({
                "valid": report.accepted_count(),
                "rejected": rejected,
            })),
            OutputFormat::Text => {
                print_rejected(&rejected);
                output_success(
                    &output_format,
                    &format!("{} of {} definitions are valid", report.accepted_count(), report.len()),
                    None,
                )
            }
        };
    }

    let state = database_state(config()).await?;
    let report = state.questions.import(&definitions).await?;

    match output_format {
        OutputFormat::Json => output_json(&report),
        OutputFormat::Text => {
            print_rejected(&report.rejected);
            output_success(
                &output_format,
                &format!(
                    "Imported {} questions from {} ({} rejected)",
                    report.saved.len(),
                    file.display(),
                    report.rejected.len()
                ),
                None,
            )
        }
    }
}

fn print_rejected(rejected: &[RejectedQuestion]) {
    for item in rejected {
        eprintln!("✗ #{} {} [{}]: {}", item.index, item.question_id, item.field, item.reason);
    }
}

/// Read a list of definitions; `.yaml`/`.yml` files are YAML, anything else JSON
pub fn load_definitions(path: &Path) -> anyhow::Result<Vec<QuestionCreateParams>> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    parse_definitions(&text, is_yaml).with_context(|| format!("parsing {}", path.display()))
}

fn parse_definitions(text: &str, is_yaml: bool) -> anyhow::Result<Vec<QuestionCreateParams>> {
    if is_yaml {
        Ok(serde_yaml::from_str(text)?)
    } else {
        Ok(serde_json::from_str(text)?)
    }
}
