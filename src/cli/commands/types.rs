use serde::Serialize;

use crate::cli::utils::output_json;
use crate::cli::OutputFormat;
use crate::question::QuestionTypeRegistry;

#[derive(Debug, Serialize)]
struct TypeRow {
    tag: &'static str,
    schema: &'static str,
    mobile_visible: bool,
}

pub async fn handle(output_format: OutputFormat) -> anyhow::Result<()> {
    let registry = QuestionTypeRegistry::standard();
    let rows: Vec<TypeRow> = registry
        .kinds()
        .into_iter()
        .map(|(kind, schema, mobile_visible)| TypeRow {
            tag: kind.tag(),
            schema: schema.describe(),
            mobile_visible,
        })
        .collect();

    match output_format {
        OutputFormat::Json => output_json(&rows),
        OutputFormat::Text => {
            for row in &rows {
                let marker = if row.mobile_visible { "" } else { "  (hidden on mobile)" };
                println!("{:<24} {}{}", row.tag, row.schema, marker);
            }
            Ok(())
        }
    }
}
