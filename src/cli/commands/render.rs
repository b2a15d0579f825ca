use crate::cli::utils::{database_state, output_json};
use crate::cli::OutputFormat;
use crate::config::config;

pub async fn handle(form_id: i64, mobile: bool, raw: bool, output_format: OutputFormat) -> anyhow::Result<()> {
    let state = database_state(config()).await?;

    let rendered = if raw {
        state.forms.render_unfiltered(form_id, mobile).await?
    } else {
        state.forms.render(form_id, mobile).await?
    };

    match output_format {
        OutputFormat::Json => output_json(&rendered),
        OutputFormat::Text => {
            println!("{} ({} questions)", rendered.form_name, rendered.questions.len());
            for q in &rendered.questions {
                let required = if q.answer_required { "*" } else { " " };
                println!(
                    "{:>4}{} {:<22} {:<24} {}",
                    q.order, required, q.question_type, q.question_id, q.attributes.value
                );
            }
            Ok(())
        }
    }
}
