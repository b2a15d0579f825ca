use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use super::error::{AttributeFault, QuestionError};
use super::kind::QuestionType;
use super::model::NormalizedQuestion;
use super::params::QuestionCreateParams;
use super::registry::QuestionTypeRegistry;
use super::status::QuestionStatus;

/// Turns raw definitions into canonical questions, one schema check per kind
#[derive(Debug, Clone)]
pub struct QuestionNormalizer {
    registry: Arc<QuestionTypeRegistry>,
}

impl QuestionNormalizer {
    pub fn new(registry: Arc<QuestionTypeRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &QuestionTypeRegistry {
        &self.registry
    }

    /// Validate one definition. Pure: nothing is persisted here.
    pub fn normalize(&self, params: &QuestionCreateParams) -> Result<NormalizedQuestion, QuestionError> {
        let kind = self.registry.classify(&params.question_type)?;

        self.registry
            .schema(kind)
            .check(&params.attributes)
            .map_err(|source| QuestionError::InvalidAttributes {
                question_id: params.question_id.clone(),
                fault: AttributeFault::Shape { kind, source },
            })?;

        let status = params
            .status
            .parse::<QuestionStatus>()
            .map_err(|e| QuestionError::InvalidAttributes {
                question_id: params.question_id.clone(),
                fault: AttributeFault::Status(e.0),
            })?;

        // Set grouping only applies to user profile questions
        let set = match kind {
            QuestionType::User => params.set.clone(),
            _ => None,
        };

        Ok(NormalizedQuestion {
            question_id: params.question_id.clone(),
            question_name: params.question_name.clone(),
            question_type: kind,
            tag: params.question_type.clone(),
            question: params.question.clone(),
            attributes: params.attributes.clone(),
            status,
            enable_on_mobile: params.enable_on_mobile,
            question_unique_id: params.question_unique_id.clone(),
            set,
        })
    }

    /// Best-effort batch: a failing item is logged and reported, never fatal
    pub fn normalize_batch(&self, params: &[QuestionCreateParams]) -> BatchReport {
        let items: Vec<BatchItem> = params
            .iter()
            .enumerate()
            .map(|(index, p)| {
                let outcome = self.normalize(p);
                if let Err(e) = &outcome {
                    warn!("Skipping question #{} ({}): {}", index, p.question_id, e);
                }
                BatchItem {
                    index,
                    question_id: p.question_id.clone(),
                    outcome,
                }
            })
            .collect();

        let report = BatchReport { items };
        debug!(
            "Normalized {} of {} question definitions",
            report.accepted_count(),
            report.len()
        );
        report
    }
}

#[derive(Debug)]
pub struct BatchItem {
    pub index: usize,
    pub question_id: String,
    pub outcome: Result<NormalizedQuestion, QuestionError>,
}

/// Per-item outcome of a batch, in input order
#[derive(Debug, Default)]
pub struct BatchReport {
    pub items: Vec<BatchItem>,
}

/// Client-facing summary of a skipped item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedQuestion {
    pub index: usize,
    pub question_id: String,
    pub field: &'static str,
    pub reason: String,
}

impl BatchReport {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn accepted_count(&self) -> usize {
        self.items.iter().filter(|i| i.outcome.is_ok()).count()
    }

    pub fn accepted(&self) -> Vec<NormalizedQuestion> {
        self.items
            .iter()
            .filter_map(|i| i.outcome.as_ref().ok().cloned())
            .collect()
    }

    pub fn rejected(&self) -> Vec<RejectedQuestion> {
        self.items
            .iter()
            .filter_map(|i| {
                i.outcome.as_ref().err().map(|e| RejectedQuestion {
                    index: i.index,
                    question_id: i.question_id.clone(),
                    field: e.field(),
                    reason: e.to_string(),
                })
            })
            .collect()
    }
}
