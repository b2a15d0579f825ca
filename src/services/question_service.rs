use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::database::store::{QuestionStore, StoreError};
use crate::question::model::Question;
use crate::question::normalizer::{BatchReport, QuestionNormalizer, RejectedQuestion};
use crate::question::params::QuestionCreateParams;
use crate::question::registry::QuestionTypeRegistry;

/// Outcome of an import: what was stored and what was skipped
#[derive(Debug, Serialize)]
pub struct ImportReport {
    pub saved: Vec<Question>,
    pub rejected: Vec<RejectedQuestion>,
}

pub struct QuestionService {
    store: Arc<dyn QuestionStore>,
    normalizer: QuestionNormalizer,
}

impl QuestionService {
    pub fn new(store: Arc<dyn QuestionStore>, registry: Arc<QuestionTypeRegistry>) -> Self {
        Self {
            store,
            normalizer: QuestionNormalizer::new(registry),
        }
    }

    pub fn registry(&self) -> &QuestionTypeRegistry {
        self.normalizer.registry()
    }

    /// Normalize without storing
    pub fn validate(&self, params: &[QuestionCreateParams]) -> BatchReport {
        self.normalizer.normalize_batch(params)
    }

    /// Normalize a batch and upsert the accepted items in one transaction.
    /// Rejected items never fail the call; a store failure fails all of it.
    pub async fn import(&self, params: &[QuestionCreateParams]) -> Result<ImportReport, StoreError> {
        let report = self.normalizer.normalize_batch(params);
        let saved = self.store.upsert(&report.accepted()).await?;
        let rejected = report.rejected();

        info!(
            "Imported {} questions, rejected {} of {}",
            saved.len(),
            rejected.len(),
            report.len()
        );
        Ok(ImportReport { saved, rejected })
    }

    pub async fn get(&self, question_id: &str) -> Result<Question, StoreError> {
        self.store.find_by_external_id(question_id).await
    }

    pub async fn lookup(&self, question_ids: &[String]) -> Result<Vec<Question>, StoreError> {
        self.store.find_by_external_ids(question_ids).await
    }

    pub async fn list(&self) -> Result<Vec<Question>, StoreError> {
        self.store.find_all().await
    }

    pub async fn delete_for_note(&self, note: &str) -> Result<u64, StoreError> {
        self.store.delete_all_for_form_by_note(note).await
    }
}
