//! Storage and sequence collaborators consumed by the question services.
//!
//! `PgQuestionRepository`, `PgFormRepository` and `PgCodeCountingRepository`
//! back these with Postgres; `MemoryStore` and `MemoryCodeCounter` keep the
//! same contracts in-process.

use async_trait::async_trait;
use thiserror::Error;

use crate::question::model::{Form, FormQuestionItem, FormQuestionLink, NewForm, NormalizedQuestion, Question};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Question not found: {0}")]
    NotFound(String),

    #[error("Form not found: {0}")]
    FormNotFound(i64),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

#[derive(Debug, Error)]
pub enum SequenceError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error("Sequence unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// Insert-or-update keyed by external id, all-or-nothing per call
    async fn upsert(&self, questions: &[NormalizedQuestion]) -> Result<Vec<Question>, StoreError>;

    async fn find_by_external_id(&self, question_id: &str) -> Result<Question, StoreError>;

    /// Ids with no stored row are left out of the result
    async fn find_by_external_ids(&self, question_ids: &[String]) -> Result<Vec<Question>, StoreError>;

    async fn find_all(&self) -> Result<Vec<Question>, StoreError>;

    /// Active questions of a form, ascending by link order then insertion
    async fn find_all_by_form(&self, form_id: i64) -> Result<Vec<FormQuestionItem>, StoreError>;

    /// Delete every question linked to a form carrying `note`; returns rows removed
    async fn delete_all_for_form_by_note(&self, note: &str) -> Result<u64, StoreError>;
}

#[async_trait]
pub trait FormStore: Send + Sync {
    async fn find_form(&self, form_id: i64) -> Result<Option<Form>, StoreError>;

    async fn create_form(&self, form: NewForm) -> Result<Form, StoreError>;

    /// Upsert link rows keyed by (form id, question id)
    async fn attach_questions(&self, form_id: i64, links: &[FormQuestionLink]) -> Result<(), StoreError>;
}

/// Source of code-counting values, one monotonically assigned code per call
#[async_trait]
pub trait CodeGenerator: Send + Sync {
    async fn next_code(&self, question_id: &str) -> Result<String, SequenceError>;
}

/// Zero-padded rendering shared by the generators
pub fn format_code(value: i64, width: usize) -> String {
    format!("{:0width$}", value, width = width)
}
