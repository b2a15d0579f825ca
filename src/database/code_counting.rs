use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::store::{format_code, CodeGenerator, SequenceError};

/// Per-question counter rows in `code_countings`; the row lock taken by the
/// upsert serializes concurrent renders of the same question.
pub struct PgCodeCountingRepository {
    pool: PgPool,
    width: usize,
}

impl PgCodeCountingRepository {
    pub fn new(pool: PgPool, width: usize) -> Self {
        Self { pool, width }
    }
}

#[async_trait]
impl CodeGenerator for PgCodeCountingRepository {
    async fn next_code(&self, question_id: &str) -> Result<String, SequenceError> {
        let value: i64 = sqlx::query_scalar(
            "INSERT INTO code_countings (question_id, current_value) VALUES ($1, 1) \
             ON CONFLICT (question_id) DO UPDATE SET \
                current_value = code_countings.current_value + 1, \
                updated_at = NOW() \
             RETURNING current_value",
        )
        .bind(question_id)
        .fetch_one(&self.pool)
        .await?;

        debug!("Issued code {} for question {}", value, question_id);
        Ok(format_code(value, self.width))
    }
}
