use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::PgPool;
use tracing::{debug, info};

use super::store::{QuestionStore, StoreError};
use crate::question::model::{FormQuestionItem, NormalizedQuestion, Question};

/// Columns of `questions` aliased as `q`; attributes come back as their stored text
const QUESTION_COLUMNS: &str = "q.id, q.question_id, q.question_name, q.question_type, q.question, \
    q.attributes::text AS attributes, q.status, q.enable_on_mobile, q.question_unique_id, \
    q.question_set, q.created_at, q.updated_at";

pub struct PgQuestionRepository {
    pool: PgPool,
}

impl PgQuestionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuestionStore for PgQuestionRepository {
    async fn upsert(&self, questions: &[NormalizedQuestion]) -> Result<Vec<Question>, StoreError> {
        if questions.is_empty() {
            return Ok(vec![]);
        }

        let sql = format!(
            "INSERT INTO questions AS q \
                (question_id, question_name, question_type, question, attributes, status, \
                 enable_on_mobile, question_unique_id, question_set) \
             VALUES ($1, $2, $3, $4, $5::json, $6, $7, $8, $9) \
             ON CONFLICT (question_id) DO UPDATE SET \
                question_name = EXCLUDED.question_name, \
                question_type = EXCLUDED.question_type, \
                question = EXCLUDED.question, \
                attributes = EXCLUDED.attributes, \
                status = EXCLUDED.status, \
                enable_on_mobile = EXCLUDED.enable_on_mobile, \
                question_unique_id = EXCLUDED.question_unique_id, \
                question_set = EXCLUDED.question_set, \
                updated_at = NOW() \
             RETURNING {}",
            QUESTION_COLUMNS
        );

        let mut tx = self.pool.begin().await?;
        let mut saved = Vec::with_capacity(questions.len());

        // Row by row so a repeated id in one batch resolves to its last occurrence
        for q in questions {
            let row = sqlx::query_as::<_, Question>(&sql)
                .bind(&q.question_id)
                .bind(&q.question_name)
                .bind(&q.tag)
                .bind(&q.question)
                .bind(&q.attributes)
                .bind(q.status.as_str())
                .bind(q.enable_on_mobile)
                .bind(&q.question_unique_id)
                .bind(&q.set)
                .fetch_one(&mut *tx)
                .await?;
            saved.push(row);
        }

        tx.commit().await?;
        info!("Upserted {} questions", saved.len());
        Ok(saved)
    }

    async fn find_by_external_id(&self, question_id: &str) -> Result<Question, StoreError> {
        let sql = format!("SELECT {} FROM questions q WHERE q.question_id = $1", QUESTION_COLUMNS);
        sqlx::query_as::<_, Question>(&sql)
            .bind(question_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(question_id.to_string()))
    }

    async fn find_by_external_ids(&self, question_ids: &[String]) -> Result<Vec<Question>, StoreError> {
        if question_ids.is_empty() {
            return Ok(vec![]);
        }
        let sql = format!(
            "SELECT {} FROM questions q WHERE q.question_id = ANY($1) ORDER BY q.id",
            QUESTION_COLUMNS
        );
        let rows = sqlx::query_as::<_, Question>(&sql)
            .bind(question_ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_all(&self) -> Result<Vec<Question>, StoreError> {
        let sql = format!("SELECT {} FROM questions q ORDER BY q.id", QUESTION_COLUMNS);
        let rows: Vec<Question> = sqlx::query_as::<_, Question>(&sql)
            .fetch(&self.pool)
            .try_collect()
            .await?;
        Ok(rows)
    }

    async fn find_all_by_form(&self, form_id: i64) -> Result<Vec<FormQuestionItem>, StoreError> {
        let sql = format!(
            "SELECT {}, fq.question_order, fq.answer_required \
             FROM form_questions fq \
             JOIN questions q ON q.question_id = fq.question_id \
             WHERE fq.form_id = $1 AND q.status = 'active' \
             ORDER BY fq.question_order ASC, fq.id ASC",
            QUESTION_COLUMNS
        );
        let rows = sqlx::query_as::<_, FormQuestionItem>(&sql)
            .bind(form_id)
            .fetch_all(&self.pool)
            .await?;
        debug!("Loaded {} active questions for form {}", rows.len(), form_id);
        Ok(rows)
    }

    async fn delete_all_for_form_by_note(&self, note: &str) -> Result<u64, StoreError> {
        let result = sqlx::query(
            "DELETE FROM questions q \
             USING form_questions fq, forms f \
             WHERE fq.question_id = q.question_id AND f.id = fq.form_id AND f.note = $1",
        )
        .bind(note)
        .execute(&self.pool)
        .await?;

        info!("Deleted {} questions linked to forms noted '{}'", result.rows_affected(), note);
        Ok(result.rows_affected())
    }
}
