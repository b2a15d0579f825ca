use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use super::store::{FormStore, StoreError};
use crate::question::model::{Form, FormQuestionLink, NewForm};

pub struct PgFormRepository {
    pool: PgPool,
}

impl PgFormRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FormStore for PgFormRepository {
    async fn find_form(&self, form_id: i64) -> Result<Option<Form>, StoreError> {
        let form = sqlx::query_as::<_, Form>("SELECT id, name, password, note FROM forms WHERE id = $1")
            .bind(form_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(form)
    }

    async fn create_form(&self, form: NewForm) -> Result<Form, StoreError> {
        let form = sqlx::query_as::<_, Form>(
            "INSERT INTO forms (name, password, note) VALUES ($1, $2, $3) \
             RETURNING id, name, password, note",
        )
        .bind(form.name)
        .bind(form.password)
        .bind(form.note)
        .fetch_one(&self.pool)
        .await?;
        info!("Created form {} ({})", form.id, form.name);
        Ok(form)
    }

    async fn attach_questions(&self, form_id: i64, links: &[FormQuestionLink]) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM forms WHERE id = $1 FOR UPDATE")
            .bind(form_id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(StoreError::FormNotFound(form_id));
        }

        for link in links {
            // Inserts nothing when the question is unknown
            let result = sqlx::query(
                "INSERT INTO form_questions (form_id, question_id, question_order, answer_required) \
                 SELECT $1, q.question_id, $3, $4 FROM questions q WHERE q.question_id = $2 \
                 ON CONFLICT (form_id, question_id) DO UPDATE SET \
                    question_order = EXCLUDED.question_order, \
                    answer_required = EXCLUDED.answer_required",
            )
            .bind(form_id)
            .bind(&link.question_id)
            .bind(link.order)
            .bind(link.answer_required)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                return Err(StoreError::NotFound(link.question_id.clone()));
            }
        }

        tx.commit().await?;
        info!("Attached {} questions to form {}", links.len(), form_id);
        Ok(())
    }
}
