use sqlx::PgPool;
use tracing::info;

use super::manager::DatabaseError;

/// Idempotent schema for the question catalog. Attributes live in a `json`
/// column so the stored text comes back exactly as written.
const SCHEMA: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS questions (
        id BIGSERIAL PRIMARY KEY,
        question_id TEXT NOT NULL UNIQUE,
        question_name TEXT NOT NULL,
        question_type TEXT NOT NULL,
        question TEXT NOT NULL DEFAULT '',
        attributes JSON NOT NULL,
        status TEXT NOT NULL DEFAULT 'active',
        enable_on_mobile BOOLEAN NOT NULL DEFAULT FALSE,
        question_unique_id TEXT,
        question_set TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )"#,
    r#"CREATE TABLE IF NOT EXISTS forms (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        password TEXT,
        note TEXT
    )"#,
    r#"CREATE TABLE IF NOT EXISTS form_questions (
        id BIGSERIAL PRIMARY KEY,
        form_id BIGINT NOT NULL REFERENCES forms(id) ON DELETE CASCADE,
        question_id TEXT NOT NULL REFERENCES questions(question_id) ON DELETE CASCADE,
        question_order INTEGER NOT NULL DEFAULT 0,
        answer_required BOOLEAN NOT NULL DEFAULT FALSE,
        UNIQUE (form_id, question_id)
    )"#,
    "CREATE INDEX IF NOT EXISTS form_questions_form_order_idx ON form_questions (form_id, question_order, id)",
    "CREATE INDEX IF NOT EXISTS forms_note_idx ON forms (note)",
    r#"CREATE TABLE IF NOT EXISTS code_countings (
        question_id TEXT PRIMARY KEY,
        current_value BIGINT NOT NULL DEFAULT 0,
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )"#,
];

/// Arbitrary key serializing concurrent schema runs across processes
const SCHEMA_LOCK_KEY: i64 = 0x5155_4553;

pub async fn run(pool: &PgPool) -> Result<(), DatabaseError> {
    let mut tx = pool.begin().await?;
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(SCHEMA_LOCK_KEY)
        .execute(&mut *tx)
        .await?;
    for statement in SCHEMA {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;
    info!("Applied {} schema statements", SCHEMA.len());
    Ok(())
}
