use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::value::RawValue;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};

use super::kind::QuestionType;
use super::status::QuestionStatus;

/// Output of the normalizer, ready to be upserted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedQuestion {
    pub question_id: String,
    pub question_name: String,
    pub question_type: QuestionType,
    /// Type tag exactly as submitted; this is what gets stored
    pub tag: String,
    pub question: String,
    /// Opaque payload, kept byte-for-byte
    #[serde(serialize_with = "serialize_attributes")]
    pub attributes: String,
    pub status: QuestionStatus,
    pub enable_on_mobile: bool,
    pub question_unique_id: Option<String>,
    pub set: Option<String>,
}

/// Persisted question row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    pub id: i64,
    pub question_id: String,
    pub question_name: String,
    /// Tag as stored; legacy rows may carry tags the registry no longer knows
    pub question_type: String,
    pub question: String,
    #[serde(serialize_with = "serialize_attributes")]
    pub attributes: String,
    pub status: QuestionStatus,
    pub enable_on_mobile: bool,
    pub question_unique_id: Option<String>,
    pub set: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'r> FromRow<'r, PgRow> for Question {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let status: String = row.try_get("status")?;
        let status = status
            .parse::<QuestionStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            id: row.try_get("id")?,
            question_id: row.try_get("question_id")?,
            question_name: row.try_get("question_name")?,
            question_type: row.try_get("question_type")?,
            question: row.try_get("question")?,
            attributes: row.try_get("attributes")?,
            status,
            enable_on_mobile: row.try_get("enable_on_mobile")?,
            question_unique_id: row.try_get("question_unique_id")?,
            set: row.try_get("question_set")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// A question joined with its position in one form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormQuestionItem {
    #[serde(flatten)]
    pub question: Question,
    pub order: i32,
    pub answer_required: bool,
}

impl<'r> FromRow<'r, PgRow> for FormQuestionItem {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            question: Question::from_row(row)?,
            order: row.try_get("question_order")?,
            answer_required: row.try_get("answer_required")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Form {
    pub id: i64,
    pub name: String,
    pub password: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewForm {
    pub name: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

/// Placement of one question inside a form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormQuestionLink {
    pub question_id: String,
    pub order: i32,
    #[serde(default)]
    pub answer_required: bool,
}

/// Emit the payload as embedded JSON when it parses, as a string otherwise
fn serialize_attributes<S: Serializer>(raw: &str, serializer: S) -> Result<S::Ok, S::Error> {
    match serde_json::from_str::<&RawValue>(raw) {
        Ok(value) => value.serialize(serializer),
        Err(_) => serializer.serialize_str(raw),
    }
}
