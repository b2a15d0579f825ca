use thiserror::Error;

use super::kind::QuestionType;
use crate::database::store::{SequenceError, StoreError};

/// Write-side failures for a single question definition
#[derive(Debug, Error)]
pub enum QuestionError {
    #[error("unknown question type '{0}'")]
    UnknownType(String),

    #[error("invalid attributes for question '{question_id}': {fault}")]
    InvalidAttributes {
        question_id: String,
        fault: AttributeFault,
    },
}

#[derive(Debug, Error)]
pub enum AttributeFault {
    #[error("{kind} payload does not match its schema: {source}")]
    Shape {
        kind: QuestionType,
        #[source]
        source: serde_json::Error,
    },

    #[error("unrecognized status '{0}'")]
    Status(String),
}

impl QuestionError {
    /// Name of the request field the failure points at
    pub fn field(&self) -> &'static str {
        match self {
            QuestionError::UnknownType(_) => "question_type",
            QuestionError::InvalidAttributes { fault: AttributeFault::Shape { .. }, .. } => "attributes",
            QuestionError::InvalidAttributes { fault: AttributeFault::Status(_), .. } => "status",
        }
    }
}

/// Fatal outcomes of assembling a form. Unparseable attribute payloads are not
/// errors: those questions are dropped from the render.
#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error("failed to load form questions: {0}")]
    Store(#[source] StoreError),

    #[error("question '{question_id}' has unrecognized type '{question_type}'")]
    Classification {
        question_id: String,
        question_type: String,
    },

    #[error("could not generate value for question {question_id}: {source}")]
    Sequence {
        question_id: String,
        #[source]
        source: SequenceError,
    },
}
