// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::database::manager::DatabaseError;
use crate::database::store::StoreError;
use crate::question::error::{AssemblyError, QuestionError};
use crate::services::FormError;

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),
    InvalidQuestion {
        message: String,
        field: &'static str,
    },
    MalformedData(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    InternalServerError(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),

    // 555 code-counting sequence could not issue a value
    SequenceFailure(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::InvalidQuestion { .. } => 400,
            ApiError::MalformedData(_) => 400,
            ApiError::NotFound(_) => 404,
            ApiError::InternalServerError(_) => 500,
            ApiError::ServiceUnavailable(_) => 503,
            ApiError::SequenceFailure(_) => 555,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::InvalidQuestion { message, .. } => message,
            ApiError::MalformedData(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
            ApiError::ServiceUnavailable(msg) => msg,
            ApiError::SequenceFailure(msg) => msg,
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::InvalidQuestion { .. } => "INVALID_QUESTION",
            ApiError::MalformedData(_) => "MALFORMED_QUESTION_DATA",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
            ApiError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            ApiError::SequenceFailure(_) => "SEQUENCE_FAILURE",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        let mut body = json!({
            "success": false,
            "code": self.status_code(),
            "error": self.error_code(),
            "message": self.message(),
        });
        if let ApiError::InvalidQuestion { field, .. } = self {
            body["field"] = json!(field);
        }
        body
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

// Convert other error types to ApiError
impl From<QuestionError> for ApiError {
    fn from(err: QuestionError) -> Self {
        ApiError::InvalidQuestion {
            field: err.field(),
            message: err.to_string(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ApiError::not_found(format!("Question not found: {}", id)),
            StoreError::FormNotFound(id) => ApiError::not_found(format!("Form not found: {}", id)),
            StoreError::Sqlx(sqlx_err) => {
                // Log the real error but return generic message
                tracing::error!("SQLx error: {}", sqlx_err);
                ApiError::internal_server_error("Database error occurred")
            }
        }
    }
}

impl From<AssemblyError> for ApiError {
    fn from(err: AssemblyError) -> Self {
        match err {
            AssemblyError::Store(store_err) => store_err.into(),
            AssemblyError::Classification { .. } => ApiError::MalformedData(err.to_string()),
            AssemblyError::Sequence { question_id, source } => {
                tracing::error!("Code counting failed for question {}: {}", question_id, source);
                ApiError::SequenceFailure(format!(
                    "Could not generate code for question: {}",
                    question_id
                ))
            }
        }
    }
}

impl From<FormError> for ApiError {
    fn from(err: FormError) -> Self {
        match err {
            FormError::NotFound(id) => ApiError::not_found(format!("Form not found: {}", id)),
            FormError::Store(e) => e.into(),
            FormError::Assembly(e) => e.into(),
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        tracing::error!("Database error: {}", err);
        ApiError::service_unavailable("Database temporarily unavailable")
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::store::SequenceError;

    #[test]
    fn unknown_type_is_bad_request_on_question_type() {
        let err: ApiError = QuestionError::UnknownType("hologram".into()).into();
        assert_eq!(err.status_code(), 400);
        let body = err.to_json();
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["field"], json!("question_type"));
        assert_eq!(body["error"], json!("INVALID_QUESTION"));
    }

    #[test]
    fn sequence_failure_is_555_and_names_question() {
        let err: ApiError = AssemblyError::Sequence {
            question_id: "counter-7".into(),
            source: SequenceError::Unavailable("down".into()),
        }
        .into();
        assert_eq!(err.status_code(), 555);
        assert!(err.message().contains("counter-7"));
        assert!(StatusCode::from_u16(555).is_ok());
    }

    #[test]
    fn classification_is_malformed_data() {
        let err: ApiError = AssemblyError::Classification {
            question_id: "q".into(),
            question_type: "nope".into(),
        }
        .into();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "MALFORMED_QUESTION_DATA");
    }

    #[test]
    fn database_failure_is_503() {
        let err: ApiError = DatabaseError::ConfigMissing("DATABASE_URL").into();
        assert_eq!(err.status_code(), 503);
        assert_eq!(err.to_json()["error"], json!("SERVICE_UNAVAILABLE"));
    }

    #[test]
    fn missing_form_is_not_found() {
        let err: ApiError = FormError::NotFound(12).into();
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.to_json()["code"], json!(404));
    }
}
