use axum::{
    extract::{rejection::JsonRejection, Extension, Path, Query},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::question::model::Question;
use crate::question::params::QuestionCreateParams;
use crate::services::ImportReport;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LookupRequest {
    pub ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    /// Note of the forms whose questions are removed
    pub note: Option<String>,
}

/// POST /api/questions - Import a batch of question definitions
///
/// Items that fail validation are skipped and listed under `rejected`;
/// the accepted items are stored in a single transaction.
pub async fn post(
    Extension(state): Extension<AppState>,
    payload: Result<Json<Vec<QuestionCreateParams>>, JsonRejection>,
) -> ApiResult<ImportReport> {
    let Json(params) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let report = state.questions.import(&params).await?;
    Ok(ApiResponse::success(report))
}

/// GET /api/questions - List every stored question
pub async fn list(Extension(state): Extension<AppState>) -> ApiResult<Vec<Question>> {
    Ok(ApiResponse::success(state.questions.list().await?))
}

/// GET /api/questions/:question_id
pub async fn get(
    Path(question_id): Path<String>,
    Extension(state): Extension<AppState>,
) -> ApiResult<Question> {
    Ok(ApiResponse::success(state.questions.get(&question_id).await?))
}

/// POST /api/questions/lookup - Fetch a set of questions; unknown ids are omitted
pub async fn lookup(
    Extension(state): Extension<AppState>,
    payload: Result<Json<LookupRequest>, JsonRejection>,
) -> ApiResult<Vec<Question>> {
    let Json(request) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    Ok(ApiResponse::success(state.questions.lookup(&request.ids).await?))
}

/// DELETE /api/questions?note=.. - Remove questions linked to forms with the given note
pub async fn delete(
    Query(query): Query<DeleteQuery>,
    Extension(state): Extension<AppState>,
) -> ApiResult<Value> {
    let note = query
        .note
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Query parameter 'note' is required"))?;

    let deleted = state.questions.delete_for_note(&note).await?;
    Ok(ApiResponse::success(json!({ "deleted": deleted })))
}
