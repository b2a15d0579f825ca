use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Path, Query,
    },
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::question::model::{Form, FormQuestionLink, NewForm};
use crate::question::render::RenderedForm;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct RenderQuery {
    /// Drop kinds devices never display and fail on unknown kinds
    #[serde(default)]
    pub mobile: bool,
}

/// POST /api/forms - Create a form shell that questions can be attached to
pub async fn create(
    Extension(state): Extension<AppState>,
    payload: Result<Json<NewForm>, JsonRejection>,
) -> ApiResult<Form> {
    let Json(form) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    if form.name.trim().is_empty() {
        return Err(ApiError::bad_request("Form name is required"));
    }
    Ok(ApiResponse::created(state.forms.create(form).await?))
}

/// GET /api/forms/:form_id/questions?mobile=true
///
/// Device render. Each call issues fresh code-counting values and
/// randomizer tokens.
pub async fn questions(
    Path(form_id): Path<i64>,
    query: Result<Query<RenderQuery>, QueryRejection>,
    Extension(state): Extension<AppState>,
) -> ApiResult<RenderedForm> {
    let Query(query) = query.map_err(|e| ApiError::bad_request(e.body_text()))?;
    Ok(ApiResponse::success(state.forms.render(form_id, query.mobile).await?))
}

/// GET /api/forms/:form_id/questions/raw - Stored values, no generation
pub async fn questions_raw(
    Path(form_id): Path<i64>,
    query: Result<Query<RenderQuery>, QueryRejection>,
    Extension(state): Extension<AppState>,
) -> ApiResult<RenderedForm> {
    let Query(query) = query.map_err(|e| ApiError::bad_request(e.body_text()))?;
    Ok(ApiResponse::success(
        state.forms.render_unfiltered(form_id, query.mobile).await?,
    ))
}

/// PUT /api/forms/:form_id/questions - Place questions in a form
pub async fn attach(
    Path(form_id): Path<i64>,
    Extension(state): Extension<AppState>,
    payload: Result<Json<Vec<FormQuestionLink>>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(links) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    state.forms.attach(form_id, &links).await?;
    Ok(ApiResponse::success(json!({ "form_id": form_id, "attached": links.len() })))
}
