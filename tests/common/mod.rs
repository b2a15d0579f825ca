#![allow(dead_code)]

use anyhow::Result;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use questionnaire_api::{app, config::AppConfig, state::AppState};

/// Router driven in-process, no socket involved
pub struct TestApp {
    pub state: AppState,
    router: Router,
}

pub fn memory_app() -> TestApp {
    let config = AppConfig::development();
    app_with(AppState::in_memory(&config.questions))
}

pub fn app_with(state: AppState) -> TestApp {
    let mut config = AppConfig::development();
    config.api.enable_request_logging = false;
    TestApp {
        router: app(state.clone(), &config),
        state,
    }
}

impl TestApp {
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> Result<(StatusCode, Value)> {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header("content-type", "application/json");
                Body::from(serde_json::to_vec(&value)?)
            }
            None => Body::empty(),
        };

        let response = self.router.clone().oneshot(builder.body(body)?).await?;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()))
        };
        Ok((status, value))
    }

    /// Response body as sent, for assertions on exact bytes
    pub async fn get_text(&self, uri: &str) -> Result<(StatusCode, String)> {
        let request = Request::builder().method(Method::GET).uri(uri).body(Body::empty())?;
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        Ok((status, String::from_utf8(bytes.to_vec())?))
    }

    pub async fn get(&self, uri: &str) -> Result<(StatusCode, Value)> {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> Result<(StatusCode, Value)> {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> Result<(StatusCode, Value)> {
        self.send(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> Result<(StatusCode, Value)> {
        self.send(Method::DELETE, uri, None).await
    }

    /// Create a form and return its id
    pub async fn create_form(&self, name: &str, note: Option<&str>) -> Result<i64> {
        let (status, body) = self
            .post("/api/forms", json!({ "name": name, "password": "pw", "note": note }))
            .await?;
        anyhow::ensure!(status == StatusCode::CREATED, "form create failed: {} {}", status, body);
        body["data"]["id"].as_i64().ok_or_else(|| anyhow::anyhow!("no form id in {}", body))
    }
}

pub fn definition(id: &str, kind: &str, attributes: Value) -> Value {
    json!({
        "question_id": id,
        "question_name": format!("{} name", id),
        "question_type": kind,
        "question": format!("Prompt for {}", id),
        "attributes": attributes,
        "status": "active",
        "enable_on_mobile": true
    })
}

pub fn assert_failure(body: &Value, code: u16, error: &str) {
    assert_eq!(body["success"], json!(false), "body: {}", body);
    assert_eq!(body["code"], json!(code), "body: {}", body);
    assert_eq!(body["error"], json!(error), "body: {}", body);
    assert!(body["message"].is_string(), "body: {}", body);
}
