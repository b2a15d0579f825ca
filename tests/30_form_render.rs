mod common;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{assert_failure, definition, TestApp};
use questionnaire_api::config::QuestionConfig;
use questionnaire_api::database::{CodeGenerator, MemoryStore, SequenceError};
use questionnaire_api::state::AppState;

async fn seeded(app: &TestApp, note: Option<&str>) -> Result<i64> {
    let (status, body) = app
        .post(
            "/api/questions",
            json!([
                definition("intro", "text", json!({"value": ""})),
                definition("notify", "send_notification", json!({"options": []})),
                definition("ticket", "code_counting", json!({"value": "stored"})),
                definition("token", "randomizer", json!({"value": "R-"})),
            ]),
        )
        .await?;
    anyhow::ensure!(status == StatusCode::OK, "import failed: {}", body);

    let form_id = app.create_form("Site visit", note).await?;
    let (status, body) = app
        .put(
            &format!("/api/forms/{}/questions", form_id),
            json!([
                {"question_id": "token", "order": 4},
                {"question_id": "intro", "order": 1, "answer_required": true},
                {"question_id": "notify", "order": 2},
                {"question_id": "ticket", "order": 3},
            ]),
        )
        .await?;
    anyhow::ensure!(status == StatusCode::OK, "attach failed: {}", body);
    Ok(form_id)
}

fn orders(body: &Value) -> Vec<i64> {
    body["data"]["questions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["order"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn mobile_render_filters_and_materializes() -> Result<()> {
    let app = common::memory_app();
    let form_id = seeded(&app, None).await?;

    let (status, body) = app
        .get(&format!("/api/forms/{}/questions?mobile=true", form_id))
        .await?;

    assert_eq!(status, StatusCode::OK, "body: {}", body);
    assert_eq!(orders(&body), vec![1, 3, 4]);
    assert_eq!(body["data"]["form_name"], json!("Site visit"));
    assert_eq!(body["data"]["decrypt_password"], json!("pw"));

    let questions = &body["data"]["questions"];
    assert_eq!(questions[0]["question_type"], json!("TEXT"));
    assert_eq!(questions[0]["answer_required"], json!(true));
    assert_eq!(questions[1]["attributes"], json!({"value": "0001"}));

    let token = questions[2]["attributes"]["value"].as_str().unwrap();
    assert!(token.starts_with("R-"), "token: {}", token);
    assert_eq!(token.len(), 10);
    Ok(())
}

#[tokio::test]
async fn each_render_issues_a_new_code_but_raw_does_not() -> Result<()> {
    let app = common::memory_app();
    let form_id = seeded(&app, None).await?;
    let uri = format!("/api/forms/{}/questions?mobile=true", form_id);
    let raw_uri = format!("/api/forms/{}/questions/raw?mobile=true", form_id);

    let (_, first) = app.get(&uri).await?;
    let (_, raw_a) = app.get(&raw_uri).await?;
    let (_, raw_b) = app.get(&raw_uri).await?;
    let (_, second) = app.get(&uri).await?;

    assert_eq!(first["data"]["questions"][1]["attributes"]["value"], json!("0001"));
    assert_eq!(second["data"]["questions"][1]["attributes"]["value"], json!("0002"));
    assert_eq!(raw_a, raw_b);
    assert_eq!(raw_a["data"]["questions"][1]["attributes"], json!({"value": "stored"}));
    assert_eq!(raw_a["data"]["questions"][2]["attributes"], json!({"value": "R-"}));
    Ok(())
}

#[tokio::test]
async fn non_mobile_render_keeps_every_kind() -> Result<()> {
    let app = common::memory_app();
    let form_id = seeded(&app, None).await?;

    let (status, body) = app.get(&format!("/api/forms/{}/questions", form_id)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(orders(&body), vec![1, 2, 3, 4]);
    assert_eq!(body["data"]["questions"][1]["question_type"], json!("SEND_NOTIFICATION"));
    Ok(())
}

#[tokio::test]
async fn null_value_still_renders() -> Result<()> {
    let app = common::memory_app();
    app.post(
        "/api/questions",
        json!([
            definition("blank", "text", json!({"value": null})),
            definition("filled", "text", json!({"value": "ok"})),
        ]),
    )
    .await?;
    let form_id = app.create_form("Nulls", None).await?;
    app.put(
        &format!("/api/forms/{}/questions", form_id),
        json!([
            {"question_id": "blank", "order": 1},
            {"question_id": "filled", "order": 2},
        ]),
    )
    .await?;

    let (status, body) = app
        .get(&format!("/api/forms/{}/questions?mobile=true", form_id))
        .await?;
    assert_eq!(status, StatusCode::OK, "body: {}", body);
    assert_eq!(orders(&body), vec![1, 2]);
    assert_eq!(body["data"]["questions"][0]["attributes"]["value"], json!(""));
    Ok(())
}

#[tokio::test]
async fn bad_query_string_uses_error_envelope() -> Result<()> {
    let app = common::memory_app();
    let form_id = app.create_form("Query", None).await?;

    for path in ["questions", "questions/raw"] {
        let (status, body) = app
            .get(&format!("/api/forms/{}/{}?mobile=yes", form_id, path))
            .await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_failure(&body, 400, "BAD_REQUEST");
    }
    Ok(())
}

#[tokio::test]
async fn unknown_form_is_404() -> Result<()> {
    let app = common::memory_app();
    let (status, body) = app.get("/api/forms/999/questions?mobile=true").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_failure(&body, 404, "NOT_FOUND");

    let (status, _) = app
        .put("/api/forms/999/questions", json!([{"question_id": "x", "order": 1}]))
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn attaching_unknown_question_is_404() -> Result<()> {
    let app = common::memory_app();
    let form_id = app.create_form("Empty", None).await?;
    let (status, body) = app
        .put(
            &format!("/api/forms/{}/questions", form_id),
            json!([{"question_id": "ghost", "order": 1}]),
        )
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].as_str().unwrap().contains("ghost"));
    Ok(())
}

#[tokio::test]
async fn delete_by_note_empties_the_form() -> Result<()> {
    let app = common::memory_app();
    let form_id = seeded(&app, Some("batch-7")).await?;

    let (status, body) = app.delete("/api/questions?note=batch-7").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["deleted"], json!(4));

    let (_, body) = app.get(&format!("/api/forms/{}/questions", form_id)).await?;
    assert!(body["data"]["questions"].as_array().unwrap().is_empty());
    Ok(())
}

struct OfflineCounter;

#[async_trait]
impl CodeGenerator for OfflineCounter {
    async fn next_code(&self, _question_id: &str) -> Result<String, SequenceError> {
        Err(SequenceError::Unavailable("counter offline".into()))
    }
}

#[tokio::test]
async fn sequence_failure_is_555() -> Result<()> {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::from_parts(store.clone(), store, Arc::new(OfflineCounter), &QuestionConfig::default());
    let app = common::app_with(state);
    let form_id = seeded(&app, None).await?;

    let (status, body) = app
        .get(&format!("/api/forms/{}/questions?mobile=true", form_id))
        .await?;

    assert_eq!(status.as_u16(), 555);
    assert_failure(&body, 555, "SEQUENCE_FAILURE");
    assert!(body["message"].as_str().unwrap().contains("ticket"));

    // Stored values stay reachable
    let (status, _) = app
        .get(&format!("/api/forms/{}/questions/raw?mobile=true", form_id))
        .await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}
