//! Runs against a live Postgres when DATABASE_URL is set; otherwise each test
//! returns early.

use anyhow::Result;

use questionnaire_api::config::DatabaseConfig;
use questionnaire_api::database::{
    CodeGenerator, DatabaseManager, FormStore, PgCodeCountingRepository, PgFormRepository, PgQuestionRepository,
    QuestionStore, StoreError,
};
use questionnaire_api::question::{FormQuestionLink, NewForm, NormalizedQuestion, QuestionStatus, QuestionType};

async fn connect() -> Result<Option<DatabaseManager>> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping Postgres test");
        return Ok(None);
    };
    let config = DatabaseConfig {
        url: Some(url),
        max_connections: 2,
        connection_timeout: 5,
        run_migrations: true,
    };
    Ok(Some(DatabaseManager::connect(&config).await?))
}

fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, uuid::Uuid::new_v4())
}

fn question(id: &str, kind: QuestionType, attributes: &str) -> NormalizedQuestion {
    NormalizedQuestion {
        question_id: id.to_string(),
        question_name: "Name".into(),
        question_type: kind,
        tag: kind.tag().to_string(),
        question: "Prompt".into(),
        attributes: attributes.to_string(),
        status: QuestionStatus::Active,
        enable_on_mobile: true,
        question_unique_id: None,
        set: None,
    }
}

#[tokio::test]
async fn attributes_round_trip_byte_for_byte() -> Result<()> {
    let Some(db) = connect().await? else { return Ok(()) };
    let repo = PgQuestionRepository::new(db.pool().clone());
    let id = unique("bytes");
    let raw = r#"{ "value" : "x",   "b": [1, 2.50] , "a":null }"#;

    repo.upsert(&[question(&id, QuestionType::Text, raw)]).await?;
    let stored = repo.find_by_external_id(&id).await?;

    assert_eq!(stored.attributes, raw);
    assert_eq!(stored.question_type, "text");
    Ok(())
}

#[tokio::test]
async fn upsert_keeps_identity_and_created_at() -> Result<()> {
    let Some(db) = connect().await? else { return Ok(()) };
    let repo = PgQuestionRepository::new(db.pool().clone());
    let id = unique("idem");

    let first = repo.upsert(&[question(&id, QuestionType::Text, "{}")]).await?;
    let mut changed = question(&id, QuestionType::Date, r#"{"value":"2024-01-01"}"#);
    changed.status = QuestionStatus::Inactive;
    let second = repo.upsert(&[changed]).await?;

    assert_eq!(first[0].id, second[0].id);
    assert_eq!(first[0].created_at, second[0].created_at);
    assert_eq!(second[0].question_type, "date");
    assert_eq!(second[0].status, QuestionStatus::Inactive);
    assert!(second[0].updated_at >= first[0].updated_at);
    Ok(())
}

#[tokio::test]
async fn malformed_json_aborts_whole_upsert() -> Result<()> {
    let Some(db) = connect().await? else { return Ok(()) };
    let repo = PgQuestionRepository::new(db.pool().clone());
    let good = unique("good");
    let bad = unique("bad");

    let result = repo
        .upsert(&[
            question(&good, QuestionType::Text, "{}"),
            question(&bad, QuestionType::Text, "not json"),
        ])
        .await;

    assert!(matches!(result, Err(StoreError::Sqlx(_))));
    assert!(matches!(repo.find_by_external_id(&good).await, Err(StoreError::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn form_questions_are_ordered_and_deletable_by_note() -> Result<()> {
    let Some(db) = connect().await? else { return Ok(()) };
    let questions = PgQuestionRepository::new(db.pool().clone());
    let forms = PgFormRepository::new(db.pool().clone());

    let ids: Vec<String> = (0..4).map(|i| unique(&format!("ord{}", i))).collect();
    let mut batch: Vec<_> = ids.iter().map(|id| question(id, QuestionType::Text, "{}")).collect();
    batch[3].status = QuestionStatus::Inactive;
    questions.upsert(&batch).await?;

    let note = unique("note");
    let form = forms
        .create_form(NewForm {
            name: "Ordered".into(),
            password: None,
            note: Some(note.clone()),
        })
        .await?;
    let link = |i: usize, order: i32| FormQuestionLink {
        question_id: ids[i].clone(),
        order,
        answer_required: false,
    };
    forms
        .attach_questions(form.id, &[link(2, 5), link(0, 1), link(1, 1), link(3, 0)])
        .await?;

    let items = questions.find_all_by_form(form.id).await?;
    let got: Vec<_> = items.iter().map(|i| i.question.question_id.clone()).collect();
    assert_eq!(got, vec![ids[0].clone(), ids[1].clone(), ids[2].clone()]);
    assert_eq!(items[2].order, 5);

    assert_eq!(questions.delete_all_for_form_by_note(&note).await?, 4);
    assert!(questions.find_all_by_form(form.id).await?.is_empty());
    assert_eq!(questions.delete_all_for_form_by_note(&note).await?, 0);
    Ok(())
}

#[tokio::test]
async fn code_counter_increments_per_question() -> Result<()> {
    let Some(db) = connect().await? else { return Ok(()) };
    let counter = PgCodeCountingRepository::new(db.pool().clone(), 5);
    let id = unique("counter");

    assert_eq!(counter.next_code(&id).await?, "00001");
    assert_eq!(counter.next_code(&id).await?, "00002");
    assert_eq!(counter.next_code(&unique("other")).await?, "00001");
    Ok(())
}
