//! In-process stores with the same contracts as the Postgres repositories.
//! Used by tests, dry runs and servers started without `DATABASE_URL`.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, RwLock};

use super::store::{format_code, CodeGenerator, FormStore, QuestionStore, SequenceError, StoreError};
use crate::question::model::{Form, FormQuestionItem, FormQuestionLink, NewForm, NormalizedQuestion, Question};
use crate::question::status::QuestionStatus;

#[derive(Debug, Clone)]
struct LinkRow {
    id: i64,
    form_id: i64,
    question_id: String,
    order: i32,
    answer_required: bool,
}

#[derive(Debug, Default)]
struct Tables {
    questions: Vec<Question>,
    forms: Vec<Form>,
    links: Vec<LinkRow>,
    next_question_id: i64,
    next_form_id: i64,
    next_link_id: i64,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rewrite a stored type tag, bypassing normalization
    #[cfg(test)]
    pub(crate) async fn overwrite_type(&self, question_id: &str, tag: &str) {
        let mut tables = self.tables.write().await;
        if let Some(q) = tables.questions.iter_mut().find(|q| q.question_id == question_id) {
            q.question_type = tag.to_string();
        }
    }
}

#[async_trait]
impl QuestionStore for MemoryStore {
    async fn upsert(&self, questions: &[NormalizedQuestion]) -> Result<Vec<Question>, StoreError> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let mut saved = Vec::with_capacity(questions.len());

        for q in questions {
            let position = tables.questions.iter().position(|row| row.question_id == q.question_id);
            let row = match position {
                Some(i) => {
                    let row = &mut tables.questions[i];
                    row.question_name = q.question_name.clone();
                    row.question_type = q.tag.clone();
                    row.question = q.question.clone();
                    row.attributes = q.attributes.clone();
                    row.status = q.status;
                    row.enable_on_mobile = q.enable_on_mobile;
                    row.question_unique_id = q.question_unique_id.clone();
                    row.set = q.set.clone();
                    row.updated_at = now;
                    row.clone()
                }
                None => {
                    tables.next_question_id += 1;
                    let row = Question {
                        id: tables.next_question_id,
                        question_id: q.question_id.clone(),
                        question_name: q.question_name.clone(),
                        question_type: q.tag.clone(),
                        question: q.question.clone(),
                        attributes: q.attributes.clone(),
                        status: q.status,
                        enable_on_mobile: q.enable_on_mobile,
                        question_unique_id: q.question_unique_id.clone(),
                        set: q.set.clone(),
                        created_at: now,
                        updated_at: now,
                    };
                    tables.questions.push(row.clone());
                    row
                }
            };
            saved.push(row);
        }

        Ok(saved)
    }

    async fn find_by_external_id(&self, question_id: &str) -> Result<Question, StoreError> {
        let tables = self.tables.read().await;
        tables
            .questions
            .iter()
            .find(|q| q.question_id == question_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(question_id.to_string()))
    }

    async fn find_by_external_ids(&self, question_ids: &[String]) -> Result<Vec<Question>, StoreError> {
        let wanted: HashSet<&str> = question_ids.iter().map(String::as_str).collect();
        let tables = self.tables.read().await;
        Ok(tables
            .questions
            .iter()
            .filter(|q| wanted.contains(q.question_id.as_str()))
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<Question>, StoreError> {
        Ok(self.tables.read().await.questions.clone())
    }

    async fn find_all_by_form(&self, form_id: i64) -> Result<Vec<FormQuestionItem>, StoreError> {
        let tables = self.tables.read().await;

        let mut links: Vec<&LinkRow> = tables.links.iter().filter(|l| l.form_id == form_id).collect();
        links.sort_by_key(|l| (l.order, l.id));

        let by_id: HashMap<&str, &Question> = tables
            .questions
            .iter()
            .map(|q| (q.question_id.as_str(), q))
            .collect();

        Ok(links
            .into_iter()
            .filter_map(|link| {
                by_id
                    .get(link.question_id.as_str())
                    .filter(|q| q.status == QuestionStatus::Active)
                    .map(|q| FormQuestionItem {
                        question: (*q).clone(),
                        order: link.order,
                        answer_required: link.answer_required,
                    })
            })
            .collect())
    }

    async fn delete_all_for_form_by_note(&self, note: &str) -> Result<u64, StoreError> {
        let mut tables = self.tables.write().await;

        let form_ids: HashSet<i64> = tables
            .forms
            .iter()
            .filter(|f| f.note.as_deref() == Some(note))
            .map(|f| f.id)
            .collect();
        let doomed: HashSet<String> = tables
            .links
            .iter()
            .filter(|l| form_ids.contains(&l.form_id))
            .map(|l| l.question_id.clone())
            .collect();

        let before = tables.questions.len();
        tables.questions.retain(|q| !doomed.contains(&q.question_id));
        tables.links.retain(|l| !doomed.contains(&l.question_id));

        Ok((before - tables.questions.len()) as u64)
    }
}

#[async_trait]
impl FormStore for MemoryStore {
    async fn find_form(&self, form_id: i64) -> Result<Option<Form>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.forms.iter().find(|f| f.id == form_id).cloned())
    }

    async fn create_form(&self, form: NewForm) -> Result<Form, StoreError> {
        let mut tables = self.tables.write().await;
        tables.next_form_id += 1;
        let form = Form {
            id: tables.next_form_id,
            name: form.name,
            password: form.password,
            note: form.note,
        };
        tables.forms.push(form.clone());
        Ok(form)
    }

    async fn attach_questions(&self, form_id: i64, links: &[FormQuestionLink]) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;

        if !tables.forms.iter().any(|f| f.id == form_id) {
            return Err(StoreError::FormNotFound(form_id));
        }
        // Validate everything first so a bad link leaves the form untouched
        if let Some(missing) = links
            .iter()
            .find(|l| !tables.questions.iter().any(|q| q.question_id == l.question_id))
        {
            return Err(StoreError::NotFound(missing.question_id.clone()));
        }

        for link in links {
            let existing = tables
                .links
                .iter_mut()
                .find(|row| row.form_id == form_id && row.question_id == link.question_id);
            match existing {
                Some(row) => {
                    row.order = link.order;
                    row.answer_required = link.answer_required;
                }
                None => {
                    tables.next_link_id += 1;
                    let id = tables.next_link_id;
                    tables.links.push(LinkRow {
                        id,
                        form_id,
                        question_id: link.question_id.clone(),
                        order: link.order,
                        answer_required: link.answer_required,
                    });
                }
            }
        }

        Ok(())
    }
}

/// Per-question counters held in process memory
#[derive(Debug)]
pub struct MemoryCodeCounter {
    width: usize,
    counters: Mutex<HashMap<String, i64>>,
}

impl MemoryCodeCounter {
    pub fn new(width: usize) -> Self {
        Self {
            width,
            counters: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl CodeGenerator for MemoryCodeCounter {
    async fn next_code(&self, question_id: &str) -> Result<String, SequenceError> {
        let mut counters = self.counters.lock().await;
        let value = counters.entry(question_id.to_string()).or_insert(0);
        *value += 1;
        Ok(format_code(*value, self.width))
    }
}
