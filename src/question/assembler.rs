use std::sync::Arc;

use rand::distributions::Alphanumeric;
use rand::Rng;
use tracing::{debug, error};

use super::error::AssemblyError;
use super::kind::QuestionType;
use super::model::Form;
use super::registry::QuestionTypeRegistry;
use super::render::{RenderedAttributes, RenderedForm, RenderedQuestion};
use crate::config::QuestionConfig;
use crate::database::store::{CodeGenerator, QuestionStore};

/// How a randomizer question's value is produced at render time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomizerPolicy {
    pub length: usize,
    /// Prefix the token with the stored `value` attribute
    pub keep_stored_value: bool,
}

impl Default for RandomizerPolicy {
    fn default() -> Self {
        Self {
            length: 8,
            keep_stored_value: true,
        }
    }
}

impl RandomizerPolicy {
    pub fn from_config(config: &QuestionConfig) -> Self {
        Self {
            length: config.randomizer_length,
            keep_stored_value: config.randomizer_keep_value,
        }
    }

    pub fn apply(&self, stored: &str) -> String {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(self.length)
            .map(char::from)
            .collect();

        if self.keep_stored_value {
            format!("{}{}", stored, token)
        } else {
            token
        }
    }
}

/// Builds the ordered, filtered question list of a form
pub struct FormQuestionAssembler {
    store: Arc<dyn QuestionStore>,
    codes: Arc<dyn CodeGenerator>,
    registry: Arc<QuestionTypeRegistry>,
    randomizer: RandomizerPolicy,
}

impl FormQuestionAssembler {
    pub fn new(
        store: Arc<dyn QuestionStore>,
        codes: Arc<dyn CodeGenerator>,
        registry: Arc<QuestionTypeRegistry>,
    ) -> Self {
        Self {
            store,
            codes,
            registry,
            randomizer: RandomizerPolicy::default(),
        }
    }

    pub fn with_randomizer(mut self, policy: RandomizerPolicy) -> Self {
        self.randomizer = policy;
        self
    }

    /// Device render. Not idempotent: every code-counting question consumes
    /// one value from the generator.
    pub async fn assemble(&self, form: &Form, for_mobile: bool) -> Result<RenderedForm, AssemblyError> {
        let prepared = self.prepare(form, for_mobile).await?;

        let mut questions = Vec::with_capacity(prepared.len());
        for (kind, question) in prepared {
            questions.push(self.materialize(kind, question).await?);
        }

        Ok(RenderedForm::new(form, questions))
    }

    /// Back-office render: same filtering, stored values, no side effects
    pub async fn assemble_unfiltered(&self, form: &Form, for_mobile: bool) -> Result<RenderedForm, AssemblyError> {
        let prepared = self.prepare(form, for_mobile).await?;
        let questions = prepared.into_iter().map(|(_, q)| q).collect();
        Ok(RenderedForm::new(form, questions))
    }

    async fn prepare(
        &self,
        form: &Form,
        for_mobile: bool,
    ) -> Result<Vec<(Option<QuestionType>, RenderedQuestion)>, AssemblyError> {
        let items = self
            .store
            .find_all_by_form(form.id)
            .await
            .map_err(AssemblyError::Store)?;

        let mut prepared = Vec::with_capacity(items.len());
        for item in items {
            let attributes = match RenderedAttributes::parse(&item.question.attributes) {
                Ok(attributes) => attributes,
                Err(e) => {
                    debug!(
                        "Dropping question {} from form {}: unparseable attributes: {}",
                        item.question.question_id, form.id, e
                    );
                    continue;
                }
            };

            let kind = match self.registry.classify(&item.question.question_type) {
                Ok(kind) => Some(kind),
                Err(_) if for_mobile => {
                    error!(
                        "Question {} in form {} has unrecognized type '{}'",
                        item.question.question_id, form.id, item.question.question_type
                    );
                    return Err(AssemblyError::Classification {
                        question_id: item.question.question_id,
                        question_type: item.question.question_type,
                    });
                }
                Err(_) => None,
            };

            if for_mobile && !kind.map_or(false, |k| self.registry.is_mobile_visible(k)) {
                continue;
            }

            prepared.push((kind, RenderedQuestion::from_item(item, attributes)));
        }

        Ok(prepared)
    }

    async fn materialize(
        &self,
        kind: Option<QuestionType>,
        question: RenderedQuestion,
    ) -> Result<RenderedQuestion, AssemblyError> {
        match kind {
            Some(QuestionType::CodeCounting) => {
                let code = match self.codes.next_code(&question.question_id).await {
                    Ok(code) => code,
                    Err(source) => {
                        error!("Code counting failed for question {}: {}", question.question_id, source);
                        return Err(AssemblyError::Sequence {
                            question_id: question.question_id,
                            source,
                        });
                    }
                };
                Ok(question.with_value(code))
            }
            Some(QuestionType::Randomizer) => {
                let value = self.randomizer.apply(&question.attributes.value);
                Ok(question.with_value(value))
            }
            _ => Ok(question),
        }
    }
}
