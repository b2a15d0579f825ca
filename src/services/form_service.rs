use std::sync::Arc;

use thiserror::Error;

use crate::database::store::{FormStore, StoreError};
use crate::question::assembler::FormQuestionAssembler;
use crate::question::error::AssemblyError;
use crate::question::model::{Form, FormQuestionLink, NewForm};
use crate::question::render::RenderedForm;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("Form not found: {0}")]
    NotFound(i64),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Assembly(#[from] AssemblyError),
}

pub struct FormService {
    forms: Arc<dyn FormStore>,
    assembler: FormQuestionAssembler,
}

impl FormService {
    pub fn new(forms: Arc<dyn FormStore>, assembler: FormQuestionAssembler) -> Self {
        Self { forms, assembler }
    }

    pub async fn find(&self, form_id: i64) -> Result<Form, FormError> {
        self.forms
            .find_form(form_id)
            .await?
            .ok_or(FormError::NotFound(form_id))
    }

    pub async fn create(&self, form: NewForm) -> Result<Form, FormError> {
        Ok(self.forms.create_form(form).await?)
    }

    pub async fn attach(&self, form_id: i64, links: &[FormQuestionLink]) -> Result<(), FormError> {
        match self.forms.attach_questions(form_id, links).await {
            Err(StoreError::FormNotFound(id)) => Err(FormError::NotFound(id)),
            other => Ok(other?),
        }
    }

    /// Device render with generated values
    pub async fn render(&self, form_id: i64, for_mobile: bool) -> Result<RenderedForm, FormError> {
        let form = self.find(form_id).await?;
        Ok(self.assembler.assemble(&form, for_mobile).await?)
    }

    /// Stored values only, safe to repeat
    pub async fn render_unfiltered(&self, form_id: i64, for_mobile: bool) -> Result<RenderedForm, FormError> {
        let form = self.find(form_id).await?;
        Ok(self.assembler.assemble_unfiltered(&form, for_mobile).await?)
    }
}
