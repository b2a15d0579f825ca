pub mod form_service;
pub mod question_service;

pub use form_service::{FormError, FormService};
pub use question_service::{ImportReport, QuestionService};
