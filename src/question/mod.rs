//! Question catalog: kind registry, normalization of incoming definitions and
//! assembly of per-form renders.

pub mod assembler;
pub mod error;
pub mod kind;
pub mod model;
pub mod normalizer;
pub mod params;
pub mod registry;
pub mod render;
pub mod schema;
pub mod status;

pub use assembler::{FormQuestionAssembler, RandomizerPolicy};
pub use error::{AssemblyError, AttributeFault, QuestionError};
pub use kind::QuestionType;
pub use model::{Form, FormQuestionItem, FormQuestionLink, NewForm, NormalizedQuestion, Question};
pub use normalizer::{BatchItem, BatchReport, QuestionNormalizer, RejectedQuestion};
pub use params::QuestionCreateParams;
pub use registry::{QuestionTypeRegistry, RegistryBuilder};
pub use render::{AttributeOption, RenderedAttributes, RenderedForm, RenderedQuestion};
pub use schema::AttributeSchema;
pub use status::QuestionStatus;
