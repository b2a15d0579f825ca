pub mod code_counting;
pub mod form_repository;
pub mod manager;
pub mod memory;
pub mod migrations;
pub mod question_repository;
pub mod store;

pub use code_counting::PgCodeCountingRepository;
pub use form_repository::PgFormRepository;
pub use manager::{DatabaseError, DatabaseManager};
pub use memory::{MemoryCodeCounter, MemoryStore};
pub use question_repository::PgQuestionRepository;
pub use store::{CodeGenerator, FormStore, QuestionStore, SequenceError, StoreError};
