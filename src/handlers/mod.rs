pub mod forms;
pub mod health;
pub mod questions;

// Re-export handler functions for use in routing
pub use health::health;

pub use questions::delete as questions_delete;
pub use questions::get as question_get;
pub use questions::list as questions_list;
pub use questions::lookup as questions_lookup;
pub use questions::post as questions_post;

pub use forms::attach as form_attach;
pub use forms::create as form_create;
pub use forms::questions as form_questions;
pub use forms::questions_raw as form_questions_raw;
