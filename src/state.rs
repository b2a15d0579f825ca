use std::sync::Arc;

use tracing::{info, warn};

use crate::config::{AppConfig, QuestionConfig};
use crate::database::{
    CodeGenerator, DatabaseError, DatabaseManager, FormStore, MemoryCodeCounter, MemoryStore, PgCodeCountingRepository,
    PgFormRepository, PgQuestionRepository, QuestionStore,
};
use crate::question::{FormQuestionAssembler, QuestionTypeRegistry, RandomizerPolicy};
use crate::services::{FormService, QuestionService};

/// Shared handler state, cloned per request
#[derive(Clone)]
pub struct AppState {
    pub questions: Arc<QuestionService>,
    pub forms: Arc<FormService>,
    /// Absent when running on the in-memory store
    pub database: Option<DatabaseManager>,
}

impl AppState {
    /// Postgres when `DATABASE_URL` is configured, in-memory otherwise
    pub async fn from_config(config: &AppConfig) -> Result<Self, DatabaseError> {
        if config.database.url.is_none() {
            warn!("DATABASE_URL not set; questions are kept in memory only");
            return Ok(Self::in_memory(&config.questions));
        }

        let manager = DatabaseManager::connect(&config.database).await?;
        Ok(Self::postgres(manager, &config.questions))
    }

    pub fn postgres(manager: DatabaseManager, config: &QuestionConfig) -> Self {
        let pool = manager.pool().clone();
        let mut state = Self::from_parts(
            Arc::new(PgQuestionRepository::new(pool.clone())),
            Arc::new(PgFormRepository::new(pool.clone())),
            Arc::new(PgCodeCountingRepository::new(pool, config.code_counting_width)),
            config,
        );
        state.database = Some(manager);
        info!("Using Postgres question store");
        state
    }

    pub fn in_memory(config: &QuestionConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::from_parts(
            store.clone(),
            store,
            Arc::new(MemoryCodeCounter::new(config.code_counting_width)),
            config,
        )
    }

    /// Wire services over arbitrary store and generator implementations
    pub fn from_parts(
        questions: Arc<dyn QuestionStore>,
        forms: Arc<dyn FormStore>,
        codes: Arc<dyn CodeGenerator>,
        config: &QuestionConfig,
    ) -> Self {
        let registry = Arc::new(QuestionTypeRegistry::standard());
        let assembler = FormQuestionAssembler::new(questions.clone(), codes, registry.clone())
            .with_randomizer(RandomizerPolicy::from_config(config));

        Self {
            questions: Arc::new(QuestionService::new(questions, registry)),
            forms: Arc::new(FormService::new(forms, assembler)),
            database: None,
        }
    }
}
