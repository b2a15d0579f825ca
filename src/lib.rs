pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod question;
pub mod services;
pub mod state;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Extension, Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{AppConfig, SecurityConfig};
use crate::state::AppState;

/// Full HTTP surface over `state`, layered according to `config`
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let mut router = Router::new()
        .route("/health", get(handlers::health))
        .merge(question_routes())
        .merge(form_routes())
        .layer(Extension(state));

    if config.security.enable_cors {
        router = router.layer(cors_layer(&config.security));
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    router
}

fn question_routes() -> Router {
    Router::new()
        .route(
            "/api/questions",
            get(handlers::questions_list)
                .post(handlers::questions_post)
                .delete(handlers::questions_delete),
        )
        .route("/api/questions/lookup", post(handlers::questions_lookup))
        .route("/api/questions/:question_id", get(handlers::question_get))
}

fn form_routes() -> Router {
    Router::new()
        .route("/api/forms", post(handlers::form_create))
        .route(
            "/api/forms/:form_id/questions",
            get(handlers::form_questions).put(handlers::form_attach),
        )
        .route("/api/forms/:form_id/questions/raw", get(handlers::form_questions_raw))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() || security.cors_origins.iter().any(|o| o == "*") {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
