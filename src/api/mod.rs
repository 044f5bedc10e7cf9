// API layer module (adapters for controllers)
// Follows Hexagonal Architecture - API is an adapter

pub mod errors;
pub mod format;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::mysql::MySqlPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use handlers::{auth as auth_handlers, teams};

/// Shared application state
///
/// The connection pool plus the configuration resolved at startup, passed
/// by reference to every handler. No component reads ambient globals.
#[derive(Clone)]
pub struct AppState {
    pub pool: MySqlPool,
    pub config: Arc<AppConfig>,
}

/// Builds the application router over the given state.
pub fn router(state: AppState) -> Router {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(auth_handlers::health_check))
        // Auth routes
        .route("/api/auth/login", post(auth_handlers::login))
        // Team routes
        .route("/api/teams", post(teams::create_team))
        .route("/api/teams", get(teams::list_teams))
        .route("/api/teams/:id", get(teams::get_team))
        .route("/api/teams/:id", put(teams::update_team))
        .route("/api/teams/:id", delete(teams::delete_team))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Shared state
        .with_state(state)
}
