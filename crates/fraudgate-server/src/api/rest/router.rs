//! REST API router

use super::handlers::{create_rule, decide, delete_rule, get_rule, health, update_rule};
use super::types::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use fraudgate_sdk::{DecisionEngine, RuleAuthoring};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Create REST API router
pub fn create_router(engine: Arc<DecisionEngine>, authoring: Arc<RuleAuthoring>) -> Router {
    let state = AppState { engine, authoring };

    Router::new()
        .route("/health", get(health))
        .route("/v1/decide", post(decide))
        .route("/v1/rules", post(create_rule))
        .route(
            "/v1/rules/:id",
            get(get_rule).put(update_rule).delete(delete_rule),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
