//! REST API handlers

use super::extractors::JsonExtractor;
use super::types::{AppState, HealthResponse, RulePayload};
use crate::error::ServerError;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use fraudgate_core::{CompiledRule, RuleRequest};
use fraudgate_sdk::{CancellationToken, Charge, DecisionResponse};
use tracing::{debug, info};

/// Health check
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Decide a charge
pub async fn decide(
    State(state): State<AppState>,
    JsonExtractor(charge): JsonExtractor<Charge>,
) -> Result<Json<DecisionResponse>, ServerError> {
    debug!("Deciding charge {} for company {}", charge.id, charge.company_id);

    let response = state.engine.decide(&charge, &CancellationToken::new()).await?;

    info!(
        "Charge {} decided {:?} (test {:?}) in {}ms",
        response.charge_id,
        response.decision(),
        response.test_decision(),
        response.processing_time_ms
    );
    Ok(Json(response))
}

pub async fn create_rule(
    State(state): State<AppState>,
    JsonExtractor(payload): JsonExtractor<RulePayload>,
) -> Result<(StatusCode, Json<CompiledRule>), ServerError> {
    let rule = state
        .authoring
        .create_with_id(payload.id, &payload.rule, &CancellationToken::new())
        .await?;
    Ok((StatusCode::CREATED, Json(rule)))
}

pub async fn get_rule(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CompiledRule>, ServerError> {
    Ok(Json(state.authoring.get(&id).await?))
}

pub async fn update_rule(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonExtractor(request): JsonExtractor<RuleRequest>,
) -> Result<Json<CompiledRule>, ServerError> {
    let rule = state
        .authoring
        .update(&id, &request, &CancellationToken::new())
        .await?;
    Ok(Json(rule))
}

pub async fn delete_rule(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServerError> {
    state.authoring.delete(&id, &CancellationToken::new()).await?;
    Ok(StatusCode::NO_CONTENT)
}
