//! REST API request and response types

use fraudgate_core::RuleRequest;
use fraudgate_sdk::{DecisionEngine, RuleAuthoring};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<DecisionEngine>,
    pub authoring: Arc<RuleAuthoring>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Rule creation body; `id` pins the stored rule id
#[derive(Debug, Clone, Deserialize)]
pub struct RulePayload {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(flatten)]
    pub rule: RuleRequest,
}
