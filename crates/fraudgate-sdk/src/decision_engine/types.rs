//! Response types for DecisionEngine

use fraudgate_core::{CompiledRule, ComponentName, Decision, ListEntry};
use fraudgate_runtime::FinalVerdict;
use serde::{Deserialize, Serialize};

/// Decision response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionResponse {
    /// Request ID (for tracking and correlation)
    pub request_id: String,

    /// Charge the decision was made for
    pub charge_id: String,

    /// Final and test verdict with per-component results
    pub verdict: FinalVerdict,

    /// Omniscore merged into the attributes, `-1` when unavailable
    pub omniscore: f64,

    /// Merchant score merged into the attributes, `-1` when unavailable
    pub merchant_score: f64,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}

impl DecisionResponse {
    pub fn decision(&self) -> Decision {
        self.verdict.decision
    }

    pub fn test_decision(&self) -> Decision {
        self.verdict.test_decision
    }

    pub fn decided_by(&self) -> Option<ComponentName> {
        self.verdict.decided_by
    }
}

/// Candidates fetched for one console component
#[derive(Debug, Clone)]
pub(crate) enum ComponentCandidates {
    Rules(Vec<CompiledRule>),
    Entries(Vec<ListEntry>),
}

impl ComponentCandidates {
    pub(crate) fn len(&self) -> usize {
        match self {
            ComponentCandidates::Rules(rules) => rules.len(),
            ComponentCandidates::Entries(entries) => entries.len(),
        }
    }
}
