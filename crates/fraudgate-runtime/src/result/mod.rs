//! Evaluation result types

use fraudgate_core::{ComponentName, Decision};
use serde::{Deserialize, Serialize};

/// A rule or list entry whose expression matched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedCandidate {
    pub id: String,
    pub decision: Decision,
}

/// A candidate that could not be evaluated; it is treated as non-matching
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationError {
    pub component: ComponentName,
    pub candidate_id: String,
    pub message: String,
}

/// Outcome of one console component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub component: ComponentName,
    pub decision: Decision,
    /// Always `undecided` for components without a test channel
    pub test_decision: Decision,
    #[serde(default)]
    pub matched: Vec<MatchedCandidate>,
    #[serde(default)]
    pub test_matched: Vec<MatchedCandidate>,
    #[serde(default)]
    pub errors: Vec<EvaluationError>,
}

impl EvaluationResult {
    /// Result of a component that had nothing to evaluate
    pub fn undecided(component: ComponentName) -> Self {
        Self {
            component,
            decision: Decision::Undecided,
            test_decision: Decision::Undecided,
            matched: Vec::new(),
            test_matched: Vec::new(),
            errors: Vec::new(),
        }
    }
}

/// Verdict for a whole charge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalVerdict {
    pub decision: Decision,
    pub test_decision: Decision,
    /// Component that produced `decision`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decided_by: Option<ComponentName>,
    /// Component that produced `test_decision`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_decided_by: Option<ComponentName>,
    /// Per-component results in console order
    pub components: Vec<EvaluationResult>,
    #[serde(default)]
    pub errors: Vec<EvaluationError>,
}

impl FinalVerdict {
    /// Fold component results, given in console order
    ///
    /// The first component with a decisive decision sets `decision`; the first
    /// with a decisive test decision sets `test_decision`, independently.
    pub fn aggregate(components: Vec<EvaluationResult>) -> Self {
        let first = components.iter().find(|c| c.decision.is_decisive());
        let first_test = components.iter().find(|c| c.test_decision.is_decisive());

        let errors = components
            .iter()
            .flat_map(|c| c.errors.iter().cloned())
            .collect();

        Self {
            decision: first.map(|c| c.decision).unwrap_or_default(),
            test_decision: first_test.map(|c| c.test_decision).unwrap_or_default(),
            decided_by: first.map(|c| c.component),
            test_decided_by: first_test.map(|c| c.component),
            errors,
            components,
        }
    }

    pub fn component(&self, name: ComponentName) -> Option<&EvaluationResult> {
        self.components.iter().find(|c| c.component == name)
    }
}
