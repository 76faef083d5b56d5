//! Per-component evaluation and decision resolution

use super::candidate::Candidate;
use crate::context::AttributeMap;
use crate::result::{EvaluationError, EvaluationResult, MatchedCandidate};
use fraudgate_core::{ConsoleComponent, Decision};
use tracing::{debug, warn};

/// Pick the component decision from its matches
///
/// Scans `priority` in order and returns the first decision carried by at
/// least one match; `undecided` when nothing matched.
pub fn resolve_decision(priority: &[Decision], matched: &[MatchedCandidate]) -> Decision {
    priority
        .iter()
        .copied()
        .find(|decision| matched.iter().any(|m| m.decision == *decision))
        .unwrap_or(Decision::Undecided)
}

/// Evaluate every candidate of one component against the charge
///
/// Production and test candidates are resolved separately. A candidate that
/// fails to evaluate is recorded in `errors` and counts as non-matching.
pub fn evaluate_component<C: Candidate>(
    component: &ConsoleComponent,
    candidates: &[C],
    attributes: &AttributeMap,
) -> EvaluationResult {
    let mut result = EvaluationResult::undecided(component.name);

    for candidate in candidates {
        let matched = match candidate.matches(attributes) {
            Ok(matched) => matched,
            Err(e) => {
                warn!(
                    "Component {} failed to evaluate {}: {}",
                    component.name,
                    candidate.id(),
                    e
                );
                result.errors.push(EvaluationError {
                    component: component.name,
                    candidate_id: candidate.id().to_string(),
                    message: e.to_string(),
                });
                continue;
            }
        };

        if !matched {
            continue;
        }

        let hit = MatchedCandidate {
            id: candidate.id().to_string(),
            decision: candidate.decision(),
        };
        if candidate.is_test() {
            result.test_matched.push(hit);
        } else {
            result.matched.push(hit);
        }
    }

    let priority = component.effective_priority();
    result.decision = resolve_decision(&priority, &result.matched);
    if component.name.supports_test_decision() {
        result.test_decision = resolve_decision(&priority, &result.test_matched);
    }

    debug!(
        "Component {} evaluated {} candidates: decision={}, test_decision={}, matched={}",
        component.name,
        candidates.len(),
        result.decision,
        result.test_decision,
        result.matched.len()
    );

    result
}
