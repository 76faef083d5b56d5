//! Scope, decision and yellow-flag validators

use crate::error::{CompileError, Result};
use fraudgate_core::{Decision, RuleRequest, Scope};

/// Resolve the scope a rule request targets
///
/// Global rules may not name any scope id; non-global rules must name exactly one.
pub fn validate_scope(request: &RuleRequest) -> Result<Scope> {
    let populated = request.populated_scope_fields();
    let names = || -> Vec<String> { populated.iter().map(|(name, _)| name.to_string()).collect() };

    if request.is_global {
        if populated.is_empty() {
            return Ok(Scope::Global);
        }
        return Err(CompileError::ScopeConflict(names()));
    }

    match populated.as_slice() {
        [] => Err(CompileError::MissingScope),
        [("company_id", id)] => Ok(Scope::Company(id.to_string())),
        [("family_id", id)] => Ok(Scope::FamilyMcc(id.to_string())),
        [(_, id)] => Ok(Scope::FamilyCompany(id.to_string())),
        _ => Err(CompileError::AmbiguousScope(names())),
    }
}

/// Parse a decision token (`accepted`, `declined`, `undecided`, any case)
pub fn validate_decision(decision: &str) -> Result<Decision> {
    decision
        .parse()
        .map_err(|_| CompileError::InvalidDecision(decision.to_string()))
}

/// Yellow-flag rules only raise flags, so their decision must be `undecided`
pub fn validate_yellow_flag(request: &RuleRequest) -> Result<()> {
    if !request.yellow_flag {
        return Ok(());
    }
    match validate_decision(&request.decision)? {
        Decision::Undecided => Ok(()),
        other => Err(CompileError::InvalidYellowFlagDecision(other)),
    }
}
