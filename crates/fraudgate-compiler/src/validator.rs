//! Rule validator - the full authoring check chain
//!
//! Runs the decision, yellow-flag, scope and formula checks in that order,
//! then compiles the clauses. The first failure is returned unchanged.

use crate::compiler::RuleContentCompiler;
use crate::error::Result;
use crate::formula::validate_formulas;
use crate::scope::{validate_decision, validate_scope, validate_yellow_flag};
use fraudgate_core::{Decision, RuleRequest, Scope};

/// A rule request that passed validation, with its compiled text
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRule {
    pub scope: Scope,
    pub decision: Decision,
    pub expression_text: String,
    /// Clauses reference `identity.` attributes
    pub is_identity: bool,
}

/// Validates and compiles rule requests
pub struct RuleValidator;

impl RuleValidator {
    pub fn validate(request: &RuleRequest) -> Result<ValidatedRule> {
        let decision = validate_decision(&request.decision)?;
        validate_yellow_flag(request)?;
        let scope = validate_scope(request)?;
        validate_formulas(&request.clauses)?;
        let expression_text = RuleContentCompiler::compile(&request.clauses)?;

        Ok(ValidatedRule {
            scope,
            decision,
            expression_text,
            is_identity: RuleContentCompiler::references_identity(&request.clauses),
        })
    }
}
