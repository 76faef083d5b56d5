//! Unit tests for the rule content compiler and validators
//!
//! Rule definitions are written as JSON, the way the authoring API receives them.

use fraudgate_compiler::*;
use fraudgate_core::ast::{Literal, Operand};
use fraudgate_core::{Condition, Decision, Operator, RuleRequest, Scope};
use fraudgate_parser::ExpressionParser;

fn request(json: &str) -> RuleRequest {
    serde_json::from_str(json).expect("valid rule request json")
}

// =============================================================================
// Compile then parse
// =============================================================================

#[test]
fn test_compiled_text_parses_back_to_same_clauses() {
    let req = request(
        r#"{
            "decision": "declined",
            "company_id": "c1",
            "clauses": [
                {"field": "amount", "operator": ">", "value": 5000, "condition": "or"},
                {"field": "payer.email", "operator": "ew", "value": "@mailinator.com", "condition": "and", "not": true},
                {"operator": "ge", "value": 3, "condition": "and",
                 "formula_fields": ["aggregation.payer.charge.h1.count", "aggregation.card.charge.h1.count"],
                 "formula_op": "SUM"},
                {"field": "payment_method.country", "operator": "in", "value": ["MX", "US"]}
            ]
        }"#,
    );

    let text = RuleContentCompiler::compile(&req.clauses).unwrap();
    let parsed = ExpressionParser::parse(&text).unwrap();

    let operators: Vec<Operator> = parsed.clauses.iter().map(|c| c.operator).collect();
    assert_eq!(operators, vec![Operator::Ge, Operator::Gt, Operator::Ew, Operator::In]);

    let conditions: Vec<Option<Condition>> = parsed.clauses.iter().map(|c| c.condition).collect();
    assert_eq!(
        conditions,
        vec![Some(Condition::And), Some(Condition::Or), Some(Condition::And), None]
    );

    assert!(matches!(parsed.clauses[0].operand, Operand::Formula { .. }));
    assert!(parsed.clauses[2].negated);
    assert_eq!(parsed.clauses[1].value, Literal::Number(5000.0));
}

#[test]
fn test_compile_is_deterministic() {
    let req = request(
        r#"{"decision": "accepted", "is_global": true,
            "clauses": [{"field": "payer.email", "operator": "eq", "value": "vip@example.com"}]}"#,
    );
    let first = RuleContentCompiler::compile(&req.clauses).unwrap();
    let second = RuleContentCompiler::compile(&req.clauses).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, r#"payer.email eq "vip@example.com""#);
}

// =============================================================================
// Validator chain
// =============================================================================

#[test]
fn test_validator_accepts_family_rule() {
    let req = request(
        r#"{"decision": "Undecided", "yellow_flag": true, "family_id": "f-travel",
            "clauses": [{"field": "amount", "operator": "gt", "value": 20000}]}"#,
    );
    let validated = RuleValidator::validate(&req).unwrap();
    assert_eq!(validated.scope, Scope::FamilyMcc("f-travel".to_string()));
    assert_eq!(validated.decision, Decision::Undecided);
}

#[test]
fn test_validator_scope_errors() {
    let ambiguous = request(
        r#"{"decision": "declined", "company_id": "c1", "family_id": "f1",
            "clauses": [{"field": "amount", "operator": "gt", "value": 1}]}"#,
    );
    assert!(matches!(
        RuleValidator::validate(&ambiguous),
        Err(CompileError::AmbiguousScope(_))
    ));

    let missing = request(
        r#"{"decision": "declined", "clauses": [{"field": "amount", "operator": "gt", "value": 1}]}"#,
    );
    assert_eq!(RuleValidator::validate(&missing), Err(CompileError::MissingScope));

    let conflict = request(
        r#"{"decision": "declined", "is_global": true, "company_id": "c1",
            "clauses": [{"field": "amount", "operator": "gt", "value": 1}]}"#,
    );
    assert!(matches!(
        RuleValidator::validate(&conflict),
        Err(CompileError::ScopeConflict(_))
    ));
}

#[test]
fn test_validator_rejects_subtract_with_three_fields() {
    let req = request(
        r#"{"decision": "declined", "company_id": "c1",
            "clauses": [{"operator": "eq", "value": -2, "fields": ["a", "b", "c"], "math_operation": "SUBTRACT"}]}"#,
    );
    let err = RuleValidator::validate(&req).unwrap_err();
    assert_eq!(err.code(), "INVALID_FORMULA");
}

#[test]
fn test_validator_rejects_unknown_decision() {
    let req = request(
        r#"{"decision": "review", "company_id": "c1",
            "clauses": [{"field": "amount", "operator": "gt", "value": 1}]}"#,
    );
    assert_eq!(
        RuleValidator::validate(&req),
        Err(CompileError::InvalidDecision("review".to_string()))
    );
}

#[test]
fn test_error_codes_are_stable() {
    assert_eq!(CompileError::MissingScope.code(), "MISSING_SCOPE");
    assert_eq!(
        CompileError::DuplicateRule {
            existing_id: "r1".to_string()
        }
        .code(),
        "DUPLICATE_RULE"
    );
}
