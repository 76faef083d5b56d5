//! Unit tests for the rule expression parser
//!
//! Exercises the parser against expression text as the rule compiler writes it.

use fraudgate_core::ast::*;
use fraudgate_parser::*;

// =============================================================================
// Canonical text
// =============================================================================

#[test]
fn test_parse_canonical_text_renders_identically() {
    let inputs = [
        "monthly_installments eq 12",
        "not monthly_installments eq 12",
        r#"payment_method.country in ["MX","US"]"#,
        r#"SUM (aggregation.payer.charge.h1.sum,amount) gt 5000 and payer.email ew "@mailinator.com""#,
        "DIV (a.count,b.count) eq 0 or amount le 0.5",
        "is_3ds eq false",
    ];

    for input in inputs {
        let expr = ExpressionParser::parse(input)
            .unwrap_or_else(|e| panic!("failed to parse {:?}: {}", input, e));
        assert_eq!(expr.to_string(), input);
    }
}

#[test]
fn test_parse_symbolic_operators_normalize() {
    let expr = ExpressionParser::parse("amount >= 100 && amount < 200 || amount != 7").unwrap();
    assert_eq!(
        expr.to_string(),
        "amount ge 100 and amount lt 200 or amount ne 7"
    );
}

#[test]
fn test_parse_single_quoted_strings() {
    let expr = ExpressionParser::parse("description co 'gift card'").unwrap();
    assert_eq!(expr.clauses[0].operator, Operator::Co);
    assert_eq!(expr.clauses[0].value, Literal::String("gift card".to_string()));
}

#[test]
fn test_parse_mixed_list() {
    let expr = ExpressionParser::parse("monthly_installments in [3, 6, 12]").unwrap();
    assert_eq!(
        expr.clauses[0].value,
        Literal::List(vec![
            Literal::Number(3.0),
            Literal::Number(6.0),
            Literal::Number(12.0),
        ])
    );
}

#[test]
fn test_parse_preserves_field_case() {
    let expr = ExpressionParser::parse("metadata.RiskTier EQ \"High\"").unwrap();
    assert_eq!(
        expr.clauses[0].operand,
        Operand::Field("metadata.RiskTier".to_string())
    );
    assert_eq!(expr.clauses[0].value, Literal::String("High".to_string()));
}

#[test]
fn test_referenced_fields_from_parsed_expression() {
    let expr = ExpressionParser::parse(
        "MLP (identity.email_age_days,3) gt 10 and payer.phone eq \"555\"",
    )
    .unwrap();
    assert_eq!(
        expr.referenced_fields(),
        vec!["identity.email_age_days", "payer.phone"]
    );
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_error_messages_carry_position() {
    let err = ExpressionParser::parse("amount gt 10 xor amount lt 5").unwrap_err();
    assert_eq!(
        err,
        ParseError::UnexpectedToken {
            found: "xor".to_string(),
            expected: "'and' or 'or'",
            position: 13,
        }
    );
    assert!(err.to_string().contains("position 13"));
}

#[test]
fn test_unclosed_formula_and_list() {
    assert!(matches!(
        ExpressionParser::parse("SUM (a,b gt 1"),
        Err(ParseError::UnexpectedToken { .. })
    ));
    assert!(matches!(
        ExpressionParser::parse(r#"country in ["MX","US""#),
        Err(ParseError::UnexpectedEnd { .. })
    ));
}

#[test]
fn test_unterminated_string() {
    assert!(matches!(
        ExpressionParser::parse(r#"payer.email eq "a@b.c"#),
        Err(ParseError::UnterminatedString(_))
    ));
}
