//! Rule content compiler
//!
//! Turns the structured clauses of a rule definition into the canonical
//! expression text the evaluator consumes. Formula clauses are emitted
//! before plain field clauses; relative order within each group is kept.

use crate::error::{CompileError, Result};
use fraudgate_core::ast::{Clause, Expression, FormulaArg, Literal, MathOp, Operand, Operator};
use fraudgate_core::{RuleClause, Value};
use fraudgate_parser::ExpressionParser;

/// Attribute prefix that marks identity-module rules
pub const IDENTITY_PREFIX: &str = "identity.";

/// Compiles rule clauses to expression text
pub struct RuleContentCompiler;

impl RuleContentCompiler {
    /// Compile clauses into canonical expression text
    pub fn compile(clauses: &[RuleClause]) -> Result<String> {
        let expression = Self::compile_expression(clauses)?;
        let text = expression.to_string();

        // The stored text must be readable by the evaluator
        ExpressionParser::parse(&text)?;

        Ok(text)
    }

    /// Build the expression AST without rendering it
    pub fn compile_expression(clauses: &[RuleClause]) -> Result<Expression> {
        if clauses.is_empty() {
            return Err(CompileError::InvalidClause {
                clause: 0,
                reason: "rule has no clauses".to_string(),
            });
        }

        let (formulas, fields): (Vec<_>, Vec<_>) = clauses
            .iter()
            .enumerate()
            .partition(|(_, clause)| clause.is_formula());

        let compiled = formulas
            .into_iter()
            .chain(fields)
            .map(|(index, clause)| Self::compile_clause(index, clause))
            .collect::<Result<Vec<_>>>()?;

        Ok(Expression::new(compiled))
    }

    /// Whether any clause reads an identity-module attribute
    pub fn references_identity(clauses: &[RuleClause]) -> bool {
        clauses.iter().any(|clause| {
            clause
                .referenced_fields()
                .iter()
                .any(|field| field.trim().starts_with(IDENTITY_PREFIX))
        })
    }

    fn compile_clause(index: usize, clause: &RuleClause) -> Result<Clause> {
        let operand = Self::compile_operand(index, clause)?;
        let value = Self::compile_value(index, clause.operator, &clause.value)?;

        Ok(Clause {
            negated: clause.not,
            operand,
            operator: clause.operator,
            value,
            condition: clause.condition,
        })
    }

    fn compile_operand(index: usize, clause: &RuleClause) -> Result<Operand> {
        let field = clause
            .field
            .as_deref()
            .map(str::trim)
            .filter(|f| !f.is_empty());

        match (field, clause.is_formula()) {
            (Some(field), false) => Ok(Operand::Field(field.to_string())),
            (None, true) => {
                let op_text = clause.formula_op.as_deref().unwrap_or_default();
                let op: MathOp = op_text.parse().map_err(|_| CompileError::InvalidFormula {
                    clause: index,
                    reason: format!("unknown math operation '{}'", op_text),
                })?;
                let args = clause
                    .formula_fields
                    .iter()
                    .flatten()
                    .map(|f| FormulaArg::Field(f.trim().to_string()))
                    .collect();
                Ok(Operand::Formula { op, args })
            }
            (Some(_), true) => Err(CompileError::InvalidClause {
                clause: index,
                reason: "clause sets both a field and a formula".to_string(),
            }),
            (None, false) => Err(CompileError::InvalidClause {
                clause: index,
                reason: "clause sets neither a field nor a formula".to_string(),
            }),
        }
    }

    fn compile_value(index: usize, operator: Operator, value: &Value) -> Result<Literal> {
        // "true"/"false" strings are booleans only where equality applies
        let unquote_bools = matches!(operator, Operator::Eq | Operator::Ne | Operator::In);
        let literal = match value {
            Value::Array(items) => items
                .iter()
                .map(|item| Self::scalar_literal(item, unquote_bools))
                .collect::<Option<Vec<_>>>()
                .map(Literal::List),
            scalar => Self::scalar_literal(scalar, unquote_bools),
        }
        .ok_or_else(|| CompileError::InvalidClause {
            clause: index,
            reason: format!("unsupported {} value", value.type_name()),
        })?;

        match (operator, literal) {
            (Operator::In, Literal::List(items)) if items.is_empty() => {
                Err(CompileError::InvalidClause {
                    clause: index,
                    reason: "'in' needs at least one value".to_string(),
                })
            }
            (Operator::In, Literal::List(items)) => Ok(Literal::List(items)),
            (Operator::In, scalar) => Ok(Literal::List(vec![scalar])),
            (_, Literal::List(_)) => Err(CompileError::InvalidClause {
                clause: index,
                reason: format!("list values are only allowed with 'in', not '{}'", operator),
            }),
            (_, scalar) => Ok(scalar),
        }
    }

    fn scalar_literal(value: &Value, unquote_bools: bool) -> Option<Literal> {
        match value {
            Value::String(s) if unquote_bools && s.eq_ignore_ascii_case("true") => Some(Literal::Bool(true)),
            Value::String(s) if unquote_bools && s.eq_ignore_ascii_case("false") => Some(Literal::Bool(false)),
            Value::Array(_) => None,
            other => Literal::from_value(other),
        }
    }
}
