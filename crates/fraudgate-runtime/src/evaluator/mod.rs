//! Expression evaluator
//!
//! Evaluates rule expression text against an [`AttributeMap`]. Clauses are
//! folded strictly left to right: each clause's own condition joins it to the
//! next one, with no precedence between `and` and `or`.

mod comparison;
mod formula;

pub use comparison::compare;
pub use formula::evaluate_formula;

use crate::context::AttributeMap;
use crate::error::{Result, RuntimeError};
use fraudgate_core::ast::{Clause, Condition, Expression, Operand};
use fraudgate_core::Value;
use fraudgate_parser::ExpressionParser;

/// Stateless expression evaluator
pub struct Evaluator;

impl Evaluator {
    /// Parse and evaluate expression text
    pub fn evaluate(expression_text: &str, attributes: &AttributeMap) -> Result<bool> {
        if expression_text.trim().is_empty() {
            return Err(RuntimeError::EmptyExpression);
        }
        let expression = ExpressionParser::parse(expression_text)?;
        Self::evaluate_expression(&expression, attributes)
    }

    /// Evaluate an already parsed expression
    pub fn evaluate_expression(expression: &Expression, attributes: &AttributeMap) -> Result<bool> {
        let mut result: Option<bool> = None;
        let mut pending = Condition::And;

        for clause in &expression.clauses {
            let value = Self::evaluate_clause(clause, attributes)?;
            result = Some(match result {
                None => value,
                Some(acc) => pending.combine(acc, value),
            });
            pending = clause.condition.unwrap_or(Condition::And);
        }

        result.ok_or(RuntimeError::EmptyExpression)
    }

    /// Evaluate one clause, including its `not`
    pub fn evaluate_clause(clause: &Clause, attributes: &AttributeMap) -> Result<bool> {
        let matched = match &clause.operand {
            Operand::Field(path) => {
                let value = attributes
                    .get(path)
                    .ok_or_else(|| RuntimeError::MissingOperand(path.clone()))?;
                compare(value, clause.operator, &clause.value)?
            }
            Operand::Formula { op, args } => {
                let value = Value::Number(evaluate_formula(*op, args, attributes)?);
                compare(&value, clause.operator, &clause.value)?
            }
        };

        Ok(matched != clause.negated)
    }
}
