//! Expression AST nodes
//!
//! A rule expression is a flat, left-to-right chain of clauses:
//!
//! ```text
//! [not] operand operator value [and|or] [not] operand operator value ...
//! ```
//!
//! The `Display` impls render the canonical text form, which is also what
//! the rule content compiler persists.

use super::operator::{Condition, MathOp, Operator};
use crate::types::{format_number, Value};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A parsed rule expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    pub clauses: Vec<Clause>,
}

/// A single `[not] operand operator value` comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    /// Invert the comparison result before combining
    pub negated: bool,
    pub operand: Operand,
    pub operator: Operator,
    pub value: Literal,
    /// Connective to the following clause; ignored on the last clause
    pub condition: Option<Condition>,
}

/// Left-hand side of a clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operand {
    /// Dotted attribute path (e.g. `payment_method.country`)
    Field(String),
    /// Arithmetic reduction over several attributes (e.g. `SUM (a,b)`)
    Formula { op: MathOp, args: Vec<FormulaArg> },
}

/// Argument of a formula call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FormulaArg {
    Field(String),
    Constant(f64),
}

/// Right-hand side literal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Number(f64),
    String(String),
    Bool(bool),
    List(Vec<Literal>),
}

impl Expression {
    pub fn new(clauses: Vec<Clause>) -> Self {
        Self { clauses }
    }

    /// All attribute paths referenced by the expression, in order of appearance
    pub fn referenced_fields(&self) -> Vec<&str> {
        let mut fields = Vec::new();
        for clause in &self.clauses {
            match &clause.operand {
                Operand::Field(path) => fields.push(path.as_str()),
                Operand::Formula { args, .. } => {
                    for arg in args {
                        if let FormulaArg::Field(path) = arg {
                            fields.push(path.as_str());
                        }
                    }
                }
            }
        }
        fields
    }
}

impl Clause {
    /// Create a plain `field operator value` clause
    pub fn compare(field: impl Into<String>, operator: Operator, value: Literal) -> Self {
        Self {
            negated: false,
            operand: Operand::Field(field.into()),
            operator,
            value,
            condition: None,
        }
    }

    pub fn negate(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    pub fn then(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }
}

impl Literal {
    /// Convert a scalar or array value into a literal
    pub fn from_value(value: &Value) -> Option<Literal> {
        match value {
            Value::Number(n) => Some(Literal::Number(*n)),
            Value::String(s) => Some(Literal::String(s.clone())),
            Value::Bool(b) => Some(Literal::Bool(*b)),
            Value::Array(items) => items
                .iter()
                .map(Literal::from_value)
                .collect::<Option<Vec<_>>>()
                .map(Literal::List),
            Value::Null | Value::Object(_) => None,
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let last = self.clauses.len().saturating_sub(1);
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", clause)?;
            if i < last {
                write!(f, " {}", clause.condition.unwrap_or(Condition::And))?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            f.write_str("not ")?;
        }
        write!(f, "{} {} {}", self.operand, self.operator, self.value)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Field(path) => f.write_str(path),
            Operand::Formula { op, args } => {
                let rendered: Vec<String> = args.iter().map(|a| a.to_string()).collect();
                write!(f, "{} ({})", op, rendered.join(","))
            }
        }
    }
}

impl fmt::Display for FormulaArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormulaArg::Field(path) => f.write_str(path),
            FormulaArg::Constant(n) => f.write_str(&format_number(*n)),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Number(n) => f.write_str(&format_number(*n)),
            Literal::Bool(b) => write!(f, "{}", b),
            Literal::String(s) => {
                f.write_str("\"")?;
                for c in s.chars() {
                    match c {
                        '"' => f.write_str("\\\"")?,
                        '\\' => f.write_str("\\\\")?,
                        _ => write!(f, "{}", c)?,
                    }
                }
                f.write_str("\"")
            }
            Literal::List(items) => {
                let rendered: Vec<String> = items.iter().map(|i| i.to_string()).collect();
                write!(f, "[{}]", rendered.join(","))
            }
        }
    }
}
