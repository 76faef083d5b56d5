//! Operators for rule expressions

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Comparison operators
///
/// Every operator has a canonical keyword (`eq`, `lt`, ...). The symbolic
/// spellings (`==`, `<`, ...) are accepted on input and map to the same
/// variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Operator {
    /// Equal (eq, ==)
    Eq,
    /// Not equal (ne, !=)
    Ne,
    /// Less than (lt, <)
    Lt,
    /// Less than or equal (le, <=)
    Le,
    /// Greater than (gt, >)
    Gt,
    /// Greater than or equal (ge, >=)
    Ge,
    /// Substring containment (co)
    Co,
    /// Suffix match (ew)
    Ew,
    /// Membership in a literal list (in)
    In,
}

impl Operator {
    /// Canonical keyword
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Ne => "ne",
            Operator::Lt => "lt",
            Operator::Le => "le",
            Operator::Gt => "gt",
            Operator::Ge => "ge",
            Operator::Co => "co",
            Operator::Ew => "ew",
            Operator::In => "in",
        }
    }

    /// Returns true for the ordering operators (lt, le, gt, ge)
    pub fn is_ordering(&self) -> bool {
        matches!(self, Operator::Lt | Operator::Le | Operator::Gt | Operator::Ge)
    }

    /// Returns true for the string-only operators
    pub fn is_string_match(&self) -> bool {
        matches!(self, Operator::Co | Operator::Ew)
    }
}

impl FromStr for Operator {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "eq" | "==" => Ok(Operator::Eq),
            "ne" | "!=" => Ok(Operator::Ne),
            "lt" | "<" => Ok(Operator::Lt),
            "le" | "<=" => Ok(Operator::Le),
            "gt" | ">" => Ok(Operator::Gt),
            "ge" | ">=" => Ok(Operator::Ge),
            "co" => Ok(Operator::Co),
            "ew" => Ok(Operator::Ew),
            "in" => Ok(Operator::In),
            _ => Err(CoreError::UnknownOperator(s.to_string())),
        }
    }
}

impl TryFrom<String> for Operator {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        op.as_str().to_string()
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Arithmetic reductions usable as a clause's left-hand operand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MathOp {
    /// Sum of all operands
    Sum,
    /// First operand minus second (exactly two operands)
    Subtract,
    /// Product of all operands
    Mlp,
    /// First operand divided by second; a zero divisor yields 0
    Div,
}

impl MathOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            MathOp::Sum => "SUM",
            MathOp::Subtract => "SUBTRACT",
            MathOp::Mlp => "MLP",
            MathOp::Div => "DIV",
        }
    }

    /// Exact operand count required, if the operation fixes one
    pub fn required_arity(&self) -> Option<usize> {
        match self {
            MathOp::Subtract => Some(2),
            _ => None,
        }
    }
}

impl FromStr for MathOp {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SUM" => Ok(MathOp::Sum),
            "SUBTRACT" => Ok(MathOp::Subtract),
            "MLP" => Ok(MathOp::Mlp),
            "DIV" => Ok(MathOp::Div),
            _ => Err(CoreError::UnknownMathOp(s.to_string())),
        }
    }
}

impl TryFrom<String> for MathOp {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MathOp> for String {
    fn from(op: MathOp) -> Self {
        op.as_str().to_string()
    }
}

impl fmt::Display for MathOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connective joining a clause to the next one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Condition {
    And,
    Or,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::And => "and",
            Condition::Or => "or",
        }
    }

    /// Fold a running result with the next clause's result
    pub fn combine(&self, left: bool, right: bool) -> bool {
        match self {
            Condition::And => left && right,
            Condition::Or => left || right,
        }
    }
}

impl FromStr for Condition {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "and" | "&&" => Ok(Condition::And),
            "or" | "||" => Ok(Condition::Or),
            _ => Err(CoreError::UnknownCondition(s.to_string())),
        }
    }
}

impl TryFrom<String> for Condition {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Condition> for String {
    fn from(c: Condition) -> Self {
        c.as_str().to_string()
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
