//! Clause comparison semantics

use crate::error::{Result, RuntimeError};
use fraudgate_core::ast::{Literal, Operator};
use fraudgate_core::types::format_number;
use fraudgate_core::Value;
use std::cmp::Ordering;

/// Both sides of a comparison, brought to a common type
enum Aligned {
    Numbers(f64, f64),
    Strings(String, String),
    Bools(bool, bool),
    /// Types that never compare equal
    Unrelated,
}

impl Aligned {
    fn is_equal(&self) -> bool {
        match self {
            Aligned::Numbers(l, r) => l == r,
            Aligned::Strings(l, r) => l == r,
            Aligned::Bools(l, r) => l == r,
            Aligned::Unrelated => false,
        }
    }
}

/// Apply `operator` between an attribute value and a literal
///
/// A null attribute compares false for every operator.
pub fn compare(left: &Value, operator: Operator, right: &Literal) -> Result<bool> {
    if left.is_null() {
        return Ok(false);
    }

    match operator {
        Operator::In => match right {
            Literal::List(items) => {
                for item in items {
                    if align(left, item, operator)?.is_equal() {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            other => Err(mismatch(operator, left, other)),
        },
        op if op.is_string_match() => {
            let haystack = text_of(left).ok_or_else(|| mismatch(operator, left, right))?;
            let needle = match right {
                Literal::String(s) => s.clone(),
                Literal::Number(n) => format_number(*n),
                Literal::Bool(b) => b.to_string(),
                other => return Err(mismatch(operator, left, other)),
            };
            Ok(if operator == Operator::Co {
                haystack.contains(&needle)
            } else {
                haystack.ends_with(&needle)
            })
        }
        _ => {
            let ordering = match align(left, right, operator)? {
                Aligned::Numbers(l, r) => l.partial_cmp(&r),
                Aligned::Strings(l, r) => Some(l.cmp(&r)),
                Aligned::Bools(l, r) if !operator.is_ordering() => Some(l.cmp(&r)),
                Aligned::Bools(..) => return Err(mismatch(operator, left, right)),
                Aligned::Unrelated if operator.is_ordering() => {
                    return Err(mismatch(operator, left, right))
                }
                Aligned::Unrelated => None,
            };
            Ok(apply_ordering(operator, ordering))
        }
    }
}

fn apply_ordering(operator: Operator, ordering: Option<Ordering>) -> bool {
    match (operator, ordering) {
        (Operator::Eq, Some(o)) => o == Ordering::Equal,
        (Operator::Ne, Some(o)) => o != Ordering::Equal,
        (Operator::Ne, None) => true,
        (Operator::Lt, Some(o)) => o == Ordering::Less,
        (Operator::Le, Some(o)) => o != Ordering::Greater,
        (Operator::Gt, Some(o)) => o == Ordering::Greater,
        (Operator::Ge, Some(o)) => o != Ordering::Less,
        _ => false,
    }
}

/// Numeric when the attribute is numeric, textual when it is a string,
/// boolean for booleans
fn align(left: &Value, right: &Literal, operator: Operator) -> Result<Aligned> {
    let aligned = match (left, right) {
        (Value::Number(l), Literal::Number(r)) => Aligned::Numbers(*l, *r),
        (Value::Number(l), Literal::String(r)) => match r.trim().parse::<f64>() {
            Ok(r) => Aligned::Numbers(*l, r),
            Err(_) => Aligned::Strings(format_number(*l), r.clone()),
        },
        (Value::String(l), Literal::Number(r)) => Aligned::Strings(l.clone(), format_number(*r)),
        (Value::String(l), Literal::String(r)) => Aligned::Strings(l.clone(), r.clone()),
        (Value::Bool(l), Literal::Bool(r)) => Aligned::Bools(*l, *r),
        (Value::String(l), Literal::Bool(r)) => match parse_bool(l) {
            Some(l) => Aligned::Bools(l, *r),
            None => Aligned::Unrelated,
        },
        (Value::Bool(l), Literal::String(r)) => match parse_bool(r) {
            Some(r) => Aligned::Bools(*l, r),
            None => Aligned::Unrelated,
        },
        (Value::Array(_) | Value::Object(_), _) | (_, Literal::List(_)) => {
            return Err(mismatch(operator, left, right))
        }
        _ => Aligned::Unrelated,
    };
    Ok(aligned)
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(format_number(*n)),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn mismatch(operator: Operator, left: &Value, right: &Literal) -> RuntimeError {
    let right = match right {
        Literal::Number(_) => "number",
        Literal::String(_) => "string",
        Literal::Bool(_) => "bool",
        Literal::List(_) => "list",
    };
    RuntimeError::TypeMismatch {
        operator: operator.to_string(),
        left: left.type_name().to_string(),
        right: right.to_string(),
    }
}
