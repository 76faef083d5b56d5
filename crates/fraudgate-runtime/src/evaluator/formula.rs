//! Formula operand evaluation

use crate::context::AttributeMap;
use crate::error::{Result, RuntimeError};
use fraudgate_core::ast::{FormulaArg, MathOp};
use fraudgate_core::Value;

/// Reduce formula arguments to a number
///
/// Missing or null fields count as 0. `DIV` returns 0 when any divisor is 0.
pub fn evaluate_formula(op: MathOp, args: &[FormulaArg], attributes: &AttributeMap) -> Result<f64> {
    let operands = args
        .iter()
        .map(|arg| operand_value(op, arg, attributes))
        .collect::<Result<Vec<f64>>>()?;

    let (first, rest) = match operands.split_first() {
        Some(split) => split,
        None => {
            return Err(RuntimeError::InvalidOperation(format!(
                "{} called without operands",
                op
            )))
        }
    };

    let result: f64 = match op {
        MathOp::Sum => operands.iter().sum(),
        MathOp::Mlp => operands.iter().product(),
        MathOp::Subtract => {
            if operands.len() != 2 {
                return Err(RuntimeError::InvalidOperation(format!(
                    "SUBTRACT needs exactly 2 operands, got {}",
                    operands.len()
                )));
            }
            operands[0] - operands[1]
        }
        MathOp::Div => {
            if rest.iter().any(|d| *d == 0.0) {
                0.0
            } else {
                rest.iter().fold(*first, |acc, d| acc / d)
            }
        }
    };

    Ok(result)
}

fn operand_value(op: MathOp, arg: &FormulaArg, attributes: &AttributeMap) -> Result<f64> {
    let path = match arg {
        FormulaArg::Constant(n) => return Ok(*n),
        FormulaArg::Field(path) => path,
    };

    match attributes.get(path) {
        None | Some(Value::Null) => Ok(0.0),
        Some(value) => value.coerce_f64().ok_or_else(|| RuntimeError::TypeMismatch {
            operator: op.to_string(),
            left: format!("{} ({})", path, value.type_name()),
            right: "number".to_string(),
        }),
    }
}
