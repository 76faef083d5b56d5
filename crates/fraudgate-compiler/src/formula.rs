//! Formula clause validation

use crate::error::{CompileError, Result};
use fraudgate_core::{MathOp, RuleClause};

/// Check every formula clause of a rule definition
///
/// A formula clause must set both its fields and its math operation, name at
/// least two attribute paths (exactly two for `SUBTRACT`), and use one of the
/// known operations. Numeric constants are not accepted as formula fields.
pub fn validate_formulas(clauses: &[RuleClause]) -> Result<()> {
    for (index, clause) in clauses.iter().enumerate() {
        validate_formula(index, clause)?;
    }
    Ok(())
}

fn validate_formula(index: usize, clause: &RuleClause) -> Result<()> {
    let invalid = |reason: String| CompileError::InvalidFormula {
        clause: index,
        reason,
    };

    let fields: Vec<&str> = clause
        .formula_fields
        .iter()
        .flatten()
        .map(|f| f.trim())
        .collect();
    let op = clause
        .formula_op
        .as_deref()
        .map(str::trim)
        .filter(|op| !op.is_empty());

    let op = match (fields.is_empty(), op) {
        (true, None) => return Ok(()),
        (false, None) => return Err(invalid("formula fields given without a math operation".to_string())),
        (true, Some(_)) => return Err(invalid("math operation given without formula fields".to_string())),
        (false, Some(op)) => op,
    };

    let math_op: MathOp = op
        .parse()
        .map_err(|_| invalid(format!("unknown math operation '{}'", op)))?;

    if fields.len() < 2 {
        return Err(invalid(format!(
            "{} needs at least 2 fields, got {}",
            math_op,
            fields.len()
        )));
    }

    if let Some(arity) = math_op.required_arity() {
        if fields.len() != arity {
            return Err(invalid(format!(
                "{} needs exactly {} fields, got {}",
                math_op,
                arity,
                fields.len()
            )));
        }
    }

    if let Some(constant) = fields.iter().find(|f| f.is_empty() || f.parse::<f64>().is_ok()) {
        return Err(invalid(format!(
            "formula field '{}' must be an attribute path",
            constant
        )));
    }

    Ok(())
}
