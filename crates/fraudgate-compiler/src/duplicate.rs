//! Duplicate rule detection

use crate::error::{CompileError, Result};
use fraudgate_core::CompiledRule;

/// Reject `expression_text` if another rule in `existing` already compiles to it
///
/// `existing` is expected to hold the rules of the target scope. The rule being
/// updated (matched by id) is not a duplicate of itself.
pub fn check_duplicate(
    expression_text: &str,
    updating_id: Option<&str>,
    existing: &[CompiledRule],
) -> Result<()> {
    match existing
        .iter()
        .filter(|rule| Some(rule.id.as_str()) != updating_id)
        .find(|rule| rule.expression_text == expression_text)
    {
        Some(rule) => Err(CompileError::DuplicateRule {
            existing_id: rule.id.clone(),
        }),
        None => Ok(()),
    }
}
