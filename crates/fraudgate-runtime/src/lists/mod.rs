//! List entry matching
//!
//! White, black and gray list entries are single-attribute equality rules.
//! Candidates are fetched by the charge's searchable keys and then checked
//! as an implicit `field eq "value"` clause.

use crate::context::AttributeMap;
use crate::error::Result;
use crate::evaluator::Evaluator;
use fraudgate_core::ast::{Clause, Literal, Operator};
use fraudgate_core::types::format_number;
use fraudgate_core::{ListEntry, SearchKeys, Value, SEARCHABLE_FIELDS};

/// Extract the charge's searchable `(field, value)` pairs
pub fn search_keys(attributes: &AttributeMap) -> SearchKeys {
    let mut keys = SearchKeys::new();
    for field in SEARCHABLE_FIELDS {
        match attributes.get(field) {
            Some(Value::String(s)) if !s.is_empty() => keys.push(field, s.as_str()),
            Some(Value::Number(n)) => keys.push(field, format_number(*n)),
            _ => {}
        }
    }
    keys
}

/// Whether a list entry matches the charge
pub fn entry_matches(entry: &ListEntry, attributes: &AttributeMap) -> Result<bool> {
    let clause = Clause::compare(
        entry.field.as_str(),
        Operator::Eq,
        Literal::String(entry.value.clone()),
    );
    Evaluator::evaluate_clause(&clause, attributes)
}
