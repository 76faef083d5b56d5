//! Field Lookup Utilities
//!
//! Resolves dot-notation paths against nested attribute maps.

use fraudgate_core::Value;
use std::collections::HashMap;

/// Get a value by dotted path
///
/// The full path is tried as a literal key first, so maps that store
/// already-flattened keys (`"payer.email"`) resolve directly. Otherwise the
/// path is split at each `.` (longest prefix first) and the remainder is
/// resolved inside the nested object found under the prefix.
pub(super) fn get_nested_value<'a>(data: &'a HashMap<String, Value>, path: &str) -> Option<&'a Value> {
    if let Some(value) = data.get(path) {
        return Some(value);
    }

    for (i, _) in path.rmatch_indices('.') {
        let (head, tail) = (&path[..i], &path[i + 1..]);
        if let Some(Value::Object(inner)) = data.get(head) {
            if let Some(value) = get_nested_value(inner, tail) {
                return Some(value);
            }
        }
    }

    None
}
