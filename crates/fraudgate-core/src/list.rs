//! White, black and gray list entries

use crate::decision::Decision;
use crate::scope::Scope;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Attribute paths that list entries can be keyed on
pub const SEARCHABLE_FIELDS: [&str; 4] = [
    "payer.email",
    "payment_method.card_hash",
    "payer.phone",
    "company_id",
];

/// Kind of list an entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListType {
    White,
    Black,
    Gray,
}

impl fmt::Display for ListType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListType::White => f.write_str("white"),
            ListType::Black => f.write_str("black"),
            ListType::Gray => f.write_str("gray"),
        }
    }
}

/// A single-attribute equality rule used by the list components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub list_type: ListType,
    /// Attribute path (one of [`SEARCHABLE_FIELDS`])
    pub field: String,
    pub value: String,
    pub decision: Decision,
    #[serde(default)]
    pub scope: Scope,
    #[serde(default)]
    pub is_test: bool,
}

impl ListEntry {
    pub fn new(
        id: impl Into<String>,
        list_type: ListType,
        field: impl Into<String>,
        value: impl Into<String>,
        decision: Decision,
    ) -> Self {
        Self {
            id: id.into(),
            list_type,
            field: field.into(),
            value: value.into(),
            decision,
            scope: Scope::Global,
            is_test: false,
        }
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    pub fn as_test(mut self) -> Self {
        self.is_test = true;
        self
    }
}

/// The charge's searchable `(field, value)` pairs used to look up list entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchKeys {
    pairs: Vec<(String, String)>,
}

impl SearchKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((field.into(), value.into()));
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(field, value);
        self
    }

    pub fn contains(&self, field: &str, value: &str) -> bool {
        self.pairs.iter().any(|(f, v)| f == field && v == value)
    }

    /// Whether an entry is keyed on one of these pairs
    pub fn matches_entry(&self, entry: &ListEntry) -> bool {
        self.contains(&entry.field, &entry.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(f, v)| (f.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
