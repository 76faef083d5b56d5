//! Rule definitions: authoring clauses, requests and compiled rules

use crate::ast::{Condition, Operator};
use crate::decision::Decision;
use crate::scope::Scope;
use crate::types::Value;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One structured clause of a rule definition
///
/// Exactly one of `field` or the formula pair (`formula_fields`, `formula_op`)
/// is expected to be populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleClause {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub operator: Operator,
    pub value: Value,
    /// Joins this clause to the next; ignored on the last clause
    #[serde(default, deserialize_with = "empty_as_none")]
    pub condition: Option<Condition>,
    #[serde(default)]
    pub not: bool,
    #[serde(default, alias = "fields", skip_serializing_if = "Option::is_none")]
    pub formula_fields: Option<Vec<String>>,
    #[serde(default, alias = "math_operation", skip_serializing_if = "Option::is_none")]
    pub formula_op: Option<String>,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<Condition>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        Some(s) if !s.trim().is_empty() => s.parse().map(Some).map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

impl RuleClause {
    /// Plain `field operator value` clause
    pub fn field(field: impl Into<String>, operator: Operator, value: impl Into<Value>) -> Self {
        Self {
            field: Some(field.into()),
            operator,
            value: value.into(),
            condition: None,
            not: false,
            formula_fields: None,
            formula_op: None,
        }
    }

    /// Formula clause reducing `fields` with `op`
    pub fn formula(
        op: impl Into<String>,
        fields: &[&str],
        operator: Operator,
        value: impl Into<Value>,
    ) -> Self {
        Self {
            field: None,
            operator,
            value: value.into(),
            condition: None,
            not: false,
            formula_fields: Some(fields.iter().map(|f| f.to_string()).collect()),
            formula_op: Some(op.into()),
        }
    }

    pub fn negated(mut self) -> Self {
        self.not = true;
        self
    }

    pub fn then(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Whether any formula content is present
    pub fn is_formula(&self) -> bool {
        self.formula_fields.as_ref().map_or(false, |f| !f.is_empty())
            || self
                .formula_op
                .as_ref()
                .map_or(false, |op| !op.trim().is_empty())
    }

    /// Attribute paths this clause reads
    pub fn referenced_fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = self.field.iter().map(|f| f.as_str()).collect();
        if let Some(formula_fields) = &self.formula_fields {
            fields.extend(formula_fields.iter().map(|f| f.as_str()));
        }
        fields
    }
}

/// Rule definition as submitted through the authoring API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Raw decision token; validated into a [`Decision`]
    pub decision: String,
    #[serde(default)]
    pub is_test: bool,
    #[serde(default, alias = "is_yellow_flag")]
    pub yellow_flag: bool,
    #[serde(default, alias = "global")]
    pub is_global: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_company_id: Option<String>,
    pub clauses: Vec<RuleClause>,
}

impl RuleRequest {
    pub fn new(decision: impl Into<String>, clauses: Vec<RuleClause>) -> Self {
        Self {
            name: String::new(),
            description: None,
            decision: decision.into(),
            is_test: false,
            yellow_flag: false,
            is_global: false,
            company_id: None,
            family_id: None,
            family_company_id: None,
            clauses,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn global(mut self) -> Self {
        self.is_global = true;
        self
    }

    pub fn for_company(mut self, company_id: impl Into<String>) -> Self {
        self.company_id = Some(company_id.into());
        self
    }

    pub fn for_family(mut self, family_id: impl Into<String>) -> Self {
        self.family_id = Some(family_id.into());
        self
    }

    pub fn for_family_company(mut self, family_company_id: impl Into<String>) -> Self {
        self.family_company_id = Some(family_company_id.into());
        self
    }

    pub fn test(mut self) -> Self {
        self.is_test = true;
        self
    }

    pub fn yellow_flag(mut self) -> Self {
        self.yellow_flag = true;
        self
    }

    /// Scope fields that carry a non-blank id, in (company, family, family-company) order
    pub fn populated_scope_fields(&self) -> Vec<(&'static str, &str)> {
        [
            ("company_id", &self.company_id),
            ("family_id", &self.family_id),
            ("family_company_id", &self.family_company_id),
        ]
        .into_iter()
        .filter_map(|(name, value)| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| (name, v))
        })
        .collect()
    }
}

/// A validated rule with its canonical expression text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledRule {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub scope: Scope,
    pub decision: Decision,
    #[serde(default)]
    pub is_test: bool,
    #[serde(default)]
    pub is_yellow_flag: bool,
    #[serde(default)]
    pub is_global: bool,
    /// Reads identity-module attributes; served by the identity component only
    #[serde(default)]
    pub is_identity: bool,
    #[serde(default)]
    pub clauses: Vec<RuleClause>,
    pub expression_text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CompiledRule {
    pub fn new(
        id: impl Into<String>,
        scope: Scope,
        decision: Decision,
        expression_text: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: String::new(),
            description: None,
            is_global: scope.is_global(),
            scope,
            decision,
            is_test: false,
            is_yellow_flag: false,
            is_identity: false,
            clauses: Vec::new(),
            expression_text: expression_text.into(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn as_test(mut self) -> Self {
        self.is_test = true;
        self
    }
}
