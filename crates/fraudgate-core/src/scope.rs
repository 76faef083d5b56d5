//! Rule scopes and the filters used to select candidate rules

use crate::decision::ComponentName;
use crate::rule::CompiledRule;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a rule or list entry applies
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum Scope {
    #[default]
    Global,
    Company(String),
    FamilyMcc(String),
    FamilyCompany(String),
}

impl Scope {
    pub fn is_global(&self) -> bool {
        matches!(self, Scope::Global)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Global => f.write_str("global"),
            Scope::Company(id) => write!(f, "company:{}", id),
            Scope::FamilyMcc(id) => write!(f, "family_mcc:{}", id),
            Scope::FamilyCompany(id) => write!(f, "family_company:{}", id),
        }
    }
}

/// A company's MCC family and family-of-companies groupings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyMembership {
    #[serde(default)]
    pub family_id: Option<String>,
    #[serde(default)]
    pub family_company_ids: Vec<String>,
}

/// Every scope grouping a charge belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargeScope {
    pub company_id: String,
    pub family_id: Option<String>,
    pub family_company_ids: Vec<String>,
}

impl ChargeScope {
    pub fn new(company_id: impl Into<String>, membership: FamilyMembership) -> Self {
        Self {
            company_id: company_id.into(),
            family_id: membership.family_id,
            family_company_ids: membership.family_company_ids,
        }
    }

    /// Whether something stored under `scope` applies to this charge
    pub fn applies(&self, scope: &Scope) -> bool {
        match scope {
            Scope::Global => true,
            Scope::Company(id) => *id == self.company_id,
            Scope::FamilyMcc(id) => self.family_id.as_deref() == Some(id.as_str()),
            Scope::FamilyCompany(id) => self.family_company_ids.iter().any(|fc| fc == id),
        }
    }

    /// Global plus every scoped grouping of the charge
    pub fn applicable_scopes(&self) -> Vec<Scope> {
        let mut scopes = vec![Scope::Global, Scope::Company(self.company_id.clone())];
        if let Some(family_id) = &self.family_id {
            scopes.push(Scope::FamilyMcc(family_id.clone()));
        }
        scopes.extend(
            self.family_company_ids
                .iter()
                .map(|id| Scope::FamilyCompany(id.clone())),
        );
        scopes
    }
}

/// Repository query selecting compiled rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeFilter {
    /// Every rule stored under exactly this scope
    Exact(Scope),
    /// Plain rules of one company
    Company(String),
    /// Plain rules of one MCC family
    FamilyMcc(String),
    /// Plain rules of any of these families of companies
    FamilyCompany(Vec<String>),
    /// Plain global rules
    Global,
    /// Identity-module rules applicable under any of these scopes
    IdentityModule(Vec<Scope>),
    /// Yellow-flag rules applicable under any of these scopes
    YellowFlag(Vec<Scope>),
}

impl ScopeFilter {
    /// Filter for a rule component, `None` for list components or when the
    /// charge has no grouping of the required kind
    pub fn for_component(component: ComponentName, charge: &ChargeScope) -> Option<ScopeFilter> {
        match component {
            ComponentName::Whitelist | ComponentName::Blacklist | ComponentName::Graylist => None,
            ComponentName::CompanyRules => Some(ScopeFilter::Company(charge.company_id.clone())),
            ComponentName::FamilyMccRules => charge.family_id.clone().map(ScopeFilter::FamilyMcc),
            ComponentName::FamilyCompanyRules => {
                if charge.family_company_ids.is_empty() {
                    None
                } else {
                    Some(ScopeFilter::FamilyCompany(charge.family_company_ids.clone()))
                }
            }
            ComponentName::GlobalRules => Some(ScopeFilter::Global),
            ComponentName::IdentityModule => {
                Some(ScopeFilter::IdentityModule(charge.applicable_scopes()))
            }
            ComponentName::YellowFlag => Some(ScopeFilter::YellowFlag(charge.applicable_scopes())),
        }
    }

    pub fn matches(&self, rule: &CompiledRule) -> bool {
        let plain = !rule.is_yellow_flag && !rule.is_identity;
        match self {
            ScopeFilter::Exact(scope) => rule.scope == *scope,
            ScopeFilter::Company(id) => plain && rule.scope == Scope::Company(id.clone()),
            ScopeFilter::FamilyMcc(id) => plain && rule.scope == Scope::FamilyMcc(id.clone()),
            ScopeFilter::FamilyCompany(ids) => {
                plain && matches!(&rule.scope, Scope::FamilyCompany(id) if ids.contains(id))
            }
            ScopeFilter::Global => plain && rule.scope.is_global(),
            ScopeFilter::IdentityModule(scopes) => {
                rule.is_identity && !rule.is_yellow_flag && scopes.contains(&rule.scope)
            }
            ScopeFilter::YellowFlag(scopes) => rule.is_yellow_flag && scopes.contains(&rule.scope),
        }
    }
}
