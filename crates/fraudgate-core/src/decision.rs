//! Decisions and the console that orders rule sources

use crate::error::CoreError;
use crate::list::ListType;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Verdict carried by a rule, list entry, component or whole evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    #[serde(alias = "Accepted", alias = "ACCEPTED")]
    Accepted,
    #[serde(alias = "Declined", alias = "DECLINED")]
    Declined,
    #[default]
    #[serde(alias = "Undecided", alias = "UNDECIDED")]
    Undecided,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Accepted => "accepted",
            Decision::Declined => "declined",
            Decision::Undecided => "undecided",
        }
    }

    pub fn is_decisive(&self) -> bool {
        !matches!(self, Decision::Undecided)
    }
}

impl FromStr for Decision {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "accepted" => Ok(Decision::Accepted),
            "declined" => Ok(Decision::Declined),
            "undecided" => Ok(Decision::Undecided),
            _ => Err(CoreError::UnknownDecision(s.to_string())),
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rule source a console component consults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentName {
    Whitelist,
    Blacklist,
    Graylist,
    CompanyRules,
    FamilyCompanyRules,
    FamilyMccRules,
    GlobalRules,
    IdentityModule,
    YellowFlag,
}

impl ComponentName {
    pub const ALL: [ComponentName; 9] = [
        ComponentName::Whitelist,
        ComponentName::Blacklist,
        ComponentName::Graylist,
        ComponentName::CompanyRules,
        ComponentName::FamilyCompanyRules,
        ComponentName::FamilyMccRules,
        ComponentName::GlobalRules,
        ComponentName::IdentityModule,
        ComponentName::YellowFlag,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentName::Whitelist => "whitelist",
            ComponentName::Blacklist => "blacklist",
            ComponentName::Graylist => "graylist",
            ComponentName::CompanyRules => "company_rules",
            ComponentName::FamilyCompanyRules => "family_company_rules",
            ComponentName::FamilyMccRules => "family_mcc_rules",
            ComponentName::GlobalRules => "global_rules",
            ComponentName::IdentityModule => "identity_module",
            ComponentName::YellowFlag => "yellow_flag",
        }
    }

    /// List type backing a list component, `None` for rule components
    pub fn list_type(&self) -> Option<ListType> {
        match self {
            ComponentName::Whitelist => Some(ListType::White),
            ComponentName::Blacklist => Some(ListType::Black),
            ComponentName::Graylist => Some(ListType::Gray),
            _ => None,
        }
    }

    pub fn is_list(&self) -> bool {
        self.list_type().is_some()
    }

    /// Whether the component has a secondary (test) decision channel
    pub fn supports_test_decision(&self) -> bool {
        !matches!(self, ComponentName::IdentityModule | ComponentName::YellowFlag)
    }

    /// Priority used when a console does not spell one out
    pub fn default_priority(&self) -> Vec<Decision> {
        match self {
            ComponentName::Whitelist => vec![Decision::Accepted],
            ComponentName::Blacklist => vec![Decision::Declined],
            ComponentName::YellowFlag => vec![Decision::Undecided],
            _ => vec![Decision::Declined, Decision::Accepted, Decision::Undecided],
        }
    }
}

impl FromStr for ComponentName {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_").replace(' ', "_");
        ComponentName::ALL
            .iter()
            .find(|c| c.as_str() == normalized)
            .copied()
            .ok_or_else(|| CoreError::UnknownComponent(s.to_string()))
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rule source in a console, with its tie-break order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleComponent {
    pub name: ComponentName,
    /// Decision precedence when matching rules disagree (first entry wins)
    #[serde(default)]
    pub priority: Vec<Decision>,
}

impl ConsoleComponent {
    pub fn new(name: ComponentName, priority: Vec<Decision>) -> Self {
        Self { name, priority }
    }

    /// Component with its default priority
    pub fn with_default_priority(name: ComponentName) -> Self {
        Self {
            name,
            priority: name.default_priority(),
        }
    }

    /// Priority to apply, falling back to the component default when empty
    pub fn effective_priority(&self) -> Vec<Decision> {
        if self.priority.is_empty() {
            self.name.default_priority()
        } else {
            self.priority.clone()
        }
    }
}

/// Ordered sequence of console components
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Console {
    pub components: Vec<ConsoleComponent>,
}

impl Console {
    pub fn new(components: Vec<ConsoleComponent>) -> Self {
        Self { components }
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConsoleComponent> {
        self.components.iter()
    }

    /// First component name that appears more than once
    pub fn duplicate_component(&self) -> Option<ComponentName> {
        let mut seen = HashSet::new();
        self.components
            .iter()
            .map(|c| c.name)
            .find(|name| !seen.insert(*name))
    }
}

impl Default for Console {
    fn default() -> Self {
        Self {
            components: ComponentName::ALL
                .iter()
                .map(|name| ConsoleComponent::with_default_priority(*name))
                .collect(),
        }
    }
}
