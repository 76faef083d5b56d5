//! Seed loader
//!
//! Reads a YAML seed document describing rules, list entries and family
//! memberships:
//!
//! ```yaml
//! rules:
//!   - id: r-high-amount
//!     decision: declined
//!     company_id: c1
//!     clauses:
//!       - { field: amount, operator: gt, value: 50000 }
//! lists:
//!   - { id: wl-1, type: white, field: payer.email, value: vip@example.com, decision: accepted }
//! families:
//!   c1: { family_id: f-travel, family_company_ids: [fc-1] }
//! ```
//!
//! Rules stay in their authoring form; callers push them through validation
//! and compilation before storing them.

use crate::error::RepositoryResult;
use crate::memory::{MemoryListRepository, StaticFamilyResolver};
use crate::traits::ListRepository;
use fraudgate_core::{FamilyMembership, ListEntry, RuleRequest};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::info;

/// A rule in authoring form, optionally pinned to an id
#[derive(Debug, Clone, Deserialize)]
pub struct SeedRule {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(flatten)]
    pub request: RuleRequest,
}

/// Parsed seed document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedDocument {
    #[serde(default)]
    pub rules: Vec<SeedRule>,
    #[serde(default)]
    pub lists: Vec<ListEntry>,
    #[serde(default)]
    pub families: HashMap<String, FamilyMembership>,
}

impl SeedDocument {
    pub fn from_yaml(content: &str) -> RepositoryResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Install list entries and family memberships
    pub async fn install(
        &self,
        lists: &MemoryListRepository,
        families: &StaticFamilyResolver,
    ) -> RepositoryResult<()> {
        for entry in &self.lists {
            lists.insert(entry.clone()).await?;
        }
        for (company_id, membership) in &self.families {
            families.set(company_id.clone(), membership.clone()).await;
        }
        Ok(())
    }
}

/// Loads seed documents from disk
pub struct RepositoryLoader {
    path: PathBuf,
}

impl RepositoryLoader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load_seed(&self) -> RepositoryResult<SeedDocument> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let seed = SeedDocument::from_yaml(&content)?;
        info!(
            "Loaded seed {}: {} rules, {} list entries, {} families",
            self.path.display(),
            seed.rules.len(),
            seed.lists.len(),
            seed.families.len()
        );
        Ok(seed)
    }
}
