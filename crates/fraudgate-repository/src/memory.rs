//! In-memory repositories
//!
//! Memory-backed storage for tests, local runs and seeded deployments.
//! Data is lost when the process restarts.

use crate::error::{RepositoryError, RepositoryResult};
use crate::traits::{FamilyResolver, ListRepository, RuleRepository};
use async_trait::async_trait;
use fraudgate_core::{CompiledRule, FamilyMembership, ListEntry, ListType, ScopeFilter, SearchKeys};
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;
use tracing::debug;

/// In-memory rule repository
///
/// Rules are kept ordered by id so `find` results are stable.
pub struct MemoryRuleRepository {
    rules: RwLock<BTreeMap<String, CompiledRule>>,
}

impl MemoryRuleRepository {
    pub fn new() -> Self {
        Self {
            rules: RwLock::new(BTreeMap::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.rules.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rules.read().await.is_empty()
    }

    /// Id of another rule holding the same scope and expression text
    fn content_conflict<'a>(
        rules: &'a BTreeMap<String, CompiledRule>,
        candidate: &CompiledRule,
    ) -> Option<&'a str> {
        rules
            .values()
            .find(|existing| {
                existing.id != candidate.id
                    && existing.scope == candidate.scope
                    && existing.expression_text == candidate.expression_text
            })
            .map(|existing| existing.id.as_str())
    }
}

impl Default for MemoryRuleRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RuleRepository for MemoryRuleRepository {
    async fn find(&self, filter: &ScopeFilter) -> RepositoryResult<Vec<CompiledRule>> {
        let rules = self.rules.read().await;
        Ok(rules.values().filter(|r| filter.matches(r)).cloned().collect())
    }

    async fn get(&self, id: &str) -> RepositoryResult<CompiledRule> {
        let rules = self.rules.read().await;
        rules
            .get(id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound { id: id.to_string() })
    }

    async fn insert(&self, rule: CompiledRule) -> RepositoryResult<CompiledRule> {
        let mut rules = self.rules.write().await;

        if rules.contains_key(&rule.id) {
            return Err(RepositoryError::Conflict {
                existing_id: rule.id.clone(),
            });
        }
        if let Some(existing_id) = Self::content_conflict(&rules, &rule) {
            return Err(RepositoryError::Conflict {
                existing_id: existing_id.to_string(),
            });
        }

        debug!("Inserting rule {} under {}", rule.id, rule.scope);
        rules.insert(rule.id.clone(), rule.clone());
        Ok(rule)
    }

    async fn update(&self, rule: CompiledRule) -> RepositoryResult<CompiledRule> {
        let mut rules = self.rules.write().await;

        if !rules.contains_key(&rule.id) {
            return Err(RepositoryError::NotFound { id: rule.id.clone() });
        }
        if let Some(existing_id) = Self::content_conflict(&rules, &rule) {
            return Err(RepositoryError::Conflict {
                existing_id: existing_id.to_string(),
            });
        }

        debug!("Updating rule {} under {}", rule.id, rule.scope);
        rules.insert(rule.id.clone(), rule.clone());
        Ok(rule)
    }

    async fn delete(&self, id: &str) -> RepositoryResult<()> {
        let mut rules = self.rules.write().await;
        rules
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::NotFound { id: id.to_string() })
    }
}

/// In-memory list repository
pub struct MemoryListRepository {
    entries: RwLock<HashMap<ListType, Vec<ListEntry>>>,
}

impl MemoryListRepository {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Repository pre-filled with `entries`
    pub fn with_entries(entries: impl IntoIterator<Item = ListEntry>) -> Self {
        let mut by_type: HashMap<ListType, Vec<ListEntry>> = HashMap::new();
        for entry in entries {
            by_type.entry(entry.list_type).or_default().push(entry);
        }
        Self {
            entries: RwLock::new(by_type),
        }
    }
}

impl Default for MemoryListRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ListRepository for MemoryListRepository {
    async fn find(&self, list_type: ListType, keys: &SearchKeys) -> RepositoryResult<Vec<ListEntry>> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(&list_type)
            .map(|list| {
                list.iter()
                    .filter(|entry| keys.matches_entry(entry))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn insert(&self, entry: ListEntry) -> RepositoryResult<ListEntry> {
        let mut entries = self.entries.write().await;
        let list = entries.entry(entry.list_type).or_default();

        if list.iter().any(|e| e.id == entry.id) {
            return Err(RepositoryError::Conflict {
                existing_id: entry.id.clone(),
            });
        }

        debug!("Adding {} list entry {} on {}", entry.list_type, entry.id, entry.field);
        list.push(entry.clone());
        Ok(entry)
    }
}

/// Family resolver backed by a fixed company -> membership table
pub struct StaticFamilyResolver {
    memberships: RwLock<HashMap<String, FamilyMembership>>,
}

impl StaticFamilyResolver {
    pub fn new() -> Self {
        Self {
            memberships: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_memberships(memberships: HashMap<String, FamilyMembership>) -> Self {
        Self {
            memberships: RwLock::new(memberships),
        }
    }

    pub async fn set(&self, company_id: impl Into<String>, membership: FamilyMembership) {
        self.memberships
            .write()
            .await
            .insert(company_id.into(), membership);
    }
}

impl Default for StaticFamilyResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FamilyResolver for StaticFamilyResolver {
    async fn resolve(&self, company_id: &str) -> RepositoryResult<FamilyMembership> {
        let memberships = self.memberships.read().await;
        Ok(memberships.get(company_id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fraudgate_core::{Decision, Scope};

    fn rule(id: &str, scope: Scope, text: &str) -> CompiledRule {
        CompiledRule::new(id, scope, Decision::Declined, text)
    }

    #[tokio::test]
    async fn test_rule_crud() {
        let repo = MemoryRuleRepository::new();
        repo.insert(rule("r1", Scope::Company("c1".into()), "amount gt 10"))
            .await
            .unwrap();

        let mut loaded = repo.get("r1").await.unwrap();
        assert_eq!(loaded.expression_text, "amount gt 10");

        loaded.expression_text = "amount gt 20".to_string();
        repo.update(loaded).await.unwrap();
        assert_eq!(repo.get("r1").await.unwrap().expression_text, "amount gt 20");

        repo.delete("r1").await.unwrap();
        assert!(matches!(
            repo.get("r1").await,
            Err(RepositoryError::NotFound { .. })
        ));
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_content_uniqueness_per_scope() {
        let repo = MemoryRuleRepository::new();
        repo.insert(rule("r1", Scope::Company("c1".into()), "amount gt 10"))
            .await
            .unwrap();

        let err = repo
            .insert(rule("r2", Scope::Company("c1".into()), "amount gt 10"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict { existing_id } if existing_id == "r1"));

        // Same text under another scope is fine
        repo.insert(rule("r3", Scope::Company("c2".into()), "amount gt 10"))
            .await
            .unwrap();

        // Re-saving a rule with its own text is not a conflict
        repo.update(rule("r1", Scope::Company("c1".into()), "amount gt 10"))
            .await
            .unwrap();
        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn test_update_missing_rule() {
        let repo = MemoryRuleRepository::new();
        let err = repo.update(rule("ghost", Scope::Global, "amount gt 1")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_find_by_filter() {
        let repo = MemoryRuleRepository::new();
        repo.insert(rule("g1", Scope::Global, "amount gt 1")).await.unwrap();
        repo.insert(rule("c1", Scope::Company("c1".into()), "amount gt 1"))
            .await
            .unwrap();

        let global = repo.find(&ScopeFilter::Global).await.unwrap();
        assert_eq!(global.len(), 1);
        assert_eq!(global[0].id, "g1");

        let company = repo.find(&ScopeFilter::Company("c1".into())).await.unwrap();
        assert_eq!(company[0].id, "c1");
    }

    #[tokio::test]
    async fn test_list_find_by_keys() {
        let repo = MemoryListRepository::with_entries(vec![
            ListEntry::new("b1", ListType::Black, "payer.email", "bad@x.com", Decision::Declined),
            ListEntry::new("b2", ListType::Black, "payer.phone", "555", Decision::Declined),
            ListEntry::new("w1", ListType::White, "payer.email", "bad@x.com", Decision::Accepted),
        ]);

        let keys = SearchKeys::new().with("payer.email", "bad@x.com");
        let black = repo.find(ListType::Black, &keys).await.unwrap();
        assert_eq!(black.len(), 1);
        assert_eq!(black[0].id, "b1");

        assert!(repo.find(ListType::Gray, &keys).await.unwrap().is_empty());

        let dup = ListEntry::new("b1", ListType::Black, "payer.email", "x", Decision::Declined);
        assert!(matches!(
            repo.insert(dup).await,
            Err(RepositoryError::Conflict { .. })
        ));
    }

    #[tokio::test]
    async fn test_family_resolver() {
        let resolver = StaticFamilyResolver::new();
        resolver
            .set(
                "c1",
                FamilyMembership {
                    family_id: Some("f1".to_string()),
                    family_company_ids: vec!["fc1".to_string()],
                },
            )
            .await;

        let membership = resolver.resolve("c1").await.unwrap();
        assert_eq!(membership.family_id.as_deref(), Some("f1"));
        assert_eq!(resolver.resolve("c2").await.unwrap(), FamilyMembership::default());
    }
}
