//! Common test utilities for SDK integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use fraudgate_core::{CompiledRule, FamilyMembership, ListEntry, RuleRequest, ScopeFilter};
use fraudgate_repository::{
    MemoryListRepository, MemoryRuleRepository, RepositoryError, RepositoryResult, RuleRepository,
    StaticFamilyResolver,
};
use fraudgate_sdk::{CancellationToken, Charge, DecisionEngineBuilder, RuleAuthoring};
use std::sync::Arc;
use std::time::Duration;

/// In-memory collaborators shared by an engine and its authoring service
pub struct TestEnv {
    pub rules: Arc<MemoryRuleRepository>,
    pub lists: Arc<MemoryListRepository>,
    pub families: Arc<StaticFamilyResolver>,
    pub authoring: RuleAuthoring,
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_entries(Vec::new())
    }

    pub fn with_entries(entries: Vec<ListEntry>) -> Self {
        let rules = Arc::new(MemoryRuleRepository::new());
        Self {
            authoring: RuleAuthoring::new(rules.clone()),
            rules,
            lists: Arc::new(MemoryListRepository::with_entries(entries)),
            families: Arc::new(StaticFamilyResolver::new()),
        }
    }

    /// Author a rule through the full validation chain
    pub async fn rule(&self, request: RuleRequest) -> CompiledRule {
        self.authoring
            .create(&request, &CancellationToken::new())
            .await
            .expect("rule request should be valid")
    }

    pub async fn family(&self, company_id: &str, family_id: &str, family_company_ids: &[&str]) {
        self.families
            .set(
                company_id,
                FamilyMembership {
                    family_id: Some(family_id.to_string()),
                    family_company_ids: family_company_ids.iter().map(|s| s.to_string()).collect(),
                },
            )
            .await;
    }

    /// Builder wired to this environment's collaborators
    pub fn builder(&self) -> DecisionEngineBuilder {
        DecisionEngineBuilder::new()
            .with_rule_repository(self.rules.clone())
            .with_list_repository(self.lists.clone())
            .with_family_resolver(self.families.clone())
    }
}

/// Charge from company `c1` with a card, an email and velocity aggregates
pub fn charge() -> Charge {
    serde_json::from_value(serde_json::json!({
        "id": "ch_test",
        "company_id": "c1",
        "amount": 7500,
        "currency": "MXN",
        "monthly_installments": 12,
        "payer": {"email": "buyer@example.com", "phone": "5550001111"},
        "payment_method": {"type": "card", "card_hash": "hash-1", "country": "MX"},
        "aggregation": {"payer": {"charge": {"h1": {"count": 5, "sum": 12000}}}},
        "identity": {"email_age_days": 1}
    }))
    .expect("valid charge json")
}

/// Rule repository whose every call fails
pub struct FailingRuleRepository;

#[async_trait]
impl RuleRepository for FailingRuleRepository {
    async fn find(&self, _filter: &ScopeFilter) -> RepositoryResult<Vec<CompiledRule>> {
        Err(RepositoryError::Backend("rules store unavailable".to_string()))
    }

    async fn get(&self, id: &str) -> RepositoryResult<CompiledRule> {
        Err(RepositoryError::NotFound { id: id.to_string() })
    }

    async fn insert(&self, _rule: CompiledRule) -> RepositoryResult<CompiledRule> {
        Err(RepositoryError::Backend("rules store unavailable".to_string()))
    }

    async fn update(&self, _rule: CompiledRule) -> RepositoryResult<CompiledRule> {
        Err(RepositoryError::Backend("rules store unavailable".to_string()))
    }

    async fn delete(&self, _id: &str) -> RepositoryResult<()> {
        Err(RepositoryError::Backend("rules store unavailable".to_string()))
    }
}

/// Rule repository that answers `find` only after a delay
pub struct SlowRuleRepository {
    pub delay: Duration,
}

#[async_trait]
impl RuleRepository for SlowRuleRepository {
    async fn find(&self, _filter: &ScopeFilter) -> RepositoryResult<Vec<CompiledRule>> {
        tokio::time::sleep(self.delay).await;
        Ok(Vec::new())
    }

    async fn get(&self, id: &str) -> RepositoryResult<CompiledRule> {
        Err(RepositoryError::NotFound { id: id.to_string() })
    }

    async fn insert(&self, rule: CompiledRule) -> RepositoryResult<CompiledRule> {
        Ok(rule)
    }

    async fn update(&self, rule: CompiledRule) -> RepositoryResult<CompiledRule> {
        Ok(rule)
    }

    async fn delete(&self, _id: &str) -> RepositoryResult<()> {
        Ok(())
    }
}
