//! Builder pattern for DecisionEngine

use crate::authoring::RuleAuthoring;
use crate::config::EngineConfig;
use crate::decision_engine::{validate_console, DecisionEngine};
use crate::error::Result;
use fraudgate_core::Console;
use fraudgate_repository::{
    FamilyResolver, ListRepository, MemoryListRepository, MemoryRuleRepository, RuleRepository,
    StaticFamilyResolver,
};
use fraudgate_runtime::ScoreClient;
use std::sync::Arc;
use std::time::Duration;

/// Builder for DecisionEngine
///
/// Collaborators left unset default to empty in-memory implementations.
///
/// # Example
///
/// ```rust,ignore
/// use fraudgate_sdk::DecisionEngineBuilder;
///
/// let engine = DecisionEngineBuilder::new()
///     .with_rule_repository(rules.clone())
///     .with_list_repository(lists)
///     .with_fetch_timeout(Duration::from_millis(300))
///     .build()?;
///
/// let response = engine.decide(&charge, &cancel).await?;
/// ```
pub struct DecisionEngineBuilder {
    config: EngineConfig,
    rules: Option<Arc<dyn RuleRepository>>,
    lists: Option<Arc<dyn ListRepository>>,
    families: Option<Arc<dyn FamilyResolver>>,
    omniscore: Option<Arc<dyn ScoreClient>>,
    merchant_score: Option<Arc<dyn ScoreClient>>,
}

impl DecisionEngineBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: EngineConfig::new(),
            rules: None,
            lists: None,
            families: None,
            omniscore: None,
            merchant_score: None,
        }
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_default_console(mut self, console: Console) -> Self {
        self.config.default_console = console;
        self
    }

    pub fn concurrent_fetch(mut self, enable: bool) -> Self {
        self.config.concurrent_fetch = enable;
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_fetch_timeout(timeout);
        self
    }

    pub fn with_score_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_score_timeout(timeout);
        self
    }

    // ========== Collaborators ==========

    pub fn with_rule_repository(mut self, rules: Arc<dyn RuleRepository>) -> Self {
        self.rules = Some(rules);
        self
    }

    pub fn with_list_repository(mut self, lists: Arc<dyn ListRepository>) -> Self {
        self.lists = Some(lists);
        self
    }

    pub fn with_family_resolver(mut self, families: Arc<dyn FamilyResolver>) -> Self {
        self.families = Some(families);
        self
    }

    pub fn with_omniscore(mut self, client: Arc<dyn ScoreClient>) -> Self {
        self.omniscore = Some(client);
        self
    }

    pub fn with_merchant_score(mut self, client: Arc<dyn ScoreClient>) -> Self {
        self.merchant_score = Some(client);
        self
    }

    /// Build the decision engine
    pub fn build(self) -> Result<DecisionEngine> {
        Ok(self.build_with_authoring()?.0)
    }

    /// Build the engine together with an authoring service over the same rule repository
    pub fn build_with_authoring(self) -> Result<(DecisionEngine, RuleAuthoring)> {
        validate_console(&self.config.default_console)?;

        let rules: Arc<dyn RuleRepository> = match self.rules {
            Some(rules) => rules,
            None => Arc::new(MemoryRuleRepository::new()),
        };
        let lists: Arc<dyn ListRepository> = match self.lists {
            Some(lists) => lists,
            None => Arc::new(MemoryListRepository::new()),
        };
        let families: Arc<dyn FamilyResolver> = match self.families {
            Some(families) => families,
            None => Arc::new(StaticFamilyResolver::new()),
        };

        let authoring = RuleAuthoring::new(rules.clone());
        let engine = DecisionEngine {
            config: self.config,
            rules,
            lists,
            families,
            omniscore: self.omniscore,
            merchant_score: self.merchant_score,
        };

        Ok((engine, authoring))
    }
}

impl Default for DecisionEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SdkError;
    use fraudgate_core::{ComponentName, ConsoleComponent};

    #[test]
    fn test_build_defaults() {
        let engine = DecisionEngineBuilder::new().build().unwrap();
        assert_eq!(engine.config().default_console.len(), 9);
        assert!(engine.config().concurrent_fetch);
    }

    #[test]
    fn test_builder_options() {
        let engine = DecisionEngineBuilder::new()
            .concurrent_fetch(false)
            .with_fetch_timeout(Duration::from_millis(150))
            .with_score_timeout(Duration::from_millis(40))
            .build()
            .unwrap();
        assert!(!engine.config().concurrent_fetch);
        assert_eq!(engine.config().fetch_timeout_ms, 150);
        assert_eq!(engine.config().score_timeout_ms, 40);
    }

    #[test]
    fn test_rejects_repeated_default_console_component() {
        let console = Console::new(vec![
            ConsoleComponent::with_default_priority(ComponentName::GlobalRules),
            ConsoleComponent::with_default_priority(ComponentName::GlobalRules),
        ]);
        let result = DecisionEngineBuilder::new().with_default_console(console).build();
        assert!(matches!(result, Err(SdkError::InvalidConsole(_))));
    }
}
