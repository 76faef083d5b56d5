//! Decision engine initialization

use crate::config::ServerConfig;
use anyhow::{Context, Result};
use fraudgate_repository::{
    MemoryListRepository, MemoryRuleRepository, RepositoryLoader, StaticFamilyResolver,
};
use fraudgate_runtime::{HttpScoreClient, OMNISCORE_ATTRIBUTE, MERCHANT_SCORE_ATTRIBUTE};
use fraudgate_sdk::{CancellationToken, DecisionEngine, DecisionEngineBuilder, RuleAuthoring};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Build the engine and its authoring service from server configuration
pub async fn init_engine(config: &ServerConfig) -> Result<(DecisionEngine, RuleAuthoring)> {
    info!("Initializing decision engine...");

    let rules = Arc::new(MemoryRuleRepository::new());
    let lists = Arc::new(MemoryListRepository::new());
    let families = Arc::new(StaticFamilyResolver::new());

    let mut builder = DecisionEngineBuilder::new()
        .with_config(config.engine_config())
        .with_rule_repository(rules.clone())
        .with_list_repository(lists.clone())
        .with_family_resolver(families.clone());

    match &config.omniscore {
        Some(score) => {
            info!("Omniscore endpoint: {}", score.url);
            builder = builder.with_omniscore(Arc::new(HttpScoreClient::new(OMNISCORE_ATTRIBUTE, score)?));
        }
        None => warn!("No omniscore endpoint configured, omniscore will read as -1"),
    }

    match &config.merchant_score {
        Some(score) => {
            info!("Merchant score endpoint: {}", score.url);
            builder = builder
                .with_merchant_score(Arc::new(HttpScoreClient::new(MERCHANT_SCORE_ATTRIBUTE, score)?));
        }
        None => warn!("No merchant score endpoint configured, merchant_score will read as -1"),
    }

    let (engine, authoring) = builder.build_with_authoring()?;

    if let Some(path) = &config.seed_file {
        let count = seed(path, &authoring, &lists, &families).await?;
        info!("Seeded {} rules from {}", count, path.display());
    }

    Ok((engine, authoring))
}

/// Install list entries and families from a seed file and author its rules
///
/// Rules go through the same validation and duplicate guard as API writes.
pub async fn seed(
    path: &Path,
    authoring: &RuleAuthoring,
    lists: &MemoryListRepository,
    families: &StaticFamilyResolver,
) -> Result<usize> {
    let document = RepositoryLoader::new(path)
        .load_seed()
        .await
        .with_context(|| format!("Failed to load seed file {}", path.display()))?;

    document.install(lists, families).await?;

    let cancel = CancellationToken::new();
    for rule in &document.rules {
        authoring
            .create_with_id(rule.id.clone(), &rule.request, &cancel)
            .await
            .with_context(|| {
                format!(
                    "Invalid seed rule {}",
                    rule.id.as_deref().unwrap_or(rule.request.name.as_str())
                )
            })?;
    }

    Ok(document.rules.len())
}
