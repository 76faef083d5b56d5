//! Core DecisionEngine implementation

use super::types::{ComponentCandidates, DecisionResponse};
use crate::config::EngineConfig;
use crate::error::{Result, SdkError};
use fraudgate_core::{ChargeScope, Console, ConsoleComponent, ScopeFilter, SearchKeys};
use fraudgate_repository::{FamilyResolver, ListRepository, RepositoryResult, RuleRepository};
use fraudgate_runtime::{
    evaluate_component, fetch_score, search_keys, Charge, FinalVerdict, ScoreClient,
    MERCHANT_SCORE_ATTRIBUTE, OMNISCORE_ATTRIBUTE,
};
use futures::future::try_join_all;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Decision Resolver over repository collaborators
///
/// Candidate fetches for the console components have no data dependency on
/// each other and may run concurrently; evaluation and aggregation always
/// follow the logical console order.
pub struct DecisionEngine {
    pub(crate) config: EngineConfig,
    pub(crate) rules: Arc<dyn RuleRepository>,
    pub(crate) lists: Arc<dyn ListRepository>,
    pub(crate) families: Arc<dyn FamilyResolver>,
    pub(crate) omniscore: Option<Arc<dyn ScoreClient>>,
    pub(crate) merchant_score: Option<Arc<dyn ScoreClient>>,
}

/// Reject consoles naming a component twice
pub(crate) fn validate_console(console: &Console) -> Result<()> {
    match console.duplicate_component() {
        Some(name) => Err(SdkError::InvalidConsole(format!(
            "component '{}' appears more than once",
            name
        ))),
        None => Ok(()),
    }
}

impl DecisionEngine {
    /// Generate a unique request ID
    /// Format: req_YYYYMMDDHHmmss_xxxxxx
    fn generate_request_id() -> String {
        use chrono::Utc;
        use rand::Rng;

        let datetime_str = Utc::now().format("%Y%m%d%H%M%S").to_string();
        let random: u32 = rand::thread_rng().gen_range(0..0xFFFFFF);

        format!("req_{}_{:06x}", datetime_str, random)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Decide a charge without an external cancellation signal
    pub async fn decide_charge(&self, charge: &Charge) -> Result<DecisionResponse> {
        self.decide(charge, &CancellationToken::new()).await
    }

    /// Run the charge through its console and fold the component verdicts
    ///
    /// Repository failures and cancellation abort the whole evaluation; no
    /// partial verdict is returned. Per-rule evaluation errors are recorded on
    /// the component results instead.
    pub async fn decide(&self, charge: &Charge, cancel: &CancellationToken) -> Result<DecisionResponse> {
        let start = Instant::now();
        let request_id = Self::generate_request_id();

        let console = self.console_for(charge)?;
        debug!(
            "Deciding charge {} (request_id={}) over {} components",
            charge.id,
            request_id,
            console.len()
        );

        let membership = self
            .guarded(
                "family resolution",
                cancel,
                self.families.resolve(&charge.company_id),
            )
            .await?;
        let scope = ChargeScope::new(charge.company_id.clone(), membership);

        let mut attributes = charge.to_attributes();
        let keys = search_keys(&attributes);

        let score_timeout = self.config.score_timeout();
        let scores = async {
            tokio::join!(
                fetch_score(self.omniscore.as_deref(), charge, score_timeout),
                fetch_score(self.merchant_score.as_deref(), charge, score_timeout),
            )
        };

        let (candidates, (omniscore, merchant_score)) = if self.config.concurrent_fetch {
            let fetches = console
                .iter()
                .map(|component| self.fetch_candidates(component, &scope, &keys, cancel));
            tokio::join!(try_join_all(fetches), scores)
        } else {
            let mut fetched = Vec::with_capacity(console.len());
            for component in console.iter() {
                fetched.push(self.fetch_candidates(component, &scope, &keys, cancel).await?);
            }
            (Ok(fetched), scores.await)
        };
        let candidates = candidates?;

        attributes.insert(OMNISCORE_ATTRIBUTE, omniscore);
        attributes.insert(MERCHANT_SCORE_ATTRIBUTE, merchant_score);

        let mut results = Vec::with_capacity(console.len());
        for (component, fetched) in console.iter().zip(&candidates) {
            if cancel.is_cancelled() {
                debug!("Decision {} cancelled before {}", request_id, component.name);
                return Err(SdkError::Cancelled);
            }
            let result = match fetched {
                ComponentCandidates::Rules(rules) => evaluate_component(component, rules, &attributes),
                ComponentCandidates::Entries(entries) => {
                    evaluate_component(component, entries, &attributes)
                }
            };
            results.push(result);
        }

        let verdict = FinalVerdict::aggregate(results);
        let processing_time_ms = start.elapsed().as_millis() as u64;

        info!(
            "Decision {} for charge {}: decision={}, test_decision={}, decided_by={}, errors={}, {}ms",
            request_id,
            charge.id,
            verdict.decision,
            verdict.test_decision,
            verdict
                .decided_by
                .map(|c| c.as_str())
                .unwrap_or("none"),
            verdict.errors.len(),
            processing_time_ms
        );

        Ok(DecisionResponse {
            request_id,
            charge_id: charge.id.clone(),
            verdict,
            omniscore,
            merchant_score,
            processing_time_ms,
        })
    }

    fn console_for(&self, charge: &Charge) -> Result<Console> {
        let console = charge
            .console
            .clone()
            .unwrap_or_else(|| self.config.default_console.clone());
        validate_console(&console)?;
        Ok(console)
    }

    /// Fetch the rules or list entries one component evaluates
    async fn fetch_candidates(
        &self,
        component: &ConsoleComponent,
        scope: &ChargeScope,
        keys: &SearchKeys,
        cancel: &CancellationToken,
    ) -> Result<ComponentCandidates> {
        if let Some(list_type) = component.name.list_type() {
            if keys.is_empty() {
                return Ok(ComponentCandidates::Entries(Vec::new()));
            }
            let entries = self
                .guarded(component.name.as_str(), cancel, self.lists.find(list_type, keys))
                .await?;
            let applicable = entries
                .into_iter()
                .filter(|entry| scope.applies(&entry.scope))
                .collect();
            return Ok(ComponentCandidates::Entries(applicable));
        }

        let fetched = match ScopeFilter::for_component(component.name, scope) {
            Some(filter) => {
                let rules = self
                    .guarded(component.name.as_str(), cancel, self.rules.find(&filter))
                    .await?;
                ComponentCandidates::Rules(rules)
            }
            None => ComponentCandidates::Rules(Vec::new()),
        };

        debug!(
            "Fetched {} candidates for {}",
            fetched.len(),
            component.name
        );
        Ok(fetched)
    }

    /// Run a repository call under the fetch timeout and the caller's cancellation
    async fn guarded<T>(
        &self,
        operation: &str,
        cancel: &CancellationToken,
        call: impl Future<Output = RepositoryResult<T>>,
    ) -> Result<T> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(SdkError::Cancelled),
            outcome = tokio::time::timeout(self.config.fetch_timeout(), call) => match outcome {
                Ok(result) => Ok(result?),
                Err(_) => Err(SdkError::DeadlineExceeded(operation.to_string())),
            },
        }
    }
}
