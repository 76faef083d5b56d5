//! Rule authoring service
//!
//! Every write runs the full chain: validate, compile, duplicate guard against
//! the rules already stored under the target scope, then a single repository
//! call. The repository enforces content uniqueness again under its write
//! lock, so two concurrent authors cannot both store the same rule.

use crate::error::{Result, SdkError};
use chrono::Utc;
use fraudgate_compiler::{check_duplicate, CompileError, RuleValidator, ValidatedRule};
use fraudgate_core::{CompiledRule, RuleRequest, ScopeFilter};
use fraudgate_repository::{RepositoryError, RuleRepository};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub struct RuleAuthoring {
    rules: Arc<dyn RuleRepository>,
}

impl RuleAuthoring {
    pub fn new(rules: Arc<dyn RuleRepository>) -> Self {
        Self { rules }
    }

    pub async fn get(&self, id: &str) -> Result<CompiledRule> {
        Ok(self.rules.get(id).await?)
    }

    /// Create a rule under a generated id
    pub async fn create(&self, request: &RuleRequest, cancel: &CancellationToken) -> Result<CompiledRule> {
        self.create_with_id(None, request, cancel).await
    }

    /// Create a rule, keeping `id` when one is given
    pub async fn create_with_id(
        &self,
        id: Option<String>,
        request: &RuleRequest,
        cancel: &CancellationToken,
    ) -> Result<CompiledRule> {
        let validated = self.validate(request, None).await?;
        let id = id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let rule = build_rule(id, request, validated);

        if cancel.is_cancelled() {
            return Err(SdkError::Cancelled);
        }

        let stored = self.rules.insert(rule).await.map_err(into_sdk_error)?;
        info!(
            "Created rule {} under {}: {}",
            stored.id, stored.scope, stored.expression_text
        );
        Ok(stored)
    }

    /// Recompile and replace an existing rule
    pub async fn update(
        &self,
        id: &str,
        request: &RuleRequest,
        cancel: &CancellationToken,
    ) -> Result<CompiledRule> {
        let current = self.rules.get(id).await?;
        let validated = self.validate(request, Some(id)).await?;

        let mut rule = build_rule(id.to_string(), request, validated);
        rule.created_at = current.created_at;

        if cancel.is_cancelled() {
            return Err(SdkError::Cancelled);
        }

        let stored = self.rules.update(rule).await.map_err(into_sdk_error)?;
        info!(
            "Updated rule {} under {}: {}",
            stored.id, stored.scope, stored.expression_text
        );
        Ok(stored)
    }

    pub async fn delete(&self, id: &str, cancel: &CancellationToken) -> Result<()> {
        if cancel.is_cancelled() {
            return Err(SdkError::Cancelled);
        }
        self.rules.delete(id).await?;
        info!("Deleted rule {}", id);
        Ok(())
    }

    async fn validate(&self, request: &RuleRequest, updating_id: Option<&str>) -> Result<ValidatedRule> {
        let validated = RuleValidator::validate(request)?;
        let existing = self
            .rules
            .find(&ScopeFilter::Exact(validated.scope.clone()))
            .await?;
        check_duplicate(&validated.expression_text, updating_id, &existing)?;
        Ok(validated)
    }
}

fn build_rule(id: String, request: &RuleRequest, validated: ValidatedRule) -> CompiledRule {
    let now = Utc::now();
    CompiledRule {
        id,
        name: request.name.clone(),
        description: request.description.clone(),
        is_global: validated.scope.is_global(),
        scope: validated.scope,
        decision: validated.decision,
        is_test: request.is_test,
        is_yellow_flag: request.yellow_flag,
        is_identity: validated.is_identity,
        clauses: request.clauses.clone(),
        expression_text: validated.expression_text,
        created_at: now,
        updated_at: now,
    }
}

/// A storage-level content conflict is the same failure as the duplicate guard
fn into_sdk_error(err: RepositoryError) -> SdkError {
    match err {
        RepositoryError::Conflict { existing_id } => {
            SdkError::Compile(CompileError::DuplicateRule { existing_id })
        }
        other => SdkError::Repository(other),
    }
}
