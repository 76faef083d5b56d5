//! Collaborator contracts consumed by the decision engine
//!
//! - [`RuleRepository`]: compiled rules selected by [`ScopeFilter`]
//! - [`ListRepository`]: white, black and gray list entries keyed by searchable attributes
//! - [`FamilyResolver`]: a company's MCC family and family-of-companies groupings
//!
//! All implementations must be `Send + Sync` for use across async tasks.

use async_trait::async_trait;
use fraudgate_core::{CompiledRule, FamilyMembership, ListEntry, ListType, ScopeFilter, SearchKeys};

use crate::RepositoryResult;

/// Storage for compiled rules
///
/// Implementations must reject an insert or update whose
/// `(scope, expression_text)` pair is already held by another rule with
/// [`RepositoryError::Conflict`](crate::RepositoryError::Conflict), checked
/// atomically with the write.
#[async_trait]
pub trait RuleRepository: Send + Sync {
    /// Every rule selected by `filter`, test rules included
    async fn find(&self, filter: &ScopeFilter) -> RepositoryResult<Vec<CompiledRule>>;

    async fn get(&self, id: &str) -> RepositoryResult<CompiledRule>;

    async fn insert(&self, rule: CompiledRule) -> RepositoryResult<CompiledRule>;

    /// Replace the rule with the same id
    async fn update(&self, rule: CompiledRule) -> RepositoryResult<CompiledRule>;

    async fn delete(&self, id: &str) -> RepositoryResult<()>;
}

/// Storage for list entries
#[async_trait]
pub trait ListRepository: Send + Sync {
    /// Entries of `list_type` keyed on any of the `(field, value)` pairs in `keys`
    async fn find(&self, list_type: ListType, keys: &SearchKeys) -> RepositoryResult<Vec<ListEntry>>;

    async fn insert(&self, entry: ListEntry) -> RepositoryResult<ListEntry>;
}

/// Resolves the groupings a company belongs to
#[async_trait]
pub trait FamilyResolver: Send + Sync {
    /// Membership of `company_id`; empty when the company has no family
    async fn resolve(&self, company_id: &str) -> RepositoryResult<FamilyMembership>;
}
