//! Repository layer for the fraudgate decision engine
//!
//! This crate defines the storage contracts the engine reads through and
//! in-memory implementations of them.
//!
//! # Features
//!
//! - **Rule repository**: compiled rules selected by scope filter, with
//!   `(scope, expression_text)` uniqueness enforced at write time
//! - **List repository**: white, black and gray list entries looked up by
//!   searchable charge attributes
//! - **Family resolver**: company to MCC-family and family-of-companies groupings
//! - **Seed loader**: YAML seed documents for local runs and tests
//!
//! # Quick Start
//!
//! ```no_run
//! use fraudgate_repository::{MemoryRuleRepository, RuleRepository};
//! use fraudgate_core::{CompiledRule, Decision, Scope, ScopeFilter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = MemoryRuleRepository::new();
//!     repo.insert(CompiledRule::new("r1", Scope::Global, Decision::Declined, "amount gt 50000"))
//!         .await?;
//!
//!     let rules = repo.find(&ScopeFilter::Global).await?;
//!     println!("Loaded {} global rules", rules.len());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod loader;
pub mod memory;
pub mod traits;

// Re-exports - Error
pub use error::{RepositoryError, RepositoryResult};

// Re-exports - Loader
pub use loader::{RepositoryLoader, SeedDocument, SeedRule};

// Re-exports - Repositories
pub use memory::{MemoryListRepository, MemoryRuleRepository, StaticFamilyResolver};
pub use traits::*;
