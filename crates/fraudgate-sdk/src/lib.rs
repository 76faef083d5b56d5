//! fraudgate SDK
//!
//! High-level API for deciding charges and authoring rules.

pub mod authoring;
pub mod builder;
pub mod config;
pub mod decision_engine;
pub mod error;

// Re-export main types
pub use authoring::RuleAuthoring;
pub use builder::DecisionEngineBuilder;
pub use config::EngineConfig;
pub use decision_engine::{DecisionEngine, DecisionResponse};
pub use error::{Result, SdkError};

// Re-export commonly used types from dependencies
pub use fraudgate_core::{CompiledRule, Console, ConsoleComponent, Decision, RuleRequest};
pub use fraudgate_runtime::{Charge, FinalVerdict};
pub use tokio_util::sync::CancellationToken;
