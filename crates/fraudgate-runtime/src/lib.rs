//! fraudgate runtime - expression evaluation and component resolution
//!
//! This crate provides the pure evaluation machinery of the decision engine:
//! - The expression evaluator over flattened charge attributes
//! - The charge model and its attribute flattening
//! - List entry matching and searchable keys
//! - Per-component evaluation, decision resolution and verdict aggregation
//! - External score clients

pub mod context;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod lists;
pub mod result;
pub mod score;

// Re-export main types
pub use context::{AttributeMap, Charge, Device, Payer, PaymentMethod};
pub use engine::{evaluate_component, resolve_decision, Candidate};
pub use error::{Result, RuntimeError};
pub use evaluator::Evaluator;
pub use lists::{entry_matches, search_keys};
pub use result::{EvaluationError, EvaluationResult, FinalVerdict, MatchedCandidate};
pub use score::{
    fetch_score, HttpScoreClient, ScoreClient, ScoreClientConfig, StaticScoreClient,
    MERCHANT_SCORE_ATTRIBUTE, OMNISCORE_ATTRIBUTE, UNAVAILABLE_SCORE,
};
