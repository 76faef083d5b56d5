//! DecisionEngine - Main API for deciding charges
//!
//! The module is organized into:
//! - `types`: response types and the per-component candidate sets
//! - `engine`: the Decision Resolver orchestration

mod engine;
mod types;

pub use engine::DecisionEngine;
pub use types::DecisionResponse;

pub(crate) use engine::validate_console;
