//! fraudgate compiler - rule content compiler and authoring validators
//!
//! This crate turns structured rule definitions into canonical expression
//! text and enforces the authoring rules around them: formula shape, scope
//! exclusivity, decision validity and duplicate detection.

pub mod compiler;
pub mod duplicate;
pub mod error;
pub mod formula;
pub mod scope;
pub mod validator;

// Re-export main types
pub use compiler::{RuleContentCompiler, IDENTITY_PREFIX};
pub use duplicate::check_duplicate;
pub use error::{CompileError, Result};
pub use formula::validate_formulas;
pub use scope::{validate_decision, validate_scope, validate_yellow_flag};
pub use validator::{RuleValidator, ValidatedRule};
