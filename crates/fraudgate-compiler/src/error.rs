//! Compiler error types

use fraudgate_core::Decision;
use fraudgate_parser::ParseError;
use thiserror::Error;

/// Errors raised while validating or compiling a rule definition
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    /// Formula clause with a bad shape
    #[error("Invalid formula in clause {clause}: {reason}")]
    InvalidFormula { clause: usize, reason: String },

    /// More than one scope id on a non-global rule
    #[error("Ambiguous scope: only one of company_id, family_id, family_company_id may be set (got {})", .0.join(", "))]
    AmbiguousScope(Vec<String>),

    /// No scope id on a non-global rule
    #[error("Missing scope: a non-global rule needs company_id, family_id or family_company_id")]
    MissingScope,

    /// Global rule that also names a scope
    #[error("Scope conflict: a global rule cannot set {}", .0.join(", "))]
    ScopeConflict(Vec<String>),

    #[error("Invalid decision: {0}")]
    InvalidDecision(String),

    /// Yellow-flag rule whose decision is not `undecided`
    #[error("Invalid yellow flag decision: yellow flag rules must be undecided, got {0}")]
    InvalidYellowFlagDecision(Decision),

    /// Another rule in the same scope compiles to the same text
    #[error("Duplicate rule: expression already stored as rule {existing_id}")]
    DuplicateRule { existing_id: String },

    /// Clause that is neither a field clause nor a formula clause
    #[error("Invalid clause {clause}: {reason}")]
    InvalidClause { clause: usize, reason: String },

    /// Compiled text the expression parser rejects
    #[error("Invalid expression: {0}")]
    InvalidExpression(#[from] ParseError),
}

impl CompileError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            CompileError::InvalidFormula { .. } => "INVALID_FORMULA",
            CompileError::AmbiguousScope(_) => "AMBIGUOUS_SCOPE",
            CompileError::MissingScope => "MISSING_SCOPE",
            CompileError::ScopeConflict(_) => "SCOPE_CONFLICT",
            CompileError::InvalidDecision(_) => "INVALID_DECISION",
            CompileError::InvalidYellowFlagDecision(_) => "INVALID_YELLOW_FLAG_DECISION",
            CompileError::DuplicateRule { .. } => "DUPLICATE_RULE",
            CompileError::InvalidClause { .. } => "INVALID_CLAUSE",
            CompileError::InvalidExpression(_) => "INVALID_EXPRESSION",
        }
    }
}

/// Result type for compiler operations
pub type Result<T> = std::result::Result<T, CompileError>;
