//! Runtime error types

use fraudgate_parser::ParseError;
use thiserror::Error;

/// Runtime error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// Expression text was empty
    #[error("Empty expression")]
    EmptyExpression,

    /// Expression text failed to parse
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Referenced field is absent from the attribute map
    #[error("Missing operand: {0}")]
    MissingOperand(String),

    /// Operator applied to values it cannot compare
    #[error("Type mismatch: cannot apply '{operator}' to {left} and {right}")]
    TypeMismatch {
        operator: String,
        left: String,
        right: String,
    },

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Score lookup failed
    #[error("Score client error: {0}")]
    ScoreClient(String),
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;
