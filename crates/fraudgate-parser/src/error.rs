//! Parser error types

use thiserror::Error;

/// Parser error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Input was empty or whitespace only
    #[error("Empty expression")]
    EmptyExpression,

    /// A token appeared where something else was required
    #[error("Unexpected token '{found}' at position {position}, expected {expected}")]
    UnexpectedToken {
        found: String,
        expected: &'static str,
        position: usize,
    },

    /// Input ended in the middle of a clause
    #[error("Unexpected end of expression, expected {expected}")]
    UnexpectedEnd { expected: &'static str },

    /// Numeric literal that does not parse as a number
    #[error("Invalid number '{literal}' at position {position}")]
    InvalidNumber { literal: String, position: usize },

    /// String literal missing its closing quote
    #[error("Unterminated string starting at position {0}")]
    UnterminatedString(usize),

    /// Formula call with the wrong shape
    #[error("Invalid formula: {0}")]
    InvalidFormula(String),
}

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;
