//! Error types for fraudgate core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Unknown decision: {0}")]
    UnknownDecision(String),

    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    #[error("Unknown math operation: {0}")]
    UnknownMathOp(String),

    #[error("Unknown condition: {0}")]
    UnknownCondition(String),

    #[error("Unknown console component: {0}")]
    UnknownComponent(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
