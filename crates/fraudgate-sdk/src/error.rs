//! SDK error types

use fraudgate_compiler::CompileError;
use fraudgate_repository::RepositoryError;
use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Rule definition rejected by validation or compilation
    #[error("Invalid rule: {0}")]
    Compile(#[from] CompileError),

    /// Repository collaborator failed; fatal to a decision
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Caller cancelled the operation
    #[error("Operation cancelled")]
    Cancelled,

    /// A collaborator call ran past its timeout
    #[error("Deadline exceeded: {0}")]
    DeadlineExceeded(String),

    /// Console rejected before evaluation
    #[error("Invalid console: {0}")]
    InvalidConsole(String),
}

impl SdkError {
    /// Whether the error describes a bad rule definition
    pub fn is_authoring_error(&self) -> bool {
        matches!(self, SdkError::Compile(_))
    }
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_error_conversion() {
        let error: SdkError = CompileError::MissingScope.into();
        assert!(error.is_authoring_error());
        assert!(error.to_string().starts_with("Invalid rule"));
    }

    #[test]
    fn test_repository_error_conversion() {
        let error: SdkError = RepositoryError::Backend("connection reset".to_string()).into();
        assert!(!error.is_authoring_error());
        assert!(error.to_string().contains("connection reset"));
    }

    #[test]
    fn test_cancelled_message() {
        assert_eq!(SdkError::Cancelled.to_string(), "Operation cancelled");
    }
}
