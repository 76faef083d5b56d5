//! Error types for the repository layer

use thiserror::Error;

/// Result type alias for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors that can occur during repository operations
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// No record with this id
    #[error("Record not found: {id}")]
    NotFound { id: String },

    /// A record with the same id or content already exists
    #[error("Conflicts with existing record: {existing_id}")]
    Conflict { existing_id: String },

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Storage backend failure
    #[error("Repository backend error: {0}")]
    Backend(String),
}
