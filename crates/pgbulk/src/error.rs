//! Error types for pgbulk

use thiserror::Error;

/// Result type alias for pgbulk operations
pub type BulkResult<T> = Result<T, BulkError>;

/// Boxed driver error, as surfaced by prepare/execute.
pub type DriverError = Box<dyn std::error::Error + Send + Sync>;

/// Error types for batched write operations
#[derive(Debug, Error)]
pub enum BulkError {
    /// Invalid configuration (batch size, field list, identifiers)
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A queued record lacks a configured field
    #[error("Record is missing configured field '{field}'")]
    MissingField { field: String },

    /// Statement preparation failed (malformed SQL or connection loss)
    #[error("Statement preparation failed: {0}")]
    Statement(DriverError),

    /// Statement execution failed (constraint violation, connection loss, type mismatch)
    #[error("Statement execution failed: {0}")]
    Execution(DriverError),
}

impl BulkError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a missing-field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create a statement-preparation error from a driver error
    pub fn statement(err: impl Into<DriverError>) -> Self {
        Self::Statement(err.into())
    }

    /// Create an execution error from a driver error
    pub fn execution(err: impl Into<DriverError>) -> Self {
        Self::Execution(err.into())
    }

    /// Check if this is a configuration error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this is a missing-field error
    pub fn is_missing_field(&self) -> bool {
        matches!(self, Self::MissingField { .. })
    }

    /// Check if this error came from the driver (prepare or execute)
    pub fn is_driver(&self) -> bool {
        matches!(self, Self::Statement(_) | Self::Execution(_))
    }
}
