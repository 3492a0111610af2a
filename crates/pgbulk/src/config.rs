//! Configuration for a bulk writer.

use crate::error::{BulkError, BulkResult};

/// Default number of records combined into one statement.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Immutable configuration for a [`BulkWriter`](crate::BulkWriter).
///
/// # Example
/// ```ignore
/// use pgbulk::BulkConfig;
///
/// let config = BulkConfig::new("accounts", ["id", "name", "email"])
///     .batch_size(500)
///     .key_fields(["id"]);
/// ```
#[derive(Debug, Clone)]
pub struct BulkConfig {
    pub(crate) table: String,
    pub(crate) fields: Vec<String>,
    pub(crate) batch_size: usize,
    pub(crate) debug: bool,
    pub(crate) key_fields: Vec<String>,
}

impl BulkConfig {
    /// Create a configuration for `table` with the ordered `fields` read from
    /// each queued record.
    pub fn new(
        table: impl Into<String>,
        fields: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            table: table.into(),
            fields: fields.into_iter().map(Into::into).collect(),
            batch_size: DEFAULT_BATCH_SIZE,
            debug: false,
            key_fields: Vec::new(),
        }
    }

    /// Set the batch size (default 100). Must be at least 1.
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Enable debug mode: batches are rendered to an in-memory log instead of
    /// being executed.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Set the conflict key fields used by the upsert kind. Must be a
    /// non-empty subset of the field list.
    pub fn key_fields(mut self, key_fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.key_fields = key_fields.into_iter().map(Into::into).collect();
        self
    }

    /// Table name.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Configured field list, in declaration order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub(crate) fn validate(&self) -> BulkResult<()> {
        if self.batch_size < 1 {
            return Err(BulkError::config("batch size must be at least 1"));
        }
        if self.fields.is_empty() {
            return Err(BulkError::config("field list must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = BulkConfig::new("accounts", ["id"]);
        assert_eq!(config.batch_size, DEFAULT_BATCH_SIZE);
        assert!(!config.debug);
        assert!(config.key_fields.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_zero_batch_size() {
        let config = BulkConfig::new("accounts", ["id"]).batch_size(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_empty_field_list() {
        let config = BulkConfig::new("accounts", Vec::<String>::new());
        assert!(config.validate().is_err());
    }
}
