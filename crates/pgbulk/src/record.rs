//! Operation records queued into a bulk writer.

use crate::value::Value;
use std::collections::HashMap;

/// A single logical operation: a mapping from field name to [`Value`].
///
/// Only the fields configured on the writer are read from a record, in
/// declaration order; extra keys are ignored. Values are copied into the
/// writer's buffer when queued.
///
/// # Example
/// ```ignore
/// use pgbulk::Record;
///
/// let record = Record::new()
///     .set("id", 1_i64)
///     .set("name", "alice");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Record {
    values: HashMap<String, Value>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field value (builder form).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(field.into(), value.into());
        self
    }

    /// Set a field value in place.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(field.into(), value.into());
    }

    /// Look up a field value.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    /// Whether the field is present (an explicit NULL counts as present).
    pub fn contains_field(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    /// Number of fields set on this record.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no fields are set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get() {
        let record = Record::new().set("id", 1_i64).set("name", "alice");
        assert_eq!(record.get("id"), Some(&Value::BigInt(1)));
        assert_eq!(record.get("name"), Some(&Value::Text("alice".to_string())));
        assert_eq!(record.get("missing"), None);
    }

    #[test]
    fn explicit_null_counts_as_present() {
        let record = Record::new().set("name", Value::Null);
        assert!(record.contains_field("name"));
        assert!(record.get("name").unwrap().is_null());
    }

    #[test]
    fn collects_from_pairs() {
        let record: Record = [("a", 1_i32), ("b", 2_i32)].into_iter().collect();
        assert_eq!(record.len(), 2);
        assert_eq!(record.get("b"), Some(&Value::Int(2)));
    }
}
