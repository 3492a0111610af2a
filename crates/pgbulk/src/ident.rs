//! Identifier validation for configured table and field names.
//!
//! Table and field names cannot be parameterized, so they are validated at
//! construction instead: each `.`-separated segment must match
//! `[A-Za-z_][A-Za-z0-9_$]*`.

use crate::error::{BulkError, BulkResult};

/// Validate a table name. Dotted `schema.table` form is allowed.
pub(crate) fn check_table(table: &str) -> BulkResult<()> {
    if table.is_empty() {
        return Err(BulkError::config("table name must not be empty"));
    }
    for segment in table.split('.') {
        check_segment(segment, table)?;
    }
    Ok(())
}

/// Validate a field name. A single undotted segment.
pub(crate) fn check_field(field: &str) -> BulkResult<()> {
    if field.is_empty() {
        return Err(BulkError::config("field name must not be empty"));
    }
    check_segment(field, field)
}

fn check_segment(segment: &str, whole: &str) -> BulkResult<()> {
    let mut chars = segment.chars();
    let Some(first) = chars.next() else {
        return Err(BulkError::config(format!("invalid identifier '{whole}'")));
    };
    if first != '_' && !first.is_ascii_alphabetic() {
        return Err(BulkError::config(format!("invalid identifier '{whole}'")));
    }
    if !chars.all(|c| c == '_' || c == '$' || c.is_ascii_alphanumeric()) {
        return Err(BulkError::config(format!("invalid identifier '{whole}'")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_simple_and_dotted_tables() {
        assert!(check_table("accounts").is_ok());
        assert!(check_table("public.accounts").is_ok());
        assert!(check_table("_t$1").is_ok());
    }

    #[test]
    fn rejects_unsafe_tables() {
        assert!(check_table("").is_err());
        assert!(check_table("1accounts").is_err());
        assert!(check_table("accounts; drop table accounts; --").is_err());
        assert!(check_table("a..b").is_err());
        assert!(check_table("a.").is_err());
    }

    #[test]
    fn rejects_dotted_fields() {
        assert!(check_field("name").is_ok());
        assert!(check_field("a.b").is_err());
        assert!(check_field("has space").is_err());
        assert!(check_field("").is_err());
    }
}
