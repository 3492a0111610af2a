//! Per-operation SQL statement shapes for batched writes.
//!
//! Each statement kind renders the SQL for a batch of `num_records` rows with
//! `$1, $2, ...` placeholders, `num_fields * num_records` of them, filled
//! left-to-right in record-major order. Generation is deterministic and
//! depends only on the table, the field list, and the record count.

use crate::error::{BulkError, BulkResult};
use crate::ident;

/// A SQL shape for one operation kind (insert, upsert, delete).
pub trait StatementBuilder: Send + Sync {
    /// Render the SQL for a batch of `num_records` rows (`num_records` >= 1).
    fn build(&self, num_records: usize) -> String;
}

/// Validate a field list: non-empty, every name a safe identifier.
fn check_fields(fields: &[String]) -> BulkResult<()> {
    if fields.is_empty() {
        return Err(BulkError::config("field list must not be empty"));
    }
    for field in fields {
        ident::check_field(field)?;
    }
    Ok(())
}

/// Append `($n, ...), ($n, ...), ...` placeholder groups, one per record.
fn push_placeholder_groups(out: &mut String, num_fields: usize, num_records: usize) {
    use std::fmt::Write;
    let mut idx: usize = 0;
    for record in 0..num_records {
        if record > 0 {
            out.push_str(", ");
        }
        out.push('(');
        for field in 0..num_fields {
            if field > 0 {
                out.push_str(", ");
            }
            idx += 1;
            let _ = write!(out, "${idx}");
        }
        out.push(')');
    }
}

// ==================== Insert ====================

/// `INSERT INTO t (f1, ..., fn) VALUES ($1, ...), ...`
#[derive(Debug, Clone)]
pub struct InsertStatement {
    table: String,
    fields: Vec<String>,
}

impl InsertStatement {
    pub fn new(
        table: impl Into<String>,
        fields: impl IntoIterator<Item = impl Into<String>>,
    ) -> BulkResult<Self> {
        let table = table.into();
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        ident::check_table(&table)?;
        check_fields(&fields)?;
        Ok(Self { table, fields })
    }
}

impl StatementBuilder for InsertStatement {
    fn build(&self, num_records: usize) -> String {
        let mut sql = format!(
            "INSERT INTO {} ({}) VALUES ",
            self.table,
            self.fields.join(", ")
        );
        push_placeholder_groups(&mut sql, self.fields.len(), num_records);
        sql
    }
}

// ==================== Upsert ====================

/// The insert shape plus `ON CONFLICT (k...) DO UPDATE SET f = EXCLUDED.f`
/// for every configured field, so conflicting rows overwrite all tracked
/// fields with the incoming values.
#[derive(Debug, Clone)]
pub struct UpsertStatement {
    table: String,
    fields: Vec<String>,
    key_fields: Vec<String>,
}

impl UpsertStatement {
    pub fn new(
        table: impl Into<String>,
        fields: impl IntoIterator<Item = impl Into<String>>,
        key_fields: impl IntoIterator<Item = impl Into<String>>,
    ) -> BulkResult<Self> {
        let table = table.into();
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        let key_fields: Vec<String> = key_fields.into_iter().map(Into::into).collect();
        ident::check_table(&table)?;
        check_fields(&fields)?;
        if key_fields.is_empty() {
            return Err(BulkError::config("upsert requires at least one key field"));
        }
        for key in &key_fields {
            if !fields.contains(key) {
                return Err(BulkError::config(format!(
                    "key field '{key}' is not in the configured field list"
                )));
            }
        }
        Ok(Self {
            table,
            fields,
            key_fields,
        })
    }
}

impl StatementBuilder for UpsertStatement {
    fn build(&self, num_records: usize) -> String {
        let mut sql = format!(
            "INSERT INTO {} ({}) VALUES ",
            self.table,
            self.fields.join(", ")
        );
        push_placeholder_groups(&mut sql, self.fields.len(), num_records);
        let set_clauses = self
            .fields
            .iter()
            .map(|f| format!("{f} = EXCLUDED.{f}"))
            .collect::<Vec<_>>()
            .join(", ");
        sql.push_str(&format!(
            " ON CONFLICT ({}) DO UPDATE SET {}",
            self.key_fields.join(", "),
            set_clauses
        ));
        sql
    }
}

// ==================== Delete ====================

/// `DELETE FROM t WHERE (f1, ..., fn) IN (($1, ...), ...)`
///
/// The configured fields are the key fields; the row-value IN list matches
/// each buffered record's key tuple, so multi-column keys work without
/// OR-of-ANDs expansion.
#[derive(Debug, Clone)]
pub struct DeleteStatement {
    table: String,
    fields: Vec<String>,
}

impl DeleteStatement {
    pub fn new(
        table: impl Into<String>,
        fields: impl IntoIterator<Item = impl Into<String>>,
    ) -> BulkResult<Self> {
        let table = table.into();
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        ident::check_table(&table)?;
        check_fields(&fields)?;
        Ok(Self { table, fields })
    }
}

impl StatementBuilder for DeleteStatement {
    fn build(&self, num_records: usize) -> String {
        let mut sql = format!(
            "DELETE FROM {} WHERE ({}) IN (",
            self.table,
            self.fields.join(", ")
        );
        push_placeholder_groups(&mut sql, self.fields.len(), num_records);
        sql.push(')');
        sql
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_single_record() {
        let stmt = InsertStatement::new("accounts", ["id", "name"]).unwrap();
        assert_eq!(
            stmt.build(1),
            "INSERT INTO accounts (id, name) VALUES ($1, $2)"
        );
    }

    #[test]
    fn insert_numbers_placeholders_record_major() {
        let stmt = InsertStatement::new("accounts", ["id", "name"]).unwrap();
        assert_eq!(
            stmt.build(3),
            "INSERT INTO accounts (id, name) VALUES ($1, $2), ($3, $4), ($5, $6)"
        );
    }

    #[test]
    fn insert_accepts_dotted_table() {
        let stmt = InsertStatement::new("public.accounts", ["id"]).unwrap();
        assert_eq!(
            stmt.build(2),
            "INSERT INTO public.accounts (id) VALUES ($1), ($2)"
        );
    }

    #[test]
    fn upsert_overwrites_every_field() {
        let stmt = UpsertStatement::new("accounts", ["id", "name", "email"], ["id"]).unwrap();
        assert_eq!(
            stmt.build(2),
            "INSERT INTO accounts (id, name, email) VALUES ($1, $2, $3), ($4, $5, $6) \
             ON CONFLICT (id) DO UPDATE SET id = EXCLUDED.id, name = EXCLUDED.name, \
             email = EXCLUDED.email"
        );
    }

    #[test]
    fn upsert_supports_composite_keys() {
        let stmt = UpsertStatement::new("events", ["stream_id", "seq", "body"], [
            "stream_id", "seq",
        ])
        .unwrap();
        let sql = stmt.build(1);
        assert!(sql.contains("ON CONFLICT (stream_id, seq) DO UPDATE SET"));
    }

    #[test]
    fn upsert_rejects_missing_key_fields() {
        assert!(UpsertStatement::new("accounts", ["id"], Vec::<String>::new()).is_err());
        assert!(UpsertStatement::new("accounts", ["id"], ["name"]).is_err());
    }

    #[test]
    fn delete_builds_row_value_in_list() {
        let stmt = DeleteStatement::new("events", ["stream_id", "seq"]).unwrap();
        assert_eq!(
            stmt.build(2),
            "DELETE FROM events WHERE (stream_id, seq) IN (($1, $2), ($3, $4))"
        );
    }

    #[test]
    fn delete_single_key_single_record() {
        let stmt = DeleteStatement::new("sessions", ["id"]).unwrap();
        assert_eq!(stmt.build(1), "DELETE FROM sessions WHERE (id) IN (($1))");
    }

    #[test]
    fn builders_reject_unsafe_identifiers() {
        assert!(InsertStatement::new("t; drop table t", ["id"]).is_err());
        assert!(InsertStatement::new("t", ["id; --"]).is_err());
        assert!(InsertStatement::new("t", Vec::<String>::new()).is_err());
        assert!(DeleteStatement::new("1t", ["id"]).is_err());
    }
}
