//! Dynamic SQL values for buffered write operations.
//!
//! A [`Value`] carries one cell of a queued record. It binds as a positional
//! parameter on the execution path (via [`ToSql`]) and renders itself as a SQL
//! literal on the debug path, where statements are previewed instead of
//! executed.

use bytes::BytesMut;
use chrono::{DateTime, Utc};
use tokio_postgres::types::{IsNull, ToSql, Type, to_sql_checked};
use uuid::Uuid;

/// A dynamically typed SQL value.
///
/// The variant set mirrors the scalar types this crate's driver stack is
/// compiled with (chrono timestamps, UUIDs, JSON documents).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// SQL NULL
    Null,
    /// BOOLEAN
    Bool(bool),
    /// SMALLINT
    SmallInt(i16),
    /// INTEGER
    Int(i32),
    /// BIGINT
    BigInt(i64),
    /// DOUBLE PRECISION
    Double(f64),
    /// TEXT / VARCHAR
    Text(String),
    /// BYTEA
    Bytes(Vec<u8>),
    /// TIMESTAMPTZ
    Timestamp(DateTime<Utc>),
    /// UUID
    Uuid(Uuid),
    /// JSON / JSONB
    Json(serde_json::Value),
}

impl Value {
    /// Render this value as a SQL literal for debug previews.
    ///
    /// Never used on the execution path; execution always binds values as
    /// positional parameters.
    pub fn to_literal(&self) -> String {
        match self {
            Value::Null => "NULL".to_string(),
            Value::Bool(true) => "TRUE".to_string(),
            Value::Bool(false) => "FALSE".to_string(),
            Value::SmallInt(v) => v.to_string(),
            Value::Int(v) => v.to_string(),
            Value::BigInt(v) => v.to_string(),
            Value::Double(v) => {
                // NaN and infinities are only valid as quoted literals.
                if v.is_finite() {
                    v.to_string()
                } else {
                    format!("'{v}'")
                }
            }
            Value::Text(s) => quote_text(s),
            Value::Bytes(b) => {
                let mut out = String::with_capacity(b.len() * 2 + 4);
                out.push_str("'\\x");
                for byte in b {
                    use std::fmt::Write;
                    let _ = write!(&mut out, "{byte:02x}");
                }
                out.push('\'');
                out
            }
            Value::Timestamp(ts) => format!("'{}'", ts.to_rfc3339()),
            Value::Uuid(u) => format!("'{u}'"),
            Value::Json(j) => quote_text(&j.to_string()),
        }
    }

    /// Whether this value is SQL NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// Quote a string as a SQL literal, doubling embedded single quotes.
fn quote_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        if ch == '\'' {
            out.push('\'');
        }
        out.push(ch);
    }
    out.push('\'');
    out
}

impl ToSql for Value {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn std::error::Error + Sync + Send>> {
        match self {
            Value::Null => Ok(IsNull::Yes),
            Value::Bool(v) => v.to_sql(ty, out),
            Value::SmallInt(v) => v.to_sql(ty, out),
            Value::Int(v) => v.to_sql(ty, out),
            Value::BigInt(v) => v.to_sql(ty, out),
            Value::Double(v) => v.to_sql(ty, out),
            Value::Text(v) => v.to_sql(ty, out),
            Value::Bytes(v) => v.as_slice().to_sql(ty, out),
            Value::Timestamp(v) => v.to_sql(ty, out),
            Value::Uuid(v) => v.to_sql(ty, out),
            Value::Json(v) => v.to_sql(ty, out),
        }
    }

    fn accepts(_ty: &Type) -> bool {
        // The concrete variant decides at bind time; the server-reported type
        // cannot be checked against a dynamic value up front.
        true
    }

    to_sql_checked!();
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Value::SmallInt(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::BigInt(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Timestamp(v)
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Uuid(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Json(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_renders_unquoted() {
        assert_eq!(Value::Null.to_literal(), "NULL");
    }

    #[test]
    fn numbers_render_bare() {
        assert_eq!(Value::Int(42).to_literal(), "42");
        assert_eq!(Value::BigInt(-7).to_literal(), "-7");
        assert_eq!(Value::Double(1.5).to_literal(), "1.5");
    }

    #[test]
    fn non_finite_doubles_are_quoted() {
        assert_eq!(Value::Double(f64::NAN).to_literal(), "'NaN'");
        assert_eq!(Value::Double(f64::INFINITY).to_literal(), "'inf'");
    }

    #[test]
    fn text_escapes_single_quotes() {
        assert_eq!(Value::Text("it's".to_string()).to_literal(), "'it''s'");
    }

    #[test]
    fn bytes_render_as_hex() {
        assert_eq!(
            Value::Bytes(vec![0xde, 0xad, 0x01]).to_literal(),
            r"'\xdead01'"
        );
    }

    #[test]
    fn uuid_is_quoted() {
        let u = Uuid::nil();
        assert_eq!(
            Value::Uuid(u).to_literal(),
            "'00000000-0000-0000-0000-000000000000'"
        );
    }

    #[test]
    fn json_is_quoted_and_escaped() {
        let j = serde_json::json!({"name": "o'brien"});
        assert_eq!(
            Value::Json(j).to_literal(),
            r#"'{"name":"o''brien"}'"#
        );
    }

    #[test]
    fn option_converts_to_null() {
        assert_eq!(Value::from(Option::<i32>::None), Value::Null);
        assert_eq!(Value::from(Some(1_i32)), Value::Int(1));
    }
}
