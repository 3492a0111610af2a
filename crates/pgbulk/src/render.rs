//! Placeholder substitution for human-readable SQL previews.
//!
//! Debug mode renders each batch as executable-looking SQL instead of sending
//! it to the database: every `$n` placeholder is replaced by the matching
//! buffered value quoted as a SQL literal. The same rendering backs the
//! non-destructive pending-buffer preview.

use crate::value::Value;

/// Substitute `$1, $2, ...` placeholders in `sql` with literal-rendered
/// `values`, left-to-right.
///
/// Placeholders without a matching value are left untouched, as is any `$`
/// not followed by digits.
pub fn render(sql: &str, values: &[Value]) -> String {
    let mut out = String::with_capacity(sql.len() + values.len() * 8);
    let mut rest = sql;

    while let Some(pos) = rest.find('$') {
        let (head, tail) = rest.split_at(pos);
        out.push_str(head);

        let digits_end = tail[1..]
            .find(|c: char| !c.is_ascii_digit())
            .map(|i| i + 1)
            .unwrap_or(tail.len());
        if digits_end == 1 {
            // A lone '$' is not a placeholder.
            out.push('$');
            rest = &tail[1..];
            continue;
        }

        let index: usize = tail[1..digits_end].parse().unwrap_or(0);
        if index >= 1 && index <= values.len() {
            out.push_str(&values[index - 1].to_literal());
        } else {
            out.push_str(&tail[..digits_end]);
        }
        rest = &tail[digits_end..];
    }

    out.push_str(rest);
    out
}
