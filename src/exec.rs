//! Execution boundary. This crate never runs SQL itself; it only formats text
//! and metadata queries and hands them to whatever driver the surrounding
//! service wires in. Rows come back as loose JSON maps so the boundary stays
//! driver-agnostic.

use futures_util::future::BoxFuture;

/// One result row: column name -> value.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Minimal async query interface implemented by the owning service's
/// connection layer. Binds are positional and map to `?`-style placeholders.
pub trait Executor: Send + Sync {
    fn query<'a>(
        &'a self,
        sql: &'a str,
        binds: &'a [serde_json::Value],
    ) -> BoxFuture<'a, anyhow::Result<Vec<Row>>>;
}

/// Case-insensitive string field lookup; metadata views come back upper-cased
/// from some drivers and lower-cased from others.
pub fn row_str<'a>(row: &'a Row, key: &str) -> Option<&'a str> {
    row_value(row, key).and_then(|v| v.as_str())
}

/// Case-insensitive numeric field lookup.
pub fn row_u32(row: &Row, key: &str) -> Option<u32> {
    row_value(row, key).and_then(|v| v.as_u64()).map(|n| n as u32)
}

fn row_value<'a>(row: &'a Row, key: &str) -> Option<&'a serde_json::Value> {
    if let Some(v) = row.get(key) {
        return Some(v);
    }
    row.iter().find(|(k, _)| k.eq_ignore_ascii_case(key)).map(|(_, v)| v)
}
