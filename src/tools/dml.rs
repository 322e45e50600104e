//! INSERT/UPDATE template builders with Oracle value formatting: numerics
//! stay unquoted, booleans map to 0/1, recognizable date strings become
//! DATE/TIMESTAMP/TO_DATE literals, and everything else is a quoted string
//! with doubled quotes.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::error::{SynthError, SynthResult};
use crate::ident;

static ISO_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date regex"));
static ISO_DATETIME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}:\d{2}(\.\d+)?$").expect("datetime regex"));
static DD_MON_YYYY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{2}-[A-Z]{3}-\d{4}$").expect("dd-mon regex"));
static SLASH_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{2}/\d{2}/\d{4}$").expect("slash date regex"));

pub fn build_insert(table: &str, data: &[(String, serde_json::Value)]) -> SynthResult<String> {
    ident::validate_object_name(table)?;
    if data.is_empty() {
        return Err(SynthError::invalid("INSERT requires at least one column value"));
    }
    let mut columns = Vec::with_capacity(data.len());
    let mut values = Vec::with_capacity(data.len());
    for (name, value) in data {
        columns.push(ident::escape_identifier(name)?);
        values.push(format_value(value));
    }
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        ident::escape_identifier(table)?,
        columns.join(", "),
        values.join(", ")
    );
    debug!(target: "orasynth::tools", "generated INSERT for {}", table);
    Ok(sql)
}

pub fn build_update(
    table: &str,
    data: &[(String, serde_json::Value)],
    where_clause: Option<&str>,
) -> SynthResult<String> {
    ident::validate_object_name(table)?;
    if data.is_empty() {
        return Err(SynthError::invalid("UPDATE requires at least one column value"));
    }
    let mut sets = Vec::with_capacity(data.len());
    for (name, value) in data {
        sets.push(format!("{} = {}", ident::escape_identifier(name)?, format_value(value)));
    }
    let mut sql = format!("UPDATE {} SET {}", ident::escape_identifier(table)?, sets.join(", "));
    match where_clause.map(str::trim).filter(|w| !w.is_empty()) {
        Some(w) => {
            sql.push_str(" WHERE ");
            sql.push_str(w);
        }
        None => warn!(target: "orasynth::tools", "UPDATE without WHERE clause on table {}", table),
    }
    debug!(target: "orasynth::tools", "generated UPDATE for {}", table);
    Ok(sql)
}

/// Render a JSON value as an Oracle SQL literal.
pub fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "NULL".to_string(),
        serde_json::Value::Bool(b) => if *b { "1" } else { "0" }.to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::String(s) => format_string_value(s),
        // JSON documents are stored as quoted text (12c+ JSON columns accept it)
        other => format!("'{}'", ident::escape_literal(&other.to_string())),
    }
}

fn format_string_value(s: &str) -> String {
    if ISO_DATE.is_match(s) {
        return format!("DATE '{}'", s);
    }
    if ISO_DATETIME.is_match(s) {
        return format!("TIMESTAMP '{}'", s.replacen('T', " ", 1));
    }
    if DD_MON_YYYY.is_match(s) {
        return format!("TO_DATE('{}', 'DD-MON-YYYY')", s);
    }
    if SLASH_DATE.is_match(s) {
        return format!("TO_DATE('{}', 'DD/MM/YYYY')", s);
    }
    if is_numeric_string(s) {
        return s.to_string();
    }
    format!("'{}'", ident::escape_literal(s))
}

fn is_numeric_string(s: &str) -> bool {
    let t = s.trim();
    if t.is_empty() {
        return false;
    }
    if t.contains('.') {
        t.parse::<f64>().is_ok()
    } else {
        t.parse::<i64>().is_ok()
    }
}

#[cfg(test)]
#[path = "dml_tests.rs"]
mod dml_tests;
