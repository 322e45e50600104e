//! Oracle identifier validation, escaping and name heuristics
//! ----------------------------------------------------------
//! Single source of truth for identifier handling used by both the synthesis
//! pipeline (table/column names end up embedded in SQL text) and the literal
//! template builders in `tools`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use crate::error::{SynthError, SynthResult};

/// Unquoted Oracle identifier: letter first, then letters/digits/_/$/#.
static PLAIN_IDENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_$#]*$").expect("ident regex"));

/// Databases/tablespaces that must never be dropped through the tool surface.
static SYSTEM_DATABASES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["SYSTEM", "SYSAUX", "TEMP", "USERS", "EXAMPLE", "APEX", "HR", "OE", "PM", "IX", "SH", "BI"]
        .into_iter()
        .collect()
});

/// Accounts that must never be altered or dropped through the tool surface.
static SYSTEM_USERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["SYS", "SYSTEM", "SYSAUX", "DBSNMP", "SYSMAN", "OUTLN", "DIP", "ORACLE_OCM", "APPQOSSYS"]
        .into_iter()
        .collect()
});

pub fn is_system_database(name: &str) -> bool {
    SYSTEM_DATABASES.contains(name.to_ascii_uppercase().as_str())
}

pub fn is_system_user(name: &str) -> bool {
    SYSTEM_USERS.contains(name.to_ascii_uppercase().as_str())
}

/// Validate an object name (table, user, tablespace) against Oracle's 30-byte
/// classic limit and the unquoted identifier grammar.
pub fn validate_object_name(name: &str) -> SynthResult<()> {
    let t = name.trim();
    if t.is_empty() {
        return Err(SynthError::invalid("identifier cannot be empty"));
    }
    if t.len() > 30 {
        return Err(SynthError::invalid(format!("identifier exceeds 30 characters: {}", t)));
    }
    if !PLAIN_IDENT.is_match(t) {
        return Err(SynthError::invalid(format!("invalid identifier: {}", t)));
    }
    Ok(())
}

/// Escape an identifier for embedding in generated SQL. Characters outside the
/// identifier alphabet are stripped; identifiers that still need quoting
/// (leading digit) are wrapped in double quotes.
pub fn escape_identifier(ident: &str) -> SynthResult<String> {
    let t = ident.trim();
    if t.is_empty() {
        return Err(SynthError::invalid("identifier cannot be empty"));
    }
    let cleaned: String = t.chars().filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '#')).collect();
    if cleaned.is_empty() {
        return Err(SynthError::invalid(format!("identifier has no valid characters: {}", t)));
    }
    if PLAIN_IDENT.is_match(&cleaned) {
        Ok(cleaned)
    } else {
        Ok(format!("\"{}\"", cleaned))
    }
}

/// Escape a single-quoted SQL literal (doubling embedded quotes).
pub fn escape_literal(value: &str) -> String {
    value.replace('\'', "''")
}

/// Naive English singularization used by the name-pattern heuristics:
/// EMPLOYEES -> employee, CATEGORIES -> category, STATUSES -> status.
/// Lowercases its result; callers compare case-insensitively.
pub fn singularize(name: &str) -> String {
    let s = name.trim().to_ascii_lowercase();
    if let Some(stem) = s.strip_suffix("ies") {
        if !stem.is_empty() {
            return format!("{}y", stem);
        }
    }
    for suf in ["sses", "shes", "ches", "xes", "zes"] {
        if s.ends_with(suf) {
            return s[..s.len() - 2].to_string();
        }
    }
    if s.ends_with('s') && !s.ends_with("ss") && s.len() > 1 {
        return s[..s.len() - 1].to_string();
    }
    s
}
