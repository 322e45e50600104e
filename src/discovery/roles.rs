//! Column role classifier
//! ----------------------
//! Deterministic, order-sensitive heuristics. Rules are evaluated 1→6 per
//! column and short-circuit on the first hit:
//!   1. Identifier       name == "id" | "<singular>_id", or earliest numeric
//!                       "*_id" column in ordinal order
//!   2. ParentReference  name contains manager/parent/supervisor, same type
//!                       family as the table's identifier
//!   3. Email            name contains "email"
//!   4. DisplayName      name contains "name"
//!   5. Measure          numeric and name contains a money/quantity keyword
//!   6. Temporal         date/timestamp type family
//! Rule order is load-bearing: reordering changes discovery results, so tests
//! pin it down. A column that matches nothing gets `ColumnRole::None`.

use tracing::debug;

use crate::catalog::{ColumnDescriptor, TypeFamily};
use crate::ident;

use super::ColumnRole;

const PARENT_PATTERNS: [&str; 3] = ["manager", "parent", "supervisor"];
const MEASURE_PATTERNS: [&str; 6] = ["amount", "total", "price", "salary", "balance", "qty"];

/// Classify all columns of `table`, returning one role per column, parallel
/// to the input slice.
pub fn classify(table: &str, columns: &[ColumnDescriptor]) -> Vec<ColumnRole> {
    let identifier_idx = elect_identifier(table, columns);
    let identifier_family = identifier_idx.map(|i| columns[i].type_family);

    let roles: Vec<ColumnRole> = columns
        .iter()
        .enumerate()
        .map(|(i, col)| classify_one(i, col, identifier_idx, identifier_family))
        .collect();

    debug!(target: "orasynth::discovery",
        "classified {}: {:?}", table,
        columns.iter().zip(roles.iter()).map(|(c, r)| format!("{}={:?}", c.name, r)).collect::<Vec<_>>());
    roles
}

/// Identifier election is table-wide: the earliest column in ordinal order
/// matching any identifier pattern wins. Two "*_id" columns in one table is a
/// known ambiguity; earliest ordinal position is the deliberate tie-break.
fn elect_identifier(table: &str, columns: &[ColumnDescriptor]) -> Option<usize> {
    let singular_id = format!("{}_id", ident::singularize(table));
    columns.iter().position(|col| {
        let name = col.name.to_ascii_lowercase();
        name == "id"
            || name == singular_id
            || (name.ends_with("_id") && col.type_family == TypeFamily::Numeric)
    })
}

fn classify_one(
    idx: usize,
    col: &ColumnDescriptor,
    identifier_idx: Option<usize>,
    identifier_family: Option<TypeFamily>,
) -> ColumnRole {
    let name = col.name.to_ascii_lowercase();

    // Rule 1: the elected identifier column
    if identifier_idx == Some(idx) {
        return ColumnRole::Identifier;
    }
    // Rule 2: parent reference, same family as the identifier. Without an
    // identifier to compare against, degrade to requiring a numeric key so
    // hierarchy discovery still has something to work with.
    if PARENT_PATTERNS.iter().any(|p| name.contains(p)) {
        let family_ok = match identifier_family {
            Some(f) => col.type_family == f,
            None => col.type_family == TypeFamily::Numeric,
        };
        if family_ok {
            return ColumnRole::ParentReference;
        }
    }
    // Rule 3
    if name.contains("email") {
        return ColumnRole::Email;
    }
    // Rule 4
    if name.contains("name") {
        return ColumnRole::DisplayName;
    }
    // Rule 5
    if col.type_family == TypeFamily::Numeric && MEASURE_PATTERNS.iter().any(|p| name.contains(p)) {
        return ColumnRole::Measure;
    }
    // Rule 6
    if col.type_family == TypeFamily::Temporal {
        return ColumnRole::Temporal;
    }
    ColumnRole::None
}

#[cfg(test)]
#[path = "roles_tests.rs"]
mod roles_tests;
