//! Schema discovery: role classification, relationship inference, caching
//! ----------------------------------------------------------------------
//! Pure data pipeline stages between the catalog reader (I/O) and the SQL
//! synthesizer. Everything here operates on plain descriptors so the
//! heuristics are unit-testable without a live database.

use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::catalog::ColumnDescriptor;

pub mod cache;
pub mod relations;
pub mod roles;

pub use cache::SchemaCache;
pub use relations::{infer_joins, Confidence, JoinPredicate};

/// Semantic role assigned to a column by the classifier. At most one role per
/// column; `None` is a legitimate outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    Identifier,
    DisplayName,
    Measure,
    Temporal,
    Email,
    ParentReference,
    None,
}

/// A table's columns plus their classified roles. Created on first discovery,
/// shared as `Arc<TableSchema>`, and replaced wholesale on invalidation —
/// never mutated in place, so concurrent readers stay safe.
#[derive(Debug)]
pub struct TableSchema {
    pub table: String,
    pub columns: Vec<ColumnDescriptor>,
    /// Parallel to `columns`.
    pub roles: Vec<ColumnRole>,
    pub loaded_at: Instant,
}

impl TableSchema {
    /// Classify `columns` and assemble the schema for `table`.
    pub fn classify(table: impl Into<String>, columns: Vec<ColumnDescriptor>) -> Arc<Self> {
        let table = table.into();
        let roles = roles::classify(&table, &columns);
        Arc::new(TableSchema { table, columns, roles, loaded_at: Instant::now() })
    }

    /// The column elected as the table's row identifier, if any.
    pub fn identifier(&self) -> Option<&ColumnDescriptor> {
        self.column_with_role(ColumnRole::Identifier)
    }

    /// First column carrying `role`, in ordinal order.
    pub fn column_with_role(&self, role: ColumnRole) -> Option<&ColumnDescriptor> {
        self.roles
            .iter()
            .position(|r| *r == role)
            .map(|i| &self.columns[i])
    }

    /// All columns carrying `role`, in ordinal order.
    pub fn columns_with_role(&self, role: ColumnRole) -> Vec<&ColumnDescriptor> {
        self.roles
            .iter()
            .zip(self.columns.iter())
            .filter(|(r, _)| **r == role)
            .map(|(_, c)| c)
            .collect()
    }

    /// Role of the named column (case-insensitive), `ColumnRole::None` when
    /// the column is unclassified or absent.
    pub fn role_of(&self, column: &str) -> ColumnRole {
        self.columns
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(column))
            .map(|i| self.roles[i])
            .unwrap_or(ColumnRole::None)
    }

    /// Case-insensitive column lookup by name.
    pub fn find_column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name.eq_ignore_ascii_case(name))
    }
}
