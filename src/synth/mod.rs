//! Query synthesizer
//! -----------------
//! Composes final SQL text for four query shapes — multi-table join,
//! window function, hierarchical traversal, and vector similarity — from the
//! roles and relationships produced by `discovery`. Caller-supplied overrides
//! always take precedence over discovery; every fallback taken is reported in
//! the returned metadata rather than hidden. This module never executes SQL.

use serde::{Deserialize, Serialize};

use crate::discovery::{ColumnRole, JoinPredicate, TableSchema};

pub mod hierarchy;
pub mod join;
pub mod vector;
pub mod window;

pub use hierarchy::{synthesize_hierarchy, HierarchyRequest};
pub use join::{synthesize_join, JoinRequest};
pub use vector::{synthesize_vector_search, VectorSearchRequest};
pub use window::{synthesize_window, WindowRequest};

/// One selected display column and the role that earned it its place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayColumn {
    pub table: String,
    pub column: String,
    pub role: ColumnRole,
}

/// Final SQL text plus the discovery metadata that produced it, returned to
/// the caller for observability. Execution belongs to the owning service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesizedQuery {
    pub sql: String,
    pub tables: Vec<String>,
    pub predicates: Vec<JoinPredicate>,
    pub display_columns: Vec<DisplayColumn>,
    /// Human-readable notes for every fallback taken (low-confidence join,
    /// `*` selection, substitute hierarchy key). Empty means pure discovery.
    pub degradations: Vec<String>,
}

/// Pick the conventional display columns for one table: Identifier, then
/// DisplayName, then every Measure, in that role order. Empty when the table
/// carries none of those roles (callers degrade to `*`).
pub(crate) fn display_columns_for(schema: &TableSchema) -> Vec<DisplayColumn> {
    let mut out = Vec::new();
    for role in [ColumnRole::Identifier, ColumnRole::DisplayName] {
        if let Some(col) = schema.column_with_role(role) {
            out.push(DisplayColumn { table: schema.table.clone(), column: col.name.clone(), role });
        }
    }
    for col in schema.columns_with_role(ColumnRole::Measure) {
        out.push(DisplayColumn {
            table: schema.table.clone(),
            column: col.name.clone(),
            role: ColumnRole::Measure,
        });
    }
    out
}
