//! Catalog reader: the only I/O stage of the discovery pipeline
//! ------------------------------------------------------------
//! `describe(table)` returns the table's columns in native ordinal order by
//! querying the engine's metadata views through the `Executor` boundary.
//! No caching happens here; memoization is `discovery::cache`'s job.

use std::sync::Arc;

use futures_util::future::BoxFuture;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SynthError, SynthResult};
use crate::exec::{row_str, row_u32, Executor};
use crate::ident;

/// Broad type family derived from the declared Oracle type, used by the role
/// classifier so it never has to string-match raw type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeFamily {
    Numeric,
    Text,
    Temporal,
    Lob,
    Vector,
    Other,
}

impl TypeFamily {
    /// Map a declared Oracle type to its family. Precision qualifiers like
    /// `TIMESTAMP(6) WITH TIME ZONE` or `NUMBER(10,2)` are tolerated.
    pub fn from_declared(data_type: &str) -> Self {
        let t = data_type.trim().to_ascii_uppercase();
        let base = t.split(['(', ' ']).next().unwrap_or("");
        match base {
            "NUMBER" | "FLOAT" | "INTEGER" | "INT" | "SMALLINT" | "DECIMAL" | "NUMERIC"
            | "BINARY_FLOAT" | "BINARY_DOUBLE" => TypeFamily::Numeric,
            "VARCHAR2" | "VARCHAR" | "NVARCHAR2" | "CHAR" | "NCHAR" => TypeFamily::Text,
            "DATE" | "TIMESTAMP" => TypeFamily::Temporal,
            "CLOB" | "NCLOB" | "BLOB" | "LONG" | "RAW" => TypeFamily::Lob,
            "VECTOR" => TypeFamily::Vector,
            _ => {
                if t.starts_with("TIMESTAMP") || t.starts_with("INTERVAL") {
                    TypeFamily::Temporal
                } else {
                    TypeFamily::Other
                }
            }
        }
    }
}

/// One column as reported by the metadata views, in ordinal order.
/// Immutable once produced; owned by the cache entry for its table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    pub data_type: String,
    pub type_family: TypeFamily,
    pub nullable: bool,
    pub position: u32,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>, nullable: bool, position: u32) -> Self {
        let data_type = data_type.into();
        let type_family = TypeFamily::from_declared(&data_type);
        ColumnDescriptor { name: name.into(), data_type, type_family, nullable, position }
    }

    pub fn is_numeric(&self) -> bool {
        self.type_family == TypeFamily::Numeric
    }
}

/// Metadata lookup boundary. Implementations must return columns ordered by
/// the engine's native ordinal position and must distinguish "table absent"
/// (`NotFound`) from "metadata views inaccessible" (`Access`).
pub trait CatalogReader: Send + Sync {
    fn describe<'a>(&'a self, table: &'a str) -> BoxFuture<'a, SynthResult<Vec<ColumnDescriptor>>>;
}

const DESCRIBE_SQL: &str = "SELECT column_name, data_type, nullable, column_id \
     FROM all_tab_columns WHERE table_name = ? AND owner = USER ORDER BY column_id";

/// Production reader backed by `ALL_TAB_COLUMNS` via the Executor boundary.
pub struct OracleCatalogReader {
    exec: Arc<dyn Executor>,
}

impl OracleCatalogReader {
    pub fn new(exec: Arc<dyn Executor>) -> Self {
        OracleCatalogReader { exec }
    }
}

impl CatalogReader for OracleCatalogReader {
    fn describe<'a>(&'a self, table: &'a str) -> BoxFuture<'a, SynthResult<Vec<ColumnDescriptor>>> {
        Box::pin(async move {
            let key = table.trim().to_ascii_uppercase();
            ident::validate_object_name(&key)?;
            let binds = [serde_json::Value::String(key.clone())];
            let rows = self
                .exec
                .query(DESCRIBE_SQL, &binds)
                .await
                .map_err(|e| classify_metadata_error(&key, e))?;
            if rows.is_empty() {
                return Err(SynthError::not_found(&key));
            }
            let mut cols = Vec::with_capacity(rows.len());
            for (i, row) in rows.iter().enumerate() {
                let name = row_str(row, "column_name")
                    .ok_or_else(|| SynthError::Metadata(anyhow::anyhow!("missing column_name in metadata row")))?;
                let data_type = row_str(row, "data_type").unwrap_or("VARCHAR2");
                let nullable = row_str(row, "nullable").map(|v| v.eq_ignore_ascii_case("Y")).unwrap_or(true);
                let position = row_u32(row, "column_id").unwrap_or(i as u32 + 1);
                cols.push(ColumnDescriptor::new(name, data_type, nullable, position));
            }
            cols.sort_by_key(|c| c.position);
            debug!(target: "orasynth::catalog", "described {}: {} columns", key, cols.len());
            Ok(cols)
        })
    }
}

/// Executor failures against metadata views are privilege problems far more
/// often than driver faults under least-privilege accounts; surface them as
/// `Access` when the error text says so.
fn classify_metadata_error(object: &str, e: anyhow::Error) -> SynthError {
    let text = e.to_string();
    if text.contains("ORA-00942") || text.contains("ORA-01031") || text.to_lowercase().contains("insufficient privileges") {
        SynthError::access(object, text)
    } else {
        SynthError::Metadata(e)
    }
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod catalog_tests;
