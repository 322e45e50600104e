#![allow(dead_code)]

//! Shared in-memory Oracle stand-in for integration tests. Answers the
//! metadata and capability probe queries the crate issues, nothing else.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures_util::future::BoxFuture;
use serde_json::json;

use orasynth::capability::{self, CapabilityProfile};
use orasynth::catalog::OracleCatalogReader;
use orasynth::exec::{Executor, Row};
use orasynth::SessionContext;

pub struct MockOracle {
    pub version: String,
    pub cdb: bool,
    pub vector_type: bool,
    pub awr: bool,
    pub partitioning: bool,
    /// table name -> (column, declared type, nullable) in ordinal order
    tables: HashMap<String, Vec<(String, String, bool)>>,
    pub describe_calls: AtomicUsize,
}

impl MockOracle {
    pub fn v23ai() -> Self {
        MockOracle {
            version: "23.4.0.24.05".into(),
            cdb: true,
            vector_type: true,
            awr: true,
            partitioning: true,
            tables: HashMap::new(),
            describe_calls: AtomicUsize::new(0),
        }
    }

    pub fn v11g() -> Self {
        MockOracle {
            version: "11.2.0.4".into(),
            cdb: false,
            vector_type: false,
            awr: false,
            partitioning: false,
            tables: HashMap::new(),
            describe_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_table(mut self, name: &str, cols: &[(&str, &str)]) -> Self {
        let cols = cols
            .iter()
            .map(|(n, t)| (n.to_string(), t.to_string(), true))
            .collect();
        self.tables.insert(name.to_ascii_uppercase(), cols);
        self
    }

    /// The standard HR-style fixture used across the end-to-end tests.
    pub fn with_hr_tables(self) -> Self {
        self.with_table(
            "EMPLOYEES",
            &[
                ("EMPLOYEE_ID", "NUMBER"),
                ("NAME", "VARCHAR2"),
                ("MANAGER_ID", "NUMBER"),
                ("SALARY", "NUMBER"),
                ("DEPARTMENT_ID", "NUMBER"),
            ],
        )
        .with_table("DEPARTMENTS", &[("DEPARTMENT_ID", "NUMBER"), ("DEPT_NAME", "VARCHAR2")])
        .with_table("DOCS", &[("DOC_ID", "NUMBER"), ("TITLE_NAME", "VARCHAR2"), ("EMBEDDING", "VECTOR")])
    }

    pub fn describe_count(&self) -> usize {
        self.describe_calls.load(Ordering::SeqCst)
    }

    fn one_row(pairs: &[(&str, serde_json::Value)]) -> Vec<Row> {
        let mut row = Row::new();
        for (k, v) in pairs {
            row.insert((*k).to_string(), v.clone());
        }
        vec![row]
    }
}

impl Executor for MockOracle {
    fn query<'a>(
        &'a self,
        sql: &'a str,
        binds: &'a [serde_json::Value],
    ) -> BoxFuture<'a, anyhow::Result<Vec<Row>>> {
        Box::pin(async move {
            if sql.contains("v$instance") {
                return Ok(Self::one_row(&[("VERSION", json!(self.version))]));
            }
            if sql.contains("v$database") {
                return Ok(Self::one_row(&[("CDB", json!(if self.cdb { "YES" } else { "NO" }))]));
            }
            if sql.contains("dba_types") {
                return Ok(Self::one_row(&[("N", json!(if self.vector_type { 1 } else { 0 }))]));
            }
            if sql.contains("dba_hist_snapshot") {
                if self.awr {
                    return Ok(Self::one_row(&[("N", json!(1))]));
                }
                anyhow::bail!("ORA-00942: table or view does not exist");
            }
            if sql.contains("v$option") {
                let v = if self.partitioning { "TRUE" } else { "FALSE" };
                return Ok(Self::one_row(&[("VALUE", json!(v))]));
            }
            if sql.contains("all_tab_columns") {
                self.describe_calls.fetch_add(1, Ordering::SeqCst);
                let table = binds
                    .first()
                    .and_then(|v| v.as_str())
                    .ok_or_else(|| anyhow::anyhow!("describe query without a table bind"))?;
                let cols = match self.tables.get(table) {
                    Some(cols) => cols,
                    None => return Ok(Vec::new()),
                };
                let rows = cols
                    .iter()
                    .enumerate()
                    .map(|(i, (name, dtype, nullable))| {
                        let mut row = Row::new();
                        row.insert("COLUMN_NAME".into(), json!(name));
                        row.insert("DATA_TYPE".into(), json!(dtype));
                        row.insert("NULLABLE".into(), json!(if *nullable { "Y" } else { "N" }));
                        row.insert("COLUMN_ID".into(), json!(i as u32 + 1));
                        row
                    })
                    .collect();
                return Ok(rows);
            }
            anyhow::bail!("unexpected query in mock: {}", sql)
        })
    }
}

/// Probe the mock and wire up a full session over the production catalog
/// reader, exactly as the owning service would.
pub async fn session_over(mock: Arc<MockOracle>) -> (SessionContext, CapabilityProfile) {
    orasynth::trace::init();
    let profile = capability::probe(mock.as_ref()).await;
    let catalog = Arc::new(OracleCatalogReader::new(mock));
    (SessionContext::new(catalog, profile.clone()), profile)
}
