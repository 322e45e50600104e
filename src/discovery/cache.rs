//! Schema cache
//! ------------
//! Process-wide (per session context) memoization of catalog + classifier
//! results. Single-flight per table name: concurrent requests for the same
//! uncached table coalesce onto one catalog round-trip. Entries are replaced
//! wholesale — never mutated — and expire by max age; there is no LRU sizing,
//! this is a small bounded per-session cache.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::catalog::CatalogReader;
use crate::error::SynthResult;

use super::TableSchema;

/// Default entry lifetime. Schemas change rarely within a session; a few
/// minutes keeps repeated tool calls cheap without serving stale columns
/// after DDL.
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(300);

struct CacheEntry {
    cell: OnceCell<Arc<TableSchema>>,
    created: Instant,
}

impl CacheEntry {
    fn fresh() -> Arc<Self> {
        Arc::new(CacheEntry { cell: OnceCell::new(), created: Instant::now() })
    }
}

pub struct SchemaCache {
    catalog: Arc<dyn CatalogReader>,
    max_age: Duration,
    entries: Mutex<HashMap<String, Arc<CacheEntry>>>,
}

impl SchemaCache {
    pub fn new(catalog: Arc<dyn CatalogReader>) -> Self {
        Self::with_max_age(catalog, DEFAULT_MAX_AGE)
    }

    pub fn with_max_age(catalog: Arc<dyn CatalogReader>, max_age: Duration) -> Self {
        SchemaCache { catalog, max_age, entries: Mutex::new(HashMap::new()) }
    }

    /// Fetch the schema for `table`, loading through the catalog reader at
    /// most once per cache generation. Concurrent callers for the same
    /// uncached table wait on the first in-flight load; a failed load leaves
    /// no poisoned entry, so the next caller simply retries.
    pub async fn get_or_load(&self, table: &str) -> SynthResult<Arc<TableSchema>> {
        let key = table.trim().to_ascii_uppercase();
        let entry = {
            let mut map = self.entries.lock();
            match map.get(&key) {
                Some(e) if !self.is_expired(e) => e.clone(),
                _ => {
                    // Absent or stale: install a fresh generation wholesale.
                    let e = CacheEntry::fresh();
                    map.insert(key.clone(), e.clone());
                    e
                }
            }
        };
        let schema = entry
            .cell
            .get_or_try_init(|| async {
                debug!(target: "orasynth::discovery", "cache miss, describing {}", key);
                let columns = self.catalog.describe(&key).await?;
                Ok::<_, crate::error::SynthError>(TableSchema::classify(key.clone(), columns))
            })
            .await?;
        Ok(schema.clone())
    }

    /// Drop the entry for `table`; the next request reloads it.
    pub fn invalidate(&self, table: &str) {
        let key = table.trim().to_ascii_uppercase();
        self.entries.lock().remove(&key);
    }

    /// Drop everything (DDL storms, tests).
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    fn is_expired(&self, entry: &CacheEntry) -> bool {
        // Only a completed load can expire; an in-flight generation is by
        // definition current.
        entry.cell.initialized() && entry.created.elapsed() > self.max_age
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod cache_tests;
