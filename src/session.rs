//! Per-session state, passed explicitly so multiple sessions can run
//! concurrently without cross-talk. Holds the schema cache and the capability
//! profile probed at session start; neither is global.

use std::sync::Arc;
use std::time::Duration;

use crate::capability::CapabilityProfile;
use crate::catalog::CatalogReader;
use crate::discovery::SchemaCache;

pub struct SessionContext {
    pub cache: SchemaCache,
    pub capabilities: CapabilityProfile,
}

impl SessionContext {
    pub fn new(catalog: Arc<dyn CatalogReader>, capabilities: CapabilityProfile) -> Self {
        SessionContext { cache: SchemaCache::new(catalog), capabilities }
    }

    pub fn with_cache_max_age(
        catalog: Arc<dyn CatalogReader>,
        capabilities: CapabilityProfile,
        max_age: Duration,
    ) -> Self {
        SessionContext { cache: SchemaCache::with_max_age(catalog, max_age), capabilities }
    }
}
