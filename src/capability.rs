//! Engine capability negotiation
//! -----------------------------
//! A `CapabilityProfile` is a static fact table built once per session by
//! probing the target engine, then consulted read-only by the synthesizer to
//! decide which dialect fragments are legal to emit (row limiting, vector
//! distance operators, PDB statements). It is never re-probed mid-session.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, warn};

use crate::exec::{row_str, row_u32, Executor};

/// Optional engine features the synthesizer may gate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Partitioning,
    Pdb,
    Awr,
    VectorSearch,
    Json,
    /// `FETCH FIRST n ROWS ONLY` row limiting (12c+).
    RowLimitClause,
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Feature::Partitioning => "partitioning",
            Feature::Pdb => "pdb",
            Feature::Awr => "awr",
            Feature::VectorSearch => "vector_search",
            Feature::Json => "json",
            Feature::RowLimitClause => "row_limit_clause",
        };
        f.write_str(s)
    }
}

/// Raw facts collected by the session-start probe. Each flag answers "did the
/// corresponding probe query succeed"; version gating happens in
/// `CapabilityProfile::supports`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProbeFlags {
    pub partitioning: bool,
    pub cdb: bool,
    pub awr_views: bool,
    pub vector_type: bool,
}

/// Read-only per-session capability profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapabilityProfile {
    pub version: String,
    pub major: u32,
    pub minor: u32,
    pub partitioning: bool,
    pub cdb: bool,
    pub awr: bool,
    pub vector_search: bool,
}

impl CapabilityProfile {
    /// Build a profile from a version banner plus probed flags.
    /// Unparseable versions degrade to 11.0, the oldest dialect we emit.
    pub fn from_probe(version: &str, flags: ProbeFlags) -> Self {
        let (major, minor) = parse_version(version).unwrap_or((11, 0));
        CapabilityProfile {
            version: version.to_string(),
            major,
            minor,
            partitioning: flags.partitioning,
            cdb: flags.cdb,
            awr: flags.awr_views,
            vector_search: flags.vector_type,
        }
    }

    pub fn supports(&self, feature: Feature) -> bool {
        match feature {
            Feature::Partitioning => self.partitioning,
            Feature::Pdb => self.cdb && self.major >= 12,
            Feature::Awr => self.awr && self.major >= 10,
            Feature::VectorSearch => self.vector_search && self.major >= 23,
            Feature::Json => self.major >= 12,
            Feature::RowLimitClause => self.major >= 12,
        }
    }
}

/// Parse "23.4.0.24.05"-style banners into (major, minor).
fn parse_version(version: &str) -> Option<(u32, u32)> {
    let mut parts = version.trim().split('.');
    let major = parts.next()?.trim().parse::<u32>().ok()?;
    let minor = parts.next().and_then(|p| p.trim().parse::<u32>().ok()).unwrap_or(0);
    Some((major, minor))
}

/// Probe the target engine once at session start. Individual probe failures
/// are not fatal: a missing view simply means the feature is absent under the
/// current account, which is exactly what the flag records.
pub async fn probe(exec: &dyn Executor) -> CapabilityProfile {
    let version = match exec.query("SELECT version FROM v$instance", &[]).await {
        Ok(rows) => rows
            .first()
            .and_then(|r| row_str(r, "version").map(|s| s.to_string()))
            .unwrap_or_else(|| "Unknown".to_string()),
        Err(e) => {
            warn!(target: "orasynth::capability", "version probe failed: {e}");
            "Unknown".to_string()
        }
    };

    let cdb = match exec.query("SELECT cdb FROM v$database", &[]).await {
        Ok(rows) => rows
            .first()
            .and_then(|r| row_str(r, "cdb"))
            .map(|v| v.eq_ignore_ascii_case("YES"))
            .unwrap_or(false),
        Err(_) => false,
    };

    let vector_type = match exec
        .query("SELECT COUNT(*) AS n FROM dba_types WHERE type_name = 'VECTOR'", &[])
        .await
    {
        Ok(rows) => rows.first().and_then(|r| row_u32(r, "n")).unwrap_or(0) > 0,
        Err(_) => false,
    };

    // AWR requires the Diagnostics Pack; an inaccessible view means "no".
    let awr_views = exec
        .query("SELECT COUNT(*) AS n FROM dba_hist_snapshot WHERE rownum = 1", &[])
        .await
        .is_ok();

    let partitioning = match exec
        .query("SELECT value FROM v$option WHERE parameter = 'Partitioning'", &[])
        .await
    {
        Ok(rows) => rows
            .first()
            .and_then(|r| row_str(r, "value"))
            .map(|v| v.eq_ignore_ascii_case("TRUE"))
            .unwrap_or(false),
        Err(_) => false,
    };

    let profile = CapabilityProfile::from_probe(
        &version,
        ProbeFlags { partitioning, cdb, awr_views, vector_type },
    );
    info!(target: "orasynth::capability",
        "engine version {} (major {}), pdb={} vector={} awr={} partitioning={}",
        profile.version, profile.major,
        profile.supports(Feature::Pdb), profile.supports(Feature::VectorSearch),
        profile.supports(Feature::Awr), profile.supports(Feature::Partitioning));
    profile
}
