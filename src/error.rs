//! Unified error model for schema discovery and SQL synthesis.
//! Every variant is local to a single synthesis call; nothing here is retried
//! or swallowed. Degradations (low-confidence joins, `*` fallbacks) are not
//! errors and travel in the synthesized query's metadata instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SynthError {
    /// The named object does not exist or is not visible to the current principal.
    #[error("object not found: {object}")]
    NotFound { object: String },

    /// Metadata views themselves are inaccessible under the current privileges.
    /// Distinct from NotFound: common under least-privilege accounts.
    #[error("metadata access denied for {object}: {detail}")]
    Access { object: String, detail: String },

    /// Join inference was impossible for an adjacent table pair.
    #[error("cannot infer join between {left} and {right}: {reason}")]
    Inference { left: String, right: String, reason: String },

    /// The table's shape cannot support the requested query form
    /// (e.g. hierarchy without a parent-reference column).
    #[error("schema of {table} does not support this query shape: {detail}")]
    UnsupportedSchema { table: String, detail: String },

    /// The target engine lacks a feature the requested SQL would need.
    #[error("engine capability missing: {feature}")]
    Capability { feature: String },

    /// Caller-supplied input failed validation (bad identifier, empty column list).
    #[error("invalid input: {detail}")]
    Invalid { detail: String },

    /// A metadata query failed for a reason other than absence or privileges.
    #[error("metadata query failed: {0}")]
    Metadata(#[source] anyhow::Error),
}

impl SynthError {
    pub fn not_found(object: impl Into<String>) -> Self {
        SynthError::NotFound { object: object.into() }
    }
    pub fn access(object: impl Into<String>, detail: impl Into<String>) -> Self {
        SynthError::Access { object: object.into(), detail: detail.into() }
    }
    pub fn inference(left: impl Into<String>, right: impl Into<String>, reason: impl Into<String>) -> Self {
        SynthError::Inference { left: left.into(), right: right.into(), reason: reason.into() }
    }
    pub fn unsupported_schema(table: impl Into<String>, detail: impl Into<String>) -> Self {
        SynthError::UnsupportedSchema { table: table.into(), detail: detail.into() }
    }
    pub fn capability(feature: impl Into<String>) -> Self {
        SynthError::Capability { feature: feature.into() }
    }
    pub fn invalid(detail: impl Into<String>) -> Self {
        SynthError::Invalid { detail: detail.into() }
    }

    /// Stable short code for transports that want a machine-readable kind.
    pub fn code_str(&self) -> &'static str {
        match self {
            SynthError::NotFound { .. } => "not_found",
            SynthError::Access { .. } => "access_denied",
            SynthError::Inference { .. } => "inference_failed",
            SynthError::UnsupportedSchema { .. } => "unsupported_schema",
            SynthError::Capability { .. } => "capability_missing",
            SynthError::Invalid { .. } => "invalid_input",
            SynthError::Metadata(_) => "metadata_error",
        }
    }
}

pub type SynthResult<T> = Result<T, SynthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_mapping() {
        assert_eq!(SynthError::not_found("EMPLOYEES").code_str(), "not_found");
        assert_eq!(SynthError::access("ALL_TAB_COLUMNS", "ORA-01031").code_str(), "access_denied");
        assert_eq!(SynthError::inference("A", "B", "no identifier").code_str(), "inference_failed");
        assert_eq!(SynthError::capability("vector_search").code_str(), "capability_missing");
    }

    #[test]
    fn display_includes_object() {
        let e = SynthError::not_found("EMPLOYEES");
        assert!(e.to_string().contains("EMPLOYEES"));
    }
}
