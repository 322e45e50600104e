//! Vector similarity synthesis (23ai+), gated on the capability profile.

use tracing::debug;

use crate::capability::Feature;
use crate::catalog::TypeFamily;
use crate::error::{SynthError, SynthResult};
use crate::session::SessionContext;

use super::{display_columns_for, SynthesizedQuery};

#[derive(Debug, Clone)]
pub struct VectorSearchRequest {
    pub table: String,
    /// Defaults to the table's first VECTOR-typed column.
    pub vector_column: Option<String>,
    /// VECTOR_DISTANCE metric; COSINE unless overridden.
    pub metric: Option<String>,
    pub top_k: u32,
    pub select_columns: Option<Vec<String>>,
}

impl VectorSearchRequest {
    pub fn new(table: impl Into<String>) -> Self {
        VectorSearchRequest {
            table: table.into(),
            vector_column: None,
            metric: None,
            top_k: 10,
            select_columns: None,
        }
    }
}

/// Build `SELECT ..., VECTOR_DISTANCE(col, :query_vector, METRIC) AS distance
/// ... FETCH FIRST k ROWS ONLY`. Fails with `Capability` before any SQL is
/// composed when the engine lacks vector search.
pub async fn synthesize_vector_search(
    ctx: &SessionContext,
    req: &VectorSearchRequest,
) -> SynthResult<SynthesizedQuery> {
    if !ctx.capabilities.supports(Feature::VectorSearch) {
        return Err(SynthError::capability(Feature::VectorSearch.to_string()));
    }
    let schema = ctx.cache.get_or_load(&req.table).await?;
    let mut degradations = Vec::new();

    let vector_column = match &req.vector_column {
        Some(c) => schema
            .find_column(c)
            .ok_or_else(|| SynthError::invalid(format!("no such column: {}", c)))?
            .name
            .clone(),
        None => schema
            .columns
            .iter()
            .find(|c| c.type_family == TypeFamily::Vector)
            .ok_or_else(|| {
                SynthError::unsupported_schema(&schema.table, "no VECTOR-typed column for similarity search")
            })?
            .name
            .clone(),
    };

    let mut display_columns = Vec::new();
    let select_list = match &req.select_columns {
        Some(cols) if !cols.is_empty() => cols.join(", "),
        _ => {
            let picked = display_columns_for(&schema);
            if picked.is_empty() {
                degradations.push(format!(
                    "{} has no identifier/name/measure columns; selecting *",
                    schema.table
                ));
                "*".to_string()
            } else {
                let list = picked.iter().map(|c| c.column.clone()).collect::<Vec<_>>().join(", ");
                display_columns = picked;
                list
            }
        }
    };

    let metric = req.metric.as_deref().unwrap_or("COSINE").to_ascii_uppercase();
    let sql = format!(
        "SELECT {}, VECTOR_DISTANCE({}, :query_vector, {}) AS distance FROM {} ORDER BY distance FETCH FIRST {} ROWS ONLY",
        select_list,
        vector_column,
        metric,
        schema.table.to_ascii_lowercase(),
        req.top_k
    );

    debug!(target: "orasynth::synth", "vector synthesis on {}: {}", schema.table, sql);
    Ok(SynthesizedQuery {
        sql,
        tables: vec![schema.table.clone()],
        predicates: Vec::new(),
        display_columns,
        degradations,
    })
}
