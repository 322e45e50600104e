//! Multi-table join synthesis over an inferred predicate chain.

use futures_util::future::try_join_all;
use tracing::debug;

use crate::capability::Feature;
use crate::discovery::relations;
use crate::error::{SynthError, SynthResult};
use crate::session::SessionContext;

use super::{display_columns_for, SynthesizedQuery};

/// Parameters for join synthesis. Only `tables` is required; everything else
/// overrides discovery when present.
#[derive(Debug, Clone, Default)]
pub struct JoinRequest {
    /// Join chain in caller order; predicates connect adjacent pairs.
    pub tables: Vec<String>,
    pub select_columns: Option<Vec<String>>,
    pub where_clause: Option<String>,
    pub limit: Option<u32>,
}

impl JoinRequest {
    pub fn new<S: Into<String>>(tables: impl IntoIterator<Item = S>) -> Self {
        JoinRequest { tables: tables.into_iter().map(Into::into).collect(), ..Default::default() }
    }
}

/// Build `SELECT ... FROM t1 JOIN t2 ON ... [WHERE ...]` from discovered
/// roles and inferred predicates. One failed schema load aborts the whole
/// call; a partially joined query is never returned.
pub async fn synthesize_join(ctx: &SessionContext, req: &JoinRequest) -> SynthResult<SynthesizedQuery> {
    if req.tables.is_empty() {
        return Err(SynthError::invalid("join synthesis requires at least one table"));
    }
    // Independent tables: fan the metadata loads out concurrently.
    let schemas = try_join_all(req.tables.iter().map(|t| ctx.cache.get_or_load(t))).await?;

    let (predicates, mut degradations) = relations::infer_joins(&schemas)?;

    let mut display_columns = Vec::new();
    let select_list = match &req.select_columns {
        Some(cols) if !cols.is_empty() => cols.join(", "),
        _ => {
            let mut parts = Vec::new();
            for schema in &schemas {
                let picked = display_columns_for(schema);
                if picked.is_empty() {
                    degradations.push(format!(
                        "{} has no identifier/name/measure columns; selecting {}.*",
                        schema.table,
                        schema.table.to_ascii_lowercase()
                    ));
                    parts.push(format!("{}.*", schema.table.to_ascii_lowercase()));
                } else {
                    parts.extend(picked.iter().map(|c| c.column.clone()));
                    display_columns.extend(picked);
                }
            }
            parts.join(", ")
        }
    };

    let mut sql = format!("SELECT {} FROM {}", select_list, schemas[0].table.to_ascii_lowercase());
    for (schema, predicate) in schemas[1..].iter().zip(predicates.iter()) {
        sql.push_str(&format!(
            " JOIN {} ON {}",
            schema.table.to_ascii_lowercase(),
            predicate.to_condition()
        ));
    }
    if let Some(w) = req.where_clause.as_deref().filter(|w| !w.trim().is_empty()) {
        sql.push_str(" WHERE ");
        sql.push_str(w.trim());
    }
    if let Some(limit) = req.limit {
        if !ctx.capabilities.supports(Feature::RowLimitClause) {
            return Err(SynthError::capability(Feature::RowLimitClause.to_string()));
        }
        sql.push_str(&format!(" FETCH FIRST {} ROWS ONLY", limit));
    }

    debug!(target: "orasynth::synth", "join synthesis over {:?}: {}", req.tables, sql);
    Ok(SynthesizedQuery {
        sql,
        tables: schemas.iter().map(|s| s.table.clone()).collect(),
        predicates,
        display_columns,
        degradations,
    })
}
