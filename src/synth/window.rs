//! Window-function synthesis: `<fn> OVER (PARTITION BY ... ORDER BY ...)`.

use tracing::debug;

use crate::capability::Feature;
use crate::discovery::ColumnRole;
use crate::error::{SynthError, SynthResult};
use crate::session::SessionContext;

use super::{display_columns_for, SynthesizedQuery};

#[derive(Debug, Clone, Default)]
pub struct WindowRequest {
    pub table: String,
    /// Full function expression, e.g. `RANK()` or `SUM(salary)`.
    /// Defaults to `ROW_NUMBER()`.
    pub function: Option<String>,
    /// Defaults to no partitioning.
    pub partition_by: Option<Vec<String>>,
    /// Defaults to the table's Measure columns, descending — the most
    /// analytically useful ordering; Temporal columns when no Measure exists.
    pub order_by: Option<Vec<String>>,
    pub select_columns: Option<Vec<String>>,
    pub limit: Option<u32>,
}

impl WindowRequest {
    pub fn new(table: impl Into<String>) -> Self {
        WindowRequest { table: table.into(), ..Default::default() }
    }
}

pub async fn synthesize_window(ctx: &SessionContext, req: &WindowRequest) -> SynthResult<SynthesizedQuery> {
    if req.table.trim().is_empty() {
        return Err(SynthError::invalid("window synthesis requires a table"));
    }
    let schema = ctx.cache.get_or_load(&req.table).await?;
    let mut degradations = Vec::new();

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

    let order_terms: Vec<String> = match &req.order_by {
        Some(cols) if !cols.is_empty() => cols.clone(),
        _ => {
            let measures = schema.columns_with_role(ColumnRole::Measure);
            if !measures.is_empty() {
                measures.iter().map(|c| format!("{} DESC", c.name)).collect()
            } else {
                let temporals = schema.columns_with_role(ColumnRole::Temporal);
                if !temporals.is_empty() {
                    degradations.push(format!(
                        "{} has no measure columns; ordering window by temporal columns",
                        schema.table
                    ));
                    temporals.iter().map(|c| format!("{} DESC", c.name)).collect()
                } else {
                    degradations.push(format!(
                        "{} has no measure or temporal columns; window emitted without ORDER BY",
                        schema.table
                    ));
                    Vec::new()
                }
            }
        }
    };

    let mut over = String::new();
    if let Some(parts) = req.partition_by.as_ref().filter(|p| !p.is_empty()) {
        over.push_str(&format!("PARTITION BY {}", parts.join(", ")));
    }
    if !order_terms.is_empty() {
        if !over.is_empty() {
            over.push(' ');
        }
        over.push_str(&format!("ORDER BY {}", order_terms.join(", ")));
    }

    let function = req.function.as_deref().unwrap_or("ROW_NUMBER()");
    let mut sql = format!(
        "SELECT {}, {} OVER ({}) FROM {}",
        select_list,
        function,
        over,
        schema.table.to_ascii_lowercase()
    );
    if let Some(limit) = req.limit {
        if !ctx.capabilities.supports(Feature::RowLimitClause) {
            return Err(SynthError::capability(Feature::RowLimitClause.to_string()));
        }
        sql.push_str(&format!(" FETCH FIRST {} ROWS ONLY", limit));
    }

    debug!(target: "orasynth::synth", "window synthesis on {}: {}", schema.table, sql);
    Ok(SynthesizedQuery {
        sql,
        tables: vec![schema.table.clone()],
        predicates: Vec::new(),
        display_columns,
        degradations,
    })
}
