//! Hierarchical (CONNECT BY) synthesis for self-referencing tables.

use tracing::debug;

use crate::discovery::ColumnRole;
use crate::error::{SynthError, SynthResult};
use crate::session::SessionContext;

use super::{display_columns_for, SynthesizedQuery};

#[derive(Debug, Clone, Default)]
pub struct HierarchyRequest {
    pub table: String,
    pub select_columns: Option<Vec<String>>,
    /// Root condition; defaults to `<parent-ref column> IS NULL`.
    pub start_with: Option<String>,
    /// Traversal condition; defaults to `PRIOR <identifier> = <parent-ref>`.
    pub connect_by: Option<String>,
}

impl HierarchyRequest {
    pub fn new(table: impl Into<String>) -> Self {
        HierarchyRequest { table: table.into(), ..Default::default() }
    }
}

/// Build `SELECT ..., LEVEL, SYS_CONNECT_BY_PATH(...) FROM t START WITH ...
/// CONNECT BY ...`. A table without a parent-reference column cannot express
/// a meaningful hierarchy: unless the caller overrides both clauses, this is
/// `UnsupportedSchema`, not a silently wrong query.
pub async fn synthesize_hierarchy(
    ctx: &SessionContext,
    req: &HierarchyRequest,
) -> SynthResult<SynthesizedQuery> {
    if req.table.trim().is_empty() {
        return Err(SynthError::invalid("hierarchical synthesis requires a table"));
    }
    let schema = ctx.cache.get_or_load(&req.table).await?;
    let mut degradations = Vec::new();

    let parent_ref = schema.column_with_role(ColumnRole::ParentReference);
    let needs_discovery = req.start_with.is_none() || req.connect_by.is_none();
    if needs_discovery && parent_ref.is_none() {
        return Err(SynthError::unsupported_schema(
            &schema.table,
            "no parent-reference column (manager/parent/supervisor) for CONNECT BY",
        ));
    }

    let start_with = match &req.start_with {
        Some(s) => s.clone(),
        // parent_ref checked above when discovery is needed
        None => format!("{} IS NULL", parent_ref.unwrap().name),
    };

    let connect_by = match &req.connect_by {
        Some(s) => s.clone(),
        None => {
            let parent = parent_ref.unwrap();
            let prior_key = match schema.identifier() {
                Some(id) => id.name.clone(),
                None => {
                    // Degrade: no identifier, use the first numeric column
                    // that is not the parent reference itself.
                    let substitute = schema
                        .columns
                        .iter()
                        .find(|c| c.is_numeric() && !c.name.eq_ignore_ascii_case(&parent.name))
                        .ok_or_else(|| {
                            SynthError::unsupported_schema(
                                &schema.table,
                                "no identifier or numeric key column usable as PRIOR key",
                            )
                        })?;
                    degradations.push(format!(
                        "{} has no identifier column; using {} as PRIOR key",
                        schema.table, substitute.name
                    ));
                    substitute.name.clone()
                }
            };
            format!("PRIOR {} = {}", prior_key, parent.name)
        }
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

    // Path rendering prefers the display name, then the identifier, then the
    // first column, mirroring what a human would pick for readability.
    let path_column = schema
        .column_with_role(ColumnRole::DisplayName)
        .or_else(|| schema.identifier())
        .or_else(|| schema.columns.first())
        .map(|c| c.name.clone())
        .unwrap_or_else(|| "NULL".to_string());

    let sql = format!(
        "SELECT {}, LEVEL, SYS_CONNECT_BY_PATH({}, '/') AS hierarchy_path FROM {} START WITH {} CONNECT BY {}",
        select_list,
        path_column,
        schema.table.to_ascii_lowercase(),
        start_with,
        connect_by
    );

    debug!(target: "orasynth::synth", "hierarchy synthesis on {}: {}", schema.table, sql);
    Ok(SynthesizedQuery {
        sql,
        tables: vec![schema.table.clone()],
        predicates: Vec::new(),
        display_columns,
        degradations,
    })
}
