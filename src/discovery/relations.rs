//! Relationship inferencer
//! -----------------------
//! Proposes equality join predicates for a caller-supplied table chain with
//! no declared foreign keys. Deliberately a chain, not a graph: one predicate
//! per adjacent pair, in the caller's order. For a pair (A, B):
//!   1. forward  — B has a column named `<A-singular>_id` or named exactly
//!                 like A's identifier
//!   2. reverse  — A has a column named `<B-singular>_id` or named exactly
//!                 like B's identifier
//!   3. fallback — equality of the two identifiers, flagged low confidence
//! A pair where the needed identifiers are missing fails with
//! `SynthError::Inference`; an unconditional cross join is never emitted.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SynthError, SynthResult};
use crate::ident;

use super::TableSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    /// Direct name match between the tables.
    High,
    /// Last-resort identifier equality; callers may choose to reject these.
    Low,
}

/// Directional equality predicate between two tables. Never persisted beyond
/// a single synthesis call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinPredicate {
    pub left_table: String,
    pub left_column: String,
    pub right_table: String,
    pub right_column: String,
    pub confidence: Confidence,
}

impl JoinPredicate {
    /// Render as an ON-clause condition, lower-cased for readability.
    pub fn to_condition(&self) -> String {
        format!(
            "{}.{} = {}.{}",
            self.left_table.to_ascii_lowercase(),
            self.left_column.to_ascii_lowercase(),
            self.right_table.to_ascii_lowercase(),
            self.right_column.to_ascii_lowercase()
        )
    }
}

/// Infer one predicate per adjacent pair of `schemas`. Returns the predicates
/// together with degradation notes for every low-confidence fallback taken.
pub fn infer_joins(schemas: &[Arc<TableSchema>]) -> SynthResult<(Vec<JoinPredicate>, Vec<String>)> {
    let mut predicates = Vec::new();
    let mut degradations = Vec::new();
    for pair in schemas.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        let p = infer_pair(a, b)?;
        if p.confidence == Confidence::Low {
            degradations.push(format!(
                "low-confidence join between {} and {}: no name match, fell back to identifier equality",
                a.table, b.table
            ));
        }
        predicates.push(p);
    }
    Ok((predicates, degradations))
}

fn infer_pair(a: &TableSchema, b: &TableSchema) -> SynthResult<JoinPredicate> {
    // Forward: B carries A's key under a conventional name.
    if let Some(a_id) = a.identifier() {
        let singular = format!("{}_id", ident::singularize(&a.table));
        for candidate in [singular.as_str(), a_id.name.as_str()] {
            if let Some(hit) = b.find_column(candidate) {
                debug!(target: "orasynth::discovery",
                    "join {} -> {}: forward match on {}", a.table, b.table, hit.name);
                return Ok(JoinPredicate {
                    left_table: a.table.clone(),
                    left_column: a_id.name.clone(),
                    right_table: b.table.clone(),
                    right_column: hit.name.clone(),
                    confidence: Confidence::High,
                });
            }
        }
    }
    // Reverse: A carries B's key under a conventional name.
    if let Some(b_id) = b.identifier() {
        let singular = format!("{}_id", ident::singularize(&b.table));
        for candidate in [singular.as_str(), b_id.name.as_str()] {
            if let Some(hit) = a.find_column(candidate) {
                debug!(target: "orasynth::discovery",
                    "join {} -> {}: reverse match on {}", a.table, b.table, hit.name);
                return Ok(JoinPredicate {
                    left_table: a.table.clone(),
                    left_column: hit.name.clone(),
                    right_table: b.table.clone(),
                    right_column: b_id.name.clone(),
                    confidence: Confidence::High,
                });
            }
        }
    }
    // Fallback: identifier equality on both sides, flagged low confidence.
    match (a.identifier(), b.identifier()) {
        (Some(a_id), Some(b_id)) => Ok(JoinPredicate {
            left_table: a.table.clone(),
            left_column: a_id.name.clone(),
            right_table: b.table.clone(),
            right_column: b_id.name.clone(),
            confidence: Confidence::Low,
        }),
        (None, _) => Err(SynthError::inference(
            &a.table,
            &b.table,
            format!("{} has no identifier column", a.table),
        )),
        (_, None) => Err(SynthError::inference(
            &a.table,
            &b.table,
            format!("{} has no identifier column", b.table),
        )),
    }
}

#[cfg(test)]
#[path = "relations_tests.rs"]
mod relations_tests;
