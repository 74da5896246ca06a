//! The materialized input table and its schema validation.

use std::collections::HashMap;

use crate::error::{AnalysisError, Result};
use crate::taxonomy::{Taxonomy, ATTENDANCE_COLUMN, CONDUCT_COLUMN, NAME_COLUMN};

/// How many missing column names a schema error reports before truncating.
const MAX_REPORTED_MISSING: usize = 3;

/// An already-materialized wide table: lower-cased headers over rows of raw
/// string cells. Cells that fail numeric coercion later are treated as
/// missing, never as errors.
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Builds a table, canonicalizing headers to lower case. Cells beyond
    /// the end of a short row read as missing.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let headers: Vec<String> = headers.into_iter().map(|h| h.trim().to_lowercase()).collect();
        let index = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), i))
            .collect();
        Table { headers, index, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Raw cell for `row`/`column`, or `None` when the column is absent or
    /// the cell is blank.
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let idx = *self.index.get(column)?;
        let value = self.rows.get(row)?.get(idx)?.trim();
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }

    /// Cell coerced to a finite number; anything unparsable is missing.
    pub fn numeric_cell(&self, row: usize, column: &str) -> Option<f64> {
        self.cell(row, column)?
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
    }
}

/// Which of the two accepted wide-table shapes a batch uses for attendance
/// and conduct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableShape {
    /// One whole-course gauge column each (`asistencia_gral`, `conducta_gral`).
    Granular,
    /// One attendance and one conduct column per subject.
    PerSubject,
}

/// Checks the table against the taxonomy and resolves its shape.
///
/// The identity column and every score column are always required. For
/// attendance/conduct the granular gauges win when present; otherwise the
/// full per-subject column set must exist. Missing columns abort the batch
/// with a `Schema` error naming the first few offenders.
pub fn validate_schema(taxonomy: &Taxonomy, table: &Table) -> Result<TableShape> {
    let mut missing: Vec<String> = Vec::new();

    if !table.has_column(NAME_COLUMN) {
        missing.push(NAME_COLUMN.to_string());
    }
    for column in taxonomy.score_columns() {
        if !table.has_column(&column) {
            missing.push(column);
        }
    }

    let shape = resolve_shape(taxonomy, table, &mut missing);

    if missing.is_empty() {
        Ok(shape.unwrap_or(TableShape::Granular))
    } else {
        missing.truncate(MAX_REPORTED_MISSING);
        Err(AnalysisError::Schema { missing })
    }
}

fn resolve_shape(taxonomy: &Taxonomy, table: &Table, missing: &mut Vec<String>) -> Option<TableShape> {
    if table.has_column(ATTENDANCE_COLUMN) || table.has_column(CONDUCT_COLUMN) {
        for gauge in [ATTENDANCE_COLUMN, CONDUCT_COLUMN] {
            if !table.has_column(gauge) {
                missing.push(gauge.to_string());
            }
        }
        return Some(TableShape::Granular);
    }

    let per_subject: Vec<String> = taxonomy
        .subjects
        .iter()
        .flat_map(|s| [s.attendance_column(), s.conduct_column()])
        .collect();
    if per_subject.iter().all(|c| table.has_column(c)) {
        return Some(TableShape::PerSubject);
    }

    // Neither shape: report the granular gauges as the canonical expectation.
    missing.push(ATTENDANCE_COLUMN.to_string());
    missing.push(CONDUCT_COLUMN.to_string());
    None
}
