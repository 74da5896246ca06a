//! Reduces raw per-subject, per-period cells into one consolidated
//! score/attendance/conduct triple per student.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::warn;

use crate::error::{AnalysisError, Result};
use crate::table::{Table, TableShape};
use crate::taxonomy::{Taxonomy, ATTENDANCE_COLUMN, CONDUCT_COLUMN, NAME_COLUMN};

/// One subject's slice of a student's record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SubjectMetrics {
    pub score: f64,
    pub attendance: f64,
    pub conduct: f64,
}

/// A student that survived coercion, with all three consolidated metrics and
/// the per-subject breakdown. Ids are assigned sequentially from 1 in input
/// order, over survivors only.
#[derive(Debug, Clone, Serialize)]
pub struct ConsolidatedStudent {
    pub id: usize,
    pub name: String,
    pub avg_score: f64,
    pub avg_attendance: f64,
    pub avg_conduct: f64,
    pub subjects: BTreeMap<String, SubjectMetrics>,
}

impl ConsolidatedStudent {
    /// The subject this student scores lowest in, if any subject had a
    /// usable score at all.
    pub fn critical_subject(&self) -> Option<&str> {
        self.subjects
            .iter()
            .min_by(|a, b| a.1.score.total_cmp(&b.1.score))
            .map(|(label, _)| label.as_str())
    }
}

/// Outcome of consolidating one batch: the survivors plus how many rows had
/// to be dropped for lacking usable numbers.
#[derive(Debug, Clone)]
pub struct Consolidation {
    pub students: Vec<ConsolidatedStudent>,
    pub rows_dropped: usize,
}

/// Consolidates every row of a validated table. Rows whose identity, score,
/// attendance or conduct cannot be coerced to at least one finite number are
/// dropped and counted; a batch where nothing survives is an error.
pub fn consolidate(taxonomy: &Taxonomy, table: &Table, shape: TableShape) -> Result<Consolidation> {
    let score_columns = taxonomy.score_columns();
    let mut students = Vec::new();
    let mut rows_dropped = 0usize;

    for row in 0..table.row_count() {
        match consolidate_row(taxonomy, table, shape, &score_columns, row) {
            Some(mut student) => {
                student.id = students.len() + 1;
                students.push(student);
            }
            None => {
                warn!(row, "dropping row without usable numeric data");
                rows_dropped += 1;
            }
        }
    }

    if students.is_empty() {
        return Err(AnalysisError::EmptyBatch);
    }
    Ok(Consolidation { students, rows_dropped })
}

fn consolidate_row(
    taxonomy: &Taxonomy,
    table: &Table,
    shape: TableShape,
    score_columns: &[String],
    row: usize,
) -> Option<ConsolidatedStudent> {
    let name = table.cell(row, NAME_COLUMN)?.to_string();

    let scores: Vec<f64> = score_columns
        .iter()
        .filter_map(|c| table.numeric_cell(row, c))
        .collect();
    let avg_score = mean(&scores)?;

    let (avg_attendance, avg_conduct) = match shape {
        TableShape::Granular => (
            table.numeric_cell(row, ATTENDANCE_COLUMN)?,
            table.numeric_cell(row, CONDUCT_COLUMN)?,
        ),
        TableShape::PerSubject => {
            let attendance: Vec<f64> = taxonomy
                .subjects
                .iter()
                .filter_map(|s| table.numeric_cell(row, &s.attendance_column()))
                .collect();
            let conduct: Vec<f64> = taxonomy
                .subjects
                .iter()
                .filter_map(|s| table.numeric_cell(row, &s.conduct_column()))
                .collect();
            (mean(&attendance)?, mean(&conduct)?)
        }
    };

    let mut subjects = BTreeMap::new();
    for subject in &taxonomy.subjects {
        let period_scores: Vec<f64> = taxonomy
            .period_columns(*subject)
            .iter()
            .filter_map(|c| table.numeric_cell(row, c))
            .collect();
        let Some(score) = mean(&period_scores) else {
            continue;
        };
        let attendance = table
            .numeric_cell(row, &subject.attendance_column())
            .unwrap_or(avg_attendance);
        let conduct = table
            .numeric_cell(row, &subject.conduct_column())
            .unwrap_or(avg_conduct);
        subjects.insert(
            subject.label().to_string(),
            SubjectMetrics { score, attendance, conduct },
        );
    }

    Some(ConsolidatedStudent {
        id: 0, // assigned by the caller once the row is known to survive
        name,
        avg_score,
        avg_attendance,
        avg_conduct,
        subjects,
    })
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
