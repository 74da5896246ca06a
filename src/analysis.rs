//! The end-to-end batch pipeline: validate, consolidate, score, recommend.

use serde::Serialize;
use tracing::info;

use crate::aggregate::{self, ConsolidatedStudent, SubjectMetrics};
use crate::analytics::{self, CohortSummary};
use crate::error::Result;
use crate::model;
use crate::recommend::{self, Recommendation};
use crate::table::{self, Table};
use crate::taxonomy::Taxonomy;
use crate::vector;

/// Everything computed for one surviving student.
#[derive(Debug, Clone, Serialize)]
pub struct StudentReport {
    pub id: usize,
    pub name: String,
    pub avg_score: f64,
    pub avg_attendance: f64,
    pub avg_conduct: f64,
    pub subjects: std::collections::BTreeMap<String, SubjectMetrics>,
    pub vector_magnitude: f64,
    pub area_of_progress: f64,
    pub risk_probability: f64,
    pub recommendation: Recommendation,
    pub critical_subject: Option<String>,
}

/// The complete result of one batch. Owned by the caller; nothing is shared
/// with any other batch.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub students: Vec<StudentReport>,
    pub cohort: CohortSummary,
    pub rows_dropped: usize,
}

/// Runs the whole pipeline on an already-materialized table. Synchronous,
/// no interior I/O; a failed batch returns only the error, never partial
/// results.
pub fn analyze(taxonomy: &Taxonomy, table: &Table) -> Result<AnalysisReport> {
    let shape = table::validate_schema(taxonomy, table)?;
    let consolidation = aggregate::consolidate(taxonomy, table, shape)?;
    let rows_dropped = consolidation.rows_dropped;
    let risks = model::estimate_risk(&consolidation.students);
    let cohort = analytics::cohort_summary(&consolidation.students);

    let students: Vec<StudentReport> = consolidation
        .students
        .into_iter()
        .zip(risks)
        .map(|(student, risk_probability)| student_report(student, risk_probability))
        .collect();

    info!(students = students.len(), rows_dropped, "batch analysis complete");

    Ok(AnalysisReport { students, cohort, rows_dropped })
}

fn student_report(student: ConsolidatedStudent, risk_probability: f64) -> StudentReport {
    let vector_magnitude = vector::progress_vector_magnitude(
        student.avg_score,
        student.avg_attendance,
        student.avg_conduct,
    );
    let area_of_progress = vector::area_of_progress(student.avg_score, student.avg_attendance);
    let recommendation = recommend::recommend(
        risk_probability,
        vector_magnitude,
        student.avg_score,
        area_of_progress,
    );
    let critical_subject = student.critical_subject().map(str::to_string);

    StudentReport {
        id: student.id,
        name: student.name,
        avg_score: student.avg_score,
        avg_attendance: student.avg_attendance,
        avg_conduct: student.avg_conduct,
        subjects: student.subjects,
        vector_magnitude,
        area_of_progress,
        risk_probability,
        recommendation,
        critical_subject,
    }
}
