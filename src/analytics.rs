//! Cohort-level statistics over the surviving students of one batch.

use serde::Serialize;

use crate::aggregate::ConsolidatedStudent;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Correlations {
    pub attendance_vs_score: f64,
    pub conduct_vs_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StdDeviations {
    pub score: f64,
    pub attendance: f64,
    pub conduct: f64,
}

/// Read-only aggregate over one processed batch.
#[derive(Debug, Clone, Serialize)]
pub struct CohortSummary {
    pub student_count: usize,
    pub mean_score: f64,
    /// Trapezoidal area under the sorted score sequence; see `progress_area`.
    pub progress_area: f64,
    pub correlations: Correlations,
    pub std_deviations: StdDeviations,
}

pub fn cohort_summary(students: &[ConsolidatedStudent]) -> CohortSummary {
    let scores: Vec<f64> = students.iter().map(|s| s.avg_score).collect();
    let attendance: Vec<f64> = students.iter().map(|s| s.avg_attendance).collect();
    let conduct: Vec<f64> = students.iter().map(|s| s.avg_conduct).collect();

    CohortSummary {
        student_count: students.len(),
        mean_score: mean(&scores),
        progress_area: progress_area(&scores),
        correlations: Correlations {
            attendance_vs_score: correlation(&attendance, &scores),
            conduct_vs_score: correlation(&conduct, &scores),
        },
        std_deviations: StdDeviations {
            score: std_deviation(&scores),
            attendance: std_deviation(&attendance),
            conduct: std_deviation(&conduct),
        },
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Population standard deviation, 0.0 for fewer than 2 values.
fn std_deviation(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Pearson correlation, 0.0 whenever undefined (fewer than 2 pairs or zero
/// variance on either side).
fn correlation(xs: &[f64], ys: &[f64]) -> f64 {
    if xs.len() < 2 || xs.len() != ys.len() {
        return 0.0;
    }
    let mx = mean(xs);
    let my = mean(ys);
    let mut covariance = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        covariance += (x - mx) * (y - my);
        var_x += (x - mx) * (x - mx);
        var_y += (y - my) * (y - my);
    }
    let denominator = (var_x * var_y).sqrt();
    if denominator == 0.0 {
        0.0
    } else {
        covariance / denominator
    }
}

/// Cohort progress area: trapezoidal integration over the ascending-sorted
/// score sequence with unit spacing. 0.0 for fewer than 2 students, where no
/// interval exists to integrate over.
fn progress_area(scores: &[f64]) -> f64 {
    if scores.len() < 2 {
        return 0.0;
    }
    let mut sorted = scores.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted.windows(2).map(|pair| (pair[0] + pair[1]) / 2.0).sum()
}
