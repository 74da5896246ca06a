//! At-risk probability estimation.
//!
//! The estimator labels each student from the score threshold, then fits a
//! logistic regression on (attendance, conduct, score) whenever the batch is
//! big enough and both label classes are present. Everything else, including
//! a failed fit, falls back to a constant per-batch rate so a degenerate
//! batch can never abort the pipeline.

use linfa::prelude::*;
use linfa_logistic::LogisticRegression;
use ndarray::{Array1, Array2};
use tracing::{debug, warn};

use crate::aggregate::ConsolidatedStudent;

/// Students scoring below this are labeled at risk for training.
pub const RISK_SCORE_THRESHOLD: f64 = 75.0;
/// Minimum batch size for the fitted-classifier path.
pub const MIN_TRAINING_ROWS: usize = 10;
const MAX_ITERATIONS: u64 = 100;

/// Per-student probabilities of the at-risk class, in batch order, each in
/// [0, 1].
pub fn estimate_risk(students: &[ConsolidatedStudent]) -> Vec<f64> {
    let labels: Vec<bool> = students
        .iter()
        .map(|s| s.avg_score < RISK_SCORE_THRESHOLD)
        .collect();
    let at_risk = labels.iter().filter(|&&l| l).count();
    let base_rate = if students.is_empty() {
        0.0
    } else {
        at_risk as f64 / students.len() as f64
    };

    let both_classes = at_risk > 0 && at_risk < students.len();
    if students.len() < MIN_TRAINING_ROWS || !both_classes {
        debug!(
            batch = students.len(),
            at_risk, "batch too small or single-class, using constant risk rate"
        );
        return vec![base_rate; students.len()];
    }

    fit_probabilities(students, &labels).unwrap_or_else(|| vec![base_rate; students.len()])
}

fn fit_probabilities(students: &[ConsolidatedStudent], labels: &[bool]) -> Option<Vec<f64>> {
    let features = feature_matrix(students);
    let targets = Array1::from_vec(labels.to_vec());
    let dataset = Dataset::new(features.clone(), targets);

    let model = match LogisticRegression::default()
        .max_iterations(MAX_ITERATIONS)
        .fit(&dataset)
    {
        Ok(model) => model,
        Err(error) => {
            warn!(%error, "classifier fit failed, using constant risk rate");
            return None;
        }
    };

    // predict_probabilities yields the probability of the positive (at-risk)
    // class for every row.
    let probabilities = model.predict_probabilities(&features);
    Some(probabilities.iter().map(|p| p.clamp(0.0, 1.0)).collect())
}

fn feature_matrix(students: &[ConsolidatedStudent]) -> Array2<f64> {
    let mut features = Array2::zeros((students.len(), 3));
    for (row, student) in students.iter().enumerate() {
        features[[row, 0]] = student.avg_attendance;
        features[[row, 1]] = student.avg_conduct;
        features[[row, 2]] = student.avg_score;
    }
    features
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn student(avg_score: f64, avg_attendance: f64, avg_conduct: f64) -> ConsolidatedStudent {
        ConsolidatedStudent {
            id: 0,
            name: "test".to_string(),
            avg_score,
            avg_attendance,
            avg_conduct,
            subjects: BTreeMap::new(),
        }
    }

    #[test]
    fn small_batch_gets_the_constant_label_rate() {
        let students = vec![
            student(60.0, 80.0, 80.0),
            student(90.0, 95.0, 95.0),
            student(85.0, 90.0, 90.0),
        ];
        let risks = estimate_risk(&students);
        for risk in &risks {
            assert!((risk - 1.0 / 3.0).abs() < 1e-9);
        }
    }

    #[test]
    fn single_class_batch_gets_the_constant_rate_even_when_large() {
        let students: Vec<_> = (0..12).map(|i| student(80.0 + i as f64, 90.0, 90.0)).collect();
        let risks = estimate_risk(&students);
        assert_eq!(risks, vec![0.0; 12]);
    }

    #[test]
    fn empty_batch_yields_no_probabilities() {
        assert!(estimate_risk(&[]).is_empty());
    }

    #[test]
    fn fitted_path_ranks_low_scorers_as_riskier_on_average() {
        let mut students = Vec::new();
        for i in 0..6 {
            let wobble = i as f64;
            students.push(student(55.0 + wobble * 2.0, 70.0 + wobble, 65.0 + wobble));
        }
        for i in 0..6 {
            let wobble = i as f64;
            students.push(student(85.0 + wobble * 2.0, 92.0 + wobble, 90.0 + wobble));
        }

        let risks = estimate_risk(&students);
        assert_eq!(risks.len(), 12);
        for risk in &risks {
            assert!((0.0..=1.0).contains(risk));
        }

        let low_mean: f64 = risks[..6].iter().sum::<f64>() / 6.0;
        let high_mean: f64 = risks[6..].iter().sum::<f64>() / 6.0;
        assert!(
            low_mean > high_mean,
            "at-risk students should average higher probabilities ({low_mean} vs {high_mean})"
        );
    }

    #[test]
    fn fitted_path_is_deterministic() {
        let students: Vec<_> = (0..12)
            .map(|i| student(50.0 + i as f64 * 4.5, 60.0 + i as f64 * 3.0, 70.0 + i as f64 * 2.0))
            .collect();
        assert_eq!(estimate_risk(&students), estimate_risk(&students));
    }
}
