use gradebook_analytics::recommend::RecommendationCategory;
use gradebook_analytics::{analyze, AnalysisError, Table, Taxonomy};

/// Builds a granular-shape table for the standard taxonomy, every score cell
/// of a student filled with the same value.
fn uniform_table(students: &[(&str, f64, f64, f64)]) -> Table {
    let taxonomy = Taxonomy::default();
    let mut headers = vec![
        "nombre".to_string(),
        "asistencia_gral".to_string(),
        "conducta_gral".to_string(),
    ];
    headers.extend(taxonomy.score_columns());

    let rows = students
        .iter()
        .map(|(name, score, attendance, conduct)| {
            let mut row = vec![name.to_string(), attendance.to_string(), conduct.to_string()];
            row.extend(std::iter::repeat(score.to_string()).take(54));
            row
        })
        .collect();
    Table::new(headers, rows)
}

#[test]
fn excellence_cohort_end_to_end() {
    let table = uniform_table(&[
        ("Ana", 95.0, 100.0, 100.0),
        ("Beto", 96.0, 100.0, 100.0),
        ("Carla", 98.0, 100.0, 100.0),
    ]);
    let report = analyze(&Taxonomy::default(), &table).unwrap();

    assert_eq!(report.students.len(), 3);
    assert_eq!(report.rows_dropped, 0);

    for (student, expected_magnitude) in report.students.iter().zip([5.0, 4.0, 2.0]) {
        assert!((student.vector_magnitude - expected_magnitude).abs() < 1e-9);
        assert_eq!(student.recommendation.category, RecommendationCategory::Excellence);
        // Nobody scores below the risk threshold, so the fallback rate is 0.
        assert_eq!(student.risk_probability, 0.0);
    }

    assert_eq!(report.students[0].id, 1);
    assert_eq!(report.students[2].id, 3);
    assert_eq!(report.students[2].name, "Carla");
    assert!((report.cohort.mean_score - (95.0 + 96.0 + 98.0) / 3.0).abs() < 1e-9);
    // Attendance has zero variance across the cohort.
    assert_eq!(report.cohort.correlations.attendance_vs_score, 0.0);
}

#[test]
fn missing_conduct_gauge_aborts_with_schema_error() {
    let taxonomy = Taxonomy::default();
    let mut headers = vec!["nombre".to_string(), "asistencia_gral".to_string()];
    headers.extend(taxonomy.score_columns());
    let table = Table::new(headers, vec![]);

    match analyze(&taxonomy, &table) {
        Err(AnalysisError::Schema { missing }) => {
            assert!(missing.contains(&"conducta_gral".to_string()));
        }
        other => panic!("expected schema error, got {other:?}"),
    }
}

#[test]
fn batch_with_no_usable_rows_is_empty() {
    let mut table_rows = Vec::new();
    for name in ["Ana", "Beto"] {
        let mut row = vec![name.to_string(), "ausente".to_string(), "n/a".to_string()];
        row.extend(std::iter::repeat("-".to_string()).take(54));
        table_rows.push(row);
    }
    let taxonomy = Taxonomy::default();
    let mut headers = vec![
        "nombre".to_string(),
        "asistencia_gral".to_string(),
        "conducta_gral".to_string(),
    ];
    headers.extend(taxonomy.score_columns());
    let table = Table::new(headers, table_rows);

    assert_eq!(analyze(&taxonomy, &table).unwrap_err(), AnalysisError::EmptyBatch);
}

#[test]
fn mixed_batch_takes_the_fitted_classifier_path() {
    let mut students: Vec<(String, f64, f64, f64)> = Vec::new();
    for i in 0..6 {
        students.push((format!("low-{i}"), 55.0 + i as f64 * 2.0, 70.0 + i as f64, 68.0 + i as f64));
    }
    for i in 0..6 {
        students.push((format!("high-{i}"), 84.0 + i as f64 * 2.0, 92.0 + i as f64, 90.0 + i as f64));
    }
    let borrowed: Vec<(&str, f64, f64, f64)> = students
        .iter()
        .map(|(name, s, a, c)| (name.as_str(), *s, *a, *c))
        .collect();
    let table = uniform_table(&borrowed);

    let report = analyze(&Taxonomy::default(), &table).unwrap();
    assert_eq!(report.students.len(), 12);

    let risks: Vec<f64> = report.students.iter().map(|s| s.risk_probability).collect();
    for risk in &risks {
        assert!((0.0..=1.0).contains(risk));
    }
    // A constant fallback would make every probability identical; the fitted
    // model separates the two halves on average.
    let low_mean: f64 = risks[..6].iter().sum::<f64>() / 6.0;
    let high_mean: f64 = risks[6..].iter().sum::<f64>() / 6.0;
    assert!(low_mean > high_mean);

    // Attendance and score rise together in this cohort.
    assert!(report.cohort.correlations.attendance_vs_score > 0.8);
    assert!(report.cohort.std_deviations.score > 0.0);
}

#[test]
fn unusable_rows_are_dropped_not_fatal() {
    let table = {
        let taxonomy = Taxonomy::default();
        let mut headers = vec![
            "nombre".to_string(),
            "asistencia_gral".to_string(),
            "conducta_gral".to_string(),
        ];
        headers.extend(taxonomy.score_columns());

        let mut good = vec!["Ana".to_string(), "95".to_string(), "90".to_string()];
        good.extend(std::iter::repeat("88".to_string()).take(54));
        let mut bad = vec!["Beto".to_string(), "sin datos".to_string(), "90".to_string()];
        bad.extend(std::iter::repeat("80".to_string()).take(54));

        Table::new(headers, vec![good, bad])
    };

    let report = analyze(&Taxonomy::default(), &table).unwrap();
    assert_eq!(report.students.len(), 1);
    assert_eq!(report.rows_dropped, 1);
    assert_eq!(report.students[0].name, "Ana");
    assert_eq!(report.cohort.student_count, 1);
    assert_eq!(report.cohort.std_deviations.score, 0.0);
}
