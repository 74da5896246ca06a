//! Distance of a student's consolidated metrics from the ideal point.

/// The ideal performance point in (score, attendance, conduct) space.
pub const IDEAL: f64 = 100.0;

/// Euclidean distance from `(avg_score, avg_attendance, avg_conduct)` to
/// `(100, 100, 100)`. Zero exactly when all three metrics are 100.
pub fn progress_vector_magnitude(avg_score: f64, avg_attendance: f64, avg_conduct: f64) -> f64 {
    let ds = IDEAL - avg_score;
    let da = IDEAL - avg_attendance;
    let dc = IDEAL - avg_conduct;
    (ds * ds + da * da + dc * dc).sqrt()
}

/// Score scaled by attendance, the "area of progress" gauge the
/// recommendation rules read.
pub fn area_of_progress(avg_score: f64, avg_attendance: f64) -> f64 {
    avg_score * avg_attendance / 100.0
}
