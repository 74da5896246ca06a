//! Rule-based pedagogical recommendations.

use serde::Serialize;

/// The five mutually exclusive recommendation categories, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RecommendationCategory {
    ImminentRisk,
    CriticalDeviation,
    InconsistentPerformance,
    Excellence,
    RoutineFollowUp,
}

/// A chosen category plus its fixed action text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub category: RecommendationCategory,
    pub text: String,
}

/// Picks the recommendation for one student. An ordered decision list, first
/// match wins; boundary values fail the strict comparisons as written.
pub fn recommend(
    risk_probability: f64,
    vector_magnitude: f64,
    avg_score: f64,
    area_of_progress: f64,
) -> Recommendation {
    if risk_probability > 0.70 {
        return Recommendation {
            category: RecommendationCategory::ImminentRisk,
            text: format!(
                "Imminent risk ({:.1}%). Actions: urgent intervention plan, \
                 family contact, tutoring focused on low-performing subjects.",
                risk_probability * 100.0
            ),
        };
    }
    if vector_magnitude > 30.0 && avg_score < 75.0 {
        return Recommendation {
            category: RecommendationCategory::CriticalDeviation,
            text: "Critical deviation. The student is far from the ideal standard. \
                   Actions: identify the main weakness (attendance/conduct) and \
                   reinforce it with priority."
                .to_string(),
        };
    }
    if avg_score >= 80.0 && area_of_progress < 75.0 {
        return Recommendation {
            category: RecommendationCategory::InconsistentPerformance,
            text: "Inconsistent performance. Good results, but possible instability. \
                   Actions: daily homework follow-up, focus on consistency."
                .to_string(),
        };
    }
    if avg_score > 90.0 && vector_magnitude < 10.0 {
        return Recommendation {
            category: RecommendationCategory::Excellence,
            text: "Excellence. Exemplary performance and consistency. Actions: \
                   assign enrichment projects, consider peer tutoring duties."
                .to_string(),
        };
    }
    Recommendation {
        category: RecommendationCategory::RoutineFollowUp,
        text: "Routine follow-up. Acceptable performance. Actions: reinforce the \
               lowest-scoring subjects, weekly monitoring."
            .to_string(),
    }
}
