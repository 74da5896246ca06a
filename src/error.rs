use thiserror::Error;

/// Batch-fatal failures of the analysis pipeline. Row-level coercion problems
/// are not errors; they surface as the dropped-row count on the report.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalysisError {
    /// The table is missing required taxonomy columns. Carries at most the
    /// first few missing names so the message stays readable.
    #[error("missing essential columns: {}", .missing.join(", "))]
    Schema { missing: Vec<String> },

    /// Every row was dropped during numeric coercion; nothing to score.
    #[error("no rows with usable numeric data in this batch")]
    EmptyBatch,
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
