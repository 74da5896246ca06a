//! Gradebook analytics core.
//!
//! Takes a wide gradebook table (per-subject, per-period scores plus
//! attendance and conduct), consolidates it into per-student metrics,
//! estimates an at-risk probability with a logistic-regression classifier,
//! and emits a deterministic pedagogical recommendation per student, plus
//! cohort-level statistics.
//!
//! The crate performs no I/O of its own beyond the CSV loader used by the
//! CLI; callers hand in a materialized [`table::Table`] and get back an
//! [`analysis::AnalysisReport`].

pub mod aggregate;
pub mod analysis;
pub mod analytics;
pub mod data;
pub mod error;
pub mod model;
pub mod recommend;
pub mod table;
pub mod taxonomy;
pub mod vector;

pub use analysis::{analyze, AnalysisReport, StudentReport};
pub use error::AnalysisError;
pub use table::{Table, TableShape};
pub use taxonomy::{Subject, Taxonomy};
