//! The subject/metric taxonomy that defines the expected gradebook columns.
//!
//! The taxonomy is a plain configuration value handed to each pipeline stage,
//! so two batches validated against different curricula never interfere.

use serde::Serialize;

/// The nine curriculum subjects of the standard gradebook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Subject {
    Espanol,
    Ingles,
    Matematicas,
    Artes,
    FormacionCivicaYEtica,
    Historia,
    EducacionFisica,
    Quimica,
    Tecnologia,
}

impl Subject {
    pub const ALL: [Subject; 9] = [
        Subject::Espanol,
        Subject::Ingles,
        Subject::Matematicas,
        Subject::Artes,
        Subject::FormacionCivicaYEtica,
        Subject::Historia,
        Subject::EducacionFisica,
        Subject::Quimica,
        Subject::Tecnologia,
    ];

    /// Display name, matching the upstream gradebook headings.
    pub fn label(self) -> &'static str {
        match self {
            Subject::Espanol => "Español",
            Subject::Ingles => "Ingles",
            Subject::Matematicas => "Matematicas",
            Subject::Artes => "Artes",
            Subject::FormacionCivicaYEtica => "Formacion_Civica_y_Etica",
            Subject::Historia => "Historia",
            Subject::EducacionFisica => "Educacion_Fisica",
            Subject::Quimica => "Quimica",
            Subject::Tecnologia => "Tecnologia",
        }
    }

    /// Lower-case column stem used to build wide-table column names.
    pub fn column_stem(self) -> &'static str {
        match self {
            Subject::Espanol => "español",
            Subject::Ingles => "ingles",
            Subject::Matematicas => "matematicas",
            Subject::Artes => "artes",
            Subject::FormacionCivicaYEtica => "formacion_civica_y_etica",
            Subject::Historia => "historia",
            Subject::EducacionFisica => "educacion_fisica",
            Subject::Quimica => "quimica",
            Subject::Tecnologia => "tecnologia",
        }
    }

    pub fn score_column(self, period: usize) -> String {
        format!("{}_cal_t{}", self.column_stem(), period)
    }

    pub fn attendance_column(self) -> String {
        format!("{}_asistencia", self.column_stem())
    }

    pub fn conduct_column(self) -> String {
        format!("{}_conducta", self.column_stem())
    }
}

/// Identity column every table shape must carry.
pub const NAME_COLUMN: &str = "nombre";
/// Whole-course attendance gauge of the granular table shape.
pub const ATTENDANCE_COLUMN: &str = "asistencia_gral";
/// Whole-course conduct gauge of the granular table shape.
pub const CONDUCT_COLUMN: &str = "conducta_gral";

/// Immutable description of one curriculum: which subjects are graded, over
/// how many grading periods.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    pub subjects: Vec<Subject>,
    pub periods: usize,
}

impl Default for Taxonomy {
    fn default() -> Self {
        Taxonomy {
            subjects: Subject::ALL.to_vec(),
            periods: 6,
        }
    }
}

impl Taxonomy {
    /// Every `<subject>_cal_t<n>` score column, in subject-major order.
    pub fn score_columns(&self) -> Vec<String> {
        self.subjects
            .iter()
            .flat_map(|s| (1..=self.periods).map(|p| s.score_column(p)))
            .collect()
    }

    pub fn period_columns(&self, subject: Subject) -> Vec<String> {
        (1..=self.periods).map(|p| subject.score_column(p)).collect()
    }
}
