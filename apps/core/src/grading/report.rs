//! Everything the calculator screen renders, computed in one pass.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::engine::{cgpa_to_percentage, compute_cgpa, compute_sgpa, graded_credits};
use super::record::AcademicRecord;
use super::scale::{GradingSystem, PercentageFormula};

/// Scale and formula selection. Passed explicitly to every computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeSettings {
    pub grading_system: GradingSystem,
    pub percentage_formula: PercentageFormula,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterResult {
    pub semester_id: Uuid,
    pub year_name: String,
    pub name: String,
    pub subject_count: usize,
    pub graded_credits: u32,
    pub sgpa: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeReport {
    pub settings: GradeSettings,
    pub semesters: Vec<SemesterResult>,
    pub cgpa: f64,
    pub total_credits: u32,
    pub percentage: f64,
}

impl GradeReport {
    pub fn build(record: &AcademicRecord, settings: GradeSettings) -> Self {
        let system = settings.grading_system;

        let semesters = record
            .years
            .iter()
            .flat_map(|year| year.semesters.iter().map(move |s| (year, s)))
            .map(|(year, semester)| SemesterResult {
                semester_id: semester.id,
                year_name: year.name.clone(),
                name: semester.name.clone(),
                subject_count: semester.subjects.len(),
                graded_credits: graded_credits(semester),
                sgpa: compute_sgpa(semester, system),
            })
            .collect();

        let summary = compute_cgpa(record, system);

        Self {
            settings,
            semesters,
            cgpa: summary.cgpa,
            total_credits: summary.total_credits,
            percentage: cgpa_to_percentage(summary.cgpa, settings.percentage_formula),
        }
    }

    /// One-line description for logs.
    pub fn summary(&self) -> String {
        format!(
            "CGPA: {:.2} ({}), Credits: {}, Percentage: {:.2}% ({})",
            self.cgpa,
            self.settings.grading_system,
            self.total_credits,
            self.percentage,
            self.settings.percentage_formula
        )
    }
}
