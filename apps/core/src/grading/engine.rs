//! SGPA / CGPA / percentage computation.
//!
//! Pure functions over a record snapshot. Nothing is cached: callers re-run these after
//! every mutation.

use serde::{Deserialize, Serialize};

use super::record::{AcademicRecord, Semester};
use super::scale::{GradingSystem, PercentageFormula};

/// Result of [`compute_cgpa`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CgpaSummary {
    pub cgpa: f64,
    pub total_credits: u32,
}

/// Credit-weighted grade point average of one semester.
///
/// Only subjects with a grade and credits > 0 take part. Returns 0 when no credits count.
pub fn compute_sgpa(semester: &Semester, system: GradingSystem) -> f64 {
    let mut weighted_sum = 0.0;
    let mut credit_total: u32 = 0;

    for subject in semester.subjects.iter().filter(|s| s.is_counted()) {
        weighted_sum += subject.grade_points(system);
        credit_total += subject.credits;
    }

    if credit_total == 0 {
        0.0
    } else {
        weighted_sum / f64::from(credit_total)
    }
}

/// Graded credits of one semester (the SGPA denominator).
pub fn graded_credits(semester: &Semester) -> u32 {
    semester
        .subjects
        .iter()
        .filter(|s| s.is_counted())
        .map(|s| s.credits)
        .sum()
}

/// Unweighted mean of the SGPAs of every semester that has at least one subject.
///
/// Empty semesters are skipped entirely. A semester whose subjects are all ungraded
/// still counts, with an SGPA of 0.
pub fn compute_cgpa(record: &AcademicRecord, system: GradingSystem) -> CgpaSummary {
    let mut sgpa_sum = 0.0;
    let mut semester_count: u32 = 0;
    let mut total_credits: u32 = 0;

    for semester in record.semesters().filter(|s| !s.subjects.is_empty()) {
        sgpa_sum += compute_sgpa(semester, system);
        semester_count += 1;
        total_credits += graded_credits(semester);
    }

    let cgpa = if semester_count == 0 {
        0.0
    } else {
        sgpa_sum / f64::from(semester_count)
    };

    CgpaSummary { cgpa, total_credits }
}

/// Estimated percentage for a CGPA.
///
/// A CGPA of 0 means "nothing graded" and maps to 0 under every formula. Results are
/// floored at 0 but deliberately not capped at 100.
pub fn cgpa_to_percentage(cgpa: f64, formula: PercentageFormula) -> f64 {
    if cgpa == 0.0 {
        return 0.0;
    }
    formula.apply(cgpa).max(0.0)
}
