//! # Grading Module
//!
//! CGPA/SGPA calculator core.
//!
//! ## Components
//! - `scale`: grading systems (letter → points) and percentage formulas
//! - `record`: the Years → Semesters → Subjects tree and its bounded mutations
//! - `engine`: SGPA, CGPA and percentage computation
//! - `report`: per-semester results bundled for rendering

pub mod engine;
pub mod record;
pub mod report;
pub mod scale;

pub use engine::{cgpa_to_percentage, compute_cgpa, compute_sgpa, graded_credits, CgpaSummary};
pub use record::{
    add_semester_pair_for_year, AcademicRecord, NewSubject, RecordError, Semester, Subject,
    SubjectField, Year, MAX_SUBJECTS_PER_SEMESTER, MAX_SUBJECT_CREDITS, MAX_SUBJECT_NAME_LEN, MAX_YEARS,
};
pub use report::{GradeReport, GradeSettings, SemesterResult};
pub use scale::{GradingSystem, PercentageFormula};
