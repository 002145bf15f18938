//! Academic record: Years → Semesters → Subjects.
//!
//! The record owns no derived values. SGPA, CGPA and grade points are always computed
//! from the current subjects by [`crate::grading::engine`]. Every mutation either applies
//! completely or leaves the record untouched and returns a [`RecordError`].

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;
use validator::Validate;

use super::scale::GradingSystem;

/// Maximum number of years in a record.
pub const MAX_YEARS: usize = 4;
/// Maximum number of subjects in a single semester.
pub const MAX_SUBJECTS_PER_SEMESTER: usize = 10;
/// Upper bound accepted for a subject's credit value.
pub const MAX_SUBJECT_CREDITS: u32 = 10;
/// Longest subject name accepted, in characters.
pub const MAX_SUBJECT_NAME_LEN: u64 = 120;
/// Semesters per year.
pub const SEMESTERS_PER_YEAR: usize = 2;

/// Why a mutation was rejected. The record is unchanged in every case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("A record can hold at most {max} years")]
    YearLimitReached { max: usize },

    #[error("A semester can hold at most {max} subjects")]
    SubjectLimitReached { max: usize },

    #[error("Semester {0} not found")]
    SemesterNotFound(Uuid),

    #[error("Subject {0} not found")]
    SubjectNotFound(Uuid),

    #[error("Invalid subject: {0}")]
    InvalidSubject(String),
}

impl From<validator::ValidationErrors> for RecordError {
    fn from(err: validator::ValidationErrors) -> Self {
        RecordError::InvalidSubject(err.to_string())
    }
}

/// Input for [`AcademicRecord::add_subject`]. Also the shape every stored subject is
/// re-validated against on update and in [`AcademicRecord::check_limits`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct NewSubject {
    #[validate(length(max = MAX_SUBJECT_NAME_LEN))]
    #[serde(default)]
    pub name: String,
    #[validate(range(max = MAX_SUBJECT_CREDITS))]
    pub credits: u32,
    #[serde(default)]
    pub grade: String,
}

impl NewSubject {
    pub fn new(name: impl Into<String>, credits: u32, grade: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            credits,
            grade: grade.into(),
        }
    }
}

impl From<&Subject> for NewSubject {
    fn from(subject: &Subject) -> Self {
        Self {
            name: subject.name.clone(),
            credits: subject.credits,
            grade: subject.grade.clone(),
        }
    }
}

/// Single editable field of a subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum SubjectField {
    Name(String),
    Credits(u32),
    Grade(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    pub credits: u32,
    /// Grade token; empty means "not graded yet".
    #[serde(default)]
    pub grade: String,
}

impl Subject {
    fn from_input(input: NewSubject) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            credits: input.credits,
            grade: input.grade.trim().to_string(),
        }
    }

    /// Whether the subject takes part in SGPA and credit totals.
    pub fn is_counted(&self) -> bool {
        !self.grade.trim().is_empty() && self.credits > 0
    }

    /// `points(grade) × credits` under the given scale.
    pub fn grade_points(&self, system: GradingSystem) -> f64 {
        system.points(&self.grade) * f64::from(self.credits)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Semester {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub subjects: Vec<Subject>,
}

impl Semester {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            subjects: Vec::new(),
        }
    }

    pub fn is_full(&self) -> bool {
        self.subjects.len() >= MAX_SUBJECTS_PER_SEMESTER
    }

    pub fn subject(&self, subject_id: Uuid) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == subject_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Year {
    pub id: Uuid,
    pub name: String,
    pub semesters: [Semester; SEMESTERS_PER_YEAR],
}

impl Year {
    /// Year `number` (1-based) with its semester pair.
    pub fn numbered(number: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: format!("Year {}", number),
            semesters: add_semester_pair_for_year(number),
        }
    }
}

/// Two semesters belonging to year `year_number` (1-based): "Semester 2n-1" and "Semester 2n".
pub fn add_semester_pair_for_year(year_number: usize) -> [Semester; SEMESTERS_PER_YEAR] {
    let second = year_number.max(1) * SEMESTERS_PER_YEAR;
    [
        Semester::new(format!("Semester {}", second - 1)),
        Semester::new(format!("Semester {}", second)),
    ]
}

/// Root of the hierarchy. Owned by a single caller for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcademicRecord {
    pub years: Vec<Year>,
}

impl Default for AcademicRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl AcademicRecord {
    /// Session-start record: one year holding two empty semesters.
    pub fn new() -> Self {
        Self {
            years: vec![Year::numbered(1)],
        }
    }

    /// A record with no years at all.
    pub fn empty() -> Self {
        Self { years: Vec::new() }
    }

    pub fn semesters(&self) -> impl Iterator<Item = &Semester> {
        self.years.iter().flat_map(|year| year.semesters.iter())
    }

    pub fn semester(&self, semester_id: Uuid) -> Option<&Semester> {
        self.semesters().find(|s| s.id == semester_id)
    }

    fn semester_mut(&mut self, semester_id: Uuid) -> Result<&mut Semester, RecordError> {
        self.years
            .iter_mut()
            .flat_map(|year| year.semesters.iter_mut())
            .find(|s| s.id == semester_id)
            .ok_or(RecordError::SemesterNotFound(semester_id))
    }

    pub fn subject_count(&self) -> usize {
        self.semesters().map(|s| s.subjects.len()).sum()
    }

    /// Re-check the insertion limits on a record that did not go through the mutators
    /// (e.g. one deserialized from a snapshot).
    pub fn check_limits(&self) -> Result<(), RecordError> {
        if self.years.len() > MAX_YEARS {
            return Err(RecordError::YearLimitReached { max: MAX_YEARS });
        }
        if self.semesters().any(|s| s.subjects.len() > MAX_SUBJECTS_PER_SEMESTER) {
            return Err(RecordError::SubjectLimitReached {
                max: MAX_SUBJECTS_PER_SEMESTER,
            });
        }
        for subject in self.semesters().flat_map(|s| s.subjects.iter()) {
            NewSubject::from(subject).validate().map_err(|e| {
                RecordError::InvalidSubject(format!("subject {}: {}", subject.id, e))
            })?;
        }
        Ok(())
    }

    /// Append the next year with its semester pair. Returns the new year's id.
    pub fn add_year(&mut self) -> Result<Uuid, RecordError> {
        if self.years.len() >= MAX_YEARS {
            warn!(max = MAX_YEARS, "Rejected add_year: year limit reached");
            return Err(RecordError::YearLimitReached { max: MAX_YEARS });
        }

        let year = Year::numbered(self.years.len() + 1);
        let id = year.id;
        debug!(year = %year.name, "Added year");
        self.years.push(year);
        Ok(id)
    }

    /// Insert a subject into a semester. Returns the new subject's id.
    pub fn add_subject(&mut self, semester_id: Uuid, input: NewSubject) -> Result<Uuid, RecordError> {
        input.validate()?;

        let semester = self.semester_mut(semester_id)?;
        if semester.is_full() {
            warn!(
                semester = %semester.name,
                max = MAX_SUBJECTS_PER_SEMESTER,
                "Rejected add_subject: subject limit reached"
            );
            return Err(RecordError::SubjectLimitReached {
                max: MAX_SUBJECTS_PER_SEMESTER,
            });
        }

        let subject = Subject::from_input(input);
        let id = subject.id;
        semester.subjects.push(subject);
        Ok(id)
    }

    pub fn update_subject_field(
        &mut self,
        semester_id: Uuid,
        subject_id: Uuid,
        field: SubjectField,
    ) -> Result<(), RecordError> {
        let subject = self
            .semester_mut(semester_id)?
            .subjects
            .iter_mut()
            .find(|s| s.id == subject_id)
            .ok_or(RecordError::SubjectNotFound(subject_id))?;

        let mut candidate = NewSubject::from(&*subject);
        match field {
            SubjectField::Name(name) => candidate.name = name,
            SubjectField::Credits(credits) => candidate.credits = credits,
            SubjectField::Grade(grade) => candidate.grade = grade.trim().to_string(),
        }
        if let Err(e) = candidate.validate() {
            warn!(subject = %subject_id, "Rejected update_subject_field: {}", e);
            return Err(e.into());
        }

        subject.name = candidate.name;
        subject.credits = candidate.credits;
        subject.grade = candidate.grade;
        Ok(())
    }

    /// Remove a subject and return it.
    pub fn remove_subject(&mut self, semester_id: Uuid, subject_id: Uuid) -> Result<Subject, RecordError> {
        let semester = self.semester_mut(semester_id)?;
        let index = semester
            .subjects
            .iter()
            .position(|s| s.id == subject_id)
            .ok_or(RecordError::SubjectNotFound(subject_id))?;
        Ok(semester.subjects.remove(index))
    }
}
