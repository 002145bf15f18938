//! Course and semester lookup tables.
//!
//! Built once at startup (built-in tables or a JSON file) and read-only afterwards.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::AppError;

/// A named resource attached to a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLink {
    pub name: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub resources: Vec<ResourceLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemesterResourceBundle {
    pub courses: Vec<String>,
    pub path: String,
}

/// On-disk shape of a catalog file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    courses: HashMap<String, CourseRecord>,
    #[serde(default)]
    semesters: BTreeMap<String, SemesterResourceBundle>,
}

/// Uppercase ASCII letters and digits, whitespace removed: `"cse 201"` → `"CSE201"`.
pub fn normalize_course_code(code: &str) -> String {
    code.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct CourseCatalog {
    courses: HashMap<String, CourseRecord>,
    semesters: BTreeMap<String, SemesterResourceBundle>,
}

impl CourseCatalog {
    pub fn new(
        courses: impl IntoIterator<Item = (String, CourseRecord)>,
        semesters: impl IntoIterator<Item = (String, SemesterResourceBundle)>,
    ) -> Self {
        Self {
            courses: courses
                .into_iter()
                .map(|(code, course)| (normalize_course_code(&code), course))
                .collect(),
            semesters: semesters
                .into_iter()
                .map(|(number, bundle)| (number.trim().to_string(), bundle))
                .collect(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, AppError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Ok(Self::new(file.courses, file.semesters))
    }

    pub fn from_json_file(path: &Path) -> Result<Self, AppError> {
        let raw = fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&raw)?;
        info!(
            path = %path.display(),
            courses = catalog.courses.len(),
            semesters = catalog.semesters.len(),
            "Loaded course catalog"
        );
        Ok(catalog)
    }

    /// Catalog file if configured, built-in tables otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        match path {
            Some(path) => Self::from_json_file(path),
            None => Ok(Self::builtin()),
        }
    }

    pub fn contains_course(&self, code: &str) -> bool {
        self.courses.contains_key(&normalize_course_code(code))
    }

    pub fn get_course_info(&self, code: &str) -> Option<&CourseRecord> {
        self.courses.get(&normalize_course_code(code))
    }

    pub fn get_semester_resources(&self, semester_number: &str) -> Option<&SemesterResourceBundle> {
        self.semesters.get(semester_number.trim())
    }

    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    pub fn semester_count(&self) -> usize {
        self.semesters.len()
    }

    /// Tables shipped with the portal.
    pub fn builtin() -> Self {
        let courses = BUILTIN_COURSES.iter().map(|c| {
            (
                c.code.to_string(),
                CourseRecord {
                    name: c.name.to_string(),
                    description: c.description.to_string(),
                    topics: c.topics.iter().map(|t| t.to_string()).collect(),
                    resources: c
                        .resources
                        .iter()
                        .map(|(name, path)| ResourceLink {
                            name: name.to_string(),
                            path: path.to_string(),
                        })
                        .collect(),
                },
            )
        });

        let semesters = BUILTIN_SEMESTERS.iter().map(|(number, codes)| {
            (
                number.to_string(),
                SemesterResourceBundle {
                    courses: codes.iter().map(|c| c.to_string()).collect(),
                    path: format!("/resources/semester-{}", number),
                },
            )
        });

        Self::new(courses, semesters)
    }
}

struct BuiltinCourse {
    code: &'static str,
    name: &'static str,
    description: &'static str,
    topics: &'static [&'static str],
    resources: &'static [(&'static str, &'static str)],
}

const BUILTIN_COURSES: &[BuiltinCourse] = &[
    BuiltinCourse {
        code: "MA101",
        name: "Engineering Mathematics I",
        description: "Differential and integral calculus, sequences and series.",
        topics: &["Limits and continuity", "Differentiation", "Integration", "Series"],
        resources: &[
            ("Lecture notes", "/resources/semester-1/MA101/notes"),
            ("Problem sets", "/resources/semester-1/MA101/problems"),
        ],
    },
    BuiltinCourse {
        code: "PH101",
        name: "Engineering Physics",
        description: "Mechanics, waves, optics and an introduction to quantum physics.",
        topics: &["Mechanics", "Oscillations and waves", "Optics", "Quantum basics"],
        resources: &[("Lab manual", "/resources/semester-1/PH101/lab-manual")],
    },
    BuiltinCourse {
        code: "CHB101",
        name: "Chemistry Basics",
        description: "Atomic structure, bonding, thermodynamics and electrochemistry.",
        topics: &["Atomic structure", "Chemical bonding", "Thermodynamics", "Electrochemistry"],
        resources: &[
            ("Lecture slides", "/resources/semester-1/CHB101/slides"),
            ("Lab manual", "/resources/semester-1/CHB101/lab-manual"),
        ],
    },
    BuiltinCourse {
        code: "CSE101",
        name: "Programming Fundamentals",
        description: "Problem solving and structured programming in C.",
        topics: &["Control flow", "Functions", "Arrays and strings", "Pointers"],
        resources: &[
            ("Lecture notes", "/resources/semester-2/CSE101/notes"),
            ("Lab exercises", "/resources/semester-2/CSE101/lab"),
        ],
    },
    BuiltinCourse {
        code: "EE201",
        name: "Basic Electrical Circuits",
        description: "DC and AC circuit analysis, network theorems.",
        topics: &["Ohm's and Kirchhoff's laws", "Network theorems", "AC analysis"],
        resources: &[("Lecture notes", "/resources/semester-3/EE201/notes")],
    },
    BuiltinCourse {
        code: "CSE201",
        name: "Data Structures",
        description: "Design and analysis of fundamental data structures.",
        topics: &["Linked lists", "Stacks and queues", "Trees", "Graphs", "Hashing"],
        resources: &[
            ("Lecture notes", "/resources/semester-3/CSE201/notes"),
            ("Previous papers", "/resources/semester-3/CSE201/papers"),
        ],
    },
    BuiltinCourse {
        code: "CSE202",
        name: "Database Systems",
        description: "Relational model, SQL, normalization and transactions.",
        topics: &["ER modelling", "SQL", "Normalization", "Transactions"],
        resources: &[("Lecture notes", "/resources/semester-4/CSE202/notes")],
    },
    BuiltinCourse {
        code: "CSE301",
        name: "Operating Systems",
        description: "Processes, scheduling, memory management and file systems.",
        topics: &["Processes and threads", "CPU scheduling", "Memory management", "File systems"],
        resources: &[
            ("Lecture notes", "/resources/semester-5/CSE301/notes"),
            ("Lab exercises", "/resources/semester-5/CSE301/lab"),
        ],
    },
];

const BUILTIN_SEMESTERS: &[(&str, &[&str])] = &[
    ("1", &["MA101", "PH101", "CHB101"]),
    ("2", &["CSE101"]),
    ("3", &["CSE201", "EE201"]),
    ("4", &["CSE202"]),
    ("5", &["CSE301"]),
    ("6", &[]),
    ("7", &[]),
    ("8", &[]),
];
