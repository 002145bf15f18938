//! Chat intent classification using regex patterns and keyword tests.
//!
//! Answers three questions about a chat message: does it name a known course code,
//! is it asking where to find something, and which semester does it mention.
//! Every miss is `None`/`false`; nothing here can fail.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, LazyLock};

use super::catalog::{normalize_course_code, CourseCatalog, CourseRecord, SemesterResourceBundle};

/// Substrings that mark a message as asking where to find resources.
pub const NAVIGATION_KEYWORDS: &[&str] = &[
    "where",
    "find",
    "locate",
    "show me",
    "how to access",
    "resources",
    "materials",
    "lectures",
    "notes",
    "semester",
];

// NOTE: expect() is acceptable here: the patterns are literals and are covered by tests.
static COURSE_CODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b([a-z]{2,3})\s*(\d{3})\b").expect("Invalid regex: course code pattern")
});

/// "3rd sem", "5 semester", "2nd-semester"
static ORDINAL_SEMESTER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})\s*(?:st|nd|rd|th)?[\s-]*sem(?:ester)?\b")
        .expect("Invalid regex: ordinal semester pattern")
});

/// "semester 3", "sem 4"
static SEMESTER_NUMBER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bsem(?:ester)?\s*(\d{1,2})\b").expect("Invalid regex: semester number pattern")
});

/// Outcome of classifying one message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentResult {
    /// Normalized code of a course the catalog knows, if one was named first.
    pub course_code: Option<String>,
    /// Whether the message asks where to find something.
    pub is_navigation: bool,
    /// Semester number mentioned in a navigation query.
    pub semester: Option<u8>,
    /// Navigation keywords that matched
    pub matched_keywords: Vec<String>,
}

/// Case-insensitive substring test against [`NAVIGATION_KEYWORDS`].
pub fn is_navigation_query(text: &str) -> bool {
    let lower = text.to_lowercase();
    NAVIGATION_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

fn matched_navigation_keywords(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    NAVIGATION_KEYWORDS
        .iter()
        .filter(|kw| lower.contains(*kw))
        .map(|kw| kw.to_string())
        .collect()
}

/// First course-code-shaped token, normalized, whether or not the catalog knows it.
pub fn find_course_code_token(text: &str) -> Option<String> {
    COURSE_CODE_PATTERN
        .captures(text)
        .map(|caps| normalize_course_code(&format!("{}{}", &caps[1], &caps[2])))
}

/// Semester number mentioned as "3rd sem(ester)" or "semester 3".
pub fn extract_semester_number(text: &str) -> Option<u8> {
    [&*ORDINAL_SEMESTER_PATTERN, &*SEMESTER_NUMBER_PATTERN]
        .iter()
        .filter_map(|pattern| pattern.captures(text))
        .filter_map(|caps| caps[1].parse::<u8>().ok())
        .next()
}

/// Classifier bound to a course catalog.
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    catalog: Arc<CourseCatalog>,
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new(Arc::new(CourseCatalog::builtin()))
    }
}

impl IntentClassifier {
    pub fn new(catalog: Arc<CourseCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &CourseCatalog {
        &self.catalog
    }

    /// Only the first code-shaped token is considered. A well-formed but unknown
    /// code is a miss, not an error.
    pub fn extract_course_code(&self, text: &str) -> Option<String> {
        find_course_code_token(text).filter(|code| self.catalog.contains_course(code))
    }

    pub fn get_course_info(&self, code: &str) -> Option<&CourseRecord> {
        self.catalog.get_course_info(code)
    }

    pub fn get_semester_resources(&self, semester_number: &str) -> Option<&SemesterResourceBundle> {
        self.catalog.get_semester_resources(semester_number)
    }

    /// Classify a chat message. The semester is only extracted on the navigation path.
    pub fn classify(&self, text: &str) -> IntentResult {
        let text = text.trim();
        if text.is_empty() {
            return IntentResult::default();
        }

        let matched_keywords = matched_navigation_keywords(text);
        let is_navigation = !matched_keywords.is_empty();

        IntentResult {
            course_code: self.extract_course_code(text),
            is_navigation,
            semester: if is_navigation {
                extract_semester_number(text)
            } else {
                None
            },
            matched_keywords,
        }
    }
}
