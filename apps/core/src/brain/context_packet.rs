//! Context Packet - Output structure for chat message analysis.
//!
//! Contains the facts extracted from one user message that the chat handler may
//! inject into the LLM system prompt.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::catalog::{CourseRecord, SemesterResourceBundle};
use super::intent::IntentResult;

/// Complete context packet from message analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextPacket {
    /// Original user message
    pub query: String,

    /// Raw classification
    pub intent: IntentResult,

    /// Catalog entry for `intent.course_code`
    pub course: Option<CourseRecord>,

    /// Resource bundle for `intent.semester` (navigation path only)
    pub semester_resources: Option<SemesterResourceBundle>,

    /// Processing time in microseconds
    pub processing_time_us: u64,

    /// Timestamp of analysis
    pub timestamp: DateTime<Utc>,
}

impl ContextPacket {
    /// Create a new empty context packet
    pub fn new(query: String) -> Self {
        Self {
            query,
            intent: IntentResult::default(),
            course: None,
            semester_resources: None,
            processing_time_us: 0,
            timestamp: Utc::now(),
        }
    }

    pub fn course_code(&self) -> Option<&str> {
        self.intent.course_code.as_deref()
    }

    pub fn is_navigation(&self) -> bool {
        self.intent.is_navigation
    }

    /// Whether anything worth adding to the system prompt was found.
    pub fn has_context(&self) -> bool {
        self.course.is_some() || self.semester_resources.is_some()
    }

    /// Get a summary for logging
    pub fn summary(&self) -> String {
        format!(
            "Course: {}, Navigation: {}, Semester: {}, Context: {}",
            self.course_code().unwrap_or("-"),
            if self.is_navigation() { "yes" } else { "no" },
            self.intent
                .semester
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string()),
            if self.has_context() { "yes" } else { "no" }
        )
    }
}
