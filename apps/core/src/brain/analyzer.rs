//! Brain Analyzer - Main orchestrator for chat message analysis.
//!
//! Runs intent classification and resolves the matched course and semester bundle,
//! once per incoming message, before the LLM is called.

use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use super::catalog::CourseCatalog;
use super::context_packet::ContextPacket;
use super::intent::IntentClassifier;

/// Main analyzer. Cheap to clone; the catalog is shared.
#[derive(Debug, Clone, Default)]
pub struct BrainAnalyzer {
    intent_classifier: IntentClassifier,
}

impl BrainAnalyzer {
    pub fn new(catalog: Arc<CourseCatalog>) -> Self {
        Self {
            intent_classifier: IntentClassifier::new(catalog),
        }
    }

    pub fn classifier(&self) -> &IntentClassifier {
        &self.intent_classifier
    }

    /// Analyze a message and produce a context packet
    pub fn analyze(&self, query: &str) -> ContextPacket {
        let start = Instant::now();

        let mut packet = ContextPacket::new(query.to_string());

        // 1. Classify
        packet.intent = self.intent_classifier.classify(query);

        // 2. Resolve the course the message names
        packet.course = packet
            .intent
            .course_code
            .as_deref()
            .and_then(|code| self.intent_classifier.get_course_info(code))
            .cloned();

        // 3. Resolve the semester bundle (semester is only set on the navigation path)
        packet.semester_resources = packet
            .intent
            .semester
            .and_then(|n| self.intent_classifier.get_semester_resources(&n.to_string()))
            .cloned();

        packet.processing_time_us = start.elapsed().as_micros() as u64;
        packet.timestamp = Utc::now();

        debug!(summary = %packet.summary(), "Analyzed chat message");
        packet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_with_semester() {
        let brain = BrainAnalyzer::default();

        let packet = brain.analyze("Where are my semester 3 notes?");

        assert!(packet.is_navigation());
        assert_eq!(packet.intent.semester, Some(3));
        let bundle = packet.semester_resources.unwrap();
        assert_eq!(bundle.path, "/resources/semester-3");
        assert!(packet.course.is_none());
    }

    #[test]
    fn test_course_lookup() {
        let brain = BrainAnalyzer::default();

        let packet = brain.analyze("Where can I find CSE201 notes?");

        assert_eq!(packet.course_code(), Some("CSE201"));
        assert_eq!(packet.course.unwrap().name, "Data Structures");
        assert!(packet.semester_resources.is_none());
    }

    #[test]
    fn test_unknown_semester_bundle() {
        let brain = BrainAnalyzer::default();

        let packet = brain.analyze("where are 9th semester lectures");
        assert_eq!(packet.intent.semester, Some(9));
        assert!(packet.semester_resources.is_none());
        assert!(!packet.has_context());
    }

    #[test]
    fn test_plain_message() {
        let brain = BrainAnalyzer::default();

        let packet = brain.analyze("Tell me a joke");
        assert!(!packet.is_navigation());
        assert!(!packet.has_context());
    }
}
