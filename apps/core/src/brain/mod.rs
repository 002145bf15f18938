//! # Brain Module
//!
//! Fast, non-LLM analysis of chat messages.
//! Analyzes user input BEFORE calling the LLM to enrich the system prompt.
//!
//! ## Components
//! - `catalog`: course and semester lookup tables
//! - `intent`: course-code, navigation and semester detection
//! - `context_packet`: Output data structure
//! - `analyzer`: Main orchestrator
//! - `prompt`: system prompt composition

pub mod analyzer;
pub mod catalog;
pub mod context_packet;
pub mod intent;
pub mod prompt;

pub use analyzer::BrainAnalyzer;
pub use catalog::{CourseCatalog, CourseRecord, ResourceLink, SemesterResourceBundle};
pub use context_packet::ContextPacket;
pub use intent::{extract_semester_number, is_navigation_query, IntentClassifier, IntentResult};
pub use prompt::{compose_system_prompt, DEFAULT_SYSTEM_PROMPT};
