//! System prompt composition for the chat proxy.
//!
//! Turns a [`ContextPacket`] into plain sentences appended to the assistant's base
//! prompt. The LLM call itself belongs to the caller.

use super::context_packet::ContextPacket;

pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a helpful study assistant for university students. Answer concisely.";

/// Base prompt plus whatever course and semester facts the packet carries.
/// Returns the base prompt unchanged when there is nothing to add.
pub fn compose_system_prompt(base: &str, packet: &ContextPacket) -> String {
    let mut prompt = base.trim_end().to_string();

    if let (Some(code), Some(course)) = (packet.course_code(), packet.course.as_ref()) {
        prompt.push_str(&format!(
            "\n\nThe student is asking about {} ({}): {}",
            code, course.name, course.description
        ));
        if !course.topics.is_empty() {
            prompt.push_str(&format!("\nTopics covered: {}.", course.topics.join(", ")));
        }
        if !course.resources.is_empty() {
            prompt.push_str("\nAvailable resources:");
            for resource in &course.resources {
                prompt.push_str(&format!("\n- {}: {}", resource.name, resource.path));
            }
        }
    }

    if let (Some(number), Some(bundle)) = (packet.intent.semester, packet.semester_resources.as_ref()) {
        prompt.push_str(&format!(
            "\n\nMaterials for semester {} are located at {}.",
            number, bundle.path
        ));
        if !bundle.courses.is_empty() {
            prompt.push_str(&format!(" Courses this semester: {}.", bundle.courses.join(", ")));
        }
    }

    prompt
}
