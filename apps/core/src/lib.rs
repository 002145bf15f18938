//! Student portal core.
//!
//! Two independent, synchronous units:
//! - [`grading`]: SGPA / CGPA / percentage computation over an academic record
//! - [`brain`]: chat message analysis that decides which course and semester facts are
//!   appended to the LLM system prompt
//!
//! plus the ambient pieces a host process needs: [`config`], [`telemetry`], [`error`]
//! and a per-client chat [`rate_limiter`].

pub mod brain;
pub mod config;
pub mod error;
pub mod grading;
pub mod rate_limiter;
pub mod telemetry;

pub use error::AppError;

#[cfg(test)]
mod tests;
