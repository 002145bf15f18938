//! Test Module
//!
//! Cross-module test suite for the portal core.
//!
//! ## Test Categories
//! - `grading_tests`: SGPA, CGPA, percentage formulas and record limits
//! - `brain_tests`: course codes, navigation intent, semester extraction, analyzer
//! - `integration_tests`: config-driven chat and calculator flows

pub mod grading_tests;
