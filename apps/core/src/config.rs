//! Runtime configuration, read from the environment (and a `.env` file when present).

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use validator::Validate;

use crate::brain::DEFAULT_SYSTEM_PROMPT;
use crate::error::AppError;
use crate::grading::{GradeSettings, GradingSystem, PercentageFormula};

pub const ENV_GRADING_SYSTEM: &str = "PORTAL_GRADING_SYSTEM";
pub const ENV_PERCENTAGE_FORMULA: &str = "PORTAL_PERCENTAGE_FORMULA";
pub const ENV_CATALOG_PATH: &str = "PORTAL_CATALOG_PATH";
pub const ENV_LOG_FORMAT: &str = "PORTAL_LOG_FORMAT";
pub const ENV_LOG_LEVEL: &str = "PORTAL_LOG_LEVEL";
pub const ENV_CHAT_RATE_LIMIT: &str = "PORTAL_CHAT_RATE_LIMIT";
pub const ENV_CHAT_RATE_WINDOW_SECS: &str = "PORTAL_CHAT_RATE_WINDOW_SECS";
pub const ENV_SYSTEM_PROMPT: &str = "PORTAL_SYSTEM_PROMPT";

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Bunyan-style JSON lines
    Json,
    #[default]
    Pretty,
}

impl std::str::FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            other => Err(AppError::Config(format!("Unknown log format: '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    pub grading_system: GradingSystem,
    pub percentage_formula: PercentageFormula,
    /// JSON catalog replacing the built-in course tables.
    pub catalog_path: Option<PathBuf>,
    pub log_format: LogFormat,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[validate(length(min = 1))]
    pub log_level: String,
    /// Chat requests allowed per client per window.
    #[validate(range(min = 1, max = 1000))]
    pub chat_rate_limit: usize,
    #[validate(range(min = 1, max = 3600))]
    pub chat_rate_window_secs: u64,
    /// Base assistant prompt that analysis context is appended to.
    #[validate(length(min = 1))]
    pub system_prompt: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            grading_system: GradingSystem::default(),
            percentage_formula: PercentageFormula::default(),
            catalog_path: None,
            log_format: LogFormat::default(),
            log_level: "info".to_string(),
            chat_rate_limit: 20,
            chat_rate_window_secs: 60,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::Config(format!("{} must be a number, got '{}'", key, raw)))
}

impl AppConfig {
    /// Load `.env` (if any) and then read the process environment.
    pub fn load() -> Result<Self, AppError> {
        match dotenv::dotenv() {
            Ok(_) => {}
            Err(e) if e.not_found() => {}
            Err(e) => return Err(e.into()),
        }
        Self::from_env()
    }

    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Missing or blank keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(raw) = get(ENV_GRADING_SYSTEM) {
            config.grading_system = raw.parse()?;
        }
        if let Some(raw) = get(ENV_PERCENTAGE_FORMULA) {
            config.percentage_formula = raw.parse()?;
        }
        if let Some(raw) = get(ENV_CATALOG_PATH) {
            config.catalog_path = Some(PathBuf::from(raw.trim()));
        }
        if let Some(raw) = get(ENV_LOG_FORMAT) {
            config.log_format = raw.parse()?;
        }
        if let Some(raw) = get(ENV_LOG_LEVEL) {
            config.log_level = raw.trim().to_string();
        }
        if let Some(raw) = get(ENV_CHAT_RATE_LIMIT) {
            config.chat_rate_limit = parse_number(ENV_CHAT_RATE_LIMIT, &raw)?;
        }
        if let Some(raw) = get(ENV_CHAT_RATE_WINDOW_SECS) {
            config.chat_rate_window_secs = parse_number(ENV_CHAT_RATE_WINDOW_SECS, &raw)?;
        }
        if let Some(raw) = get(ENV_SYSTEM_PROMPT) {
            config.system_prompt = raw;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn grade_settings(&self) -> GradeSettings {
        GradeSettings {
            grading_system: self.grading_system,
            percentage_formula: self.percentage_formula,
        }
    }

    pub fn chat_rate_window(&self) -> Duration {
        Duration::from_secs(self.chat_rate_window_secs)
    }
}
