//! Engine Configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration section read from the editor
pub const SETTINGS_SECTION: &str = "bri11iant";

/// Per-document settings supplied by the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Maximum number of diagnostics reported per document
    pub max_number_of_problems: usize,
}

impl Settings {
    pub const DEFAULT_MAX_PROBLEMS: usize = 500;

    /// Settings from a configuration section, defaults when absent or malformed
    pub fn from_value(value: Option<&serde_json::Value>) -> Self {
        Self::from_value_or(value, Self::default())
    }

    /// Settings from a configuration section; `fallback` fills whatever the
    /// section leaves out and replaces a null or malformed section
    pub fn from_value_or(value: Option<&serde_json::Value>, fallback: Settings) -> Self {
        let Some(value) = value.filter(|v| !v.is_null()) else {
            return fallback;
        };
        match serde_json::from_value::<SettingsSection>(value.clone()) {
            Ok(section) => Self {
                max_number_of_problems: section
                    .max_number_of_problems
                    .unwrap_or(fallback.max_number_of_problems),
            },
            Err(e) => {
                tracing::warn!("Ignoring malformed {} settings: {}", SETTINGS_SECTION, e);
                fallback
            }
        }
    }
}

/// Settings as sent by the editor, every key optional
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsSection {
    max_number_of_problems: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_number_of_problems: Self::DEFAULT_MAX_PROBLEMS,
        }
    }
}

/// When diagnostics of a pass are published
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmissionMode {
    /// Once, with the complete list
    #[default]
    EndOfPass,
    /// After every new diagnostic, with the list so far
    Incremental,
}

/// Engine configuration options
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Upper bound on waiting for linked stylesheets and scripts
    pub load_timeout: Option<Duration>,

    /// User agent string for resource and telemetry requests
    pub user_agent: String,

    pub emission: EmissionMode,

    /// Base URL of the telemetry service; telemetry is off when unset
    pub telemetry_url: Option<String>,

    /// Anonymous id sent along with telemetry
    pub user_id: String,

    /// Settings used when the editor provides none
    pub default_settings: Settings,
}

impl EngineConfig {
    pub fn with_load_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.load_timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_emission(mut self, emission: EmissionMode) -> Self {
        self.emission = emission;
        self
    }

    pub fn with_telemetry(mut self, url: impl Into<String>, user_id: impl Into<String>) -> Self {
        self.telemetry_url = Some(url.into());
        self.user_id = user_id.into();
        self
    }

    pub fn with_default_settings(mut self, settings: Settings) -> Self {
        self.default_settings = settings;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            load_timeout: Some(Duration::from_secs(10)),
            user_agent: format!("bri11iant/{}", crate::VERSION),
            emission: EmissionMode::EndOfPass,
            telemetry_url: None,
            user_id: String::new(),
            default_settings: Settings::default(),
        }
    }
}
