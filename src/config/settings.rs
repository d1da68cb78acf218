use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::config::paths;
use crate::error::{ErrorKind, PlannerError};

pub const DEFAULT_PLAN_SERVICE_URL: &str = "http://localhost:5000/api/plan";
pub const DEFAULT_CALENDAR_EVENTS_URL: &str =
    "https://www.googleapis.com/calendar/v3/calendars/primary/events";
pub const DEFAULT_TIME_ZONE: &str = "Asia/Kolkata";
pub const DEFAULT_COMPLETION_ICON: &str = "https://img.icons8.com/color/48/book.png";

/// Top-level configuration, read from `config.toml`.
/// Every section is optional; missing keys fall back to defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub plan_service: PlanServiceConfig,
    pub calendar: CalendarConfig,
    pub notifications: NotificationConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanServiceConfig {
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for PlanServiceConfig {
    fn default() -> Self {
        PlanServiceConfig {
            url: DEFAULT_PLAN_SERVICE_URL.to_string(),
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    pub events_url: String,
    /// IANA zone name attached to every exported all-day event
    pub time_zone: String,
    pub timeout_secs: u64,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        CalendarConfig {
            events_url: DEFAULT_CALENDAR_EVENTS_URL.to_string(),
            time_zone: DEFAULT_TIME_ZONE.to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifierBackend {
    Desktop,
    Log,
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub backend: NotifierBackend,
    pub icon: Option<String>,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        NotificationConfig {
            backend: NotifierBackend::Desktop,
            icon: Some(DEFAULT_COMPLETION_ICON.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub state_path: Option<PathBuf>,
}

impl StorageConfig {
    pub fn resolved_state_path(&self) -> PathBuf {
        self.state_path
            .clone()
            .unwrap_or_else(paths::default_state_path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// EnvFilter directive used when RUST_LOG is unset
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            format: LogFormat::Json,
            filter: "info".to_string(),
        }
    }
}

impl PlannerConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist and parse. Without one, the default
    /// location is tried and any problem there falls back to defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, PlannerError> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }

        let default_path = paths::default_config_path();
        if !default_path.exists() {
            return Ok(Self::default());
        }
        match Self::load_from_file(&default_path) {
            Ok(config) => Ok(config),
            Err(e) => {
                // Logging is not initialized yet at this point
                eprintln!("[Config] {}, using defaults", e);
                Ok(Self::default())
            }
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self, PlannerError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PlannerError::new(format!("Failed to read config file: {}", e), "config")
                .with_kind(ErrorKind::Config)
                .with_context(format!("path: {:?}", path))
        })?;
        Self::from_toml(&content).map_err(|e| e.with_context(format!("path: {:?}", path)))
    }

    pub fn from_toml(content: &str) -> Result<Self, PlannerError> {
        Ok(toml::from_str::<PlannerConfig>(content)?)
    }
}
