use serde::{Serialize, Deserialize};
use std::fmt;

/// Broad category of a failure, used by callers to decide how to surface it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Bad user input, rejected before any network activity
    Validation,
    /// Plan service unreachable, non-success status, or undecodable body
    Transport,
    /// An operation was attempted without what it needs (token, plan)
    Precondition,
    /// Reading or writing the durable state slot failed
    Persistence,
    /// Configuration could not be read or parsed
    Config,
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Transport => "transport",
            ErrorKind::Precondition => "precondition",
            ErrorKind::Persistence => "persistence",
            ErrorKind::Config => "config",
            ErrorKind::Internal => "internal",
        };
        f.write_str(name)
    }
}

/// Unified error type for the planner core.
/// Every fallible operation returns Result<T, PlannerError>.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerError {
    pub kind: ErrorKind,
    pub message: String,
    pub stage: String,
    pub context: Option<String>,
    pub source: Option<String>,
}

impl PlannerError {
    /// Create a new error with stage and message
    pub fn new<S: Into<String>>(message: S, stage: &'static str) -> Self {
        PlannerError {
            kind: ErrorKind::Internal,
            message: message.into(),
            stage: stage.to_string(),
            context: None,
            source: None,
        }
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::new(message, "validation").with_kind(ErrorKind::Validation)
    }

    pub fn precondition<S: Into<String>>(message: S) -> Self {
        Self::new(message, "precondition").with_kind(ErrorKind::Precondition)
    }

    pub fn with_kind(mut self, kind: ErrorKind) -> Self {
        self.kind = kind;
        self
    }

    /// Add additional context information
    pub fn with_context<S: Into<String>>(mut self, context: S) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add source error information
    pub fn with_source<S: Into<String>>(mut self, source: S) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn is_validation(&self) -> bool {
        self.kind == ErrorKind::Validation
    }
}

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.stage, self.message)?;
        if let Some(ref context) = self.context {
            write!(f, " (context: {})", context)?;
        }
        if let Some(ref source) = self.source {
            write!(f, " (source: {})", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for PlannerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

impl From<anyhow::Error> for PlannerError {
    fn from(err: anyhow::Error) -> Self {
        // {:#} keeps the whole context chain on one line
        PlannerError::new(format!("{:#}", err), "unknown").with_source("anyhow")
    }
}

impl From<std::io::Error> for PlannerError {
    fn from(err: std::io::Error) -> Self {
        PlannerError::new(format!("I/O error: {}", err), "io")
            .with_kind(ErrorKind::Persistence)
            .with_source("std::io")
    }
}

impl From<serde_json::Error> for PlannerError {
    fn from(err: serde_json::Error) -> Self {
        PlannerError::new(format!("JSON error: {}", err), "json_parse")
            .with_kind(ErrorKind::Persistence)
            .with_source("serde_json")
    }
}

impl From<toml::de::Error> for PlannerError {
    fn from(err: toml::de::Error) -> Self {
        PlannerError::new(format!("TOML error: {}", err), "config")
            .with_kind(ErrorKind::Config)
            .with_source("toml")
    }
}
