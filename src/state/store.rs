use std::collections::HashMap;
use std::path::{Path, PathBuf};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::error::{ErrorKind, PlannerError};
use crate::state::model::{daily_hours_from_value, PlanningState, SubjectRecord, DEFAULT_DAILY_HOURS};

/// Layout version written into every saved document.
/// Documents without a version are the older name-keyed layout.
pub const STATE_VERSION: u32 = 2;

#[derive(Serialize)]
struct StateDocumentRef<'a> {
    version: u32,
    #[serde(flatten)]
    state: &'a PlanningState,
}

#[derive(Deserialize)]
struct StateDocument {
    version: u32,
    #[serde(flatten)]
    state: PlanningState,
}

/// Name-keyed layout: subjects plus four parallel maps.
#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct LegacyDocument {
    subjects: Vec<LegacySubject>,
    progress: HashMap<String, serde_json::Value>,
    deadlines: HashMap<String, String>,
    difficulties: HashMap<String, Vec<f64>>,
    daily_hours: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct LegacySubject {
    #[serde(default)]
    name: String,
    /// Either a number or the raw text of a number input
    #[serde(default)]
    chapters: serde_json::Value,
}

impl LegacyDocument {
    fn migrate(self) -> PlanningState {
        let subjects = self
            .subjects
            .into_iter()
            .map(|legacy| {
                let mut record = SubjectRecord::empty();
                record.total_chapters = legacy_count(&legacy.chapters);
                record.completed = self
                    .progress
                    .get(&legacy.name)
                    .and_then(legacy_count)
                    .unwrap_or(0);
                record.deadline = self
                    .deadlines
                    .get(&legacy.name)
                    .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok());
                record.difficulties = self
                    .difficulties
                    .get(&legacy.name)
                    .cloned()
                    .unwrap_or_default();
                record.name = legacy.name;
                record
            })
            .collect();

        let daily_hours = self
            .daily_hours
            .as_ref()
            .and_then(daily_hours_from_value)
            .unwrap_or(DEFAULT_DAILY_HOURS);

        PlanningState { subjects, daily_hours }
    }
}

fn legacy_count(value: &serde_json::Value) -> Option<u32> {
    match value {
        serde_json::Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .and_then(|n| u32::try_from(n).ok()),
        serde_json::Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
}

/// Decode a saved document, migrating the name-keyed layout if needed.
pub fn decode_state(content: &str) -> Result<PlanningState, PlannerError> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    if !value.is_object() {
        return Err(PlannerError::new("State document is not a JSON object", "json_parse")
            .with_kind(ErrorKind::Persistence));
    }

    let state = if value.get("version").is_some() {
        let doc: StateDocument = serde_json::from_value(value)?;
        if doc.version > STATE_VERSION {
            return Err(PlannerError::new(
                format!("State document version {} is newer than supported {}", doc.version, STATE_VERSION),
                "json_parse",
            )
            .with_kind(ErrorKind::Persistence));
        }
        doc.state
    } else {
        let legacy: LegacyDocument = serde_json::from_value(value)?;
        tracing::info!(subjects = legacy.subjects.len(), "Migrating name-keyed planner state");
        legacy.migrate()
    };
    Ok(state)
}

pub fn encode_state(state: &PlanningState) -> Result<String, PlannerError> {
    serde_json::to_string_pretty(&StateDocumentRef {
        version: STATE_VERSION,
        state,
    })
    .map_err(|e| {
        PlannerError::new(format!("Failed to serialize planner state: {}", e), "json_serialize")
            .with_kind(ErrorKind::Persistence)
    })
}

/// The durable slot holding the whole planning state as one JSON file.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StateStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the slot. Missing or malformed content yields None.
    pub async fn load(&self) -> Option<PlanningState> {
        match self.try_load().await {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(path = ?self.path, error = %e, "Failed to load planner state, ignoring it");
                None
            }
        }
    }

    /// Read the slot, telling a missing slot (Ok(None)) apart from one
    /// that exists but cannot be read or decoded (Err).
    pub async fn try_load(&self) -> Result<Option<PlanningState>, PlannerError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = ?self.path, "No saved planner state");
                return Ok(None);
            }
            Err(e) => return Err(PlannerError::from(e).with_context(format!("path: {:?}", self.path))),
        };

        decode_state(&content)
            .map(Some)
            .map_err(|e| e.with_context(format!("path: {:?}", self.path)))
    }

    /// Where an unreadable slot is moved before anything overwrites it.
    pub fn backup_path(&self) -> PathBuf {
        self.path.with_extension("json.bak")
    }

    /// Move the current slot to [`backup_path`](Self::backup_path).
    pub async fn set_aside(&self) -> Result<PathBuf, PlannerError> {
        let backup = self.backup_path();
        tokio::fs::rename(&self.path, &backup)
            .await
            .map_err(|e| PlannerError::from(e).with_context(format!("path: {:?}", self.path)))?;
        Ok(backup)
    }

    /// Overwrite the slot with the full state.
    pub async fn save(&self, state: &PlanningState) -> Result<(), PlannerError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| PlannerError::from(e).with_context(format!("path: {:?}", parent)))?;
            }
        }

        let json = encode_state(state)?;

        // Write beside the slot, then rename over it
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| PlannerError::from(e).with_context(format!("path: {:?}", tmp)))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| PlannerError::from(e).with_context(format!("path: {:?}", self.path)))?;

        tracing::debug!(path = ?self.path, subjects = state.subjects.len(), "Planner state saved");
        Ok(())
    }

    /// Delete the slot; a missing slot is not an error.
    pub async fn clear(&self) -> Result<(), PlannerError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PlannerError::from(e).with_context(format!("path: {:?}", self.path))),
        }
    }
}
