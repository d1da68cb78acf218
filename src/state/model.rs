use std::fmt;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

pub const DEFAULT_DAILY_HOURS: u8 = 4;
pub const MIN_DAILY_HOURS: u8 = 1;
pub const MAX_DAILY_HOURS: u8 = 24;

/// Stable identity of a subject, assigned at creation.
/// Display names are mutable attributes and may repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(Uuid);

impl SubjectId {
    pub fn new() -> Self {
        SubjectId(Uuid::new_v4())
    }
}

impl Default for SubjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Everything the planner knows about one subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectRecord {
    /// Missing ids are assigned on load
    #[serde(default)]
    pub id: SubjectId,
    #[serde(default)]
    pub name: String,
    /// None until the user enters a parseable chapter count
    #[serde(default)]
    pub total_chapters: Option<u32>,
    #[serde(default)]
    pub completed: u32,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub difficulties: Vec<f64>,
}

impl SubjectRecord {
    /// A fresh, unnamed subject with no chapters entered.
    pub fn empty() -> Self {
        SubjectRecord {
            id: SubjectId::new(),
            name: String::new(),
            total_chapters: None,
            completed: 0,
            deadline: None,
            difficulties: Vec::new(),
        }
    }

    pub fn named(name: impl Into<String>, total_chapters: u32) -> Self {
        SubjectRecord {
            name: name.into(),
            total_chapters: Some(total_chapters),
            ..Self::empty()
        }
    }

    /// Whether this subject can be sent to the prioritization service.
    pub fn is_plannable(&self) -> bool {
        !self.name.trim().is_empty() && self.total_chapters.is_some()
    }

    /// Chapters left, or None when the count exceeds the total.
    pub fn remaining_chapters(&self) -> Option<u32> {
        self.total_chapters
            .and_then(|total| total.checked_sub(self.completed))
    }
}

/// One editable field of a subject, as entered by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectField {
    Name(String),
    /// Raw text; empty or non-numeric input clears the count
    TotalChapters(String),
}

/// The unit of persistence: ordered subjects plus daily capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlanningState {
    pub subjects: Vec<SubjectRecord>,
    /// Anything but a whole number in 1..=24 restores as the default
    #[serde(deserialize_with = "lenient_daily_hours")]
    pub daily_hours: u8,
}

/// Whole-hour capacity from a stored number or numeric string.
pub(crate) fn daily_hours_from_value(value: &serde_json::Value) -> Option<u8> {
    let hours = match value {
        serde_json::Value::Number(n) => n.as_f64()?,
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if hours.fract() != 0.0 || hours < f64::from(MIN_DAILY_HOURS) || hours > f64::from(MAX_DAILY_HOURS) {
        return None;
    }
    Some(hours as u8)
}

fn lenient_daily_hours<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(daily_hours_from_value(&raw).unwrap_or_else(|| {
        tracing::warn!(daily_hours = %raw, "Restored daily hours out of range, using default");
        DEFAULT_DAILY_HOURS
    }))
}

impl Default for PlanningState {
    fn default() -> Self {
        PlanningState {
            subjects: Vec::new(),
            daily_hours: DEFAULT_DAILY_HOURS,
        }
    }
}

impl PlanningState {
    /// State used when nothing has been persisted yet: one blank subject row.
    pub fn initial() -> Self {
        PlanningState {
            subjects: vec![SubjectRecord::empty()],
            daily_hours: DEFAULT_DAILY_HOURS,
        }
    }

    pub fn is_valid_daily_hours(hours: u8) -> bool {
        (MIN_DAILY_HOURS..=MAX_DAILY_HOURS).contains(&hours)
    }
}
