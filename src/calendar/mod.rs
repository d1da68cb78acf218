//! Pushing the daily schedule to an external calendar.

pub mod client;
pub mod export;

use std::fmt;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use client::GoogleCalendarClient;
pub use export::{CalendarExporter, ExportOutcome, ExportReport};

/// OAuth scope the access token must carry.
pub const CALENDAR_EVENTS_SCOPE: &str = "https://www.googleapis.com/auth/calendar.events";

/// Opaque bearer credential from an external sign-in flow. Never refreshed.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        AccessToken(token.into())
    }

    /// None for blank input
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| AccessToken(trimmed.to_string()))
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// All-day event boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDate {
    pub date: String,
    #[serde(rename = "timeZone")]
    pub time_zone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub summary: String,
    pub start: EventDate,
    pub end: EventDate,
}

impl CalendarEvent {
    /// Single-day event for one chapter of a subject.
    pub fn for_chapter(date: &str, subject: &str, chapter: u32, time_zone: &str) -> Self {
        let boundary = EventDate {
            date: date.to_string(),
            time_zone: time_zone.to_string(),
        };
        CalendarEvent {
            summary: format!("{} - Chapter {}", subject, chapter),
            start: boundary.clone(),
            end: boundary,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CalendarError {
    #[error("calendar request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("calendar service returned {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// The external calendar service.
#[async_trait]
pub trait CalendarClient: Send + Sync {
    async fn insert_event(&self, token: &AccessToken, event: &CalendarEvent) -> Result<(), CalendarError>;
}
