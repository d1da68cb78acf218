use async_trait::async_trait;
use reqwest::Client;
use tokio::time::Duration;
use crate::config::CalendarConfig;
use crate::error::{ErrorKind, PlannerError};
use super::{AccessToken, CalendarClient, CalendarError, CalendarEvent};

/// Calendar events API: one authenticated POST per event.
pub struct GoogleCalendarClient {
    client: Client,
    events_url: String,
}

impl GoogleCalendarClient {
    pub fn new(events_url: impl Into<String>, timeout_secs: u64) -> Result<Self, PlannerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .tcp_keepalive(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                PlannerError::new(format!("Failed to create HTTP client: {}", e), "startup")
                    .with_kind(ErrorKind::Config)
            })?;
        Ok(GoogleCalendarClient {
            client,
            events_url: events_url.into(),
        })
    }

    pub fn from_config(config: &CalendarConfig) -> Result<Self, PlannerError> {
        Self::new(config.events_url.clone(), config.timeout_secs)
    }
}

#[async_trait]
impl CalendarClient for GoogleCalendarClient {
    async fn insert_event(&self, token: &AccessToken, event: &CalendarEvent) -> Result<(), CalendarError> {
        let response = self
            .client
            .post(&self.events_url)
            .bearer_auth(token.secret())
            .json(event)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(CalendarError::Rejected {
            status: status.as_u16(),
            body: body.chars().take(200).collect(),
        })
    }
}
