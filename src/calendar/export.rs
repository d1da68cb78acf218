use std::sync::Arc;
use crate::error::PlannerError;
use crate::state::{AppState, StatusMessage};
use super::{AccessToken, CalendarClient, CalendarEvent};

pub const MISSING_PRECONDITION_MESSAGE: &str = "Please sign in and generate a plan first!";

/// Outcome of one submitted event.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOutcome {
    pub date: String,
    pub summary: String,
    /// Failure reason, or None when the event was accepted
    pub error: Option<String>,
}

impl ExportOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Per-item results of an export, in submission order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportReport {
    pub outcomes: Vec<ExportOutcome>,
}

impl ExportReport {
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    pub fn submitted(&self) -> usize {
        self.outcomes.iter().filter(|o| o.succeeded()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &ExportOutcome> {
        self.outcomes.iter().filter(|o| !o.succeeded())
    }

    pub fn is_complete(&self) -> bool {
        self.outcomes.iter().all(ExportOutcome::succeeded)
    }

    /// Acknowledgment shown once the export loop has finished.
    pub fn acknowledgment(&self) -> String {
        let failed = self.attempted() - self.submitted();
        if failed == 0 {
            format!("Pushed {} events to calendar", self.submitted())
        } else {
            format!(
                "Pushed {} of {} events to calendar ({} failed)",
                self.submitted(),
                self.attempted(),
                failed
            )
        }
    }
}

/// Sends every scheduled item of the current plan to the calendar,
/// one event at a time, in schedule order.
#[derive(Clone)]
pub struct CalendarExporter {
    client: Arc<dyn CalendarClient>,
    time_zone: String,
}

impl CalendarExporter {
    pub fn new(client: Arc<dyn CalendarClient>, time_zone: impl Into<String>) -> Self {
        CalendarExporter {
            client,
            time_zone: time_zone.into(),
        }
    }

    /// Export the plan held by `state`.
    ///
    /// Without a plan or a token nothing is sent. A failed item is logged
    /// and the loop moves on; the report lists every item's outcome.
    pub async fn export(&self, state: &AppState, token: Option<&AccessToken>) -> Result<ExportReport, PlannerError> {
        let plan = state.current_plan();
        let (plan, token) = match (plan, token) {
            (Some(plan), Some(token)) => (plan, token),
            (plan, token) => {
                tracing::info!(has_plan = plan.is_some(), has_token = token.is_some(), "Calendar export blocked");
                state.set_status(StatusMessage::Error(MISSING_PRECONDITION_MESSAGE.to_string()));
                return Err(PlannerError::precondition(MISSING_PRECONDITION_MESSAGE));
            }
        };

        let mut report = ExportReport::default();
        for (date, item) in plan.scheduled_items() {
            let event = CalendarEvent::for_chapter(date, &item.subject, item.chapter, &self.time_zone);
            let result = self.client.insert_event(token, &event).await;
            state.metrics.record_calendar_event(result.is_ok());

            let error = match result {
                Ok(()) => None,
                Err(e) => {
                    tracing::warn!(date = %date, summary = %event.summary, error = %e, "Event insert failed");
                    Some(e.to_string())
                }
            };
            report.outcomes.push(ExportOutcome {
                date: date.to_string(),
                summary: event.summary,
                error,
            });
        }

        tracing::info!(
            attempted = report.attempted(),
            submitted = report.submitted(),
            "Calendar export finished"
        );
        state.set_status(StatusMessage::Info(report.acknowledgment()));
        Ok(report)
    }
}
