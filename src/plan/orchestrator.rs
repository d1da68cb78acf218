use std::sync::Arc;
use std::time::Instant;
use crate::error::{ErrorKind, PlannerError};
use crate::notifications::NotificationGateway;
use crate::state::{AppState, StatusMessage};
use super::{OverloadedDay, Plan, PlanRequest, PlanService};

pub const OVERLOAD_TITLE: &str = "Overloaded Day!";

/// Result of a successful plan request.
#[derive(Debug, Clone)]
pub struct PlanOutcome {
    pub plan: Plan,
    /// Days that exceeded the daily capacity, each notified once
    pub overloaded: Vec<OverloadedDay>,
}

/// Sends the current planning state to the prioritization service and
/// stores what comes back.
#[derive(Clone)]
pub struct PlanOrchestrator {
    state: AppState,
    service: Arc<dyn PlanService>,
    notifications: NotificationGateway,
}

impl PlanOrchestrator {
    pub fn new(state: AppState, service: Arc<dyn PlanService>, notifications: NotificationGateway) -> Self {
        PlanOrchestrator {
            state,
            service,
            notifications,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Request a fresh plan for the current state.
    ///
    /// An empty syllabus is rejected before any network call. On failure the
    /// previous plan stays in place and the reason becomes the status message.
    /// Overlapping calls are not cancelled; the last response to arrive wins.
    pub async fn request_plan(&self) -> Result<PlanOutcome, PlannerError> {
        self.state.clear_status();
        let snapshot = self.state.snapshot();

        let request = match PlanRequest::from_state(&snapshot) {
            Ok(request) => request,
            Err(e) => {
                self.state.metrics.record_validation_rejection();
                self.state.set_status(StatusMessage::Error(e.message.clone()));
                tracing::info!(subjects = snapshot.subjects.len(), "Plan request rejected, no plannable subjects");
                return Err(e);
            }
        };

        let start = Instant::now();
        let result = self.service.generate(&request).await;
        let latency_ms = start.elapsed().as_millis() as u64;
        self.state.metrics.record_plan_request(latency_ms);

        let plan = match result {
            Ok(plan) => plan,
            Err(e) => {
                self.state.metrics.record_plan_failure();
                let reason = format!("{:#}", e);
                tracing::warn!(error = %reason, latency_ms, "Plan request failed");
                self.state
                    .set_status(StatusMessage::Error(format!("Failed to fetch plan: {}", reason)));
                return Err(PlannerError::new(format!("Failed to fetch plan: {}", reason), "plan_request")
                    .with_kind(ErrorKind::Transport)
                    .with_source("plan_service"));
            }
        };

        tracing::info!(
            tasks = plan.tasks.len(),
            days = plan.daily_schedule.len(),
            latency_ms,
            "Plan received"
        );
        self.state.replace_plan(plan.clone());

        let overloaded = plan.overloaded_days(snapshot.daily_hours);
        for day in &overloaded {
            tracing::info!(date = %day.date, hours = day.hours, capacity = snapshot.daily_hours, "Overloaded day");
            self.notifications
                .emit(
                    OVERLOAD_TITLE,
                    &format!("{} has {}h of study!", day.date, day.hours),
                    None,
                )
                .await;
        }

        Ok(PlanOutcome { plan, overloaded })
    }
}
