use std::sync::Arc;
use crate::calendar::{CalendarClient, CalendarExporter, GoogleCalendarClient};
use crate::completion::CompletionWorkflow;
use crate::config::PlannerConfig;
use crate::error::PlannerError;
use crate::notifications::NotificationGateway;
use crate::plan::{HttpPlanService, PlanOrchestrator, PlanService};
use crate::state::{AppState, StateStore};

/// The assembled core: state plus the workflows that act on it.
#[derive(Clone)]
pub struct Planner {
    pub state: AppState,
    pub notifications: NotificationGateway,
    pub orchestrator: PlanOrchestrator,
    pub completion: CompletionWorkflow,
    pub exporter: CalendarExporter,
}

impl Planner {
    /// Restore state from the configured slot and connect the HTTP services.
    pub async fn from_config(config: &PlannerConfig) -> Result<Self, PlannerError> {
        let store = StateStore::new(config.storage.resolved_state_path());
        let state = AppState::init(store).await;
        let notifications = NotificationGateway::from_config(&config.notifications, state.metrics.clone());
        let plan_service = Arc::new(HttpPlanService::from_config(&config.plan_service)?);
        let calendar = Arc::new(GoogleCalendarClient::from_config(&config.calendar)?);

        let planner = Self::assemble(state, plan_service, calendar, notifications, config);
        planner.notifications.ensure_permission().await;
        Ok(planner)
    }

    /// Wire the workflows around already-built collaborators.
    pub fn assemble(
        state: AppState,
        plan_service: Arc<dyn PlanService>,
        calendar: Arc<dyn CalendarClient>,
        notifications: NotificationGateway,
        config: &PlannerConfig,
    ) -> Self {
        let orchestrator = PlanOrchestrator::new(state.clone(), plan_service, notifications.clone());
        let completion = CompletionWorkflow::new(
            orchestrator.clone(),
            notifications.clone(),
            config.notifications.icon.clone(),
        );
        let exporter = CalendarExporter::new(calendar, config.calendar.time_zone.clone());
        Planner {
            state,
            notifications,
            orchestrator,
            completion,
            exporter,
        }
    }
}
