#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};
use study_planner::calendar::GoogleCalendarClient;
use study_planner::config::PlannerConfig;
use study_planner::notifications::{Notification, NotificationGateway, Notifier, NotifyError, Permission};
use study_planner::plan::HttpPlanService;
use study_planner::state::{AppState, PlanningState, StateStore, SubjectRecord};
use study_planner::Planner;
use tempfile::TempDir;
use wiremock::MockServer;

pub const PLAN_PATH: &str = "/api/plan";
pub const EVENTS_PATH: &str = "/calendar/v3/calendars/primary/events";

/// Notifier that keeps everything it is asked to show.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    shown: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn shown(&self) -> Vec<Notification> {
        self.shown.lock().clone()
    }

    pub fn titled(&self, title: &str) -> Vec<Notification> {
        self.shown().into_iter().filter(|n| n.title == title).collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn request_permission(&self) -> Permission {
        Permission::Granted
    }

    async fn show(&self, notification: &Notification) -> Result<(), NotifyError> {
        self.shown.lock().push(notification.clone());
        Ok(())
    }
}

pub struct Harness {
    pub planner: Planner,
    pub notifier: RecordingNotifier,
    // Keeps the state directory alive for the test
    pub dir: TempDir,
}

impl Harness {
    pub fn state(&self) -> &AppState {
        &self.planner.state
    }

    pub fn store(&self) -> StateStore {
        self.planner.state.store().clone()
    }
}

/// Planner wired to a mock server, with its state slot in a temp dir.
pub async fn harness(server: &MockServer, planning: PlanningState) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("planner_state.json");
    harness_at(server, planning, dir, path).await
}

/// Same as [`harness`], with the state slot at `path`.
pub async fn harness_at(server: &MockServer, planning: PlanningState, dir: TempDir, path: PathBuf) -> Harness {
    let store = StateStore::new(path);
    let state = AppState::with_state(store, planning);

    let notifier = RecordingNotifier::default();
    let gateway = NotificationGateway::with_permission(
        Arc::new(notifier.clone()),
        Permission::Granted,
        state.metrics.clone(),
    );
    let plan_service = Arc::new(HttpPlanService::new(format!("{}{}", server.uri(), PLAN_PATH), 5).unwrap());
    let calendar = Arc::new(GoogleCalendarClient::new(format!("{}{}", server.uri(), EVENTS_PATH), 5).unwrap());

    let planner = Planner::assemble(state, plan_service, calendar, gateway, &PlannerConfig::default());
    Harness { planner, notifier, dir }
}

pub fn planning(subjects: Vec<SubjectRecord>, daily_hours: u8) -> PlanningState {
    PlanningState { subjects, daily_hours }
}

pub fn subject(name: &str, chapters: u32, completed: u32) -> SubjectRecord {
    let mut record = SubjectRecord::named(name, chapters);
    record.completed = completed;
    record
}

/// A service response with the given `(date, [(subject, chapter, hours)])` schedule.
pub fn plan_body(schedule: &[(&str, &[(&str, u32, f64)])]) -> Value {
    let mut daily = serde_json::Map::new();
    for (date, items) in schedule {
        let items: Vec<Value> = items
            .iter()
            .map(|(subject, chapter, hours)| json!({"subject": subject, "chapter": chapter, "hours": hours}))
            .collect();
        daily.insert(date.to_string(), Value::Array(items));
    }
    json!({
        "tasks": [{
            "subject": "Math",
            "done_chapters": 1,
            "remaining_chapters": 2,
            "total_chapters": 3,
            "deadline": "2024-01-10",
            "days_left": 9,
            "priority": 12.5
        }],
        "daily_schedule": Value::Object(daily)
    })
}
