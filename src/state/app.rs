use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use parking_lot::RwLock;
use crate::error::{ErrorKind, PlannerError};
use crate::metrics::Metrics;
use crate::plan::Plan;
use crate::state::model::PlanningState;
use crate::state::store::StateStore;

/// Message shown to the user after an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

impl StatusMessage {
    pub fn text(&self) -> &str {
        match self {
            StatusMessage::Info(text) | StatusMessage::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, StatusMessage::Error(_))
    }
}

/// Application-wide state container.
/// All mutable state is centralized here and passed explicitly to the
/// workflows; clones share the same underlying state.
#[derive(Clone)]
pub struct AppState {
    /// Planning state, the only persisted data
    planning: Arc<RwLock<PlanningState>>,
    /// Last plan returned by the prioritization service (session-local)
    plan: Arc<RwLock<Option<Plan>>>,
    status: Arc<RwLock<Option<StatusMessage>>>,
    store: StateStore,
    /// Serializes commits and slot writes so the newest snapshot is written last
    save_lock: Arc<tokio::sync::Mutex<()>>,
    /// Set when an unreadable slot could not be moved aside; saves are refused
    slot_locked: Arc<AtomicBool>,
    /// In-memory state differs from the slot
    unsaved: Arc<AtomicBool>,
    pub metrics: Metrics,
}

impl AppState {
    /// Load-on-start: restore the saved state or fall back to one blank subject.
    ///
    /// A slot that exists but cannot be read is moved aside first, so the
    /// fresh state never overwrites it. If that fails, saving stays disabled.
    pub async fn init(store: StateStore) -> Self {
        let app = match store.try_load().await {
            Ok(Some(state)) => {
                tracing::info!(
                    subjects = state.subjects.len(),
                    daily_hours = state.daily_hours,
                    "Planner state restored"
                );
                Self::with_state(store, state)
            }
            Ok(None) => Self::with_state(store, PlanningState::initial()),
            Err(e) => {
                tracing::warn!(error = %e, "Saved planner state is unreadable, starting fresh");
                let app = Self::with_state(store, PlanningState::initial());
                match app.store.set_aside().await {
                    Ok(backup) => tracing::warn!(backup = ?backup, "Unreadable planner state moved aside"),
                    Err(move_err) => {
                        tracing::error!(error = %move_err, "Could not move unreadable planner state aside, saving disabled");
                        app.slot_locked.store(true, Ordering::SeqCst);
                    }
                }
                app
            }
        };
        app.unsaved.store(false, Ordering::SeqCst);
        app
    }

    /// Wrap a state that is not yet in the slot.
    pub fn with_state(store: StateStore, planning: PlanningState) -> Self {
        AppState {
            planning: Arc::new(RwLock::new(planning)),
            plan: Arc::new(RwLock::new(None)),
            status: Arc::new(RwLock::new(None)),
            store,
            save_lock: Arc::new(tokio::sync::Mutex::new(())),
            slot_locked: Arc::new(AtomicBool::new(false)),
            unsaved: Arc::new(AtomicBool::new(true)),
            metrics: Metrics::new(),
        }
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    /// Copy of the current planning state
    pub fn snapshot(&self) -> PlanningState {
        self.planning.read().clone()
    }

    /// Apply an edit and persist the result.
    ///
    /// The edit runs on a copy. The copy is saved first and replaces the
    /// live state only once the save succeeded, so an edit lands whole
    /// (in memory and in the slot) or not at all.
    pub async fn commit<F, R>(&self, edit: F) -> Result<R, PlannerError>
    where
        F: FnOnce(&mut PlanningState) -> Result<R, PlannerError>,
    {
        let _write = self.save_lock.lock().await;
        let mut draft = self.snapshot();
        let result = edit(&mut draft)?;
        self.write_slot(&draft).await?;
        *self.planning.write() = draft;
        Ok(result)
    }

    /// Write the latest state to the durable slot.
    pub async fn persist(&self) -> Result<(), PlannerError> {
        let _write = self.save_lock.lock().await;
        let snapshot = self.snapshot();
        self.write_slot(&snapshot).await
    }

    /// Whether the in-memory state has not reached the slot yet.
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved.load(Ordering::SeqCst)
    }

    async fn write_slot(&self, state: &PlanningState) -> Result<(), PlannerError> {
        if self.slot_locked.load(Ordering::SeqCst) {
            return Err(PlannerError::new(
                "Saved planner state could not be read; refusing to overwrite it",
                "persist",
            )
            .with_kind(ErrorKind::Persistence)
            .with_context(format!("path: {:?}", self.store.path())));
        }

        match self.store.save(state).await {
            Ok(()) => {
                self.metrics.record_state_write();
                self.unsaved.store(false, Ordering::SeqCst);
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to persist planner state");
                Err(e)
            }
        }
    }

    pub fn current_plan(&self) -> Option<Plan> {
        self.plan.read().clone()
    }

    /// Replace the held plan wholesale
    pub(crate) fn replace_plan(&self, plan: Plan) {
        *self.plan.write() = Some(plan);
    }

    pub fn status(&self) -> Option<StatusMessage> {
        self.status.read().clone()
    }

    pub fn set_status(&self, message: StatusMessage) {
        *self.status.write() = Some(message);
    }

    pub fn clear_status(&self) {
        *self.status.write() = None;
    }

    /// Forget everything: blank state, no plan, durable slot removed.
    pub async fn reset(&self) -> Result<(), PlannerError> {
        {
            let _write = self.save_lock.lock().await;
            self.store.clear().await?;
            *self.planning.write() = PlanningState::initial();
            *self.plan.write() = None;
            self.clear_status();
            self.slot_locked.store(false, Ordering::SeqCst);
            self.unsaved.store(false, Ordering::SeqCst);
        }
        tracing::info!("Planner state cleared");
        Ok(())
    }

    /// Final save before the process exits; skipped when the slot is current.
    pub async fn teardown(&self) -> Result<(), PlannerError> {
        self.metrics.log_summary();
        if !self.has_unsaved_changes() {
            tracing::debug!("Planner state unchanged, nothing to save");
            return Ok(());
        }
        self.persist().await
    }
}
