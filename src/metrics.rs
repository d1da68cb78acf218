use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Process-local counters for the planner.
/// All metrics are atomic counters for thread-safety; clones share the counters.
#[derive(Clone, Default, Debug)]
pub struct Metrics {
    /// Plan requests sent to the prioritization service
    pub plan_requests: Arc<AtomicU64>,
    /// Plan requests that failed in transport or decoding
    pub plan_failures: Arc<AtomicU64>,
    /// Plan requests rejected locally before any network call
    pub validation_rejections: Arc<AtomicU64>,
    /// Plan request latency in milliseconds (sum)
    pub plan_latency_ms: Arc<AtomicU64>,
    pub notifications_sent: Arc<AtomicU64>,
    /// Notifications dropped because permission was not granted
    pub notifications_skipped: Arc<AtomicU64>,
    pub calendar_events_submitted: Arc<AtomicU64>,
    pub calendar_events_failed: Arc<AtomicU64>,
    /// Writes of the durable state slot
    pub state_writes: Arc<AtomicU64>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_plan_request(&self, latency_ms: u64) {
        self.plan_requests.fetch_add(1, Ordering::Relaxed);
        self.plan_latency_ms.fetch_add(latency_ms, Ordering::Relaxed);
    }

    pub fn record_plan_failure(&self) {
        self.plan_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_validation_rejection(&self) {
        self.validation_rejections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_notification(&self, delivered: bool) {
        if delivered {
            self.notifications_sent.fetch_add(1, Ordering::Relaxed);
        } else {
            self.notifications_skipped.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_calendar_event(&self, success: bool) {
        if success {
            self.calendar_events_submitted.fetch_add(1, Ordering::Relaxed);
        } else {
            self.calendar_events_failed.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_state_write(&self) {
        self.state_writes.fetch_add(1, Ordering::Relaxed);
    }

    /// Emit every counter as one structured log line
    pub fn log_summary(&self) {
        tracing::info!(
            plan_requests = self.plan_requests.load(Ordering::Relaxed),
            plan_failures = self.plan_failures.load(Ordering::Relaxed),
            validation_rejections = self.validation_rejections.load(Ordering::Relaxed),
            plan_latency_ms = self.plan_latency_ms.load(Ordering::Relaxed),
            notifications_sent = self.notifications_sent.load(Ordering::Relaxed),
            notifications_skipped = self.notifications_skipped.load(Ordering::Relaxed),
            calendar_events_submitted = self.calendar_events_submitted.load(Ordering::Relaxed),
            calendar_events_failed = self.calendar_events_failed.load(Ordering::Relaxed),
            state_writes = self.state_writes.load(Ordering::Relaxed),
            "Planner metrics"
        );
    }
}
