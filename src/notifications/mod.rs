//! Permission-gated delivery of user notifications.
//!
//! Workflows talk to [`NotificationGateway`]; the platform facility sits
//! behind the [`Notifier`] trait so it can be swapped for a log sink or
//! disabled entirely from config.

pub mod desktop;

use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use crate::config::{NotificationConfig, NotifierBackend};
use crate::metrics::Metrics;

pub use desktop::{DesktopNotifier, LogNotifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    /// Not asked yet
    Default,
    Granted,
    Denied,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub icon: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("failed to launch notifier: {0}")]
    Launch(#[from] std::io::Error),
    #[error("notifier exited with status {0:?}")]
    Exited(Option<i32>),
    #[error("notifier did not finish within {0:?}")]
    TimedOut(Duration),
    #[error("desktop notifications are not supported on this platform")]
    Unsupported,
}

/// A platform notification facility.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Ask for permission to show notifications.
    async fn request_permission(&self) -> Permission;

    async fn show(&self, notification: &Notification) -> Result<(), NotifyError>;
}

/// Longest a single delivery may take before it is abandoned.
pub const DEFAULT_DELIVERY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct NotificationGateway {
    backend: Arc<dyn Notifier>,
    permission: Arc<RwLock<Permission>>,
    delivery_timeout: Duration,
    metrics: Metrics,
}

impl NotificationGateway {
    pub fn new(backend: Arc<dyn Notifier>, metrics: Metrics) -> Self {
        Self::with_permission(backend, Permission::Default, metrics)
    }

    pub fn with_permission(backend: Arc<dyn Notifier>, permission: Permission, metrics: Metrics) -> Self {
        NotificationGateway {
            backend,
            permission: Arc::new(RwLock::new(permission)),
            delivery_timeout: DEFAULT_DELIVERY_TIMEOUT,
            metrics,
        }
    }

    pub fn with_delivery_timeout(mut self, timeout: Duration) -> Self {
        self.delivery_timeout = timeout;
        self
    }

    /// A gateway whose permission is denied: every emit is skipped.
    pub fn disabled(metrics: Metrics) -> Self {
        Self::with_permission(Arc::new(LogNotifier), Permission::Denied, metrics)
    }

    pub fn from_config(config: &NotificationConfig, metrics: Metrics) -> Self {
        match config.backend {
            NotifierBackend::Desktop => Self::new(Arc::new(DesktopNotifier::new()), metrics),
            NotifierBackend::Log => Self::new(Arc::new(LogNotifier), metrics),
            NotifierBackend::None => Self::disabled(metrics),
        }
    }

    pub fn permission(&self) -> Permission {
        *self.permission.read()
    }

    pub fn is_granted(&self) -> bool {
        self.permission() == Permission::Granted
    }

    /// Ask the backend once; a granted or denied answer sticks.
    pub async fn ensure_permission(&self) -> Permission {
        let current = self.permission();
        if current != Permission::Default {
            return current;
        }

        let answer = self.backend.request_permission().await;
        *self.permission.write() = answer;
        tracing::info!(permission = ?answer, "Notification permission resolved");
        answer
    }

    /// Show a notification if permitted. Never fails; returns whether it was delivered.
    pub async fn emit(&self, title: &str, body: &str, icon: Option<&str>) -> bool {
        if !self.is_granted() {
            tracing::debug!(title = title, "Notification skipped, permission not granted");
            self.metrics.record_notification(false);
            return false;
        }

        let notification = Notification {
            title: title.to_string(),
            body: body.to_string(),
            icon: icon.map(str::to_string),
        };
        let delivery = tokio::time::timeout(self.delivery_timeout, self.backend.show(&notification))
            .await
            .unwrap_or_else(|_| Err(NotifyError::TimedOut(self.delivery_timeout)));
        match delivery {
            Ok(()) => {
                self.metrics.record_notification(true);
                true
            }
            Err(e) => {
                tracing::warn!(title = title, error = %e, "Failed to show notification");
                self.metrics.record_notification(false);
                false
            }
        }
    }
}
