use std::process::Stdio;
use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::{timeout, Duration};
use super::{Notification, Notifier, NotifyError, Permission};

const PROBE_TIMEOUT_SECS: u64 = 3;

/// Shows notifications through the desktop's notifier command
/// (`notify-send` on Linux, `osascript` on macOS).
#[derive(Debug, Default, Clone)]
pub struct DesktopNotifier;

impl DesktopNotifier {
    pub fn new() -> Self {
        DesktopNotifier
    }
}

#[cfg(target_os = "macos")]
fn probe_command() -> Option<Command> {
    let mut cmd = Command::new("osascript");
    cmd.arg("-e").arg("return");
    Some(cmd)
}

#[cfg(all(unix, not(target_os = "macos")))]
fn probe_command() -> Option<Command> {
    let mut cmd = Command::new("notify-send");
    cmd.arg("--version");
    Some(cmd)
}

#[cfg(not(unix))]
fn probe_command() -> Option<Command> {
    None
}

#[cfg(target_os = "macos")]
fn show_command(notification: &Notification) -> Option<Command> {
    let script = format!(
        "display notification \"{}\" with title \"{}\"",
        escape_applescript(&notification.body),
        escape_applescript(&notification.title)
    );
    let mut cmd = Command::new("osascript");
    cmd.arg("-e").arg(script);
    Some(cmd)
}

#[cfg(all(unix, not(target_os = "macos")))]
fn show_command(notification: &Notification) -> Option<Command> {
    let mut cmd = Command::new("notify-send");
    // notify-send takes icon names or local paths, not URLs
    if let Some(icon) = notification.icon.as_deref().filter(|i| !i.contains("://")) {
        cmd.arg(format!("--icon={}", icon));
    }
    cmd.arg(&notification.title).arg(&notification.body);
    Some(cmd)
}

#[cfg(not(unix))]
fn show_command(_notification: &Notification) -> Option<Command> {
    None
}

#[cfg(target_os = "macos")]
fn escape_applescript(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

#[async_trait]
impl Notifier for DesktopNotifier {
    async fn request_permission(&self) -> Permission {
        let Some(mut cmd) = probe_command() else {
            return Permission::Denied;
        };
        cmd.stdout(Stdio::null()).stderr(Stdio::null());

        match timeout(Duration::from_secs(PROBE_TIMEOUT_SECS), cmd.status()).await {
            Ok(Ok(status)) if status.success() => Permission::Granted,
            Ok(Ok(status)) => {
                tracing::debug!(code = ?status.code(), "Notifier probe failed");
                Permission::Denied
            }
            Ok(Err(e)) => {
                tracing::debug!(error = %e, "Notifier command unavailable");
                Permission::Denied
            }
            Err(_) => {
                tracing::debug!(timeout_secs = PROBE_TIMEOUT_SECS, "Notifier probe timed out");
                Permission::Denied
            }
        }
    }

    async fn show(&self, notification: &Notification) -> Result<(), NotifyError> {
        let mut cmd = show_command(notification).ok_or(NotifyError::Unsupported)?;
        cmd.stdout(Stdio::null()).stderr(Stdio::null());
        // Killed if the gateway abandons the delivery
        cmd.kill_on_drop(true);
        let status = cmd.status().await?;
        if status.success() {
            Ok(())
        } else {
            Err(NotifyError::Exited(status.code()))
        }
    }
}

/// Writes notifications to the structured log. Always permitted.
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn request_permission(&self) -> Permission {
        Permission::Granted
    }

    async fn show(&self, notification: &Notification) -> Result<(), NotifyError> {
        tracing::info!(
            title = %notification.title,
            body = %notification.body,
            icon = ?notification.icon,
            "Notification"
        );
        Ok(())
    }
}
