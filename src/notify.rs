use crate::config::NotifierBackend;
use crate::error::TokenWatchError;
use async_trait::async_trait;
use log::warn;
use std::sync::Arc;

/// Fire-and-forget alert delivery.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, title: &str, message: &str) -> Result<(), TokenWatchError>;
}

/// Native desktop notification.
pub struct DesktopNotifier {
    app_name: String,
}

impl DesktopNotifier {
    pub fn new() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
        }
    }
}

impl Default for DesktopNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for DesktopNotifier {
    async fn notify(&self, title: &str, message: &str) -> Result<(), TokenWatchError> {
        let app_name = self.app_name.clone();
        let title = title.to_string();
        let message = message.to_string();

        // The platform call is synchronous (D-Bus on Linux).
        tokio::task::spawn_blocking(move || {
            notify_rust::Notification::new()
                .appname(&app_name)
                .summary(&title)
                .body(&message)
                .show()
                .map(|_| ())
                .map_err(|e| TokenWatchError::NotificationError(e.to_string()))
        })
        .await
        .map_err(|e| TokenWatchError::NotificationError(e.to_string()))?
    }
}

/// Writes alerts to the log instead of the desktop, for headless hosts.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, title: &str, message: &str) -> Result<(), TokenWatchError> {
        warn!("{}: {}", title, message);
        Ok(())
    }
}

pub fn build_notifier(backend: NotifierBackend) -> Arc<dyn Notifier> {
    match backend {
        NotifierBackend::Desktop => Arc::new(DesktopNotifier::new()),
        NotifierBackend::Log => Arc::new(LogNotifier),
    }
}
