//! User-facing notification channel.
//!
//! The wallet and mint subsystems only produce notifications; the UI layer
//! decides how to show them. Delivery is fire-and-forget.

pub mod channel;
pub mod console;

pub use channel::ChannelNotifier;
pub use console::ConsoleNotifier;

use std::fmt;

use serde::Serialize;

use crate::observability::metrics;

/// How prominently a notification should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Error => "error",
        }
    }
}

/// A single message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Info,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Error,
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}

/// Sink for user-facing notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Record and deliver a notification.
pub(crate) fn emit(notifier: &dyn Notifier, notification: Notification) {
    metrics::record_notification(notification.severity.as_str());
    tracing::debug!(
        title = %notification.title,
        severity = notification.severity.as_str(),
        "Notification emitted"
    );
    notifier.notify(notification);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_joins_title_and_description() {
        let n = Notification::error("Minting failed", "user denied transaction");
        assert_eq!(n.to_string(), "Minting failed: user denied transaction");
        assert_eq!(n.severity, Severity::Error);
    }
}
