//! Notification - a transient user-facing message (snackbar/toast)

use chrono::{DateTime, Utc};
use std::time::Duration;

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

/// Transient message shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    /// Label of the dismiss action
    pub action: String,
    /// How long the message stays visible
    pub duration: Duration,
    pub level: NotificationLevel,
    pub issued_at: DateTime<Utc>,
}

impl Notification {
    /// Default display duration
    pub const DEFAULT_DURATION: Duration = Duration::from_millis(3000);

    pub fn new(message: impl Into<String>, level: NotificationLevel) -> Self {
        Self {
            message: message.into(),
            action: "Close".to_string(),
            duration: Self::DEFAULT_DURATION,
            level,
            issued_at: Utc::now(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Info)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Error)
    }

    /// Override the display duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }
}
