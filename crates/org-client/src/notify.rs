//! Notification presenters
//!
//! A renderer subscribes to `ChannelNotifier`; `TracingNotifier` is for
//! headless runs; `MemoryNotifier` records everything for inspection.

use org_core::{Notification, NotificationLevel, Notifier};
use parking_lot::Mutex;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// Broadcasts notifications to any number of subscribers
#[derive(Clone)]
pub struct ChannelNotifier {
    tx: broadcast::Sender<Notification>,
}

impl ChannelNotifier {
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }
}

impl Default for ChannelNotifier {
    fn default() -> Self {
        Self::new(64)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        if self.tx.send(notification).is_err() {
            debug!("Notification dropped, no subscribers");
        }
    }
}

/// Writes notifications to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Info => info!(
                message = %notification.message,
                duration_ms = notification.duration.as_millis() as u64,
                "Notification"
            ),
            NotificationLevel::Error => warn!(
                message = %notification.message,
                duration_ms = notification.duration.as_millis() as u64,
                "Notification"
            ),
        }
    }
}

/// Keeps every notification in memory
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.sent.lock().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.sent.lock().iter().map(|n| n.message.clone()).collect()
    }

    pub fn last_message(&self) -> Option<String> {
        self.sent.lock().last().map(|n| n.message.clone())
    }

    pub fn is_empty(&self) -> bool {
        self.sent.lock().is_empty()
    }

    pub fn clear(&self) {
        self.sent.lock().clear();
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notification: Notification) {
        self.sent.lock().push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_channel_notifier_delivers() {
        let notifier = ChannelNotifier::default();
        let mut rx = notifier.subscribe();

        notifier.notify(Notification::info("Settings saved successfully!"));

        let received = rx.recv().await.unwrap();
        assert_eq!(received.message, "Settings saved successfully!");
        assert_eq!(received.action, "Close");
    }

    #[test]
    fn test_channel_notifier_without_subscribers() {
        ChannelNotifier::new(0).notify(Notification::error("nobody listening"));
    }

    #[test]
    fn test_memory_notifier_records() {
        let notifier = MemoryNotifier::new();
        assert!(notifier.is_empty());

        notifier.notify(Notification::info("one"));
        notifier.notify(Notification::error("two"));

        assert_eq!(notifier.messages(), ["one", "two"]);
        assert_eq!(notifier.last_message().as_deref(), Some("two"));
        assert!(notifier.notifications()[1].is_error());

        notifier.clear();
        assert!(notifier.is_empty());
    }
}
