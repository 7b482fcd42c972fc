//! # Notifications
//!
//! Success and error messages raised by the screens after each remote call, fanned out to
//! whoever renders them. Sending with nobody subscribed is not an error.

use tokio::sync::broadcast;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Cloneable broadcast sender for [`Notice`]s.
#[derive(Debug, Clone)]
pub struct Notifier {
    sender: broadcast::Sender<Notice>,
}

impl Notifier {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.sender.subscribe()
    }

    pub fn success(&self, message: impl Into<String>) {
        let message = message.into();
        info!(%message, "Notice");
        self.publish(NoticeLevel::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        let message = message.into();
        warn!(%message, "Notice");
        self.publish(NoticeLevel::Error, message);
    }

    fn publish(&self, level: NoticeLevel, message: String) {
        let _ = self.sender.send(Notice { level, message });
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(64)
    }
}
