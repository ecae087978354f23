//! User-facing acknowledgment events emitted by wishlist mutations.
//!
//! The store only produces these; how they reach the user (toast, console
//! line, log entry) is up to the sink the application installs.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}

/// Receives notifications from the wishlist store.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: &Notification);
}

/// Sink that writes notifications to the tracing log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, notification: &Notification) {
        match notification.kind {
            NotificationKind::Success => tracing::info!("{}", notification.message),
            NotificationKind::Error => tracing::error!("{}", notification.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_wire_shape() {
        let json = serde_json::to_string(&Notification::success("Added to wishlist")).unwrap();
        assert_eq!(json, r#"{"kind":"success","message":"Added to wishlist"}"#);
    }
}
