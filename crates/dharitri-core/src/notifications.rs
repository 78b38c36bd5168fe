//! In-memory notification feed.
//!
//! Wraps freshly derived alerts with a read flag for the notification
//! dropdown. Read state lives only as long as the feed; rebuilding the feed
//! from a new evaluation starts everything unread again.

use serde::{Deserialize, Serialize};

use crate::models::Alert;

/// An alert with its read flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub alert: Alert,
    pub read: bool,
}

/// Ordered list of notifications for one evaluation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationFeed {
    items: Vec<Notification>,
}

impl NotificationFeed {
    /// Build an all-unread feed, keeping the alerts' order.
    pub fn from_alerts(alerts: Vec<Alert>) -> Self {
        Self {
            items: alerts
                .into_iter()
                .map(|alert| Notification { alert, read: false })
                .collect(),
        }
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of unread notifications (the bell badge).
    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.read).count()
    }

    /// Mark one notification read. Returns `false` if the id is unknown.
    pub fn mark_as_read(&mut self, alert_id: &str) -> bool {
        match self.items.iter_mut().find(|n| n.alert.id == alert_id) {
            Some(notification) => {
                notification.read = true;
                true
            }
            None => false,
        }
    }

    pub fn mark_all_as_read(&mut self) {
        for notification in &mut self.items {
            notification.read = true;
        }
    }
}
