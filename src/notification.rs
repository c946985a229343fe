// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! User-visible advisory notifications.
//!
//! Notifications are keyed by a fixed identifier: creating a notification
//! under an identifier that is already in use replaces the previous message,
//! so repeated dispatches only ever show the latest one.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

/// Identifier used for the "Wake-on-LAN sent" advisory.
pub const NOTIFICATION_ID_WOL: &str = "eversolo_wol";

/// A single advisory message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Identifier the message is stored under.
    pub notification_id: String,
    /// Optional title.
    pub title: Option<String>,
    /// Message body.
    pub message: String,
    /// When this version of the message was written.
    pub created_at: DateTime<Utc>,
}

/// Whether [`NotificationCenter::create`] added or replaced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateType {
    /// No message existed under the identifier.
    Added,
    /// An existing message was replaced.
    Updated,
}

/// In-memory store of advisory notifications.
///
/// # Examples
///
/// ```
/// use eversolo_lib::notification::{NotificationCenter, UpdateType};
///
/// let center = NotificationCenter::new();
///
/// let (_, kind) = center.create("wol", Some("Power On"), "sent");
/// assert_eq!(kind, UpdateType::Added);
///
/// let (_, kind) = center.create("wol", Some("Power On"), "sent again");
/// assert_eq!(kind, UpdateType::Updated);
/// assert_eq!(center.len(), 1);
/// assert_eq!(center.get("wol").unwrap().message, "sent again");
/// ```
#[derive(Debug, Default)]
pub struct NotificationCenter {
    notifications: RwLock<HashMap<String, Notification>>,
}

impl NotificationCenter {
    /// Creates an empty notification center.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates or replaces the notification stored under `notification_id`.
    pub fn create(
        &self,
        notification_id: impl Into<String>,
        title: Option<&str>,
        message: impl Into<String>,
    ) -> (Notification, UpdateType) {
        let notification = Notification {
            notification_id: notification_id.into(),
            title: title.map(str::to_string),
            message: message.into(),
            created_at: Utc::now(),
        };

        let previous = self
            .notifications
            .write()
            .insert(notification.notification_id.clone(), notification.clone());

        let update_type = if previous.is_some() {
            tracing::debug!(id = %notification.notification_id, "Updated notification");
            UpdateType::Updated
        } else {
            tracing::info!(id = %notification.notification_id, "Created notification");
            UpdateType::Added
        };

        (notification, update_type)
    }

    /// Removes a notification, returning it if it existed.
    pub fn dismiss(&self, notification_id: &str) -> Option<Notification> {
        self.notifications.write().remove(notification_id)
    }

    /// Returns a copy of the notification stored under `notification_id`.
    #[must_use]
    pub fn get(&self, notification_id: &str) -> Option<Notification> {
        self.notifications.read().get(notification_id).cloned()
    }

    /// Returns the number of stored notifications.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notifications.read().len()
    }

    /// Returns `true` if no notification is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notifications.read().is_empty()
    }
}
