// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Refresh event type.

use chrono::{DateTime, Utc};

/// Outcome of one coordinator poll.
///
/// One event is published per poll, whether it was triggered by the interval
/// timer or by an explicit refresh request.
///
/// # Examples
///
/// ```
/// use eversolo_lib::event::RefreshEvent;
///
/// let ok = RefreshEvent::succeeded();
/// assert!(ok.success());
///
/// let failed = RefreshEvent::failed("connection refused");
/// assert!(!failed.success());
/// assert_eq!(failed.error(), Some("connection refused"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshEvent {
    success: bool,
    at: DateTime<Utc>,
    error: Option<String>,
}

impl RefreshEvent {
    /// Creates an event for a poll that reached the device.
    #[must_use]
    pub fn succeeded() -> Self {
        Self {
            success: true,
            at: Utc::now(),
            error: None,
        }
    }

    /// Creates an event for a poll that failed.
    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            at: Utc::now(),
            error: Some(error.into()),
        }
    }

    /// Returns whether the poll succeeded.
    #[must_use]
    pub fn success(&self) -> bool {
        self.success
    }

    /// Returns when the poll completed.
    #[must_use]
    pub fn at(&self) -> DateTime<Utc> {
        self.at
    }

    /// Returns the failure description, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
