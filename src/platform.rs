// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Switch platform setup for a configuration entry.

use std::sync::Arc;

use crate::config::EntryConfig;
use crate::notification::NotificationCenter;
use crate::switch::{PowerActions, PowerSwitch};

/// Returns whether an entry gets a power switch.
#[must_use]
pub fn is_registered(config: &EntryConfig) -> bool {
    config.able_remote_boot
}

/// Creates the switches for an entry.
///
/// The power switch is only created when the entry says the device can be
/// booted remotely; otherwise the result is empty and nothing for this
/// device ever reaches an observer.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
///
/// use eversolo_lib::config::EntryConfig;
/// use eversolo_lib::coordinator::Coordinator;
/// use eversolo_lib::notification::NotificationCenter;
/// use eversolo_lib::platform;
///
/// # fn example() -> eversolo_lib::Result<()> {
/// let config = EntryConfig::new("192.168.1.60").with_remote_boot(true);
/// let coordinator = Arc::new(Coordinator::from_config(&config)?);
///
/// let switches = platform::setup_entry(&config, coordinator, Arc::new(NotificationCenter::new()));
/// assert_eq!(switches.len(), 1);
/// # Ok(())
/// # }
/// ```
pub fn setup_entry<A: PowerActions>(
    config: &EntryConfig,
    actions: Arc<A>,
    notifications: Arc<NotificationCenter>,
) -> Vec<PowerSwitch<A>> {
    if !is_registered(config) {
        tracing::debug!(entry_id = %config.entry_id, "Remote boot not supported, no power switch");
        return Vec::new();
    }

    let switch = PowerSwitch::new(actions, notifications, config.entry_id);
    tracing::info!(unique_id = %switch.unique_id(), "Power switch registered");
    vec![switch]
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Idle;

    impl PowerActions for Idle {
        async fn send_wake_signal(&self) -> crate::Result<()> {
            Ok(())
        }

        async fn send_power_off(&self) -> crate::Result<()> {
            Ok(())
        }

        async fn request_refresh(&self) {}

        fn last_update_success(&self) -> bool {
            false
        }
    }

    #[test]
    fn flag_off_registers_nothing() {
        let config = EntryConfig::new("10.0.0.2");
        let switches = setup_entry(&config, Arc::new(Idle), Arc::new(NotificationCenter::new()));
        assert!(switches.is_empty());
        assert!(!is_registered(&config));
    }

    #[test]
    fn flag_on_registers_power_switch() {
        let config = EntryConfig::new("10.0.0.2").with_remote_boot(true);
        let switches = setup_entry(&config, Arc::new(Idle), Arc::new(NotificationCenter::new()));

        assert_eq!(switches.len(), 1);
        assert_eq!(
            switches[0].unique_id(),
            format!("{}_power_switch", config.entry_id)
        );
    }
}
