// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Power switch entity with Wake-on-LAN support.

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::config::EntryId;
use crate::error::Result;
use crate::event::RefreshEvent;
use crate::notification::{NOTIFICATION_ID_WOL, NotificationCenter};
use crate::state::SwitchState;
use crate::subscription::{CallbackRegistry, Subscribable, SubscriptionId};
use crate::types::PowerState;

use super::{OptimisticToggle, PowerActions};

/// Display name of the switch.
pub const SWITCH_NAME: &str = "Eversolo Power Switch";

/// Icon of the switch.
pub const SWITCH_ICON: &str = "mdi:power";

const WOL_TITLE: &str = "Eversolo Power On";
const WOL_MESSAGE: &str =
    "Wake-on-LAN packet sent to Eversolo device. Waiting for the device to come online...";

/// Power switch for an Eversolo device.
///
/// Turning on sends a Wake-on-LAN packet, turning off sends the power-off
/// key. Both report the requested state immediately; the next coordinator
/// refresh replaces it with whether the device actually answered.
///
/// The switch is always available: when the device is unreachable it looks
/// off, and turning it on is exactly what must still work.
///
/// Methods that change state take `&mut self`; the host is expected to
/// serialize calls per switch.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
///
/// use eversolo_lib::config::EntryConfig;
/// use eversolo_lib::coordinator::Coordinator;
/// use eversolo_lib::notification::NotificationCenter;
/// use eversolo_lib::switch::PowerSwitch;
///
/// # async fn example() -> eversolo_lib::Result<()> {
/// let config = EntryConfig::new("192.168.1.60").with_mac("00:11:22:33:44:55".parse()?);
/// let coordinator = Arc::new(Coordinator::from_config(&config)?);
/// let notifications = Arc::new(NotificationCenter::new());
///
/// let mut switch = PowerSwitch::new(coordinator, notifications, config.entry_id);
/// switch.turn_on().await?;
/// assert!(switch.is_on());
/// # Ok(())
/// # }
/// ```
pub struct PowerSwitch<A: PowerActions> {
    actions: Arc<A>,
    notifications: Arc<NotificationCenter>,
    unique_id: String,
    toggle: OptimisticToggle,
    callbacks: CallbackRegistry,
    last_written: Option<PowerState>,
}

impl<A: PowerActions> PowerSwitch<A> {
    /// Creates the switch for a configuration entry.
    ///
    /// The confirmed state starts from the coordinator's last poll result.
    #[must_use]
    pub fn new(actions: Arc<A>, notifications: Arc<NotificationCenter>, entry_id: EntryId) -> Self {
        let toggle = OptimisticToggle::new(actions.last_update_success());
        Self {
            actions,
            notifications,
            unique_id: format!("{entry_id}_power_switch"),
            toggle,
            callbacks: CallbackRegistry::new(),
            last_written: None,
        }
    }

    /// Returns the stable identifier of the switch.
    #[must_use]
    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    /// Returns whether the switch reports on.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.toggle.read()
    }

    /// Always `true`, so a wake signal can be sent while the device is down.
    #[must_use]
    pub fn available(&self) -> bool {
        true
    }

    /// Returns the underlying toggle.
    #[must_use]
    pub fn toggle(&self) -> &OptimisticToggle {
        &self.toggle
    }

    /// Returns a snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> SwitchState {
        let mut state = SwitchState::new(&self.unique_id, SWITCH_NAME, SWITCH_ICON, self.is_on());
        state.available = self.available();
        state
    }

    /// Pushes the current state to observers.
    pub fn write_state(&mut self) {
        let state = self.state();
        self.callbacks.dispatch(&state, self.last_written);
        self.last_written = Some(state.power_state());
    }

    fn set_optimistic_state(&mut self, value: bool) {
        self.toggle.request(value);
        self.write_state();
    }

    /// Turns the device on with a Wake-on-LAN packet.
    ///
    /// The switch reports on before the packet is sent. After a successful
    /// send an advisory notification is written.
    ///
    /// # Errors
    ///
    /// Returns the wake signal failure. The switch keeps reporting on until
    /// the next refresh.
    pub async fn turn_on(&mut self) -> Result<()> {
        self.set_optimistic_state(true);

        if let Err(e) = self.actions.send_wake_signal().await {
            tracing::warn!(unique_id = %self.unique_id, error = %e, "Wake-on-LAN failed");
            return Err(e);
        }

        self.notifications.create(NOTIFICATION_ID_WOL, Some(WOL_TITLE), WOL_MESSAGE);
        Ok(())
    }

    /// Turns the device off, then asks the coordinator for a refresh.
    ///
    /// # Errors
    ///
    /// Returns the power-off failure; no refresh is requested in that case.
    /// The switch keeps reporting off until the next refresh.
    pub async fn turn_off(&mut self) -> Result<()> {
        self.set_optimistic_state(false);

        if let Err(e) = self.actions.send_power_off().await {
            tracing::warn!(unique_id = %self.unique_id, error = %e, "Power-off failed");
            return Err(e);
        }

        self.actions.request_refresh().await;
        Ok(())
    }

    /// Applies a coordinator refresh.
    ///
    /// Drops any pending optimistic state and reports the coordinator's last
    /// poll result.
    pub fn handle_refresh(&mut self) {
        let confirmed = self.actions.last_update_success();
        self.toggle.on_refresh(confirmed);
        tracing::debug!(unique_id = %self.unique_id, confirmed, "Switch refreshed");
        self.write_state();
    }

    /// Waits for the next refresh event and applies it.
    ///
    /// Returns `false` once the coordinator's event bus is closed. Lagging
    /// behind is not an error: the coordinator's current result is applied.
    pub async fn next_refresh(&mut self, events: &mut broadcast::Receiver<RefreshEvent>) -> bool {
        match events.recv().await {
            Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => {
                self.handle_refresh();
                true
            }
            Err(broadcast::error::RecvError::Closed) => false,
        }
    }
}

impl<A: PowerActions> Subscribable for PowerSwitch<A> {
    fn on_state_written<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&SwitchState) + Send + Sync + 'static,
    {
        self.callbacks.on_state_written(callback)
    }

    fn on_power_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(PowerState) + Send + Sync + 'static,
    {
        self.callbacks.on_power_changed(callback)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.callbacks.unsubscribe(id)
    }
}

impl<A: PowerActions> std::fmt::Debug for PowerSwitch<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PowerSwitch")
            .field("unique_id", &self.unique_id)
            .field("toggle", &self.toggle)
            .field("callbacks", &self.callbacks)
            .finish_non_exhaustive()
    }
}
