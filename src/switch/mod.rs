// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The Eversolo power switch.
//!
//! - [`OptimisticToggle`] - the optimistic on/off model
//! - [`PowerSwitch`] - entity wrapping the toggle, its observers and the device actions
//! - [`PowerActions`] - what the switch needs from the coordinator

mod optimistic;
mod power_switch;

pub use optimistic::OptimisticToggle;
pub use power_switch::{PowerSwitch, SWITCH_ICON, SWITCH_NAME};

/// Device actions and refresh state consumed by [`PowerSwitch`].
///
/// Implemented by [`Coordinator`](crate::coordinator::Coordinator).
#[allow(async_fn_in_trait)]
pub trait PowerActions {
    /// Sends a best-effort wake signal to the device.
    ///
    /// # Errors
    ///
    /// Returns error if the signal could not be sent.
    async fn send_wake_signal(&self) -> crate::Result<()>;

    /// Asks the device to power off.
    ///
    /// # Errors
    ///
    /// Returns error if the command could not be delivered.
    async fn send_power_off(&self) -> crate::Result<()>;

    /// Asks the data source to poll soon.
    ///
    /// Completion is reported later through a refresh, not by this call.
    async fn request_refresh(&self);

    /// Returns whether the last poll reached the device.
    fn last_update_success(&self) -> bool;
}
