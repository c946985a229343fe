// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscribable trait for entities that push state to observers.

use crate::state::SwitchState;
use crate::subscription::SubscriptionId;
use crate::types::PowerState;

/// Trait for types that notify observers when their state is written.
///
/// # Examples
///
/// ```ignore
/// use eversolo_lib::subscription::Subscribable;
///
/// let id = switch.on_state_written(|state| {
///     println!("{} is {}", state.unique_id, state.power_state());
/// });
/// switch.unsubscribe(id);
/// ```
pub trait Subscribable {
    /// Subscribes to every state write.
    ///
    /// Writes happen on each user action and on each refresh, even when the
    /// reported value does not change.
    fn on_state_written<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&SwitchState) + Send + Sync + 'static;

    /// Subscribes to changes of the reported power state.
    fn on_power_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(PowerState) + Send + Sync + 'static;

    /// Unsubscribes a callback by its subscription ID.
    ///
    /// Returns `true` if the subscription was found and removed.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}
