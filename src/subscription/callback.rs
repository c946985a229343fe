// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Callback management for switch state subscriptions.
//!
//! - [`SubscriptionId`] - Unique identifier for unsubscribing
//! - [`CallbackRegistry`] - Registry for storing and dispatching callbacks

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::state::SwitchState;
use crate::types::PowerState;

/// Unique identifier for a subscription.
///
/// Returned when registering a callback and used to unsubscribe later. IDs
/// are unique within a registry's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    #[must_use]
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", self.0)
    }
}

/// Callback receiving every state write.
type StateWrittenCallback = Arc<dyn Fn(&SwitchState) + Send + Sync>;

/// Callback receiving only changes of the reported power state.
type PowerCallback = Arc<dyn Fn(PowerState) + Send + Sync>;

/// Registry for switch observers.
///
/// Uses `parking_lot::RwLock` for interior mutability so callbacks can be
/// registered through a shared reference.
pub struct CallbackRegistry {
    next_id: AtomicU64,
    state_written_callbacks: RwLock<HashMap<SubscriptionId, StateWrittenCallback>>,
    power_callbacks: RwLock<HashMap<SubscriptionId, PowerCallback>>,
}

impl CallbackRegistry {
    /// Creates a new empty callback registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            state_written_callbacks: RwLock::new(HashMap::new()),
            power_callbacks: RwLock::new(HashMap::new()),
        }
    }

    fn next_id(&self) -> SubscriptionId {
        SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Registers a callback invoked on every state write, changed or not.
    pub fn on_state_written<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&SwitchState) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.state_written_callbacks
            .write()
            .insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback invoked when the reported power state flips.
    pub fn on_power_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(PowerState) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.power_callbacks.write().insert(id, Arc::new(callback));
        id
    }

    /// Unregisters a callback by its subscription ID.
    ///
    /// Returns `true` if a callback was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        if self.state_written_callbacks.write().remove(&id).is_some() {
            return true;
        }
        self.power_callbacks.write().remove(&id).is_some()
    }

    /// Clears all callbacks.
    pub fn clear(&self) {
        self.state_written_callbacks.write().clear();
        self.power_callbacks.write().clear();
    }

    /// Dispatches a state write.
    ///
    /// `previous` is the power state reported by the last write, `None` for
    /// the first write. Power callbacks only run when it differs.
    pub fn dispatch(&self, state: &SwitchState, previous: Option<PowerState>) {
        // Snapshot so a callback may subscribe or unsubscribe without deadlocking.
        let written: Vec<StateWrittenCallback> =
            self.state_written_callbacks.read().values().cloned().collect();
        for callback in written {
            callback(state);
        }

        let power = state.power_state();
        if previous != Some(power) {
            let callbacks: Vec<PowerCallback> =
                self.power_callbacks.read().values().cloned().collect();
            for callback in callbacks {
                callback(power);
            }
        }
    }

    /// Returns the total number of registered callbacks.
    #[must_use]
    pub fn callback_count(&self) -> usize {
        self.state_written_callbacks.read().len() + self.power_callbacks.read().len()
    }

    /// Returns `true` if there are no registered callbacks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callback_count() == 0
    }
}

impl Default for CallbackRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("callback_count", &self.callback_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;

    fn state(is_on: bool) -> SwitchState {
        SwitchState::new("entry_power_switch", "Eversolo Power Switch", "mdi:power", is_on)
    }

    #[test]
    fn subscription_id_display() {
        let id = SubscriptionId::new(42);
        assert_eq!(id.to_string(), "Sub(42)");
    }

    #[test]
    fn registry_new_is_empty() {
        let registry = CallbackRegistry::new();
        assert!(registry.is_empty());
    }

    #[test]
    fn state_written_runs_on_every_dispatch() {
        let registry = CallbackRegistry::new();
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        registry.on_state_written(move |_| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        registry.dispatch(&state(true), None);
        registry.dispatch(&state(true), Some(PowerState::On));
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn power_changed_runs_only_on_flip() {
        let registry = CallbackRegistry::new();
        let received = Arc::new(RwLock::new(Vec::new()));
        let received_clone = received.clone();

        registry.on_power_changed(move |power| received_clone.write().push(power));

        registry.dispatch(&state(false), None);
        registry.dispatch(&state(false), Some(PowerState::Off));
        registry.dispatch(&state(true), Some(PowerState::Off));

        assert_eq!(*received.read(), vec![PowerState::Off, PowerState::On]);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let registry = CallbackRegistry::new();
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let id = registry.on_state_written(move |_| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });
        assert!(registry.unsubscribe(id));
        assert!(!registry.unsubscribe(id));

        registry.dispatch(&state(true), None);
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn registry_unique_ids_and_clear() {
        let registry = CallbackRegistry::new();
        let id1 = registry.on_state_written(|_| {});
        let id2 = registry.on_power_changed(|_| {});
        assert_ne!(id1, id2);
        assert_eq!(registry.callback_count(), 2);

        registry.clear();
        assert!(registry.is_empty());
    }
}
