// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Snapshot of a switch as pushed to observers.

use serde::Serialize;

use crate::types::PowerState;

/// Device class reported for the switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SwitchDeviceClass {
    /// A generic switch.
    #[default]
    Switch,
}

/// State written by a switch on every action and refresh.
///
/// # Examples
///
/// ```
/// use eversolo_lib::state::SwitchState;
/// use eversolo_lib::types::PowerState;
///
/// let state = SwitchState::new("abc_power_switch", "Eversolo Power Switch", "mdi:power", true);
/// assert_eq!(state.power_state(), PowerState::On);
/// assert!(state.available);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwitchState {
    /// Stable identifier of the entity.
    pub unique_id: String,
    /// Display name.
    pub name: String,
    /// Icon identifier.
    pub icon: String,
    /// Device class.
    pub device_class: SwitchDeviceClass,
    /// Whether the switch reports on.
    pub is_on: bool,
    /// Whether the switch accepts commands.
    pub available: bool,
}

impl SwitchState {
    /// Creates an available snapshot with the default device class.
    #[must_use]
    pub fn new(
        unique_id: impl Into<String>,
        name: impl Into<String>,
        icon: impl Into<String>,
        is_on: bool,
    ) -> Self {
        Self {
            unique_id: unique_id.into(),
            name: name.into(),
            icon: icon.into(),
            device_class: SwitchDeviceClass::default(),
            is_on,
            available: true,
        }
    }

    /// Returns `is_on` as a [`PowerState`].
    #[must_use]
    pub fn power_state(&self) -> PowerState {
        PowerState::from(self.is_on)
    }
}
