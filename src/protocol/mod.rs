// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Protocol implementations for communicating with Eversolo devices.
//!
//! # Protocols
//!
//! - [`HttpClient`]: the device's REST API, used for polling and power-off
//! - [`WakeOnLan`]: UDP magic packet broadcast, used for power-on
//!
//! The coordinator talks to the device through the [`DeviceApi`] trait, so a
//! different transport (or a test double) can stand in for [`HttpClient`].

#[cfg(feature = "http")]
mod http;
mod wol;

#[cfg(feature = "http")]
pub use http::{HttpClient, HttpConfig};
pub use wol::{MagicPacket, WakeOnLan};

use crate::response::MusicControlState;

/// Trait for clients that can query and command an Eversolo device.
#[allow(async_fn_in_trait)]
pub trait DeviceApi {
    /// Fetches the current music control state.
    ///
    /// A successful call is what marks the device as reachable.
    ///
    /// # Errors
    ///
    /// Returns error if the device cannot be reached or the payload is invalid.
    async fn music_control_state(&self) -> crate::Result<MusicControlState>;

    /// Asks the device to power itself off.
    ///
    /// # Errors
    ///
    /// Returns error if the command cannot be delivered.
    async fn power_off(&self) -> crate::Result<()>;
}
