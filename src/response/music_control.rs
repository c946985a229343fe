// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Music control state response parsing.

use serde::Deserialize;

/// Response from the `ZidooMusicControl/v2/getState` endpoint.
///
/// Only the playback state code is modelled; everything else in the payload
/// is ignored. A successful parse is what marks the device as reachable.
///
/// # Examples
///
/// ```
/// use eversolo_lib::response::MusicControlState;
///
/// let json = r#"{"state": 3, "volumeData": {"currenttVolume": 20}}"#;
/// let state: MusicControlState = serde_json::from_str(json).unwrap();
/// assert_eq!(state.state, Some(3));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MusicControlState {
    /// Raw playback state code reported by the player.
    #[serde(default)]
    pub state: Option<i64>,
}
