// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Eversolo Lib - power control for Eversolo network streamers.
//!
//! This library exposes an Eversolo device as a power switch that can be
//! driven from any async host:
//!
//! - **Power on** sends a Wake-on-LAN magic packet
//! - **Power off** sends the power-off key over the device's HTTP API
//! - **State** comes from a [`Coordinator`](coordinator::Coordinator) that
//!   polls the device; the switch reports the requested state right away
//!   and the next poll replaces it
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use eversolo_lib::config::EntryConfig;
//! use eversolo_lib::coordinator::Coordinator;
//! use eversolo_lib::notification::NotificationCenter;
//! use eversolo_lib::platform;
//! use eversolo_lib::subscription::Subscribable;
//!
//! #[tokio::main]
//! async fn main() -> eversolo_lib::Result<()> {
//!     let config = EntryConfig::from_json(r#"{
//!         "host": "192.168.1.60",
//!         "mac": "00:11:22:33:44:55",
//!         "able_remote_boot": true
//!     }"#)?;
//!
//!     let coordinator = Arc::new(Coordinator::from_config(&config)?);
//!     let mut events = coordinator.subscribe();
//!     let _poller = Arc::clone(&coordinator).spawn();
//!
//!     let notifications = Arc::new(NotificationCenter::new());
//!     let mut switches = platform::setup_entry(&config, coordinator, notifications);
//!
//!     if let Some(switch) = switches.first_mut() {
//!         switch.on_power_changed(|state| println!("power: {state}"));
//!
//!         switch.turn_on().await?;
//!         while switch.next_refresh(&mut events).await {
//!             if switch.is_on() {
//!                 break;
//!             }
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod coordinator;
pub mod error;
pub mod event;
pub mod notification;
pub mod platform;
pub mod protocol;
pub mod response;
pub mod state;
pub mod subscription;
pub mod switch;
pub mod types;

pub use config::{EntryConfig, EntryId};
pub use coordinator::Coordinator;
pub use error::{ConfigError, DeviceError, Error, ParseError, ProtocolError, Result, ValueError};
pub use notification::{Notification, NotificationCenter};
#[cfg(feature = "http")]
pub use protocol::{HttpClient, HttpConfig};
pub use protocol::{DeviceApi, MagicPacket, WakeOnLan};
pub use state::SwitchState;
pub use subscription::{CallbackRegistry, Subscribable, SubscriptionId};
pub use switch::{OptimisticToggle, PowerActions, PowerSwitch};
pub use types::{MacAddress, PowerState};
