// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event system for coordinator refreshes.
//!
//! The coordinator publishes one [`RefreshEvent`] per poll on an
//! [`EventBus`]. Hosts subscribe and forward each event to the switches that
//! depend on the coordinator.
//!
//! # Examples
//!
//! ```
//! use eversolo_lib::event::{EventBus, RefreshEvent};
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! bus.publish(RefreshEvent::succeeded());
//! assert!(rx.try_recv().unwrap().success());
//! ```

mod event_bus;
mod refresh_event;

pub use event_bus::EventBus;
pub use refresh_event::RefreshEvent;
