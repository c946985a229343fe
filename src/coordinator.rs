// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polling coordinator for one Eversolo device.
//!
//! The coordinator is the switch's source of truth: it polls the device on
//! an interval, remembers whether the last poll succeeded and publishes a
//! [`RefreshEvent`] after every poll. It also owns the two device actions
//! the switch delegates: Wake-on-LAN and power-off.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use parking_lot::RwLock;
use tokio::sync::{Notify, broadcast};
use tokio::time::MissedTickBehavior;

use crate::error::{ConfigError, DeviceError, Result};
use crate::event::{EventBus, RefreshEvent};
use crate::protocol::{DeviceApi, WakeOnLan};
use crate::response::MusicControlState;
use crate::switch::PowerActions;

#[cfg(feature = "http")]
use crate::config::EntryConfig;
#[cfg(feature = "http")]
use crate::protocol::{HttpClient, HttpConfig};

/// Polls a device and tracks whether it is reachable.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
///
/// use eversolo_lib::config::EntryConfig;
/// use eversolo_lib::coordinator::Coordinator;
///
/// # async fn example() -> eversolo_lib::Result<()> {
/// let config = EntryConfig::new("192.168.1.60");
/// let coordinator = Arc::new(Coordinator::from_config(&config)?);
///
/// let mut events = coordinator.subscribe();
/// let _poller = Arc::clone(&coordinator).spawn();
///
/// while let Ok(event) = events.recv().await {
///     println!("reachable: {}", event.success());
/// }
/// # Ok(())
/// # }
/// ```
pub struct Coordinator<A: DeviceApi> {
    api: A,
    wake: Option<WakeOnLan>,
    scan_interval: Duration,
    last_update_success: AtomicBool,
    data: RwLock<Option<MusicControlState>>,
    refresh_requested: Notify,
    events: EventBus,
}

impl<A: DeviceApi> Coordinator<A> {
    /// Creates a coordinator polling `api` every `scan_interval`.
    ///
    /// No poll has happened yet, so the device counts as unreachable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ZeroDuration` if `scan_interval` is zero.
    pub fn new(api: A, scan_interval: Duration) -> Result<Self> {
        if scan_interval.is_zero() {
            return Err(ConfigError::ZeroDuration("scan_interval").into());
        }

        Ok(Self {
            api,
            wake: None,
            scan_interval,
            last_update_success: AtomicBool::new(false),
            data: RwLock::new(None),
            refresh_requested: Notify::new(),
            events: EventBus::new(),
        })
    }

    /// Enables Wake-on-LAN with the given sender.
    #[must_use]
    pub fn with_wake_on_lan(mut self, wake: WakeOnLan) -> Self {
        self.wake = Some(wake);
        self
    }

    /// Returns the device client.
    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Returns the poll interval.
    #[must_use]
    pub fn scan_interval(&self) -> Duration {
        self.scan_interval
    }

    /// Returns whether the last poll reached the device.
    #[must_use]
    pub fn last_update_success(&self) -> bool {
        self.last_update_success.load(Ordering::Acquire)
    }

    /// Returns the state fetched by the last successful poll.
    #[must_use]
    pub fn data(&self) -> Option<MusicControlState> {
        self.data.read().clone()
    }

    /// Subscribes to refresh events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<RefreshEvent> {
        self.events.subscribe()
    }

    /// Polls the device once and publishes the outcome.
    ///
    /// Returns whether the poll succeeded.
    pub async fn refresh(&self) -> bool {
        let event = match self.api.music_control_state().await {
            Ok(state) => {
                *self.data.write() = Some(state);
                if !self.last_update_success.swap(true, Ordering::AcqRel) {
                    tracing::info!("Device is reachable");
                }
                RefreshEvent::succeeded()
            }
            Err(e) => {
                if self.last_update_success.swap(false, Ordering::AcqRel) {
                    tracing::info!(error = %e, "Device became unreachable");
                } else {
                    tracing::debug!(error = %e, "Poll failed");
                }
                RefreshEvent::failed(e.to_string())
            }
        };

        let success = event.success();
        self.events.publish(event);
        success
    }

    /// Asks the poll loop to refresh soon.
    ///
    /// A request made while a poll is running triggers one more poll after
    /// it. Requests made before the loop starts are kept until it does.
    pub fn schedule_refresh(&self) {
        self.refresh_requested.notify_one();
    }

    /// Runs the poll loop forever.
    ///
    /// Polls immediately, then on every interval tick and every
    /// [`schedule_refresh`](Self::schedule_refresh) call. An explicit request
    /// restarts the interval.
    pub async fn run(&self) {
        let mut ticker = tokio::time::interval(self.scan_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                () = self.refresh_requested.notified() => {
                    ticker.reset();
                }
            }
            self.refresh().await;
        }
    }

    /// Sends a Wake-on-LAN packet to the device.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::WakeUnsupported` when no MAC address is
    /// configured, or the socket error if sending fails.
    pub async fn send_wol(&self) -> Result<()> {
        let wake = self.wake.as_ref().ok_or(DeviceError::WakeUnsupported)?;
        wake.send().await?;
        tracing::info!(mac = %wake.mac(), "Wake-on-LAN sent");
        Ok(())
    }
}

#[cfg(feature = "http")]
impl Coordinator<HttpClient> {
    /// Builds an HTTP coordinator from a configuration entry.
    ///
    /// Wake-on-LAN is enabled when the entry has a MAC address.
    ///
    /// # Errors
    ///
    /// Returns error if the entry is invalid or the HTTP client cannot be
    /// created.
    pub fn from_config(config: &EntryConfig) -> Result<Self> {
        config.validate()?;

        let client = HttpConfig::new(&config.host)
            .with_port(config.port)
            .with_timeout(config.timeout)
            .into_client()?;

        let mut coordinator = Self::new(client, config.scan_interval)?;
        if let Some(mac) = config.mac {
            coordinator = coordinator
                .with_wake_on_lan(WakeOnLan::new(mac).with_target(config.broadcast_address));
        }
        Ok(coordinator)
    }

    /// Spawns the poll loop on the tokio runtime.
    ///
    /// Only the HTTP coordinator can be spawned: [`DeviceApi`] futures are
    /// not required to be `Send`, while `HttpClient`'s are. Other clients
    /// drive [`run`](Coordinator::run) on their own executor.
    pub fn spawn(self: std::sync::Arc<Self>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move { self.run().await })
    }
}

impl<A: DeviceApi> PowerActions for Coordinator<A> {
    async fn send_wake_signal(&self) -> Result<()> {
        self.send_wol().await
    }

    async fn send_power_off(&self) -> Result<()> {
        self.api.power_off().await
    }

    async fn request_refresh(&self) {
        self.schedule_refresh();
    }

    fn last_update_success(&self) -> bool {
        Coordinator::last_update_success(self)
    }
}

impl<A: DeviceApi + std::fmt::Debug> std::fmt::Debug for Coordinator<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coordinator")
            .field("api", &self.api)
            .field("wake", &self.wake)
            .field("scan_interval", &self.scan_interval)
            .field("last_update_success", &self.last_update_success())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::AtomicU32;

    use crate::error::{Error, ProtocolError};
    use crate::types::MacAddress;

    #[derive(Debug, Default)]
    struct FakeApi {
        reachable: AtomicBool,
        polls: AtomicU32,
        power_offs: AtomicU32,
    }

    impl DeviceApi for FakeApi {
        async fn music_control_state(&self) -> Result<MusicControlState> {
            self.polls.fetch_add(1, Ordering::SeqCst);
            if self.reachable.load(Ordering::SeqCst) {
                Ok(serde_json::from_str(r#"{"state": 3}"#).unwrap())
            } else {
                Err(Error::Protocol(ProtocolError::ConnectionFailed(
                    "refused".to_string(),
                )))
            }
        }

        async fn power_off(&self) -> Result<()> {
            self.power_offs.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn coordinator() -> Coordinator<FakeApi> {
        Coordinator::new(FakeApi::default(), Duration::from_secs(3600)).unwrap()
    }

    #[test]
    fn new_rejects_zero_scan_interval() {
        let err = Coordinator::new(FakeApi::default(), Duration::ZERO).unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::ZeroDuration("scan_interval"))
        ));
    }

    #[test]
    fn starts_unreachable() {
        let coordinator = coordinator();
        assert!(!coordinator.last_update_success());
        assert!(coordinator.data().is_none());
    }

    #[tokio::test]
    async fn refresh_tracks_reachability() {
        let coordinator = coordinator();
        let mut events = coordinator.subscribe();

        assert!(!coordinator.refresh().await);
        assert!(!coordinator.last_update_success());
        let event = events.recv().await.unwrap();
        assert_eq!(
            event.error(),
            Some("protocol error: connection failed: refused")
        );

        coordinator.api().reachable.store(true, Ordering::SeqCst);
        assert!(coordinator.refresh().await);
        assert!(coordinator.last_update_success());
        assert_eq!(coordinator.data().unwrap().state, Some(3));
        assert!(events.recv().await.unwrap().success());
    }

    #[tokio::test]
    async fn failed_poll_keeps_last_data() {
        let coordinator = coordinator();
        coordinator.api().reachable.store(true, Ordering::SeqCst);
        coordinator.refresh().await;

        coordinator.api().reachable.store(false, Ordering::SeqCst);
        coordinator.refresh().await;

        assert!(!coordinator.last_update_success());
        assert!(coordinator.data().is_some());
    }

    #[tokio::test]
    async fn wake_without_mac_is_unsupported() {
        let coordinator = coordinator();
        let err = coordinator.send_wake_signal().await.unwrap_err();
        assert!(matches!(err, Error::Device(DeviceError::WakeUnsupported)));
    }

    #[tokio::test]
    async fn wake_sends_to_configured_target() {
        let receiver = tokio::net::UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let mac = MacAddress::new([1, 2, 3, 4, 5, 6]);
        let coordinator = coordinator().with_wake_on_lan(
            WakeOnLan::new(mac).with_target(receiver.local_addr().unwrap()),
        );

        coordinator.send_wake_signal().await.unwrap();

        let mut buf = [0u8; 128];
        let (len, _) = receiver.recv_from(&mut buf).await.unwrap();
        assert_eq!(len, 102);
    }

    #[tokio::test]
    async fn power_off_delegates_to_api() {
        let coordinator = coordinator();
        coordinator.send_power_off().await.unwrap();
        assert_eq!(coordinator.api().power_offs.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn run_polls_on_start_and_on_request() {
        let coordinator = Arc::new(coordinator());
        let mut events = coordinator.subscribe();

        let runner = Arc::clone(&coordinator);
        let handle = tokio::spawn(async move { runner.run().await });

        // First tick fires immediately.
        events.recv().await.unwrap();
        assert_eq!(coordinator.api().polls.load(Ordering::SeqCst), 1);

        coordinator.api().reachable.store(true, Ordering::SeqCst);
        coordinator.request_refresh().await;
        assert!(events.recv().await.unwrap().success());
        assert_eq!(coordinator.api().polls.load(Ordering::SeqCst), 2);
        assert!(coordinator.last_update_success());

        handle.abort();
    }
}
