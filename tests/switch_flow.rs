// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end tests of the power switch against a mocked device.

use std::sync::Arc;
use std::time::Duration;

use eversolo_lib::notification::NOTIFICATION_ID_WOL;
use eversolo_lib::protocol::HttpClient;
use eversolo_lib::subscription::Subscribable;
use eversolo_lib::{Coordinator, EntryConfig, NotificationCenter, PowerState, PowerSwitch, platform};
use parking_lot::Mutex;
use tokio::net::UdpSocket;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Harness {
    server: MockServer,
    wol_receiver: UdpSocket,
    coordinator: Arc<Coordinator<HttpClient>>,
    notifications: Arc<NotificationCenter>,
    config: EntryConfig,
}

impl Harness {
    async fn start(able_remote_boot: bool) -> Self {
        let server = MockServer::start().await;
        let wol_receiver = UdpSocket::bind("127.0.0.1:0").await.unwrap();

        let config = EntryConfig::new(server.uri())
            .with_mac("00:11:22:33:44:55".parse().unwrap())
            .with_remote_boot(able_remote_boot)
            .with_timeout(Duration::from_secs(2))
            .with_broadcast_address(wol_receiver.local_addr().unwrap());

        let coordinator = Arc::new(Coordinator::from_config(&config).unwrap());

        Self {
            server,
            wol_receiver,
            coordinator,
            notifications: Arc::new(NotificationCenter::new()),
            config,
        }
    }

    fn switches(&self) -> Vec<PowerSwitch<Coordinator<HttpClient>>> {
        platform::setup_entry(
            &self.config,
            Arc::clone(&self.coordinator),
            Arc::clone(&self.notifications),
        )
    }

    async fn device_online(&self) {
        self.server.reset().await;
        Mock::given(method("GET"))
            .and(path("/ZidooMusicControl/v2/getState"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "state": 0
            })))
            .mount(&self.server)
            .await;
        Mock::given(method("GET"))
            .and(path("/ZidooControlCenter/RemoteControl/sendkey"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&self.server)
            .await;
    }

    async fn device_shutting_down(&self) {
        self.server.reset().await;
        Mock::given(method("GET"))
            .and(path("/ZidooControlCenter/RemoteControl/sendkey"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&self.server)
            .await;
        Mock::given(method("GET"))
            .and(path("/ZidooMusicControl/v2/getState"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&self.server)
            .await;
    }

    async fn device_offline(&self) {
        self.server.reset().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&self.server)
            .await;
    }
}

#[tokio::test]
async fn no_switch_without_remote_boot() {
    let harness = Harness::start(false).await;
    assert!(harness.switches().is_empty());
}

#[tokio::test]
async fn wake_then_poll_until_online() {
    let harness = Harness::start(true).await;
    harness.device_offline().await;
    harness.coordinator.refresh().await;

    let mut switch = harness.switches().pop().unwrap();
    assert!(!switch.is_on());
    assert!(switch.available());

    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = Arc::clone(&seen);
    switch.on_power_changed(move |power| seen_clone.lock().push(power));

    switch.turn_on().await.unwrap();
    assert!(switch.is_on());

    let mut buf = [0u8; 128];
    let (len, _) = harness.wol_receiver.recv_from(&mut buf).await.unwrap();
    assert_eq!(len, 102);
    assert!(harness.notifications.get(NOTIFICATION_ID_WOL).is_some());

    // Still booting: the poll wins over the optimistic state.
    harness.coordinator.refresh().await;
    switch.handle_refresh();
    assert!(!switch.is_on());

    harness.device_online().await;
    harness.coordinator.refresh().await;
    switch.handle_refresh();
    assert!(switch.is_on());

    assert_eq!(
        *seen.lock(),
        vec![PowerState::On, PowerState::Off, PowerState::On]
    );
}

#[tokio::test]
async fn turn_off_triggers_refresh_via_poll_loop() {
    let harness = Harness::start(true).await;
    harness.device_online().await;

    let mut events = harness.coordinator.subscribe();
    let poller = Arc::clone(&harness.coordinator).spawn();

    let mut switch = harness.switches().pop().unwrap();
    // Initial poll of the loop.
    assert!(switch.next_refresh(&mut events).await);
    assert!(switch.is_on());

    harness.device_shutting_down().await;
    switch.turn_off().await.unwrap();
    assert!(!switch.is_on());

    // The requested refresh confirms the device went away.
    assert!(switch.next_refresh(&mut events).await);
    assert!(!harness.coordinator.last_update_success());
    assert!(!switch.is_on());

    poller.abort();
}
