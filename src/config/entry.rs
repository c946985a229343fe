// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Configuration entry for one Eversolo device.

use std::net::SocketAddr;
use std::time::Duration;

use serde::Deserialize;

use super::EntryId;
use crate::error::ConfigError;
use crate::protocol::WakeOnLan;
use crate::types::MacAddress;

/// Default port of the Eversolo control API.
pub const DEFAULT_PORT: u16 = 9529;

/// Default poll interval.
pub const DEFAULT_SCAN_INTERVAL: Duration = Duration::from_secs(10);

/// Default HTTP request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for one Eversolo device.
///
/// # Examples
///
/// ```
/// use eversolo_lib::config::EntryConfig;
///
/// let config = EntryConfig::from_json(r#"{
///     "host": "192.168.1.60",
///     "mac": "00:11:22:33:44:55",
///     "able_remote_boot": true
/// }"#).unwrap();
///
/// assert_eq!(config.port, 9529);
/// assert!(config.able_remote_boot);
///
/// let manual = EntryConfig::new("192.168.1.60")
///     .with_mac("00:11:22:33:44:55".parse().unwrap())
///     .with_remote_boot(true);
/// assert_eq!(manual.mac, config.mac);
/// ```
#[derive(Debug, Clone)]
pub struct EntryConfig {
    /// Identifier of this entry.
    pub entry_id: EntryId,
    /// Hostname or IP address of the device.
    pub host: String,
    /// Port of the control API.
    pub port: u16,
    /// MAC address used for Wake-on-LAN.
    pub mac: Option<MacAddress>,
    /// Whether the device can be booted remotely. Gates the power switch.
    pub able_remote_boot: bool,
    /// Poll interval.
    pub scan_interval: Duration,
    /// HTTP request timeout.
    pub timeout: Duration,
    /// Where Wake-on-LAN packets are sent.
    pub broadcast_address: SocketAddr,
}

impl EntryConfig {
    /// Creates a configuration with defaults for the given host.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            entry_id: EntryId::new(),
            host: host.into(),
            port: DEFAULT_PORT,
            mac: None,
            able_remote_boot: false,
            scan_interval: DEFAULT_SCAN_INTERVAL,
            timeout: DEFAULT_TIMEOUT,
            broadcast_address: WakeOnLan::DEFAULT_TARGET,
        }
    }

    /// Parses an entry from JSON.
    ///
    /// Durations are given in seconds. Missing optional fields take their
    /// defaults and a missing `entry_id` is generated.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` for malformed JSON, or any error of
    /// [`validate`](Self::validate).
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: RawEntry = serde_json::from_str(json)?;
        let config = Self::from(raw);
        config.validate()?;
        Ok(config)
    }

    /// Checks the entry for values that cannot work.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingHost` when the host is empty and
    /// `ConfigError::ZeroDuration` when the poll interval or the request
    /// timeout is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::MissingHost);
        }
        if self.scan_interval.is_zero() {
            return Err(ConfigError::ZeroDuration("scan_interval"));
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::ZeroDuration("timeout"));
        }
        if self.able_remote_boot && self.mac.is_none() {
            tracing::warn!(entry_id = %self.entry_id, "Remote boot enabled without a MAC address");
        }
        Ok(())
    }

    /// Sets the entry identifier.
    #[must_use]
    pub fn with_entry_id(mut self, entry_id: EntryId) -> Self {
        self.entry_id = entry_id;
        self
    }

    /// Sets the control API port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the Wake-on-LAN MAC address.
    #[must_use]
    pub fn with_mac(mut self, mac: MacAddress) -> Self {
        self.mac = Some(mac);
        self
    }

    /// Sets the remote boot capability flag.
    #[must_use]
    pub fn with_remote_boot(mut self, able: bool) -> Self {
        self.able_remote_boot = able;
        self
    }

    /// Sets the poll interval.
    #[must_use]
    pub fn with_scan_interval(mut self, interval: Duration) -> Self {
        self.scan_interval = interval;
        self
    }

    /// Sets the HTTP request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets where Wake-on-LAN packets are sent.
    #[must_use]
    pub fn with_broadcast_address(mut self, address: SocketAddr) -> Self {
        self.broadcast_address = address;
        self
    }
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(default)]
    entry_id: Option<EntryId>,
    host: String,
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default)]
    mac: Option<MacAddress>,
    #[serde(default)]
    able_remote_boot: bool,
    #[serde(default)]
    scan_interval: Option<u64>,
    #[serde(default)]
    timeout: Option<u64>,
    #[serde(default)]
    broadcast_address: Option<SocketAddr>,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl From<RawEntry> for EntryConfig {
    fn from(raw: RawEntry) -> Self {
        Self {
            entry_id: raw.entry_id.unwrap_or_default(),
            host: raw.host,
            port: raw.port,
            mac: raw.mac,
            able_remote_boot: raw.able_remote_boot,
            scan_interval: raw
                .scan_interval
                .map_or(DEFAULT_SCAN_INTERVAL, Duration::from_secs),
            timeout: raw.timeout.map_or(DEFAULT_TIMEOUT, Duration::from_secs),
            broadcast_address: raw
                .broadcast_address
                .unwrap_or(WakeOnLan::DEFAULT_TARGET),
        }
    }
}
