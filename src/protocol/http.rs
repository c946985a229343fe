// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP protocol implementation for Eversolo devices.

use std::time::Duration;

use reqwest::Client;

use crate::error::{ParseError, ProtocolError};
use crate::protocol::DeviceApi;
use crate::response::MusicControlState;

/// Path of the playback state endpoint.
const STATE_PATH: &str = "/ZidooMusicControl/v2/getState";

/// Path of the remote control key endpoint.
const SEND_KEY_PATH: &str = "/ZidooControlCenter/RemoteControl/sendkey";

/// Remote key that powers the device off.
const POWER_OFF_KEY: &str = "Key.PowerOn.Poweroff";

// ============================================================================
// HttpConfig
// ============================================================================

/// Configuration for the HTTP connection to an Eversolo device.
///
/// # Examples
///
/// ```
/// use eversolo_lib::protocol::HttpConfig;
/// use std::time::Duration;
///
/// let config = HttpConfig::new("192.168.1.60")
///     .with_port(9529)
///     .with_timeout(Duration::from_secs(5));
///
/// assert_eq!(config.base_url(), "http://192.168.1.60:9529");
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    host: String,
    port: u16,
    timeout: Duration,
}

impl HttpConfig {
    /// Port the Eversolo control API listens on.
    pub const DEFAULT_PORT: u16 = 9529;
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a new HTTP configuration for the specified host.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: Self::DEFAULT_PORT,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the base URL from this configuration.
    ///
    /// A host that already carries a scheme is used as-is, without the port.
    #[must_use]
    pub fn base_url(&self) -> String {
        if self.host.starts_with("http://") || self.host.starts_with("https://") {
            self.host.trim_end_matches('/').to_string()
        } else {
            format!("http://{}:{}", self.host, self.port)
        }
    }

    /// Creates an `HttpClient` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the host is empty or the HTTP client cannot be created.
    pub fn into_client(self) -> Result<HttpClient, ProtocolError> {
        if self.host.trim().is_empty() {
            return Err(ProtocolError::InvalidAddress("host is required".to_string()));
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(HttpClient {
            base_url: self.base_url(),
            client,
            timeout: self.timeout,
        })
    }
}

// ============================================================================
// HttpClient
// ============================================================================

/// HTTP client for the Eversolo control API.
///
/// # Examples
///
/// ```no_run
/// use eversolo_lib::protocol::{DeviceApi, HttpConfig};
///
/// # async fn example() -> eversolo_lib::Result<()> {
/// let client = HttpConfig::new("192.168.1.60").into_client()?;
/// let state = client.music_control_state().await?;
/// println!("{state:?}");
/// client.power_off().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    /// Returns the base URL of the device.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn power_off_url(&self) -> String {
        format!(
            "{}{SEND_KEY_PATH}?key={}",
            self.base_url,
            urlencoding::encode(POWER_OFF_KEY)
        )
    }

    /// Sends a GET request and returns the response body.
    async fn get(&self, url: &str) -> Result<String, ProtocolError> {
        tracing::debug!(url = %url, "Sending HTTP request");

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                ProtocolError::Timeout(u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX))
            } else {
                ProtocolError::Http(e)
            }
        })?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ProtocolError::AuthenticationFailed);
        }

        if !response.status().is_success() {
            return Err(ProtocolError::ConnectionFailed(format!(
                "HTTP {} - {}",
                response.status().as_u16(),
                response.status().canonical_reason().unwrap_or("Unknown")
            )));
        }

        let body = response.text().await.map_err(ProtocolError::Http)?;

        tracing::debug!(body = %body, "Received HTTP response");

        Ok(body)
    }
}

impl DeviceApi for HttpClient {
    async fn music_control_state(&self) -> crate::Result<MusicControlState> {
        let url = format!("{}{STATE_PATH}", self.base_url);
        let body = self.get(&url).await?;
        let state = serde_json::from_str(&body).map_err(ParseError::Json)?;
        Ok(state)
    }

    async fn power_off(&self) -> crate::Result<()> {
        self.get(&self.power_off_url()).await?;
        tracing::info!(base_url = %self.base_url, "Power-off key sent");
        Ok(())
    }
}
