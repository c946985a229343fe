// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the Eversolo library.
//!
//! This module provides the error hierarchy used across the crate: value
//! validation, protocol communication (HTTP and Wake-on-LAN), JSON parsing,
//! device operations and configuration loading.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred during protocol communication.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a response.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Error occurred during device operations.
    #[error("device error: {0}")]
    Device(#[from] DeviceError),

    /// The configuration entry is invalid.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A MAC address string could not be parsed.
    #[error("invalid MAC address: {0}")]
    InvalidMacAddress(String),
}

/// Errors related to protocol communication (HTTP, Wake-on-LAN).
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Socket I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Connection to the device failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Fewer bytes than expected were written to the socket.
    #[error("short write: sent {sent} of {expected} bytes")]
    ShortWrite {
        /// Bytes actually sent.
        sent: usize,
        /// Bytes that should have been sent.
        expected: usize,
    },
}

/// Errors related to parsing device responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors related to device operations.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// No MAC address is configured, so no wake signal can be sent.
    #[error("wake-on-LAN is not configured for this device")]
    WakeUnsupported,

    /// Command was rejected by the device.
    #[error("command rejected: {0}")]
    CommandRejected(String),
}

/// Errors related to loading a configuration entry.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The entry has no host.
    #[error("missing host")]
    MissingHost,

    /// A duration that drives a timer is zero.
    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),

    /// The entry could not be deserialized.
    #[error("invalid entry: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
