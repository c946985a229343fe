// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wake-on-LAN magic packet sender.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

use tokio::net::UdpSocket;

use crate::error::ProtocolError;
use crate::types::MacAddress;

const PACKET_LEN: usize = 6 + 16 * 6;

/// A Wake-on-LAN magic packet.
///
/// Six `0xFF` bytes followed by the target MAC address repeated 16 times.
///
/// # Examples
///
/// ```
/// use eversolo_lib::protocol::MagicPacket;
/// use eversolo_lib::types::MacAddress;
///
/// let packet = MagicPacket::new(MacAddress::new([1, 2, 3, 4, 5, 6]));
/// let bytes = packet.as_bytes();
/// assert_eq!(bytes.len(), 102);
/// assert_eq!(&bytes[..6], &[0xFF; 6]);
/// assert_eq!(&bytes[6..12], &[1, 2, 3, 4, 5, 6]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MagicPacket([u8; PACKET_LEN]);

impl MagicPacket {
    /// Length of a magic packet in bytes.
    pub const LEN: usize = PACKET_LEN;

    /// Builds the packet for the given target.
    #[must_use]
    pub fn new(mac: MacAddress) -> Self {
        let mut bytes = [0xFF; Self::LEN];
        let octets = mac.octets();
        for chunk in bytes[6..].chunks_exact_mut(6) {
            chunk.copy_from_slice(&octets);
        }
        Self(bytes)
    }

    /// Returns the raw packet bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Sends Wake-on-LAN packets to one device.
///
/// # Examples
///
/// ```no_run
/// use eversolo_lib::protocol::WakeOnLan;
///
/// # async fn example() -> eversolo_lib::Result<()> {
/// let wol = WakeOnLan::new("00:11:22:33:44:55".parse()?);
/// wol.send().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct WakeOnLan {
    mac: MacAddress,
    target: SocketAddr,
}

impl WakeOnLan {
    /// Limited broadcast on the discard port.
    pub const DEFAULT_TARGET: SocketAddr =
        SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::BROADCAST, 9));

    /// Creates a sender for the given MAC using the default broadcast target.
    #[must_use]
    pub fn new(mac: MacAddress) -> Self {
        Self {
            mac,
            target: Self::DEFAULT_TARGET,
        }
    }

    /// Sets the address the packet is sent to.
    #[must_use]
    pub fn with_target(mut self, target: SocketAddr) -> Self {
        self.target = target;
        self
    }

    /// Returns the target MAC address.
    #[must_use]
    pub fn mac(&self) -> MacAddress {
        self.mac
    }

    /// Returns the address the packet is sent to.
    #[must_use]
    pub fn target(&self) -> SocketAddr {
        self.target
    }

    /// Broadcasts one magic packet.
    ///
    /// # Errors
    ///
    /// Returns error if the socket cannot be opened or the datagram is not
    /// fully sent.
    pub async fn send(&self) -> Result<(), ProtocolError> {
        let bind: SocketAddr = if self.target.is_ipv4() {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((std::net::Ipv6Addr::UNSPECIFIED, 0))
        };

        let socket = UdpSocket::bind(bind).await?;
        socket.set_broadcast(true)?;

        let packet = MagicPacket::new(self.mac);
        let sent = socket.send_to(packet.as_bytes(), self.target).await?;
        if sent != MagicPacket::LEN {
            return Err(ProtocolError::ShortWrite {
                sent,
                expected: MagicPacket::LEN,
            });
        }

        tracing::debug!(mac = %self.mac, target = %self.target, "Wake-on-LAN packet sent");
        Ok(())
    }
}
