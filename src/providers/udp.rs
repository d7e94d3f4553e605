//! UDP socket provider

use std::net::SocketAddr;
use tokio::net::UdpSocket;
use tracing::{info, trace};

use crate::config::ReceiverConfig;
use crate::provider::Provider;
use crate::{Result, TelemetryError};

/// Provider that receives datagrams from a bound UDP socket
pub struct UdpProvider {
    socket: UdpSocket,

    /// Receive buffer, sized to the largest datagram accepted
    buf: Vec<u8>,

    /// Nominal game send rate
    source_hz: f64,

    local_addr: SocketAddr,
}

impl UdpProvider {
    /// Bind a socket per `config`.
    pub async fn bind(config: &ReceiverConfig) -> Result<Self> {
        config.validate()?;
        let addr = config.socket_addr();
        let socket = UdpSocket::bind(addr)
            .await
            .map_err(|e| TelemetryError::io_error(format!("bind UDP socket on {}", addr), e))?;
        Self::from_socket(socket, config)
    }

    /// Wrap an already bound socket.
    pub fn from_socket(socket: UdpSocket, config: &ReceiverConfig) -> Result<Self> {
        let local_addr = socket
            .local_addr()
            .map_err(|e| TelemetryError::io_error("read local socket address", e))?;
        info!(%local_addr, "Listening for telemetry datagrams");
        Ok(Self {
            socket,
            buf: vec![0u8; config.max_datagram_size],
            source_hz: config.source_hz,
            local_addr,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }
}

#[async_trait::async_trait]
impl Provider for UdpProvider {
    async fn next_datagram(&mut self) -> Result<Option<Vec<u8>>> {
        let (len, peer) = self
            .socket
            .recv_from(&mut self.buf)
            .await
            .map_err(|e| TelemetryError::io_error("receive datagram", e))?;
        trace!(len, %peer, "Datagram received");
        Ok(Some(self.buf[..len].to_vec()))
    }

    fn source_hz(&self) -> f64 {
        self.source_hz
    }
}
