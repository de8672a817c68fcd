//! UDP transport implementation

use crate::datagram::TransportLayer;
use crate::token::{SessionToken, TokenState};
use async_trait::async_trait;
use bytes::Bytes;
use heatlink_core::{SessionError, SessionResult};
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::time::Instant;

/// Port the controller listens on unless configured otherwise
pub const DEFAULT_PORT: u16 = 3477;

/// Largest reply the controller sends
pub const MAX_DATAGRAM_SIZE: usize = 2048;

/// UDP transport layer settings
#[derive(Debug, Clone)]
pub struct UdpSettings {
    pub remote_address: SocketAddr,
    pub timeout: Duration,
}

impl UdpSettings {
    /// Create new UDP settings
    pub fn new(remote_address: SocketAddr) -> Self {
        Self {
            remote_address,
            timeout: Duration::from_secs(5),
        }
    }

    /// Create UDP settings with timeout
    pub fn with_timeout(remote_address: SocketAddr, timeout: Duration) -> Self {
        Self {
            remote_address,
            timeout,
        }
    }
}

/// UDP transport layer implementation
#[derive(Debug)]
pub struct UdpTransport {
    socket: Option<UdpSocket>,
    settings: UdpSettings,
    tokens: TokenState,
}

impl UdpTransport {
    /// Create a new UDP transport layer
    pub fn new(settings: UdpSettings) -> Self {
        Self {
            socket: None,
            settings,
            tokens: TokenState::new(),
        }
    }

    /// Create UDP transport from address string
    pub fn from_address(address: &str) -> SessionResult<Self> {
        let addr: SocketAddr = address.parse().map_err(|e| {
            SessionError::InvalidConfig(format!("Invalid UDP address: {}", e))
        })?;
        Ok(Self::new(UdpSettings::new(addr)))
    }

    pub fn settings(&self) -> &UdpSettings {
        &self.settings
    }

    fn socket(&self) -> SessionResult<&UdpSocket> {
        self.socket.as_ref().ok_or_else(|| {
            SessionError::Connection(std::io::Error::new(
                std::io::ErrorKind::NotConnected,
                "UDP socket not open",
            ))
        })
    }

    async fn read_next_datagram(&self) -> SessionResult<Vec<u8>> {
        let socket = self.socket()?;
        let mut buf = vec![0u8; MAX_DATAGRAM_SIZE];
        // Ignored datagrams count against the same deadline
        let deadline = Instant::now() + self.settings.timeout;

        loop {
            let (len, addr) = tokio::time::timeout_at(deadline, socket.recv_from(&mut buf))
                .await
                .map_err(|_| SessionError::Timeout)??;

            // Datagrams from anyone but the controller are dropped
            if addr == self.settings.remote_address {
                buf.truncate(len);
                return Ok(buf);
            }
            log::debug!("Ignoring {} byte datagram from {}", len, addr);
        }
    }
}

#[async_trait]
impl TransportLayer for UdpTransport {
    async fn open(&mut self) -> SessionResult<()> {
        if self.socket.is_some() {
            return Err(SessionError::Connection(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Connection has already been opened",
            )));
        }

        let bind_address: SocketAddr = if self.settings.remote_address.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };
        let socket = UdpSocket::bind(bind_address).await?;

        self.socket = Some(socket);
        self.tokens.reset();
        Ok(())
    }

    async fn send(&mut self, payload: &[u8]) -> SessionResult<()> {
        let datagram = self.tokens.frame(payload);
        let socket = self.socket()?;
        socket
            .send_to(&datagram, self.settings.remote_address)
            .await?;
        Ok(())
    }

    async fn receive(&mut self) -> SessionResult<Bytes> {
        let datagram = self.read_next_datagram().await?;
        self.tokens.observe(&datagram)?;
        Ok(Bytes::from(datagram))
    }

    fn token(&self) -> Option<&SessionToken> {
        self.tokens.current()
    }

    fn is_closed(&self) -> bool {
        self.socket.is_none()
    }

    async fn close(&mut self) -> SessionResult<()> {
        self.socket = None;
        self.tokens.reset();
        Ok(())
    }
}
