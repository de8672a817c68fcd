//! Poller builder
//!
//! # Usage Example
//!
//! ```rust,no_run
//! use heatlink_client::PollerBuilder;
//! use std::time::Duration;
//!
//! let poller = PollerBuilder::new()
//!     .udp("192.168.1.50:3477")
//!     .receive_timeout(Duration::from_secs(3))
//!     .intermediate_probe()
//!     .build()?;
//! # Ok::<(), heatlink_core::SessionError>(())
//! ```

use crate::config::{PollerConfig, DEFAULT_RECEIVE_TIMEOUT};
use crate::cycle::HeatingPoller;
use heatlink_core::{SessionError, SessionResult};
use heatlink_session::ReadinessStrategy;
use std::net::{SocketAddr, ToSocketAddrs};
use std::time::Duration;

/// Builder for [`HeatingPoller`]
///
/// # Default Settings
/// - Receive timeout: 5 seconds
/// - Readiness: intermediate probe
#[derive(Debug, Clone)]
pub struct PollerBuilder {
    address: Option<String>,
    receive_timeout: Duration,
    readiness: ReadinessStrategy,
}

impl PollerBuilder {
    pub fn new() -> Self {
        Self {
            address: None,
            receive_timeout: DEFAULT_RECEIVE_TIMEOUT,
            readiness: ReadinessStrategy::default(),
        }
    }

    /// Controller address in format "host:port" (e.g., "192.168.1.50:3477")
    pub fn udp(mut self, address: &str) -> Self {
        self.address = Some(address.to_string());
        self
    }

    /// Bound on every blocking receive
    pub fn receive_timeout(mut self, timeout: Duration) -> Self {
        self.receive_timeout = timeout;
        self
    }

    /// Probe each screen exactly once before selecting it
    pub fn intermediate_probe(mut self) -> Self {
        self.readiness = ReadinessStrategy::IntermediateProbe;
        self
    }

    /// Repeat each screen probe until the controller settles, at most
    /// `attempts` times
    pub fn bounded_polling(mut self, attempts: usize) -> Self {
        self.readiness = ReadinessStrategy::BoundedPoll { attempts };
        self
    }

    /// Resolve the address and build the poller
    ///
    /// # Errors
    /// Returns `SessionError::InvalidConfig` if:
    /// - No address is configured or it does not resolve
    /// - The receive timeout is zero
    /// - Bounded polling is configured with zero attempts
    pub fn build(self) -> SessionResult<HeatingPoller> {
        let address = self.address.as_deref().ok_or_else(|| {
            SessionError::InvalidConfig("Controller address must be configured".to_string())
        })?;
        let address = resolve(address)?;

        if self.receive_timeout.is_zero() {
            return Err(SessionError::InvalidConfig(
                "Receive timeout must be greater than zero".to_string(),
            ));
        }
        if self.readiness == (ReadinessStrategy::BoundedPoll { attempts: 0 }) {
            return Err(SessionError::InvalidConfig(
                "Bounded polling needs at least one attempt".to_string(),
            ));
        }

        Ok(HeatingPoller::new(PollerConfig {
            address,
            receive_timeout: self.receive_timeout,
            readiness: self.readiness,
        }))
    }
}

impl Default for PollerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve(address: &str) -> SessionResult<SocketAddr> {
    if let Ok(addr) = address.parse::<SocketAddr>() {
        return Ok(addr);
    }
    address
        .to_socket_addrs()
        .map_err(|e| SessionError::InvalidConfig(format!("Cannot resolve {}: {}", address, e)))?
        .next()
        .ok_or_else(|| SessionError::InvalidConfig(format!("No address found for {}", address)))
}
