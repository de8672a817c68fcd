//! Poller configuration

use heatlink_session::ReadinessStrategy;
use std::net::SocketAddr;
use std::time::Duration;

/// Default bound on every blocking receive
pub const DEFAULT_RECEIVE_TIMEOUT: Duration = Duration::from_secs(5);

/// Everything one polling cycle needs to know
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollerConfig {
    /// Controller address
    pub address: SocketAddr,
    /// Silence beyond this is fatal for the cycle
    pub receive_timeout: Duration,
    /// How screens wait for the controller to settle
    pub readiness: ReadinessStrategy,
}

impl PollerConfig {
    /// Configuration with default timeout and readiness strategy
    pub fn new(address: SocketAddr) -> Self {
        Self {
            address,
            receive_timeout: DEFAULT_RECEIVE_TIMEOUT,
            readiness: ReadinessStrategy::default(),
        }
    }
}
