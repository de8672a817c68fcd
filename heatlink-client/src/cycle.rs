//! Polling cycle
//!
//! One cycle is: open, handshake, visit every screen in
//! [`Screen::CYCLE_ORDER`], close. The transport is closed whatever the
//! outcome, and a failed cycle yields no results at all.

use crate::config::PollerConfig;
use heatlink_core::{ResultMap, SessionResult};
use heatlink_session::{HeatingSession, ReadinessStrategy, Screen};
use heatlink_transport::{TransportLayer, UdpSettings, UdpTransport};
use std::time::Instant;

/// Run one complete cycle over `transport`
///
/// # Errors
/// The first fatal error of the cycle. Values decoded before it are
/// discarded.
pub async fn run_cycle<T: TransportLayer>(transport: T, strategy: ReadinessStrategy) -> SessionResult<ResultMap> {
    let mut session = HeatingSession::new(transport, strategy);
    let outcome = drive(&mut session).await;

    if let Err(e) = session.close().await {
        log::warn!("Failed to close the controller session: {}", e);
    }
    outcome
}

async fn drive<T: TransportLayer>(session: &mut HeatingSession<T>) -> SessionResult<ResultMap> {
    let mut results = ResultMap::new();

    session.open().await?;
    session.connect(&mut results).await?;
    log::debug!("Handshake complete, {} fields from the main menu", results.len());

    for screen in Screen::CYCLE_ORDER {
        let report = session.visit(screen, &mut results).await?;
        if !report.settled {
            log::info!("Screen {} read best-effort", screen);
        }
    }
    Ok(results)
}

/// Polls one controller over UDP
#[derive(Debug, Clone)]
pub struct HeatingPoller {
    config: PollerConfig,
}

impl HeatingPoller {
    pub fn new(config: PollerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PollerConfig {
        &self.config
    }

    /// Run one cycle on a fresh socket
    pub async fn run_one_cycle(&self) -> SessionResult<ResultMap> {
        let settings = UdpSettings::with_timeout(self.config.address, self.config.receive_timeout);
        let started = Instant::now();

        log::debug!(
            "Polling {} ({})",
            self.config.address,
            self.config.readiness.as_str()
        );
        let results = run_cycle(UdpTransport::new(settings), self.config.readiness).await?;
        log::debug!(
            "Cycle finished in {:?} with {} fields",
            started.elapsed(),
            results.len()
        );
        Ok(results)
    }
}
