//! One protocol conversation with one controller

use crate::handshake::Handshake;
use crate::navigator::{ScreenNavigator, VisitReport};
use crate::screen::{ReadinessStrategy, Screen};
use crate::state::SessionState;
use heatlink_core::{ResultMap, SessionError, SessionResult};
use heatlink_transport::TransportLayer;

/// Session owning a transport for the duration of one polling cycle
///
/// # State Transitions
/// - `Closed` -> `Open` (`open()`)
/// - `Open` -> `Connected` (`connect()`)
/// - Any state -> `Closed` (`close()`)
///
/// A failed handshake leaves the session `Open`; it can only be closed.
pub struct HeatingSession<T: TransportLayer> {
    transport: T,
    state: SessionState,
    strategy: ReadinessStrategy,
}

impl<T: TransportLayer> HeatingSession<T> {
    pub fn new(transport: T, strategy: ReadinessStrategy) -> Self {
        Self {
            transport,
            state: SessionState::Closed,
            strategy,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn strategy(&self) -> ReadinessStrategy {
        self.strategy
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Give back the transport, e.g. to inspect it after a cycle
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Open the transport
    pub async fn open(&mut self) -> SessionResult<()> {
        if self.state != SessionState::Closed {
            return Err(SessionError::violation("open", "session already open"));
        }
        self.transport.open().await?;
        self.state = SessionState::Open;
        Ok(())
    }

    /// Run the handshake; main menu fields it carries land in `results`
    pub async fn connect(&mut self, results: &mut ResultMap) -> SessionResult<()> {
        if self.state != SessionState::Open {
            return Err(SessionError::violation(
                "connect",
                format!("session is {:?}, expected Open", self.state),
            ));
        }
        Handshake::new(&mut self.transport).run(results).await?;
        self.state = SessionState::Connected;
        Ok(())
    }

    /// Visit one screen and return to the main menu
    pub async fn visit(&mut self, screen: Screen, results: &mut ResultMap) -> SessionResult<VisitReport> {
        if !self.state.is_ready() {
            return Err(SessionError::violation(
                "visit",
                format!("cannot visit {} before the handshake", screen),
            ));
        }
        ScreenNavigator::new(&mut self.transport, self.strategy)
            .visit(screen, results)
            .await
    }

    /// Close the transport; closing a closed session is a no-op
    pub async fn close(&mut self) -> SessionResult<()> {
        if self.state.can_close() {
            self.transport.close().await?;
            self.state = SessionState::Closed;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{finalize_reply, handshake_replies, ScriptedTransport};

    #[tokio::test]
    async fn test_visit_requires_handshake() {
        let mut session = HeatingSession::new(ScriptedTransport::new(vec![]), ReadinessStrategy::default());
        session.open().await.unwrap();

        let result = session.visit(Screen::Water, &mut ResultMap::new()).await;
        assert!(matches!(result, Err(SessionError::ProtocolViolation { step: "visit", .. })));
        assert!(session.transport().sent.is_empty());
    }

    #[tokio::test]
    async fn test_lifecycle() {
        let transport = ScriptedTransport::new(handshake_replies(finalize_reply(&[])));
        let mut session = HeatingSession::new(transport, ReadinessStrategy::default());
        let mut results = ResultMap::new();

        assert!(session.connect(&mut results).await.is_err());
        session.open().await.unwrap();
        assert!(session.open().await.is_err());
        session.connect(&mut results).await.unwrap();
        assert_eq!(session.state(), SessionState::Connected);

        session.close().await.unwrap();
        assert_eq!(session.state(), SessionState::Closed);
        session.close().await.unwrap();
        assert!(session.into_transport().is_closed());
    }
}
