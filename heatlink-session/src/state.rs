//! Handshake and session state machines

use heatlink_core::{SessionError, SessionResult};

/// Handshake progress
///
/// # State Transitions
/// ```text
/// Idle -> GreetingSent            (connect probe sent)
/// GreetingSent -> GreetingAckRecv (7-byte reply and 6-byte token datagram received)
/// GreetingAckRecv -> CapabilitiesNegotiated (capability reply received)
/// CapabilitiesNegotiated -> SessionParamsSent (negotiation acknowledged)
/// SessionParamsSent -> ConnectDone (finalize reply received)
/// ```
///
/// Any failed assertion aborts the session; there is no way back to an
/// earlier state within the same session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandshakeState {
    #[default]
    Idle,
    GreetingSent,
    GreetingAckRecv,
    CapabilitiesNegotiated,
    SessionParamsSent,
    ConnectDone,
}

impl HandshakeState {
    /// The only state that may follow this one
    pub fn next(&self) -> Option<HandshakeState> {
        match self {
            HandshakeState::Idle => Some(HandshakeState::GreetingSent),
            HandshakeState::GreetingSent => Some(HandshakeState::GreetingAckRecv),
            HandshakeState::GreetingAckRecv => Some(HandshakeState::CapabilitiesNegotiated),
            HandshakeState::CapabilitiesNegotiated => Some(HandshakeState::SessionParamsSent),
            HandshakeState::SessionParamsSent => Some(HandshakeState::ConnectDone),
            HandshakeState::ConnectDone => None,
        }
    }

    /// Validate state transition
    pub fn validate_transition(&self, new_state: HandshakeState) -> SessionResult<()> {
        if self.next() == Some(new_state) {
            Ok(())
        } else {
            Err(SessionError::violation(
                "handshake",
                format!("invalid state transition: {:?} -> {:?}", self, new_state),
            ))
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, HandshakeState::ConnectDone)
    }

    /// Get human-readable state name
    pub fn as_str(&self) -> &'static str {
        match self {
            HandshakeState::Idle => "Idle",
            HandshakeState::GreetingSent => "GreetingSent",
            HandshakeState::GreetingAckRecv => "GreetingAckRecv",
            HandshakeState::CapabilitiesNegotiated => "CapabilitiesNegotiated",
            HandshakeState::SessionParamsSent => "SessionParamsSent",
            HandshakeState::ConnectDone => "ConnectDone",
        }
    }
}

/// Session lifecycle
///
/// Tracks the state of a session to ensure screens are only visited once
/// the handshake has completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Socket not open (initial and final state)
    #[default]
    Closed,
    /// Socket open, handshake not yet completed
    Open,
    /// Handshake completed, screens may be visited
    Connected,
}

impl SessionState {
    pub fn is_ready(&self) -> bool {
        matches!(self, SessionState::Connected)
    }

    pub fn can_close(&self) -> bool {
        !matches!(self, SessionState::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handshake_walks_forward_only() {
        let mut state = HandshakeState::default();
        let mut steps = 0;
        while let Some(next) = state.next() {
            state.validate_transition(next).unwrap();
            state = next;
            steps += 1;
        }
        assert_eq!(steps, 5);
        assert!(state.is_done());
    }

    #[test]
    fn test_handshake_rejects_skips() {
        let err = HandshakeState::Idle
            .validate_transition(HandshakeState::ConnectDone)
            .unwrap_err();
        assert!(matches!(err, SessionError::ProtocolViolation { .. }));
        assert!(HandshakeState::GreetingSent
            .validate_transition(HandshakeState::Idle)
            .is_err());
    }

    #[test]
    fn test_session_state() {
        assert!(!SessionState::Closed.can_close());
        assert!(SessionState::Open.can_close());
        assert!(SessionState::Connected.is_ready());
        assert!(!SessionState::Open.is_ready());
    }
}
