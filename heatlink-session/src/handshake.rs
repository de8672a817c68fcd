//! Connection handshake
//!
//! Five fixed exchanges establish a session:
//!
//! 1. Connect probe (no token) -> 7-byte reply, or the busy sentinel
//! 2. Second unsolicited datagram, 6 bytes, establishes the token
//! 3. Capability request -> 6-byte reply
//! 4. Negotiation -> exactly [`NEGOTIATION_ACK`](crate::frames::handshake::NEGOTIATION_ACK)
//! 5. Finalize -> variable reply; past 16 bytes it already shows the main
//!    menu and its fields are decoded right away
//!
//! Every length or content mismatch is fatal for the session.

use crate::exchange::{exchange, receive_logged};
use crate::frames::handshake::{
    CAPABILITY_REPLY_LENGTH, CAPABILITY_REQUEST, CONNECT_PROBE, CONNECT_REPLY_LENGTH, DEVICE_BUSY,
    FINALIZE, FINALIZE_FIELDS_THRESHOLD, GREETING_ACK_LENGTH, NEGOTIATION, NEGOTIATION_ACK,
};
use crate::state::HandshakeState;
use crate::tags::MAIN_MENU_FIELDS;
use heatlink_core::{extract_into, ExtractionMode, ResultMap, SessionError, SessionResult};
use heatlink_transport::TransportLayer;

/// Drives the handshake over a borrowed transport
pub struct Handshake<'a, T: TransportLayer + ?Sized> {
    transport: &'a mut T,
    state: HandshakeState,
}

impl<'a, T: TransportLayer + ?Sized> Handshake<'a, T> {
    pub fn new(transport: &'a mut T) -> Self {
        Self {
            transport,
            state: HandshakeState::Idle,
        }
    }

    pub fn state(&self) -> HandshakeState {
        self.state
    }

    /// Run all five steps
    ///
    /// Main menu fields found in the finalize reply are written to `results`.
    ///
    /// # Errors
    /// - `SessionError::DeviceBusy` if the controller already serves a session
    /// - `SessionError::ProtocolViolation` on any unexpected reply
    /// - `SessionError::Timeout` if the controller stays silent
    pub async fn run(&mut self, results: &mut ResultMap) -> SessionResult<()> {
        // Step 1
        let reply = exchange(&mut *self.transport, &CONNECT_PROBE, "CONNECT_1").await?;
        self.advance(HandshakeState::GreetingSent)?;
        if reply[..] == DEVICE_BUSY {
            log::warn!("Controller rejected the connection: another session is active");
            return Err(SessionError::DeviceBusy);
        }
        expect_length("connect", &reply, CONNECT_REPLY_LENGTH)?;

        // Step 2
        let reply = receive_logged(&mut *self.transport, "CONNECT_2").await?;
        expect_length("greeting-ack", &reply, GREETING_ACK_LENGTH)?;
        self.advance(HandshakeState::GreetingAckRecv)?;

        // Step 3
        let reply = exchange(&mut *self.transport, &CAPABILITY_REQUEST, "CONNECT_3").await?;
        expect_length("capabilities", &reply, CAPABILITY_REPLY_LENGTH)?;
        self.advance(HandshakeState::CapabilitiesNegotiated)?;

        // Step 4
        let reply = exchange(&mut *self.transport, &NEGOTIATION, "CONNECT_4").await?;
        expect_length("negotiation", &reply, NEGOTIATION_ACK.len())?;
        if reply[..] != NEGOTIATION_ACK {
            return Err(SessionError::violation(
                "negotiation",
                format!("unexpected acknowledgement {:02x?}", &reply[..]),
            ));
        }
        self.advance(HandshakeState::SessionParamsSent)?;

        // Step 5
        let reply = exchange(&mut *self.transport, &FINALIZE, "CONNECT_5").await?;
        self.advance(HandshakeState::ConnectDone)?;
        if reply.len() > FINALIZE_FIELDS_THRESHOLD {
            let found = extract_into(&reply, MAIN_MENU_FIELDS, ExtractionMode::Strict, results)?;
            log::debug!("Finalize reply carried {} main menu fields", found);
        }

        log::info!("Handshake completed");
        Ok(())
    }

    fn advance(&mut self, next: HandshakeState) -> SessionResult<()> {
        self.state.validate_transition(next)?;
        log::trace!("Handshake {} -> {}", self.state.as_str(), next.as_str());
        self.state = next;
        Ok(())
    }
}

fn expect_length(step: &'static str, reply: &[u8], expected: usize) -> SessionResult<()> {
    if reply.len() == expected {
        Ok(())
    } else {
        Err(SessionError::unexpected_length(step, expected, reply.len()))
    }
}
