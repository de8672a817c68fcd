//! Rolling session token
//!
//! The controller starts every reply with a 5-byte token. The next request
//! must carry that token as its prefix. The token is replaced after every
//! reply, never merged with the previous one.

use bytes::{BufMut, Bytes, BytesMut};
use heatlink_core::{SessionError, SessionResult};
use std::fmt;

/// Length of the session token in bytes
pub const TOKEN_LENGTH: usize = 5;

/// Token taken from the head of the most recent reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionToken([u8; TOKEN_LENGTH]);

impl SessionToken {
    pub fn new(bytes: [u8; TOKEN_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Take the token from the first bytes of a received datagram
    ///
    /// # Errors
    /// Returns `SessionError::ProtocolViolation` if the datagram is shorter
    /// than a token
    pub fn from_datagram(datagram: &[u8]) -> SessionResult<Self> {
        let head = datagram.get(..TOKEN_LENGTH).ok_or_else(|| {
            SessionError::violation(
                "token",
                format!(
                    "datagram of {} bytes is shorter than the {}-byte token",
                    datagram.len(),
                    TOKEN_LENGTH
                ),
            )
        })?;
        let mut bytes = [0u8; TOKEN_LENGTH];
        bytes.copy_from_slice(head);
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; TOKEN_LENGTH] {
        &self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, b) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

/// Token bookkeeping shared by every transport implementation
///
/// `observe` is called once per received datagram; `frame` builds the
/// outgoing datagram. Before the first reply there is no token and payloads
/// go out unmodified, which is only correct for the initial connect probe.
#[derive(Debug, Clone, Default)]
pub struct TokenState {
    current: Option<SessionToken>,
}

impl TokenState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the token with the head of `datagram`
    pub fn observe(&mut self, datagram: &[u8]) -> SessionResult<SessionToken> {
        let token = SessionToken::from_datagram(datagram)?;
        self.current = Some(token);
        Ok(token)
    }

    /// Build the outgoing datagram: `token ++ payload`, or `payload` alone
    /// while no token is known
    pub fn frame(&self, payload: &[u8]) -> Bytes {
        match &self.current {
            Some(token) => {
                let mut buf = BytesMut::with_capacity(TOKEN_LENGTH + payload.len());
                buf.put_slice(token.as_bytes());
                buf.put_slice(payload);
                buf.freeze()
            }
            None => Bytes::copy_from_slice(payload),
        }
    }

    pub fn current(&self) -> Option<&SessionToken> {
        self.current.as_ref()
    }

    /// Forget the token, e.g. when the socket is closed
    pub fn reset(&mut self) {
        self.current = None;
    }
}
