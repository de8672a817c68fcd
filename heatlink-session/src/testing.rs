//! In-memory transport and reply builders for the state machine tests

use crate::frames::handshake::NEGOTIATION_ACK;
use async_trait::async_trait;
use bytes::Bytes;
use heatlink_core::{FieldMarker, SessionError, SessionResult};
use heatlink_transport::{SessionToken, TokenState, TransportLayer};
use std::collections::VecDeque;

/// Transport replaying a fixed list of replies
///
/// Every framed request is recorded in `sent`. Once the script runs dry,
/// `receive` reports a timeout, like a controller that stopped answering.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: VecDeque<Vec<u8>>,
    tokens: TokenState,
    pub sent: Vec<Vec<u8>>,
    pub open: bool,
}

impl ScriptedTransport {
    pub fn new(replies: Vec<Vec<u8>>) -> Self {
        Self {
            replies: replies.into(),
            ..Default::default()
        }
    }

    /// Like `new`, but with a token already in place, as after a handshake
    pub fn primed(replies: Vec<Vec<u8>>) -> Self {
        let mut transport = Self::new(replies);
        transport.open = true;
        transport.tokens = TokenState::new();
        transport.tokens.observe(&[0x01, 0x00, 0x00, 0x00, 0x01]).unwrap();
        transport
    }

    /// Replies not consumed yet
    pub fn remaining(&self) -> usize {
        self.replies.len()
    }
}

#[async_trait]
impl TransportLayer for ScriptedTransport {
    async fn open(&mut self) -> SessionResult<()> {
        self.open = true;
        self.tokens.reset();
        Ok(())
    }

    async fn send(&mut self, payload: &[u8]) -> SessionResult<()> {
        self.sent.push(self.tokens.frame(payload).to_vec());
        Ok(())
    }

    async fn receive(&mut self) -> SessionResult<Bytes> {
        let reply = self.replies.pop_front().ok_or(SessionError::Timeout)?;
        self.tokens.observe(&reply)?;
        Ok(Bytes::from(reply))
    }

    fn token(&self) -> Option<&SessionToken> {
        self.tokens.current()
    }

    fn is_closed(&self) -> bool {
        !self.open
    }

    async fn close(&mut self) -> SessionResult<()> {
        self.open = false;
        self.tokens.reset();
        Ok(())
    }
}

/// Reply of `len` bytes starting with a token derived from `seed`
pub fn reply_of_length(seed: u8, len: usize) -> Vec<u8> {
    let mut reply = vec![seed, 0x00, 0x00, 0x00, seed];
    reply.resize(len.max(5), 0x00);
    reply
}

/// Reply carrying the given marker/text fields, each NUL-terminated
pub fn screen_reply(seed: u8, fields: &[(FieldMarker, &[u8])]) -> Vec<u8> {
    let mut reply = reply_of_length(seed, 9);
    for (marker, text) in fields {
        reply.extend_from_slice(marker.as_bytes());
        reply.extend_from_slice(text);
        reply.push(0x00);
    }
    reply
}

/// Finalize reply; only longer than the field threshold when fields are given
pub fn finalize_reply(fields: &[(FieldMarker, &[u8])]) -> Vec<u8> {
    let mut reply = vec![0x05, 0x00, 0x00, 0x00, 0x05, 0x80, 0x0a, 0x00];
    for (marker, text) in fields {
        reply.extend_from_slice(marker.as_bytes());
        reply.extend_from_slice(text);
        reply.push(0x00);
    }
    reply
}

/// The five handshake replies, ending with `finalize`
pub fn handshake_replies(finalize: Vec<u8>) -> Vec<Vec<u8>> {
    vec![
        vec![0x08, 0x00, 0x00, 0x00, 0x00, 0x01, 0x01],
        reply_of_length(0x02, 6),
        reply_of_length(0x03, 6),
        NEGOTIATION_ACK.to_vec(),
        finalize,
    ]
}
