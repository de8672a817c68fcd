//! Datagram transport trait

use crate::token::SessionToken;
use async_trait::async_trait;
use bytes::Bytes;
use heatlink_core::SessionResult;

/// Request/response datagram channel to one controller
///
/// Implementations own the rolling session token: `receive` replaces it with
/// the head of every reply and `send` prefixes it onto every request once
/// known. Callers must call `receive` exactly once per expected reply, in
/// order, or the token desynchronises and the controller rejects all further
/// requests.
#[async_trait]
pub trait TransportLayer: Send {
    /// Open the underlying socket
    async fn open(&mut self) -> SessionResult<()>;

    /// Send one request
    ///
    /// Transmits `token ++ payload` once a token is known, `payload`
    /// unmodified before that. No acknowledgement is awaited.
    async fn send(&mut self, payload: &[u8]) -> SessionResult<()>;

    /// Wait for one reply and adopt its token
    ///
    /// # Errors
    /// Returns `SessionError::Timeout` when the controller stays silent
    /// beyond the configured timeout
    async fn receive(&mut self) -> SessionResult<Bytes>;

    /// Token taken from the most recent reply
    fn token(&self) -> Option<&SessionToken>;

    /// Check if the transport is closed
    fn is_closed(&self) -> bool;

    /// Close the socket and forget the token
    async fn close(&mut self) -> SessionResult<()>;
}
