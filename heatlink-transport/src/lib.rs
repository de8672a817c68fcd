//! Transport layer module for the heating controller menu protocol
//!
//! This crate provides the datagram transport trait, the rolling session
//! token and the UDP implementation used to talk to the controller.

pub mod datagram;
pub mod token;
pub mod udp;

pub use datagram::TransportLayer;
pub use heatlink_core::{SessionError, SessionResult};
pub use token::{SessionToken, TokenState, TOKEN_LENGTH};
pub use udp::{UdpSettings, UdpTransport, DEFAULT_PORT, MAX_DATAGRAM_SIZE};
