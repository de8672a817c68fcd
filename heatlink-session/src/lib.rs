//! Session layer module for the heating controller menu protocol
//!
//! This crate drives a controller through its fixed handshake and walks
//! its menu screens, decoding telemetry fields along the way.
//!
//! - [`frames`]: fixed request/reply frames, grouped by step and screen
//! - [`tags`]: field tag table and the extraction rules per screen
//! - [`handshake`]: five-step connection handshake
//! - [`navigator`]: enter / read / leave algorithm shared by all screens
//! - [`session`]: session object owning the transport for one cycle

pub mod exchange;
pub mod frames;
pub mod handshake;
pub mod navigator;
pub mod screen;
pub mod session;
pub mod state;
pub mod tags;

#[cfg(test)]
mod testing;

pub use handshake::Handshake;
pub use navigator::{PollOutcome, ScreenNavigator, VisitReport};
pub use screen::{ReadinessStrategy, Screen, ScreenLayout};
pub use session::HeatingSession;
pub use state::{HandshakeState, SessionState};
