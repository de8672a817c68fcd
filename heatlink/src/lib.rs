//! heatlink - telemetry poller for heating controllers
//!
//! Talks to the controller's proprietary UDP menu protocol the way its
//! own front panel tool does: handshake, walk the menu screens, decode the
//! displayed values.
//!
//! # Architecture
//!
//! - `heatlink-core`: error type, field markers, value codec, result map
//! - `heatlink-transport`: UDP transport with the rolling session token
//! - `heatlink-session`: handshake and screen navigation state machines
//! - `heatlink-client`: one complete polling cycle, builder and config
//!
//! This crate adds the settings file and the telemetry sinks used by the
//! `heatlink` binary.
//!
//! # Usage
//!
//! ```no_run
//! use heatlink::client::PollerBuilder;
//! use heatlink::sink::{LogSink, TelemetrySink};
//!
//! # async fn poll() -> anyhow::Result<()> {
//! let poller = PollerBuilder::new().udp("192.168.1.50:3477").build()?;
//! let results = poller.run_one_cycle().await?;
//! LogSink.publish(&results)?;
//! # Ok(())
//! # }
//! ```

pub mod settings;
pub mod sink;

// Re-export core types
pub use heatlink_core::{FieldValue, ResultMap, SessionError, SessionResult, Unit};

// Re-export client API
pub mod client {
    pub use heatlink_client::*;
}

// Re-export protocol layers
pub mod session {
    pub use heatlink_session::*;
}

pub mod transport {
    pub use heatlink_transport::*;
}
