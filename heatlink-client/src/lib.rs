//! Heating controller polling client
//!
//! This crate sequences one complete polling cycle: open the socket, run
//! the handshake, visit every screen in a fixed order and close the socket.
//! A cycle either yields the full [`ResultMap`] or a fatal
//! [`SessionError`]; partial results are never handed out.
//!
//! # Usage
//!
//! ```rust,no_run
//! use heatlink_client::PollerBuilder;
//!
//! # async fn poll() -> heatlink_core::SessionResult<()> {
//! let poller = PollerBuilder::new()
//!     .udp("192.168.1.50:3477")
//!     .bounded_polling(4)
//!     .build()?;
//! let results = poller.run_one_cycle().await?;
//! for (key, value) in results.iter() {
//!     println!("{} = {}", key, value);
//! }
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod cycle;

pub use builder::PollerBuilder;
pub use config::PollerConfig;
pub use cycle::{run_cycle, HeatingPoller};
pub use heatlink_core::{FieldValue, ResultMap, SessionError, SessionResult};
pub use heatlink_session::{ReadinessStrategy, Screen};
