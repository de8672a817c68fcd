//! Core types and utilities for the heating controller menu protocol
//!
//! This crate provides the error type, field markers, extracted values and
//! the text-field codec shared by the transport, session and client crates.

pub mod codec;
pub mod dump;
pub mod error;
pub mod marker;
pub mod value;

pub use codec::{extract, extract_into, ExtractionMode, ExtractionRule, Unit, ValueKind};
pub use dump::hex_dump;
pub use error::{SessionError, SessionResult};
pub use marker::{FieldMarker, MARKER_LENGTH};
pub use value::{FieldValue, ResultMap};
