use crate::error::{SessionError, SessionResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of a field marker in bytes
pub const MARKER_LENGTH: usize = 5;

/// Binary tag preceding a field's text inside a controller reply
///
/// Markers are opaque: the controller places one in front of every
/// human-readable value on a screen. They are located by a first-occurrence
/// byte scan, never by offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldMarker {
    bytes: [u8; MARKER_LENGTH],
}

impl FieldMarker {
    /// Create a marker from its raw bytes
    pub const fn new(bytes: [u8; MARKER_LENGTH]) -> Self {
        Self { bytes }
    }

    /// Parse a marker from space-separated hex, e.g. `"12 2c 01 34 00"`
    ///
    /// # Returns
    ///
    /// Returns `Ok(FieldMarker)` if exactly five hex bytes were given,
    /// `Err(SessionError::InvalidConfig)` otherwise
    pub fn from_hex(s: &str) -> SessionResult<Self> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        if parts.len() != MARKER_LENGTH {
            return Err(SessionError::InvalidConfig(format!(
                "Expected {} hex bytes in marker, got {}",
                MARKER_LENGTH,
                parts.len()
            )));
        }

        let mut bytes = [0u8; MARKER_LENGTH];
        for (i, part) in parts.iter().enumerate() {
            bytes[i] = u8::from_str_radix(part, 16).map_err(|_| {
                SessionError::InvalidConfig(format!("Invalid marker byte: {}", part))
            })?;
        }

        Ok(Self { bytes })
    }

    /// Get the marker as a byte array
    pub fn as_bytes(&self) -> &[u8; MARKER_LENGTH] {
        &self.bytes
    }

    /// Offset of the first occurrence of this marker in `buffer`
    pub fn find_in(&self, buffer: &[u8]) -> Option<usize> {
        buffer
            .windows(MARKER_LENGTH)
            .position(|window| window == self.bytes)
    }

    /// Slice of `buffer` starting right after the first occurrence of this marker
    pub fn value_region<'a>(&self, buffer: &'a [u8]) -> Option<&'a [u8]> {
        self.find_in(buffer)
            .map(|offset| &buffer[offset + MARKER_LENGTH..])
    }
}

impl fmt::Display for FieldMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02x} {:02x} {:02x} {:02x} {:02x}",
            self.bytes[0], self.bytes[1], self.bytes[2], self.bytes[3], self.bytes[4]
        )
    }
}
