//! Text-field codec
//!
//! Every human-readable value on a controller screen is encoded the same way:
//!
//! ```text
//! +-----------+----------------------------------+------+
//! | marker(5) | single-byte text [+ unit suffix] | 0x00 |
//! +-----------+----------------------------------+------+
//! ```
//!
//! The text uses one byte per character (Latin-1), so extended bytes such as
//! the degree sign `0xB0` are mapped to the matching code point rather than
//! UTF-8 decoded. Numbers use a decimal comma.
//!
//! A field is described by an [`ExtractionRule`]: marker, optional unit and
//! the kind of value to produce. A missing marker or a unit mismatch yields
//! `None`. A marker whose text cannot be parsed as the requested number is a
//! `SessionError::FieldDecode`, because it means the tag table no longer
//! matches the controller firmware.

use crate::error::{SessionError, SessionResult};
use crate::marker::FieldMarker;
use crate::value::{FieldValue, ResultMap};
use serde::{Deserialize, Serialize};

/// Unit suffix the controller appends to a field's text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Unit {
    /// Degree Celsius, sent as the two bytes `0xB0 0x43`
    Celsius,
    /// `kWh`
    KilowattHours,
    /// Operating hours, sent as `" h"`
    Hours,
}

impl Unit {
    /// Suffix as it appears in the decoded text
    pub fn suffix(&self) -> &'static str {
        match self {
            Unit::Celsius => "\u{b0}C",
            Unit::KilowattHours => "kWh",
            Unit::Hours => " h",
        }
    }

    /// Human-readable unit label for published readings
    pub fn label(&self) -> &'static str {
        match self {
            Unit::Celsius => "\u{b0}C",
            Unit::KilowattHours => "kWh",
            Unit::Hours => "h",
        }
    }
}

/// Kind of value a rule produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValueKind {
    /// Trimmed text
    Text,
    /// Untrimmed text run; the unit is not checked
    Raw,
    /// Integer after decimal-comma normalisation
    Integer,
    /// Decimal after decimal-comma normalisation
    Decimal,
}

/// How decode failures are treated while running a set of rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractionMode {
    /// A numeric parse failure aborts the session
    #[default]
    Strict,
    /// A numeric parse failure leaves the field absent
    BestEffort,
}

/// Where a field lives in a reply and how to decode it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionRule {
    /// Canonical key in the result map, e.g. `"water-temp"`
    pub key: &'static str,
    pub marker: FieldMarker,
    pub unit: Option<Unit>,
    pub kind: ValueKind,
}

impl ExtractionRule {
    /// Plain text field
    pub const fn text(key: &'static str, marker: FieldMarker) -> Self {
        Self {
            key,
            marker,
            unit: None,
            kind: ValueKind::Text,
        }
    }

    /// Text field kept exactly as sent
    pub const fn raw(key: &'static str, marker: FieldMarker) -> Self {
        Self {
            key,
            marker,
            unit: None,
            kind: ValueKind::Raw,
        }
    }

    /// Integer field, optionally unit-suffixed
    pub const fn integer(key: &'static str, marker: FieldMarker, unit: Option<Unit>) -> Self {
        Self {
            key,
            marker,
            unit,
            kind: ValueKind::Integer,
        }
    }

    /// Decimal field, optionally unit-suffixed
    pub const fn decimal(key: &'static str, marker: FieldMarker, unit: Option<Unit>) -> Self {
        Self {
            key,
            marker,
            unit,
            kind: ValueKind::Decimal,
        }
    }
}

/// Decode bytes one-to-one into characters
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Read the NUL-terminated text run following `marker`
///
/// The run ends at the first NUL byte or at the end of the buffer.
pub fn read_text_run(buffer: &[u8], marker: &FieldMarker) -> Option<String> {
    let region = marker.value_region(buffer)?;
    let end = region.iter().position(|&b| b == 0).unwrap_or(region.len());
    Some(decode_latin1(&region[..end]))
}

/// Replace the decimal comma with a point
pub fn normalize_decimal(text: &str) -> String {
    text.replace(',', ".")
}

/// Decode one field from a reply buffer
///
/// # Returns
///
/// * `Ok(Some(value))` - marker found and text decoded
/// * `Ok(None)` - marker missing, or required unit not present
/// * `Err(SessionError::FieldDecode)` - numeric text could not be parsed
pub fn extract(buffer: &[u8], rule: &ExtractionRule) -> SessionResult<Option<FieldValue>> {
    let Some(run) = read_text_run(buffer, &rule.marker) else {
        return Ok(None);
    };

    if rule.kind == ValueKind::Raw {
        return Ok(Some(FieldValue::Raw(run)));
    }

    let mut text = run.trim();
    if let Some(unit) = rule.unit {
        match text.strip_suffix(unit.suffix()) {
            Some(rest) => text = rest.trim(),
            None => return Ok(None),
        }
    }

    let decode_error = || SessionError::FieldDecode {
        key: rule.key.to_string(),
        text: text.to_string(),
    };

    let value = match rule.kind {
        ValueKind::Text | ValueKind::Raw => FieldValue::Text(text.to_string()),
        ValueKind::Integer => FieldValue::Integer(
            normalize_decimal(text)
                .parse::<i64>()
                .map_err(|_| decode_error())?,
        ),
        ValueKind::Decimal => FieldValue::Decimal(
            normalize_decimal(text)
                .parse::<f64>()
                .map_err(|_| decode_error())?,
        ),
    };

    Ok(Some(value))
}

/// Run a set of rules against one reply and store every decoded field
///
/// Absent fields leave the map untouched. In `BestEffort` mode a decode
/// failure is also treated as absent.
///
/// # Returns
///
/// Number of fields written to `results`
pub fn extract_into(
    buffer: &[u8],
    rules: &[ExtractionRule],
    mode: ExtractionMode,
    results: &mut ResultMap,
) -> SessionResult<usize> {
    let mut written = 0;
    for rule in rules {
        let decoded = match extract(buffer, rule) {
            Ok(decoded) => decoded,
            Err(SessionError::FieldDecode { key, text }) if mode == ExtractionMode::BestEffort => {
                log::warn!("Dropping undecodable {} value {:?}", key, text);
                None
            }
            Err(e) => return Err(e),
        };
        if let Some(value) = decoded {
            results.insert(rule.key, value);
            written += 1;
        }
    }
    Ok(written)
}
