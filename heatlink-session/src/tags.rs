//! Field tag table
//!
//! Each telemetry value on a controller screen is preceded by a 5-byte tag.
//! The table is specific to the controller firmware; when a tag no longer
//! matches, the field simply decodes as absent.

use heatlink_core::{ExtractionRule, FieldMarker, Unit};

pub const TIME: FieldMarker = FieldMarker::new([0x12, 0x2c, 0x01, 0x0a, 0x00]);
pub const INDOOR_TEMP: FieldMarker = FieldMarker::new([0x12, 0x2c, 0x01, 0x1e, 0x00]);
pub const OUTDOOR_TEMP: FieldMarker = FieldMarker::new([0x12, 0x2c, 0x01, 0x28, 0x00]);

pub const WATER_TEMP: FieldMarker = FieldMarker::new([0x12, 0x2c, 0x01, 0x34, 0x00]);

pub const SOLAR_TOTAL_ENERGY: FieldMarker = FieldMarker::new([0x12, 0x2c, 0x01, 0xbc, 0x00]);
pub const SOLAR_PANEL_TEMP: FieldMarker = FieldMarker::new([0x12, 0x2c, 0x01, 0x56, 0x00]);
pub const SOLAR_PANEL_MAX_TEMP: FieldMarker = FieldMarker::new([0x12, 0x2c, 0x01, 0x78, 0x00]);

pub const BOILER_TEMP: FieldMarker = FieldMarker::new([0x12, 0x2c, 0x01, 0x9a, 0x00]);
pub const BOILER_RUNTIME: FieldMarker = FieldMarker::new([0x12, 0x2c, 0x02, 0x10, 0x00]);
pub const BOILER_STARTS: FieldMarker = FieldMarker::new([0x12, 0x2c, 0x02, 0x1a, 0x00]);

pub const BUFFER_TOP_TEMP: FieldMarker = FieldMarker::new([0x12, 0x2c, 0x01, 0xe0, 0x00]);
pub const BUFFER_BOTTOM_TEMP: FieldMarker = FieldMarker::new([0x12, 0x2c, 0x01, 0xea, 0x00]);

pub const ERROR_CODE: FieldMarker = FieldMarker::new([0x12, 0x2c, 0x03, 0x10, 0x00]);
pub const ERROR_TEXT: FieldMarker = FieldMarker::new([0x12, 0x2c, 0x03, 0x1a, 0x00]);

pub const MAIN_MENU_FIELDS: &[ExtractionRule] = &[
    ExtractionRule::text("time", TIME),
    ExtractionRule::decimal("indoor-temp", INDOOR_TEMP, Some(Unit::Celsius)),
    ExtractionRule::decimal("outdoor-temp", OUTDOOR_TEMP, Some(Unit::Celsius)),
];

pub const WATER_FIELDS: &[ExtractionRule] = &[ExtractionRule::decimal(
    "water-temp",
    WATER_TEMP,
    Some(Unit::Celsius),
)];

pub const SOLAR_FIELDS: &[ExtractionRule] = &[
    ExtractionRule::integer("solar-total-energy", SOLAR_TOTAL_ENERGY, Some(Unit::KilowattHours)),
    ExtractionRule::decimal("solar-panel-temp", SOLAR_PANEL_TEMP, Some(Unit::Celsius)),
    ExtractionRule::decimal("solar-panel-max-temp", SOLAR_PANEL_MAX_TEMP, Some(Unit::Celsius)),
];

pub const BOILER_FIELDS: &[ExtractionRule] = &[ExtractionRule::decimal(
    "boiler-temp",
    BOILER_TEMP,
    Some(Unit::Celsius),
)];

pub const BOILER_COUNTER_FIELDS: &[ExtractionRule] = &[
    ExtractionRule::integer("boiler-runtime", BOILER_RUNTIME, Some(Unit::Hours)),
    ExtractionRule::integer("boiler-starts", BOILER_STARTS, None),
];

pub const BUFFER_FIELDS: &[ExtractionRule] = &[
    ExtractionRule::decimal("buffer-top-temp", BUFFER_TOP_TEMP, Some(Unit::Celsius)),
    ExtractionRule::decimal("buffer-bottom-temp", BUFFER_BOTTOM_TEMP, Some(Unit::Celsius)),
];

pub const ERROR_FIELDS: &[ExtractionRule] = &[
    ExtractionRule::raw("error-code", ERROR_CODE),
    ExtractionRule::text("error-text", ERROR_TEXT),
];

/// Every rule the session knows, across all screens and pages
pub fn all_fields() -> impl Iterator<Item = &'static ExtractionRule> {
    [
        MAIN_MENU_FIELDS,
        WATER_FIELDS,
        SOLAR_FIELDS,
        BOILER_FIELDS,
        BOILER_COUNTER_FIELDS,
        BUFFER_FIELDS,
        ERROR_FIELDS,
    ]
    .into_iter()
    .flatten()
}

/// Display unit of a canonical field key
pub fn unit_of(key: &str) -> Option<Unit> {
    all_fields().find(|rule| rule.key == key).and_then(|rule| rule.unit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_and_markers_unique() {
        let keys: HashSet<_> = all_fields().map(|r| r.key).collect();
        let markers: HashSet<_> = all_fields().map(|r| r.marker).collect();
        let count = all_fields().count();
        assert_eq!(keys.len(), count);
        assert_eq!(markers.len(), count);
    }

    #[test]
    fn test_unit_lookup() {
        assert_eq!(unit_of("water-temp"), Some(Unit::Celsius));
        assert_eq!(unit_of("solar-total-energy"), Some(Unit::KilowattHours));
        assert_eq!(unit_of("boiler-runtime"), Some(Unit::Hours));
        assert_eq!(unit_of("error-code"), None);
        assert_eq!(unit_of("unknown"), None);
    }
}
