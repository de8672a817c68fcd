//! Telemetry sinks
//!
//! A sink receives the result map of a successful cycle and publishes one
//! item per key. Failed cycles never reach a sink.

use anyhow::Result;
use chrono::{DateTime, Utc};
use heatlink_core::{FieldValue, ResultMap};
use heatlink_session::tags::unit_of;
use serde::Serialize;
use std::io::{self, Stdout, Write};

pub trait TelemetrySink {
    fn publish(&mut self, results: &ResultMap) -> Result<()>;
}

/// Logs each reading at info level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl TelemetrySink for LogSink {
    fn publish(&mut self, results: &ResultMap) -> Result<()> {
        for (key, value) in results.iter() {
            match unit_of(key) {
                Some(unit) => log::info!("{} = {} {}", key, value, unit.label()),
                None => log::info!("{} = {}", key, value),
            }
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct Reading<'a> {
    key: &'a str,
    value: &'a FieldValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    unit: Option<&'static str>,
    timestamp: DateTime<Utc>,
}

/// Writes one JSON object per reading and line
///
/// All readings of one cycle share the same timestamp.
pub struct JsonSink<W: Write> {
    writer: W,
}

impl JsonSink<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TelemetrySink for JsonSink<W> {
    fn publish(&mut self, results: &ResultMap) -> Result<()> {
        let timestamp = Utc::now();
        for (key, value) in results.iter() {
            let reading = Reading {
                key,
                value,
                unit: unit_of(key).map(|unit| unit.label()),
                timestamp,
            };
            serde_json::to_writer(&mut self.writer, &reading)?;
            self.writer.write_all(b"\n")?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn sample() -> ResultMap {
        let mut results = ResultMap::new();
        results.insert("water-temp", FieldValue::Decimal(45.0));
        results.insert("boiler-starts", FieldValue::Integer(4711));
        results.insert("time", FieldValue::Text("12:30".into()));
        results
    }

    #[test]
    fn test_json_lines() {
        let mut sink = JsonSink::new(Vec::new());
        sink.publish(&sample()).unwrap();

        let output = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<Value> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["key"], "boiler-starts");
        assert_eq!(lines[0]["value"], 4711);
        assert!(lines[0].get("unit").is_none());
        assert_eq!(lines[1]["key"], "time");
        assert_eq!(lines[1]["value"], "12:30");
        assert_eq!(lines[2]["key"], "water-temp");
        assert_eq!(lines[2]["value"], 45.0);
        assert_eq!(lines[2]["unit"], "\u{b0}C");
        assert_eq!(lines[0]["timestamp"], lines[2]["timestamp"]);
    }

    #[test]
    fn test_empty_results_write_nothing() {
        let mut sink = JsonSink::new(Vec::new());
        sink.publish(&ResultMap::new()).unwrap();
        assert!(sink.into_inner().is_empty());

        LogSink.publish(&sample()).unwrap();
    }
}
