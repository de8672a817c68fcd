//! Settings file
//!
//! ```yaml
//! controller:
//!   host: 192.168.1.50
//!   port: 3477
//! polling:
//!   interval_seconds: 600
//!   timeout_ms: 5000
//!   strategy: bounded-poll
//!   attempts: 4
//! output:
//!   format: json
//! ```
//!
//! Every key is optional; command line flags override the file.

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use heatlink_client::{HeatingPoller, PollerBuilder, ReadinessStrategy};
use heatlink_session::frames::DEFAULT_POLL_ATTEMPTS;
use heatlink_transport::DEFAULT_PORT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Controller address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerSettings {
    /// Host name or IP address
    #[serde(alias = "hostname")]
    pub host: String,
    pub port: u16,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: DEFAULT_PORT,
        }
    }
}

impl ControllerSettings {
    /// "host:port", with IPv6 literals bracketed
    pub fn address(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

/// Readiness strategy as named in settings and on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyName {
    #[default]
    IntermediateProbe,
    BoundedPoll,
}

/// Polling schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingSettings {
    #[serde(alias = "interval")]
    pub interval_seconds: u64,
    #[serde(alias = "timeout")]
    pub timeout_ms: u64,
    pub strategy: StrategyName,
    /// Probe bound for `bounded-poll`
    pub attempts: usize,
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            interval_seconds: 600,
            timeout_ms: 5000,
            strategy: StrategyName::default(),
            attempts: DEFAULT_POLL_ATTEMPTS,
        }
    }
}

impl PollingSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds)
    }

    pub fn receive_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn readiness(&self) -> ReadinessStrategy {
        match self.strategy {
            StrategyName::IntermediateProbe => ReadinessStrategy::IntermediateProbe,
            StrategyName::BoundedPoll => ReadinessStrategy::BoundedPoll {
                attempts: self.attempts,
            },
        }
    }
}

/// Where decoded readings go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// One log line per reading
    #[default]
    Log,
    /// One JSON object per reading on stdout
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub format: OutputFormat,
}

/// Complete binary settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub controller: ControllerSettings,
    pub polling: PollingSettings,
    pub output: OutputSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("Invalid settings file {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.controller.host.trim().is_empty() {
            bail!("Controller host is empty");
        }
        if self.polling.interval_seconds == 0 {
            bail!("Polling interval must be at least one second");
        }
        if self.polling.timeout_ms == 0 {
            bail!("Receive timeout must be greater than zero");
        }
        if self.polling.strategy == StrategyName::BoundedPoll && self.polling.attempts == 0 {
            bail!("Bounded polling needs at least one attempt");
        }
        Ok(())
    }

    /// Build the poller these settings describe
    pub fn poller(&self) -> Result<HeatingPoller> {
        let builder = PollerBuilder::new()
            .udp(&self.controller.address())
            .receive_timeout(self.polling.receive_timeout());
        let builder = match self.polling.readiness() {
            ReadinessStrategy::IntermediateProbe => builder.intermediate_probe(),
            ReadinessStrategy::BoundedPoll { attempts } => builder.bounded_polling(attempts),
        };
        Ok(builder.build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.controller.port, 3477);
        assert_eq!(settings.polling.interval(), Duration::from_secs(600));
        assert_eq!(settings.polling.receive_timeout(), Duration::from_millis(5000));
        assert_eq!(settings.polling.readiness(), ReadinessStrategy::IntermediateProbe);
        assert_eq!(settings.output.format, OutputFormat::Log);
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_partial_file() {
        let settings = Settings::from_yaml(
            "controller:\n  host: 10.0.0.7\npolling:\n  strategy: bounded-poll\n  attempts: 6\noutput:\n  format: json\n",
        )
        .unwrap();

        settings.validate().unwrap();
        assert_eq!(settings.controller.address(), "10.0.0.7:3477");
        assert_eq!(
            settings.polling.readiness(),
            ReadinessStrategy::BoundedPoll { attempts: 6 }
        );
        assert_eq!(settings.polling.interval_seconds, 600);
        assert_eq!(settings.output.format, OutputFormat::Json);

        let poller = settings.poller().unwrap();
        assert_eq!(poller.config().address, "10.0.0.7:3477".parse().unwrap());
        assert_eq!(poller.config().readiness, ReadinessStrategy::BoundedPoll { attempts: 6 });
    }

    #[test]
    fn test_aliases_and_ipv6() {
        let settings =
            Settings::from_yaml("controller:\n  hostname: \"::1\"\n  port: 4000\npolling:\n  interval: 30\n").unwrap();
        assert_eq!(settings.controller.address(), "[::1]:4000");
        assert_eq!(settings.polling.interval_seconds, 30);
    }

    #[test]
    fn test_validate_rejects() {
        let mut settings = Settings::default();
        settings.controller.host = "heating".into();
        settings.validate().unwrap();

        settings.polling.strategy = StrategyName::BoundedPoll;
        settings.polling.attempts = 0;
        assert!(settings.validate().is_err());

        settings.polling.attempts = 4;
        settings.polling.timeout_ms = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_unknown_strategy() {
        assert!(Settings::from_yaml("polling:\n  strategy: hammer\n").is_err());
    }
}
