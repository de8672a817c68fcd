use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser};
use log::{error, info, warn, LevelFilter};

use heatlink::client::HeatingPoller;
use heatlink::settings::{OutputFormat, Settings, StrategyName};
use heatlink::sink::{JsonSink, LogSink, TelemetrySink};
use heatlink::SessionError;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Poll a heating controller over its UDP menu protocol")]
struct Args {
    /// Path to a YAML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Controller host name or IP address
    #[arg(long, env = "HEATLINK_HOST")]
    host: Option<String>,

    /// Controller UDP port
    #[arg(short, long)]
    port: Option<u16>,

    /// Seconds between polling cycles
    #[arg(short, long)]
    interval: Option<u64>,

    /// Receive timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// How screens wait for the controller to settle
    #[arg(long, value_enum)]
    strategy: Option<StrategyName>,

    /// Probe bound for bounded polling
    #[arg(long)]
    attempts: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,

    /// Run a single cycle and exit
    #[arg(long)]
    once: bool,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn apply(&self, settings: &mut Settings) {
        if let Some(host) = &self.host {
            settings.controller.host = host.clone();
        }
        if let Some(port) = self.port {
            settings.controller.port = port;
        }
        if let Some(interval) = self.interval {
            settings.polling.interval_seconds = interval;
        }
        if let Some(timeout_ms) = self.timeout_ms {
            settings.polling.timeout_ms = timeout_ms;
        }
        if let Some(strategy) = self.strategy {
            settings.polling.strategy = strategy;
        }
        if let Some(attempts) = self.attempts {
            settings.polling.attempts = attempts;
        }
        if let Some(output) = self.output {
            settings.output.format = output;
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // RUST_LOG, when set, overrides the verbosity flags
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn report_failure(error: &SessionError) {
    match error {
        SessionError::DeviceBusy => warn!("Controller busy, another client holds the session"),
        SessionError::Timeout => warn!("Controller did not answer in time"),
        SessionError::Connection(e) => error!("Socket error: {}", e),
        SessionError::ProtocolViolation { step, detail } => {
            error!("Protocol violation at {}: {}", step, detail)
        }
        SessionError::FieldDecode { key, text } => {
            error!("Cannot decode {} from {:?}", key, text)
        }
        SessionError::InvalidConfig(reason) => error!("Invalid configuration: {}", reason),
    }
}

/// Run one cycle and hand its results to the sink
async fn poll(poller: &HeatingPoller, sink: &mut dyn TelemetrySink) -> Result<()> {
    match poller.run_one_cycle().await {
        Ok(results) => {
            info!("Cycle complete, {} readings", results.len());
            sink.publish(&results)
        }
        Err(e) => {
            report_failure(&e);
            Err(e.into())
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut settings = match &args.config {
        Some(path) => {
            let settings = Settings::from_file(path)?;
            info!("Settings loaded from {}", path.display());
            settings
        }
        None => Settings::default(),
    };
    args.apply(&mut settings);
    settings.validate()?;

    let poller = settings.poller()?;
    let mut sink: Box<dyn TelemetrySink> = match settings.output.format {
        OutputFormat::Log => Box::new(LogSink),
        OutputFormat::Json => Box::new(JsonSink::stdout()),
    };

    if args.once {
        return poll(&poller, sink.as_mut()).await;
    }

    let interval = settings.polling.interval();
    info!(
        "Polling {} every {} seconds ({})",
        poller.config().address,
        interval.as_secs(),
        poller.config().readiness.as_str()
    );
    loop {
        if let Err(e) = poll(&poller, sink.as_mut()).await {
            if e.downcast_ref::<SessionError>().is_none() {
                error!("Failed to publish readings: {:#}", e);
            }
        }
        tokio::time::sleep(interval).await;
    }
}
