//! Tracing subscriber setup.
//!
//! JSON output uses the Bunyan layout so log shippers can parse it; the pretty format is
//! for local runs. `RUST_LOG` wins over the configured level when set.

use tracing::subscriber::set_global_default;
use tracing::Subscriber;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry};

use crate::config::LogFormat;
use crate::error::AppError;

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Bunyan JSON subscriber writing to `sink`.
pub fn json_subscriber<Sink>(
    name: String,
    default_level: &str,
    sink: Sink,
) -> impl Subscriber + Send + Sync
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    Registry::default()
        .with(env_filter(default_level))
        .with(JsonStorageLayer)
        .with(BunyanFormattingLayer::new(name, sink))
}

/// Human-readable subscriber writing to `sink`.
pub fn pretty_subscriber<Sink>(default_level: &str, sink: Sink) -> impl Subscriber + Send + Sync
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    Registry::default()
        .with(env_filter(default_level))
        .with(tracing_subscriber::fmt::layer().with_target(true).with_writer(sink))
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init(name: &str, format: LogFormat, default_level: &str) -> Result<(), AppError> {
    match format {
        LogFormat::Json => set_global_default(json_subscriber(
            name.to_string(),
            default_level,
            std::io::stderr,
        ))?,
        LogFormat::Pretty => set_global_default(pretty_subscriber(default_level, std::io::stderr))?,
    }
    Ok(())
}
