//! Tracing setup for the exporter binary.

use error_stack::Report;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry;

use crate::error::ExporterError;

/// Installs the global subscriber, writing to stderr.
///
/// `RUST_LOG` overrides `default_level`. Fails if a global subscriber is
/// already set.
pub fn init(default_level: LevelFilter) -> Result<(), Report<ExporterError>> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let fmt_layer = layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(env_filter);

    registry().with(fmt_layer).try_init().map_err(|e| {
        Report::new(ExporterError::Config {
            message: format!("failed to install tracing subscriber: {e}"),
        })
    })
}
