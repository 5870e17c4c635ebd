//! Prometheus scrape endpoint for Cassandra driver metrics.
//!
//! Wraps a [`cassandra_driver_metrics::DriverMetricsCollector`] in a poem
//! server. Driver instances are registered on the collector by the embedding
//! application, or from a static YAML file via [`static_clients`].

pub mod config;
pub mod error;
pub mod logging;
pub mod server;
pub mod static_clients;

pub use config::ExporterArgs;
pub use error::ExporterError;
pub use server::MetricsServer;
