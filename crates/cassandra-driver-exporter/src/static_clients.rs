//! Client snapshots read from a YAML file.
//!
//! ```yaml
//! clients:
//!   - name: orders
//!     metrics:
//!       knownHosts: 3
//!       bytesSent: 512
//!       errors:
//!         read-timeouts: 2
//!       requestTimer:
//!         count: 10
//!         mean: 2000000000
//!   - name: warming-up   # registered without metrics
//! ```

use std::path::Path;
use std::sync::Arc;

use cassandra_driver_metrics::DriverMetricsCollector;
use cassandra_driver_metrics::DriverMetricsSnapshot;
use error_stack::Report;
use error_stack::ResultExt;
use serde::Deserialize;
use tracing::info;

use crate::error::ExporterError;

#[derive(Debug, Clone, Deserialize)]
pub struct StaticClient {
    pub name: String,
    /// `None` registers the client with no metrics available.
    #[serde(default)]
    pub metrics: Option<DriverMetricsSnapshot>,
}

#[derive(Debug, Deserialize)]
struct StaticClientsFile {
    #[serde(default)]
    clients: Vec<StaticClient>,
}

pub fn parse(yaml: &str) -> Result<Vec<StaticClient>, Report<ExporterError>> {
    let file: StaticClientsFile = serde_yaml::from_str(yaml).map_err(|e| {
        Report::new(ExporterError::Config {
            message: format!("invalid clients file: {e}"),
        })
    })?;
    Ok(file.clients)
}

pub fn load(path: &Path) -> Result<Vec<StaticClient>, Report<ExporterError>> {
    let yaml = std::fs::read_to_string(path)
        .change_context(ExporterError::Config {
            message: "failed to read clients file".to_string(),
        })
        .attach_printable_lazy(|| format!("path: {}", path.display()))?;
    parse(&yaml).attach_printable_lazy(|| format!("path: {}", path.display()))
}

/// Registers every client; later entries replace earlier ones of the same name.
pub fn register(collector: &DriverMetricsCollector, clients: Vec<StaticClient>) {
    for client in clients {
        info!(
            client = %client.name,
            has_metrics = client.metrics.is_some(),
            "registering static client"
        );
        collector.add_client(client.name, Arc::new(client.metrics));
    }
}

#[cfg(test)]
mod tests {
    use similar_asserts::assert_eq;

    use super::*;

    #[test]
    fn parses_clients_with_and_without_metrics() {
        let clients = parse(
            r#"
clients:
  - name: c1
    metrics:
      knownHosts: 3
      bytesSent: 512
  - name: idle
"#,
        )
        .expect("parse clients");

        assert_eq!(clients.len(), 2);
        assert_eq!(clients[0].name, "c1");
        let metrics = clients[0].metrics.as_ref().expect("c1 metrics");
        assert_eq!(metrics.known_hosts, 3);
        assert_eq!(metrics.bytes_sent, 512);
        assert!(clients[1].metrics.is_none());
    }

    #[test]
    fn empty_document_has_no_clients() {
        let clients = parse("clients: []").expect("parse empty");
        assert!(clients.is_empty());
    }

    #[test]
    fn unknown_error_type_is_rejected() {
        let err = parse(
            r#"
clients:
  - name: c1
    metrics:
      errors:
        cosmic-rays: 1
"#,
        )
        .expect_err("unknown error type should fail");
        assert!(err.current_context().to_string().contains("invalid clients file"));
    }

    #[test]
    fn register_exposes_clients_to_collect() {
        let collector = DriverMetricsCollector::new();
        let clients = parse(
            r#"
clients:
  - name: c1
    metrics:
      knownHosts: 3
  - name: idle
"#,
        )
        .expect("parse clients");
        register(&collector, clients);

        assert_eq!(collector.clients().len(), 2);
        let families = collector.collect();
        let known_hosts = families
            .iter()
            .find(|f| f.name == "cassandra_driver_known_hosts")
            .expect("known hosts family");
        assert_eq!(known_hosts.samples.len(), 1);
        assert_eq!(known_hosts.samples[0].label("client"), Some("c1"));
    }
}
