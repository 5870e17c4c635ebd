//! Scrape-time assembly of driver metric families.

use tracing::debug;
use tracing::trace;

use crate::family::MetricFamily;
use crate::family::ValueFamilyBuilder;
use crate::registry::ClientRegistry;
use crate::registry::SharedSource;
use crate::source::DriverMetrics;
use crate::source::ErrorKind;
use crate::timer::TimerSampleBuilder;

/// Label carried first by every exported sample.
pub const CLIENT_LABEL: &str = "client";
/// Extra label of the errors family.
pub const ERROR_TYPE_LABEL: &str = "error_type";
/// Common prefix of every exported family.
pub const METRIC_PREFIX: &str = "cassandra_driver_";

const BASE_LABELS: &[&str] = &[CLIENT_LABEL];
const ERROR_LABELS: &[&str] = &[CLIENT_LABEL, ERROR_TYPE_LABEL];

/// Exports driver metrics of any number of named client instances.
///
/// ```
/// use std::sync::Arc;
///
/// use cassandra_driver_metrics::DriverMetricsCollector;
/// use cassandra_driver_metrics::DriverMetricsSnapshot;
///
/// let collector = DriverMetricsCollector::new();
/// collector.add_client("global", Arc::new(DriverMetricsSnapshot::default()));
///
/// let families = collector.collect();
/// assert!(families.iter().all(|f| f.name.starts_with("cassandra_driver_")));
/// ```
///
/// Clones share the same set of clients.
#[derive(Debug, Clone, Default)]
pub struct DriverMetricsCollector {
    clients: ClientRegistry,
}

impl DriverMetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the client instance, or replaces the one registered under the
    /// same name. `name` becomes the `client` label value.
    pub fn add_client(&self, name: impl Into<String>, source: SharedSource) {
        self.clients.add_client(name, source);
    }

    pub fn remove_client(&self, name: &str) {
        self.clients.remove_client(name);
    }

    pub fn clear(&self) {
        self.clients.clear();
    }

    pub fn clients(&self) -> &ClientRegistry {
        &self.clients
    }

    /// Runs one collection pass.
    ///
    /// Always returns the full set of families in a fixed order, with the
    /// request timer family last. Clients without metrics add no samples.
    pub fn collect(&self) -> Vec<MetricFamily> {
        let clients = self.clients.snapshot();
        let mut pass = CollectionPass::new();
        let mut skipped = 0usize;

        for (name, source) in &clients {
            match source.metrics() {
                Some(metrics) => pass.add_client(name, metrics),
                None => {
                    trace!(client = %name, "client has no metrics, skipping");
                    skipped += 1;
                }
            }
        }

        let families = pass.finish();
        debug!(
            clients = clients.len(),
            skipped,
            families = families.len(),
            "collected driver metrics"
        );
        families
    }
}

/// Per-call accumulators; never shared between passes.
struct CollectionPass {
    known_hosts: ValueFamilyBuilder,
    connected_to_hosts: ValueFamilyBuilder,
    open_connections: ValueFamilyBuilder,
    trashed_connections: ValueFamilyBuilder,
    in_flight_requests: ValueFamilyBuilder,
    executor_queue_depth: ValueFamilyBuilder,
    blocking_executor_queue_depth: ValueFamilyBuilder,
    reconnection_scheduler_queue_size: ValueFamilyBuilder,
    task_scheduler_queue_size: ValueFamilyBuilder,
    bytes_sent: ValueFamilyBuilder,
    bytes_received: ValueFamilyBuilder,
    errors: ValueFamilyBuilder,
    request_time: TimerSampleBuilder,
}

impl CollectionPass {
    fn new() -> Self {
        Self {
            known_hosts: ValueFamilyBuilder::gauge(
                "cassandra_driver_known_hosts",
                "The number of Cassandra hosts currently known by the driver",
                BASE_LABELS,
            ),
            connected_to_hosts: ValueFamilyBuilder::gauge(
                "cassandra_driver_connected_to_hosts",
                "The number of Cassandra hosts the driver is currently connected to",
                BASE_LABELS,
            ),
            open_connections: ValueFamilyBuilder::gauge(
                "cassandra_driver_open_connections",
                "The total number of currently opened connections to Cassandra hosts",
                BASE_LABELS,
            ),
            trashed_connections: ValueFamilyBuilder::gauge(
                "cassandra_driver_trashed_connections",
                "The total number of currently trashed connections to Cassandra hosts",
                BASE_LABELS,
            ),
            in_flight_requests: ValueFamilyBuilder::gauge(
                "cassandra_driver_in_flight_requests",
                "The total number of in flight requests to Cassandra hosts",
                BASE_LABELS,
            ),
            executor_queue_depth: ValueFamilyBuilder::gauge(
                "cassandra_driver_executor_queue_depth",
                "The number of queued up tasks in the main internal executor, or -1, if that number is unknown",
                BASE_LABELS,
            ),
            blocking_executor_queue_depth: ValueFamilyBuilder::gauge(
                "cassandra_driver_blocking_executor_queue_depth",
                "The number of queued up tasks in the blocking executor, or -1, if that number is unknown",
                BASE_LABELS,
            ),
            reconnection_scheduler_queue_size: ValueFamilyBuilder::gauge(
                "cassandra_driver_reconnection_scheduler_queue_size",
                "The size of the work queue for the reconnection executor, or -1, if that number is unknown",
                BASE_LABELS,
            ),
            task_scheduler_queue_size: ValueFamilyBuilder::gauge(
                "cassandra_driver_task_scheduler_queue_size",
                "The size of the work queue for the scheduled tasks executor, or -1, if that number is unknown",
                BASE_LABELS,
            ),
            bytes_sent: ValueFamilyBuilder::counter(
                "cassandra_driver_sent_bytes_total",
                "The number of bytes sent so far",
                BASE_LABELS,
            ),
            bytes_received: ValueFamilyBuilder::counter(
                "cassandra_driver_received_bytes_total",
                "The number of bytes received so far",
                BASE_LABELS,
            ),
            errors: ValueFamilyBuilder::counter(
                "cassandra_driver_errors_total",
                "Encountered error events",
                ERROR_LABELS,
            ),
            request_time: TimerSampleBuilder::new(
                "cassandra_driver_request_time_seconds",
                "Exposes the rate and latency for user requests",
                BASE_LABELS,
            ),
        }
    }

    fn add_client(&mut self, name: &str, metrics: &dyn DriverMetrics) {
        let labels = [name];

        self.known_hosts
            .add_metric(&labels, metrics.known_hosts() as f64);
        self.connected_to_hosts
            .add_metric(&labels, metrics.connected_to_hosts() as f64);
        self.open_connections
            .add_metric(&labels, metrics.open_connections() as f64);
        self.trashed_connections
            .add_metric(&labels, metrics.trashed_connections() as f64);
        self.in_flight_requests
            .add_metric(&labels, metrics.in_flight_requests() as f64);

        self.executor_queue_depth
            .add_metric(&labels, metrics.executor_queue_depth() as f64);
        self.blocking_executor_queue_depth
            .add_metric(&labels, metrics.blocking_executor_queue_depth() as f64);
        self.reconnection_scheduler_queue_size
            .add_metric(&labels, metrics.reconnection_scheduler_queue_size() as f64);
        self.task_scheduler_queue_size
            .add_metric(&labels, metrics.task_scheduler_queue_size() as f64);

        self.bytes_sent
            .add_metric(&labels, metrics.bytes_sent() as f64);
        self.bytes_received
            .add_metric(&labels, metrics.bytes_received() as f64);

        for kind in ErrorKind::ALL {
            self.errors
                .add_metric(&[name, kind.as_str()], metrics.error_count(kind) as f64);
        }

        self.request_time
            .add_sample(&labels, &metrics.request_timer());
    }

    fn finish(self) -> Vec<MetricFamily> {
        vec![
            self.known_hosts.build(),
            self.connected_to_hosts.build(),
            self.open_connections.build(),
            self.trashed_connections.build(),
            self.in_flight_requests.build(),
            self.executor_queue_depth.build(),
            self.blocking_executor_queue_depth.build(),
            self.reconnection_scheduler_queue_size.build(),
            self.task_scheduler_queue_size.build(),
            self.bytes_sent.build(),
            self.bytes_received.build(),
            self.errors.build(),
            self.request_time.build(),
        ]
    }
}
