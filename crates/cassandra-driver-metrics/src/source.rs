//! Read-only view of the instrumentation a driver instance exposes.
//!
//! The collector never owns or mutates these objects; it reads whatever the
//! driver currently reports, once per scrape.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Error, retry and ignore counters tracked by the driver.
///
/// The set is closed; [`ErrorKind::ALL`] fixes the export order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    ConnectionErrors,
    AuthenticationErrors,
    WriteTimeouts,
    ReadTimeouts,
    Unavailables,
    ClientTimeouts,
    OtherErrors,
    Retries,
    RetriesOnWriteTimeout,
    RetriesOnReadTimeout,
    RetriesOnUnavailable,
    RetriesOnClientTimeout,
    RetriesOnConnectionError,
    RetriesOnOtherErrors,
    Ignores,
    IgnoresOnWriteTimeout,
    IgnoresOnReadTimeout,
    IgnoresOnUnavailable,
    IgnoresOnClientTimeout,
    IgnoresOnConnectionError,
    IgnoresOnOtherErrors,
    SpeculativeExecutions,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 22] = [
        ErrorKind::ConnectionErrors,
        ErrorKind::AuthenticationErrors,
        ErrorKind::WriteTimeouts,
        ErrorKind::ReadTimeouts,
        ErrorKind::Unavailables,
        ErrorKind::ClientTimeouts,
        ErrorKind::OtherErrors,
        ErrorKind::Retries,
        ErrorKind::RetriesOnWriteTimeout,
        ErrorKind::RetriesOnReadTimeout,
        ErrorKind::RetriesOnUnavailable,
        ErrorKind::RetriesOnClientTimeout,
        ErrorKind::RetriesOnConnectionError,
        ErrorKind::RetriesOnOtherErrors,
        ErrorKind::Ignores,
        ErrorKind::IgnoresOnWriteTimeout,
        ErrorKind::IgnoresOnReadTimeout,
        ErrorKind::IgnoresOnUnavailable,
        ErrorKind::IgnoresOnClientTimeout,
        ErrorKind::IgnoresOnConnectionError,
        ErrorKind::IgnoresOnOtherErrors,
        ErrorKind::SpeculativeExecutions,
    ];

    /// The `error_type` label value.
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorKind::ConnectionErrors => "connection-errors",
            ErrorKind::AuthenticationErrors => "authentication-errors",
            ErrorKind::WriteTimeouts => "write-timeouts",
            ErrorKind::ReadTimeouts => "read-timeouts",
            ErrorKind::Unavailables => "unavailables",
            ErrorKind::ClientTimeouts => "client-timeouts",
            ErrorKind::OtherErrors => "other-errors",
            ErrorKind::Retries => "retries",
            ErrorKind::RetriesOnWriteTimeout => "retries-on-write-timeout",
            ErrorKind::RetriesOnReadTimeout => "retries-on-read-timeout",
            ErrorKind::RetriesOnUnavailable => "retries-on-unavailable",
            ErrorKind::RetriesOnClientTimeout => "retries-on-client-timeout",
            ErrorKind::RetriesOnConnectionError => "retries-on-connection-error",
            ErrorKind::RetriesOnOtherErrors => "retries-on-other-errors",
            ErrorKind::Ignores => "ignores",
            ErrorKind::IgnoresOnWriteTimeout => "ignores-on-write-timeout",
            ErrorKind::IgnoresOnReadTimeout => "ignores-on-read-timeout",
            ErrorKind::IgnoresOnUnavailable => "ignores-on-unavailable",
            ErrorKind::IgnoresOnClientTimeout => "ignores-on-client-timeout",
            ErrorKind::IgnoresOnConnectionError => "ignores-on-connection-error",
            ErrorKind::IgnoresOnOtherErrors => "ignores-on-other-errors",
            ErrorKind::SpeculativeExecutions => "speculative-executions",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point-in-time statistics of the request timer.
///
/// Everything except `count` is in nanoseconds. The decaying reservoir that
/// produces these numbers lives in the driver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerSnapshot {
    pub count: u64,
    pub mean: f64,
    pub min: f64,
    pub median: f64,
    pub p75: f64,
    pub p95: f64,
    pub p98: f64,
    pub p99: f64,
    pub p999: f64,
    pub max: f64,
}

/// Live metrics of one driver instance.
///
/// Queue-depth gauges report `-1` when the driver cannot tell.
pub trait DriverMetrics {
    fn known_hosts(&self) -> i64;
    fn connected_to_hosts(&self) -> i64;
    fn open_connections(&self) -> i64;
    fn trashed_connections(&self) -> i64;
    fn in_flight_requests(&self) -> i64;

    fn executor_queue_depth(&self) -> i64;
    fn blocking_executor_queue_depth(&self) -> i64;
    fn reconnection_scheduler_queue_size(&self) -> i64;
    fn task_scheduler_queue_size(&self) -> i64;

    fn bytes_sent(&self) -> u64;
    fn bytes_received(&self) -> u64;

    fn error_count(&self, kind: ErrorKind) -> u64;

    fn request_timer(&self) -> TimerSnapshot;
}

/// A registered driver instance.
///
/// `metrics()` returns `None` while the instance has no metrics to offer,
/// for example when metrics are disabled or the instance is not initialised
/// yet. Such a client contributes no samples.
pub trait MetricsSource: Send + Sync {
    fn metrics(&self) -> Option<&dyn DriverMetrics>;
}
