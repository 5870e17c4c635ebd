//! Plain-data [`DriverMetrics`] implementation.
//!
//! Useful when the driver hands out copies of its counters rather than live
//! objects, and for static fixtures.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::source::DriverMetrics;
use crate::source::ErrorKind;
use crate::source::MetricsSource;
use crate::source::TimerSnapshot;

/// Frozen copy of every value a driver instance reports.
///
/// Error kinds absent from `errors` read as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DriverMetricsSnapshot {
    pub known_hosts: i64,
    pub connected_to_hosts: i64,
    pub open_connections: i64,
    pub trashed_connections: i64,
    pub in_flight_requests: i64,
    pub executor_queue_depth: i64,
    pub blocking_executor_queue_depth: i64,
    pub reconnection_scheduler_queue_size: i64,
    pub task_scheduler_queue_size: i64,
    pub bytes_sent: u64,
    pub bytes_received: u64,
    pub errors: BTreeMap<ErrorKind, u64>,
    pub request_timer: TimerSnapshot,
}

impl DriverMetrics for DriverMetricsSnapshot {
    fn known_hosts(&self) -> i64 {
        self.known_hosts
    }

    fn connected_to_hosts(&self) -> i64 {
        self.connected_to_hosts
    }

    fn open_connections(&self) -> i64 {
        self.open_connections
    }

    fn trashed_connections(&self) -> i64 {
        self.trashed_connections
    }

    fn in_flight_requests(&self) -> i64 {
        self.in_flight_requests
    }

    fn executor_queue_depth(&self) -> i64 {
        self.executor_queue_depth
    }

    fn blocking_executor_queue_depth(&self) -> i64 {
        self.blocking_executor_queue_depth
    }

    fn reconnection_scheduler_queue_size(&self) -> i64 {
        self.reconnection_scheduler_queue_size
    }

    fn task_scheduler_queue_size(&self) -> i64 {
        self.task_scheduler_queue_size
    }

    fn bytes_sent(&self) -> u64 {
        self.bytes_sent
    }

    fn bytes_received(&self) -> u64 {
        self.bytes_received
    }

    fn error_count(&self, kind: ErrorKind) -> u64 {
        self.errors.get(&kind).copied().unwrap_or(0)
    }

    fn request_timer(&self) -> TimerSnapshot {
        self.request_timer
    }
}

impl MetricsSource for DriverMetricsSnapshot {
    fn metrics(&self) -> Option<&dyn DriverMetrics> {
        Some(self)
    }
}

impl MetricsSource for Option<DriverMetricsSnapshot> {
    fn metrics(&self) -> Option<&dyn DriverMetrics> {
        self.as_ref().map(|m| m as &dyn DriverMetrics)
    }
}
