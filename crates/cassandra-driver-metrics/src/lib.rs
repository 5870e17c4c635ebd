//! Exports Cassandra driver metrics in the Prometheus exposition format.
//!
//! Any number of driver instances can be registered with one
//! [`DriverMetricsCollector`] under distinct names. Every exported series
//! carries the instance name in its `client` label, and every family name
//! starts with `cassandra_driver_`.
//!
//! Gauges and counters are exported as read. The request timer becomes an
//! untyped family with `quantile`-labelled samples plus `_count` and `_mean`
//! series, all durations in seconds.

pub mod collector;
pub mod encoders;
pub mod error;
pub mod family;
pub mod registry;
pub mod snapshot;
pub mod source;
pub mod timer;

pub use collector::DriverMetricsCollector;
pub use encoders::create_encoder;
pub use encoders::MetricsEncoder;
pub use error::EncodeError;
pub use error::EncodeResult;
pub use family::MetricFamily;
pub use family::MetricType;
pub use family::Sample;
pub use registry::ClientRegistry;
pub use registry::SharedSource;
pub use snapshot::DriverMetricsSnapshot;
pub use source::DriverMetrics;
pub use source::ErrorKind;
pub use source::MetricsSource;
pub use source::TimerSnapshot;
pub use timer::Quantile;
pub use timer::TimerSampleBuilder;
