//! Renders timer snapshots as a summary-like untyped family.
//!
//! For a family named `x` each label-value tuple yields eight `x` samples
//! with an extra `quantile` label, one `x_count` and one `x_mean`. Durations
//! are converted from nanoseconds to seconds; the count is left as is.

use crate::family::MetricFamily;
use crate::family::MetricType;
use crate::family::Sample;
use crate::source::TimerSnapshot;

const NANOS_PER_SECOND: f64 = 1_000_000_000.0;

const QUANTILE_LABEL: &str = "quantile";

/// Quantiles exported for every timer, in export order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantile {
    Min,
    Median,
    P75,
    P95,
    P98,
    P99,
    P999,
    Max,
}

impl Quantile {
    pub const ALL: [Quantile; 8] = [
        Quantile::Min,
        Quantile::Median,
        Quantile::P75,
        Quantile::P95,
        Quantile::P98,
        Quantile::P99,
        Quantile::P999,
        Quantile::Max,
    ];

    /// Value of the `quantile` label.
    pub const fn label(self) -> &'static str {
        match self {
            Quantile::Min => "0",
            Quantile::Median => "0.5",
            Quantile::P75 => "0.75",
            Quantile::P95 => "0.95",
            Quantile::P98 => "0.98",
            Quantile::P99 => "0.99",
            Quantile::P999 => "0.999",
            Quantile::Max => "1",
        }
    }

    /// Picks this quantile out of a snapshot, still in nanoseconds.
    pub fn nanos(self, snapshot: &TimerSnapshot) -> f64 {
        match self {
            Quantile::Min => snapshot.min,
            Quantile::Median => snapshot.median,
            Quantile::P75 => snapshot.p75,
            Quantile::P95 => snapshot.p95,
            Quantile::P98 => snapshot.p98,
            Quantile::P99 => snapshot.p99,
            Quantile::P999 => snapshot.p999,
            Quantile::Max => snapshot.max,
        }
    }
}

fn nanos_to_seconds(nanos: f64) -> f64 {
    nanos / NANOS_PER_SECOND
}

#[derive(Debug)]
pub struct TimerSampleBuilder {
    name: &'static str,
    help: &'static str,
    label_names: Vec<String>,
    quantile_label_names: Vec<String>,
    quantile_samples: Vec<Sample>,
    count_samples: Vec<Sample>,
    mean_samples: Vec<Sample>,
}

impl TimerSampleBuilder {
    pub fn new(name: &'static str, help: &'static str, label_names: &[&str]) -> Self {
        let label_names: Vec<String> = label_names.iter().map(|l| l.to_string()).collect();
        let mut quantile_label_names = label_names.clone();
        quantile_label_names.push(QUANTILE_LABEL.to_string());
        Self {
            name,
            help,
            label_names,
            quantile_label_names,
            quantile_samples: Vec::new(),
            count_samples: Vec::new(),
            mean_samples: Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Adds the ten samples for one label-value tuple.
    pub fn add_sample(&mut self, label_values: &[&str], snapshot: &TimerSnapshot) {
        let label_values: Vec<String> = label_values.iter().map(|v| v.to_string()).collect();

        for quantile in Quantile::ALL {
            let mut values = label_values.clone();
            values.push(quantile.label().to_string());
            self.quantile_samples.push(Sample::new(
                self.name,
                self.quantile_label_names.clone(),
                values,
                nanos_to_seconds(quantile.nanos(snapshot)),
            ));
        }

        self.count_samples.push(Sample::new(
            format!("{}_count", self.name),
            self.label_names.clone(),
            label_values.clone(),
            snapshot.count as f64,
        ));
        self.mean_samples.push(Sample::new(
            format!("{}_mean", self.name),
            self.label_names.clone(),
            label_values,
            nanos_to_seconds(snapshot.mean),
        ));
    }

    /// Quantile samples first, then counts, then means.
    pub fn build(self) -> MetricFamily {
        let mut samples = self.quantile_samples;
        samples.extend(self.count_samples);
        samples.extend(self.mean_samples);
        MetricFamily {
            name: self.name.to_string(),
            help: self.help.to_string(),
            metric_type: MetricType::Untyped,
            label_names: self.label_names,
            samples,
        }
    }
}
