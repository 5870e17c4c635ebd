//! Metric families and samples as handed to an exposition encoder.

use serde::Serialize;

/// Declared type of a metric family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum MetricType {
    #[display("gauge")]
    Gauge,
    #[display("counter")]
    Counter,
    /// Mixes quantile, `_count` and `_mean` samples under one family.
    #[display("untyped")]
    Untyped,
}

/// One labelled observation.
///
/// `label_names` and `label_values` are positional and always have the same
/// length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    pub name: String,
    pub label_names: Vec<String>,
    pub label_values: Vec<String>,
    pub value: f64,
}

impl Sample {
    pub fn new(
        name: impl Into<String>,
        label_names: Vec<String>,
        label_values: Vec<String>,
        value: f64,
    ) -> Self {
        debug_assert_eq!(
            label_names.len(),
            label_values.len(),
            "label names and values must pair up"
        );
        Self {
            name: name.into(),
            label_names,
            label_values,
            value,
        }
    }

    /// Returns the value of the label `name`, if the sample carries it.
    pub fn label(&self, name: &str) -> Option<&str> {
        self.label_names
            .iter()
            .position(|n| n == name)
            .map(|idx| self.label_values[idx].as_str())
    }
}

/// A named group of samples sharing a type and a label schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricFamily {
    pub name: String,
    pub help: String,
    #[serde(rename = "type")]
    pub metric_type: MetricType,
    pub label_names: Vec<String>,
    pub samples: Vec<Sample>,
}

/// Accumulates gauge or counter samples for a single family.
///
/// Every sample carries the family name unchanged.
#[derive(Debug)]
pub struct ValueFamilyBuilder {
    name: &'static str,
    help: &'static str,
    metric_type: MetricType,
    label_names: Vec<String>,
    samples: Vec<Sample>,
}

impl ValueFamilyBuilder {
    pub fn gauge(name: &'static str, help: &'static str, label_names: &[&str]) -> Self {
        Self::new(name, help, MetricType::Gauge, label_names)
    }

    pub fn counter(name: &'static str, help: &'static str, label_names: &[&str]) -> Self {
        Self::new(name, help, MetricType::Counter, label_names)
    }

    fn new(
        name: &'static str,
        help: &'static str,
        metric_type: MetricType,
        label_names: &[&str],
    ) -> Self {
        Self {
            name,
            help,
            metric_type,
            label_names: label_names.iter().map(|l| l.to_string()).collect(),
            samples: Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Appends one sample; `label_values` must follow the family's label order.
    pub fn add_metric(&mut self, label_values: &[&str], value: f64) {
        self.samples.push(Sample::new(
            self.name,
            self.label_names.clone(),
            label_values.iter().map(|v| v.to_string()).collect(),
            value,
        ));
    }

    pub fn build(self) -> MetricFamily {
        MetricFamily {
            name: self.name.to_string(),
            help: self.help.to_string(),
            metric_type: self.metric_type,
            label_names: self.label_names,
            samples: self.samples,
        }
    }
}

#[cfg(test)]
mod tests {
    use similar_asserts::assert_eq;

    use super::*;

    #[test]
    fn metric_type_renders_lowercase() {
        assert_eq!(MetricType::Gauge.to_string(), "gauge");
        assert_eq!(MetricType::Counter.to_string(), "counter");
        assert_eq!(MetricType::Untyped.to_string(), "untyped");
    }

    #[test]
    fn gauge_builder_keeps_insertion_order() {
        let mut builder = ValueFamilyBuilder::gauge("test_gauge", "A gauge", &["client"]);
        builder.add_metric(&["b"], 2.0);
        builder.add_metric(&["a"], -1.0);

        let family = builder.build();
        assert_eq!(family.metric_type, MetricType::Gauge);
        assert_eq!(family.label_names, vec!["client".to_string()]);
        let clients: Vec<_> = family
            .samples
            .iter()
            .map(|s| s.label("client").unwrap_or_default())
            .collect();
        assert_eq!(clients, vec!["b", "a"]);
        assert_eq!(family.samples[1].value, -1.0);
    }

    #[test]
    fn counter_builder_carries_extra_labels() {
        let mut builder =
            ValueFamilyBuilder::counter("test_total", "A counter", &["client", "kind"]);
        builder.add_metric(&["c1", "x"], 7.0);

        let family = builder.build();
        let sample = &family.samples[0];
        assert_eq!(sample.name, "test_total");
        assert_eq!(sample.label("client"), Some("c1"));
        assert_eq!(sample.label("kind"), Some("x"));
        assert_eq!(sample.label("missing"), None);
    }

    #[test]
    fn empty_builder_still_produces_family() {
        let family = ValueFamilyBuilder::gauge("idle", "Nothing yet", &["client"]).build();
        assert_eq!(family.name, "idle");
        assert_eq!(family.help, "Nothing yet");
        assert!(family.samples.is_empty());
    }
}
