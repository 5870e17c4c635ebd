use std::fmt;
use std::fmt::Write;

use error_stack::ResultExt;

use super::MetricsEncoder;
use crate::error::EncodeError;
use crate::error::EncodeResult;
use crate::family::MetricFamily;
use crate::family::Sample;

/// Prometheus text exposition format, version 0.0.4
pub struct TextEncoder;

impl TextEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsEncoder for TextEncoder {
    fn encode(&self, families: &[MetricFamily]) -> EncodeResult<String> {
        let mut out = String::new();
        for family in families {
            write_family(&mut out, family)
                .change_context(EncodeError::Format)
                .attach_printable_lazy(|| format!("family: {}", family.name))?;
        }
        Ok(out)
    }

    fn content_type(&self) -> &'static str {
        "text/plain; version=0.0.4; charset=utf-8"
    }
}

fn write_family(out: &mut String, family: &MetricFamily) -> fmt::Result {
    writeln!(out, "# HELP {} {}", family.name, escape_help(&family.help))?;
    writeln!(out, "# TYPE {} {}", family.name, family.metric_type)?;
    for sample in &family.samples {
        write_sample(out, sample)?;
    }
    Ok(())
}

fn write_sample(out: &mut String, sample: &Sample) -> fmt::Result {
    out.push_str(&sample.name);
    if !sample.label_names.is_empty() {
        out.push('{');
        for (idx, (name, value)) in sample
            .label_names
            .iter()
            .zip(&sample.label_values)
            .enumerate()
        {
            if idx > 0 {
                out.push(',');
            }
            write!(out, "{}=\"{}\"", name, escape_label_value(value))?;
        }
        out.push('}');
    }
    writeln!(out, " {}", format_value(sample.value))
}

fn escape_help(help: &str) -> String {
    let mut escaped = String::with_capacity(help.len());
    for c in help.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn escape_label_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn format_value(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "+Inf".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use similar_asserts::assert_eq;

    use super::*;
    use crate::family::MetricType;

    fn family(samples: Vec<Sample>) -> MetricFamily {
        MetricFamily {
            name: "test_metric".to_string(),
            help: "Some help".to_string(),
            metric_type: MetricType::Gauge,
            label_names: vec!["client".to_string()],
            samples,
        }
    }

    fn sample(client: &str, value: f64) -> Sample {
        Sample::new(
            "test_metric",
            vec!["client".to_string()],
            vec![client.to_string()],
            value,
        )
    }

    #[test]
    fn test_encode_family_with_samples() {
        let result = TextEncoder::new()
            .encode(&[family(vec![sample("c1", 3.0), sample("c2", 0.5)])])
            .expect("encode");

        assert_eq!(
            result,
            "# HELP test_metric Some help\n\
             # TYPE test_metric gauge\n\
             test_metric{client=\"c1\"} 3\n\
             test_metric{client=\"c2\"} 0.5\n"
        );
    }

    #[test]
    fn test_encode_empty_family_keeps_header() {
        let result = TextEncoder::new().encode(&[family(vec![])]).expect("encode");
        assert_eq!(
            result,
            "# HELP test_metric Some help\n# TYPE test_metric gauge\n"
        );
    }

    #[test]
    fn test_encode_multiple_labels() {
        let mut f = family(vec![Sample::new(
            "test_metric",
            vec!["client".to_string(), "quantile".to_string()],
            vec!["c1".to_string(), "0.99".to_string()],
            0.25,
        )]);
        f.metric_type = MetricType::Untyped;

        let result = TextEncoder::new().encode(&[f]).expect("encode");
        assert!(result.contains("# TYPE test_metric untyped\n"));
        assert!(result.contains("test_metric{client=\"c1\",quantile=\"0.99\"} 0.25\n"));
    }

    #[test]
    fn test_encode_sample_without_labels() {
        let f = family(vec![Sample::new("test_metric", vec![], vec![], 1.0)]);
        let result = TextEncoder::new().encode(&[f]).expect("encode");
        assert!(result.ends_with("test_metric 1\n"));
    }

    #[test]
    fn test_label_values_are_escaped() {
        let result = TextEncoder::new()
            .encode(&[family(vec![sample("a\"b\\c\nd", 1.0)])])
            .expect("encode");
        assert!(result.contains(r#"test_metric{client="a\"b\\c\nd"} 1"#));
    }

    #[test]
    fn test_help_is_escaped() {
        let mut f = family(vec![]);
        f.help = "line one\nline \\two".to_string();
        let result = TextEncoder::new().encode(&[f]).expect("encode");
        assert!(result.starts_with(r"# HELP test_metric line one\nline \\two"));
    }

    #[test]
    fn test_special_float_values() {
        assert_eq!(format_value(f64::NAN), "NaN");
        assert_eq!(format_value(f64::INFINITY), "+Inf");
        assert_eq!(format_value(f64::NEG_INFINITY), "-Inf");
        assert_eq!(format_value(-1.0), "-1");
        assert_eq!(format_value(512.0), "512");
        assert_eq!(format_value(0.0075), "0.0075");
    }
}
