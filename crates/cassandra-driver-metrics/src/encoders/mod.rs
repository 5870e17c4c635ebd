use crate::error::EncodeResult;
use crate::family::MetricFamily;

pub mod json;
pub mod text;

/// Trait for rendering collected families into a scrape response body
pub trait MetricsEncoder: Send + Sync {
    /// Encode every family, in the given order
    fn encode(&self, families: &[MetricFamily]) -> EncodeResult<String>;

    /// Value of the `Content-Type` header for the encoded body
    fn content_type(&self) -> &'static str;
}

/// Factory function to create encoders based on format string
pub fn create_encoder(format: &str) -> Box<dyn MetricsEncoder> {
    match format.to_lowercase().as_str() {
        "json" => Box::new(json::JsonEncoder::new()),
        _ => Box::new(text::TextEncoder::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::family::MetricType;
    use crate::family::Sample;

    fn sample_families() -> Vec<MetricFamily> {
        vec![MetricFamily {
            name: "test_gauge".to_string(),
            help: "A test gauge".to_string(),
            metric_type: MetricType::Gauge,
            label_names: vec!["client".to_string()],
            samples: vec![Sample::new(
                "test_gauge",
                vec!["client".to_string()],
                vec!["c1".to_string()],
                3.0,
            )],
        }]
    }

    #[test]
    fn test_create_encoder_json() {
        let encoder = create_encoder("json");
        let result = encoder.encode(&sample_families()).expect("encode json");
        assert!(result.starts_with('['));
        assert!(result.contains("test_gauge"));
        assert_eq!(encoder.content_type(), "application/json");
    }

    #[test]
    fn test_create_encoder_json_is_case_insensitive() {
        let encoder = create_encoder("JSON");
        assert_eq!(encoder.content_type(), "application/json");
    }

    #[test]
    fn test_create_encoder_text() {
        let encoder = create_encoder("text");
        let result = encoder.encode(&sample_families()).expect("encode text");
        assert!(result.contains("# TYPE test_gauge gauge"));
        assert!(encoder.content_type().starts_with("text/plain"));
    }

    #[test]
    fn test_create_encoder_default() {
        let encoder = create_encoder("unknown_format");
        let result = encoder.encode(&sample_families()).expect("encode default");
        assert!(result.contains("test_gauge{client=\"c1\"} 3"));
    }
}
