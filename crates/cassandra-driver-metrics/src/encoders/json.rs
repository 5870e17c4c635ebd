use error_stack::Report;

use super::MetricsEncoder;
use crate::error::EncodeError;
use crate::error::EncodeResult;
use crate::family::MetricFamily;

/// JSON encoder for metric families
pub struct JsonEncoder;

impl JsonEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsEncoder for JsonEncoder {
    fn encode(&self, families: &[MetricFamily]) -> EncodeResult<String> {
        let mut body = serde_json::to_string(families).map_err(|e| {
            Report::new(EncodeError::Serialization {
                message: e.to_string(),
            })
        })?;
        body.push('\n');
        Ok(body)
    }

    fn content_type(&self) -> &'static str {
        "application/json"
    }
}
