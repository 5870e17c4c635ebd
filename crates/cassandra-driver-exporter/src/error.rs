use core::error::Error;

/// Exporter errors
#[derive(Debug, derive_more::Display)]
pub enum ExporterError {
    #[display("Configuration error: {message}")]
    Config { message: String },
    #[display("Server error: {message}")]
    Server { message: String },
}

impl Error for ExporterError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exporter_error_display_formatting() {
        let config = ExporterError::Config {
            message: "missing file".to_string(),
        };
        assert_eq!(config.to_string(), "Configuration error: missing file");

        let server = ExporterError::Server {
            message: "address in use".to_string(),
        };
        assert_eq!(server.to_string(), "Server error: address in use");
    }
}
