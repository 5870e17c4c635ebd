use core::error::Error;

use error_stack::Report;

pub type EncodeResult<T> = Result<T, Report<EncodeError>>;

/// Errors raised while rendering collected families.
#[derive(Debug, derive_more::Display)]
pub enum EncodeError {
    #[display("Failed to write exposition text")]
    Format,
    #[display("Failed to serialize metric families: {message}")]
    Serialization { message: String },
}

impl Error for EncodeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_error_display_formatting() {
        assert_eq!(
            EncodeError::Format.to_string(),
            "Failed to write exposition text"
        );
        let serialization = EncodeError::Serialization {
            message: "bad float".to_string(),
        };
        assert_eq!(
            serialization.to_string(),
            "Failed to serialize metric families: bad float"
        );
    }
}
