use thiserror::Error;

/// Top-level error type for the Talento backend.
///
/// Subsystem crates define their own error types and implement
/// `From<SubsystemError> for TalentoError` so that the `?` operator works
/// across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TalentoError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Document error: {0}")]
    Document(String),

    #[error("Action error: {0}")]
    Action(String),

    #[error("Unknown permission tag: {0}")]
    UnknownPermission(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for TalentoError {
    fn from(err: toml::de::Error) -> Self {
        TalentoError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for TalentoError {
    fn from(err: toml::ser::Error) -> Self {
        TalentoError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for TalentoError {
    fn from(err: serde_json::Error) -> Self {
        TalentoError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Talento operations.
pub type Result<T> = std::result::Result<T, TalentoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TalentoError::Config("missing field".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing field");

        let err = TalentoError::UnknownPermission("becario".to_string());
        assert_eq!(err.to_string(), "Unknown permission tag: becario");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TalentoError = io_err.into();
        assert!(matches!(err, TalentoError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: TalentoError = json_err.into();
        assert!(matches!(err, TalentoError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("[[[").unwrap_err();
        let err: TalentoError = toml_err.into();
        assert!(matches!(err, TalentoError::Config(_)));
    }
}
