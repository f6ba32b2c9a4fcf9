//! Error types for parlo.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParloError {
    // Configuration errors
    #[error("Configuration file not found at {path}")]
    ConfigFileNotFound { path: String },

    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Missing required environment variable {variable}")]
    MissingCredential { variable: String },

    // Session lifecycle errors
    #[error("Recognition session is already running")]
    SessionAlreadyRunning,

    #[error("Recognition session is not running")]
    SessionNotRunning,

    #[error("Session controller has already run; it is not restartable")]
    SessionAlreadyStopped,

    // Engine boundary errors
    #[error("Translation engine error: {message}")]
    Engine { message: String },

    #[error("Speech synthesis failed: {message}")]
    Synthesis { message: String },

    #[error("Synthesis queue is closed")]
    QueueClosed,

    // Session script errors
    #[error("Script error at line {line}: {message}")]
    Script { line: usize, message: String },

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, ParloError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_config_file_not_found_display() {
        let error = ParloError::ConfigFileNotFound {
            path: "/path/to/config.toml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found at /path/to/config.toml"
        );
    }

    #[test]
    fn test_config_invalid_value_display() {
        let error = ParloError::ConfigInvalidValue {
            key: "synthesis.speak_language".to_string(),
            message: "must be one of the configured targets".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid configuration value for synthesis.speak_language: must be one of the configured targets"
        );
    }

    #[test]
    fn test_missing_credential_display() {
        let error = ParloError::MissingCredential {
            variable: "PARLO_SPEECH_KEY".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Missing required environment variable PARLO_SPEECH_KEY"
        );
    }

    #[test]
    fn test_session_lifecycle_display() {
        assert_eq!(
            ParloError::SessionAlreadyRunning.to_string(),
            "Recognition session is already running"
        );
        assert_eq!(
            ParloError::SessionNotRunning.to_string(),
            "Recognition session is not running"
        );
        assert_eq!(
            ParloError::SessionAlreadyStopped.to_string(),
            "Session controller has already run; it is not restartable"
        );
    }

    #[test]
    fn test_engine_display() {
        let error = ParloError::Engine {
            message: "connection refused".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Translation engine error: connection refused"
        );
    }

    #[test]
    fn test_synthesis_display() {
        let error = ParloError::Synthesis {
            message: "voice not available".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Speech synthesis failed: voice not available"
        );
    }

    #[test]
    fn test_queue_closed_display() {
        assert_eq!(
            ParloError::QueueClosed.to_string(),
            "Synthesis queue is closed"
        );
    }

    #[test]
    fn test_script_display() {
        let error = ParloError::Script {
            line: 7,
            message: "unknown event type".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Script error at line 7: unknown event type"
        );
    }

    #[test]
    fn test_other_display() {
        let error = ParloError::Other("unexpected error".to_string());
        assert_eq!(error.to_string(), "unexpected error");
    }

    #[test]
    fn test_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let error: ParloError = io_error.into();
        assert!(error.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_toml_error() {
        let toml_str = "invalid = toml = syntax";
        let toml_error = toml::from_str::<toml::Value>(toml_str).unwrap_err();
        let error: ParloError = toml_error.into();
        assert!(error.to_string().contains("Configuration error"));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<i32> {
            Ok(42)
        }
        assert_eq!(returns_result().unwrap(), 42);

        fn returns_error() -> Result<i32> {
            Err(ParloError::Other("test error".to_string()))
        }
        assert!(returns_error().is_err());
    }

    #[test]
    fn test_error_source_chain_io() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let error: ParloError = io_error.into();

        let error_trait: &dyn std::error::Error = &error;
        assert!(error_trait.source().is_some());
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<ParloError>();
        assert_sync::<ParloError>();
    }

    #[test]
    fn test_error_debug_format() {
        let error = ParloError::ConfigFileNotFound {
            path: "/test/path".to_string(),
        };
        let debug_str = format!("{:?}", error);
        assert!(debug_str.contains("ConfigFileNotFound"));
        assert!(debug_str.contains("/test/path"));
    }
}
