use thiserror::Error;

/// All errors produced by the metrics pipeline.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// The metrics source could not be fetched.
    #[error("Failed to fetch metrics: {0}")]
    Fetch(String),

    /// The input text contained no usable lines after discarding blank ones.
    #[error("The file is empty")]
    EmptyInput,

    /// A specific line was not valid JSON. `line` is 1-indexed among the
    /// non-blank lines of the input.
    #[error("Failed to parse line {line}")]
    LineParse { line: usize },

    /// The session cache could not be read or written.
    #[error("Cache error: {0}")]
    Cache(String),

    /// A JSON document could not be parsed or serialized.
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for raw I/O errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the metrics crates.
pub type Result<T> = std::result::Result<T, MetricsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_fetch() {
        let err = MetricsError::Fetch("404 Not Found".to_string());
        assert_eq!(err.to_string(), "Failed to fetch metrics: 404 Not Found");
    }

    #[test]
    fn test_error_display_empty_input() {
        assert_eq!(MetricsError::EmptyInput.to_string(), "The file is empty");
    }

    #[test]
    fn test_error_display_line_parse() {
        let err = MetricsError::LineParse { line: 2 };
        assert_eq!(err.to_string(), "Failed to parse line 2");
    }

    #[test]
    fn test_error_display_cache() {
        let err = MetricsError::Cache("disk full".to_string());
        assert_eq!(err.to_string(), "Cache error: disk full");
    }

    #[test]
    fn test_error_display_config() {
        let err = MetricsError::Config("unknown view".to_string());
        assert_eq!(err.to_string(), "Configuration error: unknown view");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: MetricsError = io_err.into();
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid}").unwrap_err();
        let err: MetricsError = json_err.into();
        assert!(err.to_string().contains("Failed to parse JSON"));
    }
}
