//! Error types for the song lake ETL
//!
//! Every public API returns `Result<T, Error>` where Error is defined here.
//! Nothing in the job retries: an error always terminates the run.

use thiserror::Error;

/// The main error type for the ETL job
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Unresolved input path: {message}")]
    UnresolvedInput { message: String },

    // ============================================================================
    // Read Errors
    // ============================================================================
    #[error("Schema mismatch in {source_name} at line {line}: {message}")]
    SchemaMismatch {
        source_name: String,
        line: usize,
        message: String,
    },

    #[error("No input data found at {path}")]
    NoInput { path: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Arrow/Parquet Errors
    // ============================================================================
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Projection error: {message}")]
    Projection { message: String },

    #[error("Partition error for '{column}': {message}")]
    Partition { column: String, message: String },

    #[error("Output error: {message}")]
    Output { message: String },

    // ============================================================================
    // Storage Errors
    // ============================================================================
    #[error("Storage error at {path}: {message}")]
    Storage { path: String, message: String },

    #[error("Path already exists: {path}")]
    PathExists { path: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an unresolved input error
    pub fn unresolved_input(message: impl Into<String>) -> Self {
        Self::UnresolvedInput {
            message: message.into(),
        }
    }

    /// Create a schema mismatch error for a source line
    pub fn schema_mismatch(
        source_name: impl Into<String>,
        line: usize,
        message: impl Into<String>,
    ) -> Self {
        Self::SchemaMismatch {
            source_name: source_name.into(),
            line,
            message: message.into(),
        }
    }

    /// Create a projection error
    pub fn projection(message: impl Into<String>) -> Self {
        Self::Projection {
            message: message.into(),
        }
    }

    /// Create a partition error
    pub fn partition(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Partition {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create an output error
    pub fn output(message: impl Into<String>) -> Self {
        Self::Output {
            message: message.into(),
        }
    }

    /// Create a storage error
    pub fn storage(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Storage {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Whether the error was raised before any storage client was built
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Error::Config { .. }
                | Error::MissingConfigField { .. }
                | Error::InvalidConfigValue { .. }
                | Error::UnresolvedInput { .. }
                | Error::FileNotFound { .. }
        )
    }
}

/// Result type alias for the ETL job
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::missing_field("AWS.AWS_ACCESS_KEY_ID");
        assert_eq!(
            err.to_string(),
            "Missing required config field: AWS.AWS_ACCESS_KEY_ID"
        );

        let err = Error::schema_mismatch("song_data/a.json", 3, "expected string");
        assert_eq!(
            err.to_string(),
            "Schema mismatch in song_data/a.json at line 3: expected string"
        );
    }

    #[test]
    fn test_is_config_error() {
        assert!(Error::config("bad").is_config_error());
        assert!(Error::missing_field("S3.IN_BUCKET").is_config_error());
        assert!(Error::unresolved_input("no song data").is_config_error());
        assert!(Error::FileNotFound {
            path: "dl.cfg".to_string()
        }
        .is_config_error());

        assert!(!Error::storage("s3://bucket/x", "denied").is_config_error());
        assert!(!Error::schema_mismatch("a.json", 1, "bad").is_config_error());
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }
}
