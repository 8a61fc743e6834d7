//! Common types shared across modules

use serde::{Deserialize, Serialize};

// ============================================================================
// Read / Write Modes
// ============================================================================

/// How the JSON reader treats a line that does not match the schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseMode {
    /// Abort the read on the first malformed line (default)
    #[default]
    FailFast,
    /// Skip malformed lines and count them
    DropMalformed,
}

impl std::fmt::Display for ParseMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseMode::FailFast => write!(f, "fail_fast"),
            ParseMode::DropMalformed => write!(f, "drop_malformed"),
        }
    }
}

/// What a table write does when data already exists at the destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveMode {
    /// Delete everything under the destination, then write
    Overwrite,
    /// Fail if the destination already holds data (default)
    #[default]
    ErrorIfExists,
    /// Add new files next to the existing ones
    Append,
    /// Leave existing data untouched and skip the write
    Ignore,
}

impl std::fmt::Display for SaveMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveMode::Overwrite => write!(f, "overwrite"),
            SaveMode::ErrorIfExists => write!(f, "error_if_exists"),
            SaveMode::Append => write!(f, "append"),
            SaveMode::Ignore => write!(f, "ignore"),
        }
    }
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle blank strings
pub trait OptionStringExt {
    /// Returns None if the string is empty or whitespace only
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
    }
}

impl OptionStringExt for String {
    fn none_if_empty(self) -> Option<String> {
        Some(self).none_if_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_defaults() {
        assert_eq!(ParseMode::default(), ParseMode::FailFast);
        assert_eq!(SaveMode::default(), SaveMode::ErrorIfExists);
    }

    #[test]
    fn test_save_mode_serde() {
        let mode: SaveMode = serde_json::from_str("\"overwrite\"").unwrap();
        assert_eq!(mode, SaveMode::Overwrite);

        let json = serde_json::to_string(&SaveMode::ErrorIfExists).unwrap();
        assert_eq!(json, "\"error_if_exists\"");
        assert_eq!(SaveMode::Append.to_string(), "append");
    }

    #[test]
    fn test_option_string_none_if_empty() {
        assert_eq!(
            Some("test".to_string()).none_if_empty(),
            Some("test".to_string())
        );
        assert_eq!(Some(String::new()).none_if_empty(), None);
        assert_eq!(Some("   ".to_string()).none_if_empty(), None);
        assert_eq!(None::<String>.none_if_empty(), None);
        assert_eq!(" key ".to_string().none_if_empty(), Some("key".to_string()));
    }
}
