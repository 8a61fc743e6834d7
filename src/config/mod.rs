//! Configuration module
//!
//! Loads the job configuration from an INI file (`dl.cfg` by default):
//!
//! ```text
//! [AWS]
//! AWS_ACCESS_KEY_ID = ...
//! AWS_SECRET_ACCESS_KEY = ...
//!
//! [S3]
//! IN_BUCKET = s3a://udacity-dend/
//! OUT_BUCKET = s3a://my-lake/
//! SONG_DATA = song_data/
//! ```
//!
//! Credentials are kept in [`StorageCredentials`] and handed to the session
//! builder. Nothing here touches the process environment.

mod paths;
mod types;

pub use paths::{
    join_path, InputPaths, OutputPaths, ARTISTS_TABLE_DIR, CENSUS_DATA_FILE, SONGS_TABLE_DIR,
};
pub use types::{AppConfig, S3Config, StorageCredentials};

use crate::error::{Error, Result};
use config::{Config, File, FileFormat};
use std::path::Path;
use types::RawConfig;

/// Default configuration file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "dl.cfg";

impl AppConfig {
    /// Load and validate configuration from an INI file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let contents = std::fs::read_to_string(path)?;
        Self::from_ini_str(&contents)
    }

    /// Load and validate configuration from INI text
    pub fn from_ini_str(contents: &str) -> Result<Self> {
        Self::load(File::from_str(contents, FileFormat::Ini))
    }

    fn load<S>(source: S) -> Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let settings = Config::builder()
            .add_source(source)
            .build()
            .map_err(|e| Error::config(format!("Failed to read configuration: {e}")))?;

        let raw: RawConfig = settings
            .try_deserialize()
            .map_err(|e| Error::config(format!("Failed to parse configuration: {e}")))?;

        raw.validate()
    }
}
