//! Configuration types
//!
//! `RawConfig` mirrors the INI file as written; every key is optional so
//! that validation can name the exact `SECTION.KEY` that is missing.

use crate::error::{Error, Result};
use crate::storage::SUPPORTED_SCHEMES;
use crate::types::OptionStringExt;
use serde::Deserialize;

// ============================================================================
// Raw File Layout
// ============================================================================

/// INI file as deserialized, before validation
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawConfig {
    #[serde(default, alias = "AWS")]
    pub aws: RawAwsSection,

    #[serde(default, alias = "S3")]
    pub s3: RawS3Section,
}

/// `[AWS]` section
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawAwsSection {
    #[serde(default, alias = "AWS_ACCESS_KEY_ID")]
    pub aws_access_key_id: Option<String>,

    #[serde(default, alias = "AWS_SECRET_ACCESS_KEY")]
    pub aws_secret_access_key: Option<String>,

    #[serde(default, alias = "AWS_REGION")]
    pub aws_region: Option<String>,

    #[serde(default, alias = "AWS_ENDPOINT")]
    pub aws_endpoint: Option<String>,
}

/// `[S3]` section
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawS3Section {
    #[serde(default, alias = "IN_BUCKET")]
    pub in_bucket: Option<String>,

    #[serde(default, alias = "OUT_BUCKET")]
    pub out_bucket: Option<String>,

    #[serde(default, alias = "SONG_DATA")]
    pub song_data: Option<String>,
}

fn required(value: Option<String>, field: &str) -> Result<String> {
    value.none_if_empty().ok_or_else(|| Error::missing_field(field))
}

/// A required bucket location whose URL scheme, if any, is supported
fn location(value: Option<String>, field: &str) -> Result<String> {
    let location = required(value, field)?;
    if let Some((scheme, _)) = location.split_once("://") {
        if !SUPPORTED_SCHEMES.contains(&scheme) {
            return Err(Error::invalid_value(
                field,
                format!("unsupported storage scheme '{scheme}'"),
            ));
        }
    }
    Ok(location)
}

impl RawConfig {
    /// Validate required keys and build the typed configuration
    pub(crate) fn validate(self) -> Result<AppConfig> {
        let aws = StorageCredentials {
            access_key_id: required(self.aws.aws_access_key_id, "AWS.AWS_ACCESS_KEY_ID")?,
            secret_access_key: required(
                self.aws.aws_secret_access_key,
                "AWS.AWS_SECRET_ACCESS_KEY",
            )?,
            region: self.aws.aws_region.none_if_empty(),
            endpoint: self.aws.aws_endpoint.none_if_empty(),
        };

        let s3 = S3Config {
            in_bucket: location(self.s3.in_bucket, "S3.IN_BUCKET")?,
            out_bucket: location(self.s3.out_bucket, "S3.OUT_BUCKET")?,
            song_data: self.s3.song_data.none_if_empty(),
        };

        Ok(AppConfig { aws, s3 })
    }
}

// ============================================================================
// Validated Configuration
// ============================================================================

/// Complete job configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Object-store credentials (`[AWS]`)
    pub aws: StorageCredentials,
    /// Input and output locations (`[S3]`)
    pub s3: S3Config,
}

/// Credentials handed to the storage client at construction time
#[derive(Clone, Default, PartialEq, Eq)]
pub struct StorageCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    /// Region override; the client default applies when unset
    pub region: Option<String>,
    /// Custom endpoint for S3-compatible stores
    pub endpoint: Option<String>,
}

impl StorageCredentials {
    /// Create credentials from a key pair
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            region: None,
            endpoint: None,
        }
    }

    /// Set the region
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set a custom endpoint
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }
}

impl std::fmt::Debug for StorageCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// `[S3]` locations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3Config {
    /// Input prefix, e.g. `s3a://udacity-dend/`
    pub in_bucket: String,
    /// Output prefix for both tables
    pub out_bucket: String,
    /// Song source relative to `in_bucket` (or an absolute location)
    pub song_data: Option<String>,
}
