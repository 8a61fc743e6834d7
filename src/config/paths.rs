//! Input and output path resolution
//!
//! Every location the job touches is derived here from the `[S3]` section,
//! so the derivation can be tested without any storage access.

use super::types::S3Config;
use crate::error::{Error, Result};

/// Census dataset name under `IN_BUCKET` (resolved, never read)
pub const CENSUS_DATA_FILE: &str = "New_York_City_Population_by_Borough__1950_-_2040.json";

/// Songs table directory under `OUT_BUCKET`
pub const SONGS_TABLE_DIR: &str = "songs_table.parquet";

/// Artists table directory under `OUT_BUCKET`
pub const ARTISTS_TABLE_DIR: &str = "artists_table.parquet";

/// Join a base location and a relative name with exactly one `/`
///
/// An empty base yields the name unchanged.
pub fn join_path(base: &str, name: &str) -> String {
    let name = name.trim_start_matches('/');
    if base.is_empty() {
        name.to_string()
    } else if base.ends_with('/') {
        format!("{base}{name}")
    } else {
        format!("{base}/{name}")
    }
}

/// Whether a location is already absolute (URL or rooted filesystem path)
fn is_absolute(location: &str) -> bool {
    location.contains("://") || location.starts_with('/')
}

/// Source locations for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPaths {
    /// Census dataset location (unused by the transform)
    pub census_data: String,
    /// Song JSON location: a single object or a prefix holding `.json` objects
    pub song_data: String,
}

impl InputPaths {
    /// Resolve input locations from the `[S3]` section
    ///
    /// Fails with [`Error::UnresolvedInput`] when `SONG_DATA` is not
    /// configured. The song location is never guessed from `IN_BUCKET`.
    pub fn resolve(s3: &S3Config) -> Result<Self> {
        let census_data = join_path(&s3.in_bucket, CENSUS_DATA_FILE);

        let song_data = match s3.song_data.as_deref() {
            Some(location) if is_absolute(location) => location.to_string(),
            Some(relative) => join_path(&s3.in_bucket, relative),
            None => {
                return Err(Error::unresolved_input(
                    "song data location is not configured (set S3.SONG_DATA)",
                ))
            }
        };

        Ok(Self {
            census_data,
            song_data,
        })
    }
}

/// Destination locations for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub songs_table: String,
    pub artists_table: String,
}

impl OutputPaths {
    /// Resolve output locations from the `[S3]` section
    pub fn resolve(s3: &S3Config) -> Self {
        Self {
            songs_table: join_path(&s3.out_bucket, SONGS_TABLE_DIR),
            artists_table: join_path(&s3.out_bucket, ARTISTS_TABLE_DIR),
        }
    }
}
