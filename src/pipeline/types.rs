//! Pipeline types

use crate::error::Result;
use crate::session::WriteSummary;
use serde::Serialize;

/// Statistics from one run of the job
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Song records read from the input
    pub source_rows: usize,
    /// JSON objects read
    pub source_files: usize,
    /// Rows written to the songs table
    pub songs_rows: usize,
    /// Rows written to the artists table
    pub artists_rows: usize,
    /// Data files written across both tables
    pub files_written: usize,
    /// Partition directories written for the songs table
    pub partitions: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl RunStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the songs table write
    pub fn add_songs(&mut self, summary: &WriteSummary) {
        self.songs_rows += summary.rows;
        self.files_written += summary.files;
        self.partitions += summary.partitions;
    }

    /// Record the artists table write
    pub fn add_artists(&mut self, summary: &WriteSummary) {
        self.artists_rows += summary.rows;
        self.files_written += summary.files;
    }

    /// Set duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }

    /// Render as a single JSON line
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
