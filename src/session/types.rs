//! Session types
//!
//! Options and summaries for session reads and writes.

use crate::types::SaveMode;
use arrow::record_batch::RecordBatch;

/// Marker object written after every successful table write
pub const SUCCESS_MARKER: &str = "_SUCCESS";

/// Options for a table write
#[derive(Debug, Clone, Default)]
pub struct WriteOptions {
    /// Behaviour when the destination already holds data
    pub mode: SaveMode,
    /// Partition columns, outermost directory first
    pub partition_by: Vec<String>,
}

impl WriteOptions {
    /// Create write options with the default mode (error if exists)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the save mode
    #[must_use]
    pub fn mode(mut self, mode: SaveMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the partition columns
    #[must_use]
    pub fn partition_by<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.partition_by = columns.into_iter().map(Into::into).collect();
        self
    }
}

/// Result of a JSON read
#[derive(Debug, Clone)]
pub struct ReadResult {
    /// All decoded rows, in file order then line order
    pub batch: RecordBatch,
    /// Number of source objects read
    pub files_read: usize,
    /// Lines skipped as malformed
    pub malformed: usize,
}

impl ReadResult {
    /// Number of rows read
    pub fn rows(&self) -> usize {
        self.batch.num_rows()
    }
}

/// Result of a table write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSummary {
    /// Destination location as given
    pub path: String,
    /// Mode the write ran with
    pub mode: SaveMode,
    /// Rows written
    pub rows: usize,
    /// Data files written
    pub files: usize,
    /// Distinct partitions written (0 when unpartitioned)
    pub partitions: usize,
    /// Objects removed beforehand by an overwrite
    pub deleted: usize,
    /// True when an `Ignore` write found existing data and did nothing
    pub skipped: bool,
}

impl WriteSummary {
    pub(crate) fn new(path: impl Into<String>, mode: SaveMode) -> Self {
        Self {
            path: path.into(),
            mode,
            rows: 0,
            files: 0,
            partitions: 0,
            deleted: 0,
            skipped: false,
        }
    }
}
