//! Session module
//!
//! A [`Session`] is the handle the job runs through: it reads JSON sources
//! against an explicit schema and writes tables as Parquet file sets. It
//! owns the storage credentials and the Parquet settings, and is released
//! with a single [`Session::stop`] call.
//!
//! # Overview
//!
//! ```text
//! bootstrap ──► read_json ──► write_parquet (songs) ──► write_parquet (artists) ──► stop
//! ```

mod types;

pub use types::{ReadResult, WriteOptions, WriteSummary, SUCCESS_MARKER};

use crate::config::StorageCredentials;
use crate::decode::JsonlBatchDecoder;
use crate::error::{Error, Result};
use crate::output::{encode_parquet, split_by_partition, ParquetWriterConfig};
use crate::storage::StorageLocation;
use crate::types::{ParseMode, SaveMode};
use arrow::compute::concat_batches;
use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use bytes::Bytes;
use object_store::path::Path as ObjectPath;
use std::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

/// Default application name used in logs
pub const DEFAULT_APP_NAME: &str = "song-lake-etl";

/// Builder for [`Session`]
#[derive(Debug, Clone, Default)]
pub struct SessionBuilder {
    app_name: Option<String>,
    credentials: Option<StorageCredentials>,
    writer_config: ParquetWriterConfig,
}

impl SessionBuilder {
    /// Set the application name
    #[must_use]
    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = Some(name.into());
        self
    }

    /// Set object-store credentials
    #[must_use]
    pub fn credentials(mut self, credentials: StorageCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set Parquet writer settings
    #[must_use]
    pub fn writer_config(mut self, config: ParquetWriterConfig) -> Self {
        self.writer_config = config;
        self
    }

    /// Start the session
    pub fn build(self) -> Session {
        let session = Session {
            app_name: self
                .app_name
                .unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            id: Uuid::new_v4(),
            credentials: self.credentials,
            writer_config: self.writer_config,
            started: Instant::now(),
        };

        info!(
            app = %session.app_name,
            session_id = %session.id,
            credentials = session.credentials.is_some(),
            "Session started"
        );
        session
    }
}

/// Handle for reading sources and writing tables
#[derive(Debug)]
pub struct Session {
    app_name: String,
    id: Uuid,
    credentials: Option<StorageCredentials>,
    writer_config: ParquetWriterConfig,
    started: Instant,
}

impl Session {
    /// Create a session builder
    pub fn builder() -> SessionBuilder {
        SessionBuilder::default()
    }

    /// Application name
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Parquet writer settings
    pub fn writer_config(&self) -> &ParquetWriterConfig {
        &self.writer_config
    }

    /// Resolve a location with this session's credentials
    pub fn location(&self, path: &str) -> Result<StorageLocation> {
        StorageLocation::parse(path, self.credentials.as_ref())
    }

    /// Read newline-delimited JSON at `path` with an explicit schema
    ///
    /// `path` may name a single object or a prefix; under a prefix every
    /// object whose name ends in `.json` is read, in path order.
    pub async fn read_json(
        &self,
        path: &str,
        schema: SchemaRef,
        mode: ParseMode,
    ) -> Result<ReadResult> {
        let location = self.location(path)?;
        let sources = json_sources(&location).await?;
        if sources.is_empty() {
            return Err(Error::NoInput {
                path: path.to_string(),
            });
        }

        let decoder = JsonlBatchDecoder::new(schema.clone(), mode);
        let mut batches = Vec::with_capacity(sources.len());
        let mut malformed = 0;

        for source in &sources {
            let source_name = location.display(source);
            let data = location.get(source).await?;
            let body = String::from_utf8_lossy(&data);

            let outcome = decoder.decode(&body, &source_name)?;
            debug!(
                source = %source_name,
                rows = outcome.rows(),
                malformed = outcome.malformed,
                "Read JSON source"
            );

            malformed += outcome.malformed;
            batches.push(outcome.batch);
        }

        let batch = concat_batches(&schema, &batches)?;
        info!(
            path,
            files = sources.len(),
            rows = batch.num_rows(),
            malformed,
            %mode,
            "Loaded JSON source"
        );

        Ok(ReadResult {
            batch,
            files_read: sources.len(),
            malformed,
        })
    }

    /// Write `batch` at `path` as a Parquet file set
    ///
    /// With partition columns, rows land under `col=value/` directories and
    /// the partition columns are left out of the files. A `_SUCCESS` marker
    /// is written once all data files are in place. Overwrite is not atomic:
    /// existing data is deleted before the new files are written.
    pub async fn write_parquet(
        &self,
        batch: &RecordBatch,
        path: &str,
        options: &WriteOptions,
    ) -> Result<WriteSummary> {
        let location = self.location(path)?;
        let mut summary = WriteSummary::new(path, options.mode);

        // Partition columns are checked before anything is deleted
        let groups = split_by_partition(batch, &options.partition_by)?;

        match options.mode {
            SaveMode::Overwrite => {
                summary.deleted = location.delete_all().await?;
            }
            SaveMode::ErrorIfExists => {
                if location.has_data().await? {
                    return Err(Error::PathExists {
                        path: path.to_string(),
                    });
                }
            }
            SaveMode::Ignore => {
                if location.has_data().await? {
                    info!(path, "Destination has data, skipping write");
                    summary.skipped = true;
                    return Ok(summary);
                }
            }
            SaveMode::Append => {}
        }

        let write_id = Uuid::new_v4();
        let suffix = self.writer_config.file_suffix();

        for (index, group) in groups.iter().enumerate() {
            let mut segments = group.dir_segments(&options.partition_by);
            segments.push(format!("part-{index:05}-{write_id}.{suffix}"));

            let data = encode_parquet(std::slice::from_ref(&group.batch), &self.writer_config)?;
            let written = location.put(&location.child(&segments)?, data).await?;
            debug!(file = %written, rows = group.batch.num_rows(), "Wrote data file");

            summary.rows += group.batch.num_rows();
            summary.files += 1;
        }

        if !options.partition_by.is_empty() {
            summary.partitions = groups.len();
        }

        location
            .put(&location.child([SUCCESS_MARKER])?, Bytes::new())
            .await?;

        info!(
            path,
            mode = %options.mode,
            rows = summary.rows,
            files = summary.files,
            partitions = summary.partitions,
            deleted = summary.deleted,
            "Wrote table"
        );
        Ok(summary)
    }

    /// Release the session
    pub fn stop(self) {
        info!(
            app = %self.app_name,
            session_id = %self.id,
            elapsed_ms = self.started.elapsed().as_millis() as u64,
            "Session stopped"
        );
    }
}

/// JSON objects to read for a location, in path order
async fn json_sources(location: &StorageLocation) -> Result<Vec<ObjectPath>> {
    if location.is_object().await? {
        return Ok(vec![location.prefix().clone()]);
    }

    Ok(location
        .list()
        .await?
        .into_iter()
        .map(|object| object.location)
        .filter(|path| {
            path.filename().is_some_and(|name| {
                name.ends_with(".json") && !name.starts_with('_') && !name.starts_with('.')
            })
        })
        .collect())
}
