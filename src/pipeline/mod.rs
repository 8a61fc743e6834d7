//! Pipeline module
//!
//! The job itself: read the song records, project the two tables and write
//! them as Parquet, replacing whatever each destination held before.
//!
//! ```text
//! song_data/*.json ──► songs_table   (partitioned by year, artist_id)
//!                  └─► artists_table (unpartitioned, one row per song)
//! ```
//!
//! The two writes are independent: if the artists write fails, the songs
//! table already holds the new data.

mod types;

pub use types::RunStats;

use crate::config::{AppConfig, InputPaths, OutputPaths};
use crate::error::Result;
use crate::schema::song_schema;
use crate::session::{Session, WriteOptions};
use crate::transform::{artists_table, songs_table, SONGS_PARTITION_BY};
use crate::types::{ParseMode, SaveMode};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Read the song records and write the songs and artists tables
pub async fn process_files_data(
    session: &Session,
    input: &InputPaths,
    output: &OutputPaths,
) -> Result<RunStats> {
    let start = Instant::now();
    let mut stats = RunStats::new();

    debug!(census_data = %input.census_data, "Census data resolved, not read");

    let source = session
        .read_json(&input.song_data, song_schema(), ParseMode::FailFast)
        .await?;
    stats.source_rows = source.rows();
    stats.source_files = source.files_read;

    let songs = songs_table(&source.batch)?;
    let summary = session
        .write_parquet(
            &songs,
            &output.songs_table,
            &WriteOptions::new()
                .mode(SaveMode::Overwrite)
                .partition_by(SONGS_PARTITION_BY),
        )
        .await?;
    stats.add_songs(&summary);

    let artists = artists_table(&source.batch)?;
    let summary = session
        .write_parquet(
            &artists,
            &output.artists_table,
            &WriteOptions::new().mode(SaveMode::Overwrite),
        )
        .await?;
    stats.add_artists(&summary);

    stats.set_duration(start.elapsed().as_millis() as u64);
    info!(
        source_rows = stats.source_rows,
        songs_rows = stats.songs_rows,
        artists_rows = stats.artists_rows,
        files = stats.files_written,
        partitions = stats.partitions,
        duration_ms = stats.duration_ms,
        "Processed song data"
    );
    Ok(stats)
}

/// Run the job end to end with a loaded configuration
///
/// The session is stopped whether or not processing succeeded.
pub async fn run(config: &AppConfig) -> Result<RunStats> {
    let session = Session::builder()
        .credentials(config.aws.clone())
        .build();

    let result = process(&session, config).await;
    if let Err(e) = &result {
        warn!(error = %e, "Job failed");
    }

    session.stop();
    result
}

async fn process(session: &Session, config: &AppConfig) -> Result<RunStats> {
    let input = InputPaths::resolve(&config.s3)?;
    let output = OutputPaths::resolve(&config.s3);

    info!(
        song_data = %input.song_data,
        songs_table = %output.songs_table,
        artists_table = %output.artists_table,
        "Resolved job paths"
    );

    process_files_data(session, &input, &output).await
}

#[cfg(test)]
mod tests;
