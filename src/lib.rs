// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]

//! # song-lake-etl
//!
//! A batch job that turns a collection of song metadata JSON records into
//! two analytical tables stored as Parquet:
//!
//! - **songs** (`song_id`, `title`, `artist_id`, `year`, `duration`),
//!   partitioned on disk by `year` then `artist_id`
//! - **artists** (`artist_id`, `name`, `location`, `latitude`, `longitude`),
//!   one row per source record
//!
//! Both tables are replaced on every run.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use song_lake_etl::{config::AppConfig, pipeline, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = AppConfig::from_file("dl.cfg")?;
//!     let stats = pipeline::run(&config).await?;
//!     println!("{} songs, {} artists", stats.songs_rows, stats.artists_rows);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │  cli ──► config ──► pipeline::run                              │
//! └────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬──────────┬────────┴─────┬───────────┬──────────────┐
//! │  Schema  │  Decode  │  Transform   │  Session  │   Output     │
//! ├──────────┼──────────┼──────────────┼───────────┼──────────────┤
//! │ Songs    │ JSONL    │ songs_table  │ read_json │ Parquet      │
//! │ Tables   │ FailFast │ artists_table│ write_    │ Hive         │
//! │          │ Drop     │              │  parquet  │  partitions  │
//! └──────────┴──────────┴──────────────┴─────┬─────┴──────────────┘
//!                                            │
//!                                   storage (S3 / local)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Job configuration and path resolution
pub mod config;

/// Input and table schemas
pub mod schema;

/// Newline-delimited JSON decoding
pub mod decode;

/// Object-store locations (S3 and local filesystem)
pub mod storage;

/// Parquet encoding, Hive partitioning and table read-back
pub mod output;

/// Read/write session
pub mod session;

/// Table projections
pub mod transform;

/// The songs and artists job
pub mod pipeline;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use config::AppConfig;
pub use pipeline::{process_files_data, run, RunStats};
pub use session::Session;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
