//! CLI arguments

use crate::config::DEFAULT_CONFIG_FILE;
use clap::Parser;
use std::path::PathBuf;

/// Load song metadata from JSON into Parquet songs and artists tables
#[derive(Parser, Debug)]
#[command(name = "song-lake-etl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (INI with [AWS] and [S3] sections)
    #[arg(short = 'C', long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
