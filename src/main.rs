// Allow common clippy pedantic lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::must_use_candidate)]

//! song-lake-etl CLI
//!
//! Runs the song data job once with the given configuration file

use clap::Parser;
use song_lake_etl::cli::{Cli, Runner};
use tracing::info;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    let runner = Runner::new(cli);

    let result = runner.run().await.and_then(|stats| {
        info!(
            songs = stats.songs_rows,
            artists = stats.artists_rows,
            duration_ms = stats.duration_ms,
            "Job complete"
        );
        stats.to_json()
    });

    match result {
        Ok(summary) => println!("{summary}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
