//! CLI module
//!
//! `song-lake-etl [--config <PATH>] [-v]` runs the whole job once. There
//! are no subcommands; everything else comes from the configuration file.

mod commands;
mod runner;

pub use commands::Cli;
pub use runner::Runner;
