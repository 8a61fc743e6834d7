//! CLI runner - executes the job

use crate::cli::commands::Cli;
use crate::config::AppConfig;
use crate::error::Result;
use crate::pipeline::{self, RunStats};
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Load the configuration and run the job
    pub async fn run(&self) -> Result<RunStats> {
        let config = AppConfig::from_file(&self.cli.config)?;
        info!(config = %self.cli.config.display(), "Loaded configuration");

        pipeline::run(&config).await
    }
}
