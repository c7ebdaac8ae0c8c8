//! Chart analysis bot CLI application.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use trading_config::load_config;
use trading_monitor::setup_logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::ValidateConfig => cli::commands::validate::run(&cli.config),
        Commands::Run(args) => {
            let config = load_config(&cli.config)
                .with_context(|| format!("loading {}", cli.config.display()))?;

            let level = cli
                .log_level
                .map(|l| l.as_str())
                .unwrap_or(config.logging.level.as_str());
            let _guard = setup_logging(
                level,
                cli.json_logs || config.logging.json,
                config.logging.file.as_deref(),
            )?;

            cli::commands::run::run(args, &config).await
        }
    }
}
