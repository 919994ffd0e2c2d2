//! Command routing and execution

use anyhow::{Context, Result};

use crate::cli::args::{Cli, Commands};
use crate::config::PipelineConfig;
use crate::pipeline::{PipelineDriver, RunReport};

/// Build the layout: defaults, then `--config`, then the environment, then `-C`
pub fn resolve_config(cli: &Cli) -> Result<PipelineConfig> {
    let mut config = match &cli.config {
        Some(path) => PipelineConfig::load(path)
            .with_context(|| format!("Failed to load layout from {}", path.display()))?,
        None => PipelineConfig::new(),
    };
    config.merge_env_vars();
    if let Some(dir) = &cli.work_dir {
        config.work_dir = dir.clone();
    }
    Ok(config)
}

/// Execute the parsed command
pub fn execute_command(cli: &Cli) -> Result<RunReport> {
    let driver = PipelineDriver::new(resolve_config(cli)?).with_dry_run(cli.dry_run);

    let report = match &cli.command {
        Commands::Manifests { resource_group } => driver
            .run_manifests(resource_group)
            .context("Failed to patch manifests")?,
        Commands::Parameters {
            url,
            storage_account,
            ssh_key,
        } => driver
            .run_parameters(url, storage_account, ssh_key)
            .context("Failed to render parameter files")?,
    };
    Ok(report)
}
