//! `opsample config`: inspect and initialise configuration.

use std::path::Path;

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::List => {
            output.header("Current Configuration:")?;
            let serialised = config.to_toml().map_err(config_error)?;
            output.print(&serialised)?;
        }

        ConfigCommands::Path => {
            output.print(&AppConfig::config_path().display().to_string())?;
        }

        ConfigCommands::Init { path, force } => {
            let path = path.unwrap_or_else(AppConfig::config_path);
            init(&path, force)?;
            output.success(&format!("Wrote default configuration to {}", path.display()))?;
        }
    }

    Ok(())
}

fn init(path: &Path, force: bool) -> CliResult<()> {
    if path.exists() && !force {
        return Err(CliError::ConfigExists {
            path: path.to_path_buf(),
        });
    }
    AppConfig::write_defaults(path).map_err(config_error)
}

fn config_error(err: anyhow::Error) -> CliError {
    CliError::ConfigError {
        message: format!("{err:#}"),
        source: Some(err.into()),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
