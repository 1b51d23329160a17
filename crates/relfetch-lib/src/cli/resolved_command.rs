use crate::cli::args::Command;
use crate::cli::params::FetchParams;
use crate::config::load_config;
use crate::error::RelFetchError;
use std::path::PathBuf;

pub fn resolve_command(command: Command) -> Result<FetchParams, RelFetchError> {
    let Command {
        config_path,
        directory,
        dry_run,
    } = command;

    tracing::info!("Loading configuration from {}", config_path);
    let app_config = load_config(&config_path)?;

    let output_dir = match directory {
        Some(directory) => {
            let directory = PathBuf::from(directory);
            if directory.exists() && !directory.is_dir() {
                return Err(RelFetchError::CliArgumentValidation {
                    details: format!("{} is not a directory.", directory.display()),
                });
            }
            directory
        }
        None => std::env::current_dir()?,
    };

    Ok(FetchParams {
        spec: app_config.download,
        output_dir,
        dry_run,
    })
}
