//! CLI interface module
//!
//! One-shot maintenance commands that run without the HTTP server.

pub mod commands;

use std::fmt;

use crate::cli::{Commands, ConfigCommands};
use crate::config::AppConfig;
use commands::{config_generate, run_reset_password};

#[derive(Debug)]
pub enum CliError {
    StorageError(String),
    InputError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::StorageError(msg) => format!("Storage error: {}", msg),
            CliError::InputError(msg) => format!("Input error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::StorageError(msg) => {
                format!("{} {}", "Storage error:".red().bold(), msg.white())
            }
            CliError::InputError(msg) => {
                format!("{} {}", "Input error:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<crate::errors::ShortUrlError> for CliError {
    fn from(err: crate::errors::ShortUrlError) -> Self {
        match err {
            crate::errors::ShortUrlError::Validation(msg) => CliError::InputError(msg),
            other => CliError::StorageError(other.to_string()),
        }
    }
}

/// Run a maintenance command. `Serve` is dispatched by the binary itself.
pub async fn run_cli_command(cmd: Commands, config: &AppConfig) -> Result<(), CliError> {
    match cmd {
        Commands::ResetPassword {
            username,
            password,
            stdin,
        } => {
            let username = username.unwrap_or_else(|| config.auth.admin_username.clone());
            run_reset_password(config, &username, password, stdin).await
        }
        Commands::Config {
            action: ConfigCommands::Generate { output_path, force },
        } => config_generate(output_path, force),
        Commands::Serve => Err(CliError::CommandError(
            "serve is not a maintenance command".to_string(),
        )),
    }
}
