//! 重置密码 CLI 命令

use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::Arc;

use colored::Colorize;

use crate::config::AppConfig;
use crate::interfaces::cli::CliError;
use crate::services::AuthService;
use crate::storage::{RetryConfig, UserStore, connect_database};

/// 从不同来源获取密码
fn get_password(password: Option<String>, stdin: bool) -> Result<String, CliError> {
    if stdin {
        let mut line = String::new();
        io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| CliError::InputError(format!("Failed to read from stdin: {}", e)))?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    } else if let Some(pwd) = password {
        Ok(pwd)
    } else {
        prompt_password_with_confirm()
    }
}

/// 交互式输入密码（带确认）
fn prompt_password_with_confirm() -> Result<String, CliError> {
    if !io::stdin().is_terminal() {
        return Err(CliError::InputError(
            "No password provided. Use --password or --stdin flag, or run interactively."
                .to_string(),
        ));
    }

    let read = |prompt: &str| -> Result<String, CliError> {
        print!("{}", prompt);
        io::stdout()
            .flush()
            .map_err(|e| CliError::InputError(e.to_string()))?;
        rpassword::read_password()
            .map_err(|e| CliError::InputError(format!("Failed to read password: {}", e)))
    };

    let password = read("Enter new password: ")?;
    let confirm = read("Confirm password: ")?;
    if password != confirm {
        return Err(CliError::InputError("Passwords do not match".to_string()));
    }

    Ok(password)
}

/// 运行 reset-password 命令
pub async fn run_reset_password(
    config: &AppConfig,
    username: &str,
    password: Option<String>,
    stdin: bool,
) -> Result<(), CliError> {
    let new_password = get_password(password, stdin)?;

    let db = connect_database(&config.database)
        .await
        .map_err(|e| CliError::StorageError(e.to_string()))?;
    let users = Arc::new(UserStore::new(db, RetryConfig::from(&config.database)));

    AuthService::new(users)
        .reset_password(username, &new_password)
        .await?;

    println!(
        "{} Password for '{}' reset successfully",
        "✓".green().bold(),
        username.trim()
    );
    Ok(())
}
