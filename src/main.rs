use clap::Parser;

use shorturl::cli::{Cli, Commands};
use shorturl::config::AppConfig;
use shorturl::interfaces::cli::run_cli_command;
use shorturl::runtime::modes::run_server;
use shorturl::system::logging::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载 .env（不存在也无妨）
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match AppConfig::load(Some(cli.config.as_str())) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            std::process::exit(2);
        }
    };

    match cli.command {
        None | Some(Commands::Serve) => {
            let _guard = init_logging(&config.logging)?;
            run_server(&config).await
        }
        Some(cmd) => {
            if let Err(e) = run_cli_command(cmd, &config).await {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
