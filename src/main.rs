use clap::Parser;
use tracing::debug;

use shortlinker_client::cli::Cli;
use shortlinker_client::config::{get_config, init_config};
use shortlinker_client::interfaces::cli::run_cli_command;
use shortlinker_client::system::logging::init_logging;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // 配置必须在日志之前初始化
    init_config(cli.config.as_deref());
    let config = get_config();
    let guard = init_logging(&config.logging);
    debug!("Using endpoint base {}", config.api.base_url);

    if let Err(e) = run_cli_command(cli.command).await {
        eprintln!("{}", e.format_colored());
        drop(guard);
        std::process::exit(1);
    }
}
