use clap::Parser;
use color_eyre::eyre::Result;
use dotenv::dotenv;
use medfind_cli::{commands::Cli, config::AppConfig};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = AppConfig::from_env()?;

    // Initialize logging; stdout carries command output
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    medfind_cli::run(cli, config).await
}
