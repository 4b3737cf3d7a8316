use eyre::Result;
use tracing::info;

use medfind_client::HttpDirectoryClient;
use medfind_store::{BookingStore, FileStorage};

pub mod commands;
pub mod config;
pub mod handlers;

use commands::Cli;
use config::AppConfig;
use handlers::Handler;

/// Apply command-line overrides to `config`.
pub fn resolve_config(cli: &Cli, mut config: AppConfig) -> AppConfig {
    if let Some(url) = &cli.api_url {
        config.api_base_url = url.trim_end_matches('/').to_string();
    }
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    config
}

/// Run one command against the configured directory and the file-backed
/// booking store, printing to stdout.
pub async fn run(cli: Cli, config: AppConfig) -> Result<()> {
    let config = resolve_config(&cli, config);
    info!(
        api = %config.api_base_url,
        data_dir = %config.data_dir.display(),
        "starting medfind"
    );

    let directory = HttpDirectoryClient::new(config.api_base_url.clone());
    let store = BookingStore::new(FileStorage::open(&config.data_dir)?);
    let handler = Handler::new(directory, store);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    handler.handle(cli.command, &mut out).await
}
