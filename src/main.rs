mod bot;
mod classifier;
mod config;
mod line;
mod webhook;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::prelude::*;

use bot::{BotConfig, BotEngine, Catalog, Dataset};
use config::Config;
use webhook::AppState;

#[tokio::main]
async fn main() {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "mhbot.json".to_string());
    let config = match Config::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    // Setup logging. The file layer is skipped if the log file can't be opened.
    let log_file = std::fs::create_dir_all(&config.log_dir)
        .and_then(|_| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(config.log_dir.join("mhbot.log"))
        })
        .map_err(|e| eprintln!("Logging to stdout only, cannot open log file: {e}"))
        .ok();
    let (file_writer, _guard) = match log_file {
        Some(file) => {
            let (writer, guard) = tracing_appender::non_blocking(file);
            (Some(writer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stdout)
                .with_filter(
                    tracing_subscriber::EnvFilter::from_default_env()
                        .add_directive(tracing::Level::INFO.into()),
                ),
        )
        .with(file_writer.map(|writer| {
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(
                    tracing_subscriber::EnvFilter::from_default_env()
                        .add_directive(tracing::Level::INFO.into()),
                )
        }))
        .init();

    info!("🚀 Starting mhbot...");
    info!("Loaded config from {config_path}");
    info!("Data directory: {}", config.data_dir.display());

    let dataset = Dataset::load(&config.data_dir);
    let catalog = Catalog::new(dataset, &config.monster_aliases);
    info!(
        "{} monsters, {} aliases",
        catalog.monster_names().len(),
        catalog.aliases().len()
    );

    let engine = BotEngine::new(
        catalog,
        BotConfig {
            weakness_image_url: config.weakness_image_url.clone(),
            tempered_image_url: config.tempered_image_url.clone(),
        },
    );
    let line = match line::Client::new(config.channel_access_token.clone(), &config.api_base) {
        Ok(line) => line,
        Err(e) => {
            error!("Failed to build LINE client: {e}");
            std::process::exit(1);
        }
    };
    let state = Arc::new(AppState {
        engine,
        line,
        channel_secret: config.channel_secret.clone(),
    });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    if let Err(e) = webhook::serve(addr, state).await {
        error!("Server error: {e}");
        std::process::exit(1);
    }
}
