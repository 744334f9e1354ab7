mod config;
mod fetcher;
mod model;
mod normalizer;
mod notifier;
mod parser;
mod storage;
mod watcher;

use config::{AppConfig, load_config};
use fetcher::ScraperImpl;
use notifier::{Notifier, TelegramNotifier};
use parser::KijijiParser;
use std::sync::Arc;
use storage::AdStore;
use tokio::sync::Mutex;
use tokio::time::{Duration, sleep};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use watcher::Watcher;

const DEFAULT_CONFIG_PATH: &str = "config.json";

#[tokio::main]
async fn main() {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    std::panic::set_hook(Box::new(|panic_info| {
        error!("Panic occurred: {}", panic_info);
    }));

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config: Arc<AppConfig> = match load_config(&config_path) {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            error!("Config load error ({}): {}", config_path, e);
            return;
        }
    };

    info!("Kijiji sniper started");
    info!("Watching the following pages for new ads:\n{}", config.urls.join("\n"));

    let scraper = match ScraperImpl::new() {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to create HTTP client: {}", e);
            return;
        }
    };
    let parser = match KijijiParser::new() {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to build parser: {}", e);
            return;
        }
    };
    let notifier = match TelegramNotifier::new(
        config.telegram_bot_token.clone(),
        config.telegram_chat_id,
        config.map.clone(),
    ) {
        Ok(n) => Arc::new(n),
        Err(e) => {
            error!("Failed to initialize notifier: {}", e);
            return;
        }
    };

    let store = Arc::new(Mutex::new(AdStore::new()));
    let watcher = Watcher::new(scraper, parser, notifier.clone(), store, config.clone());

    info!("Sending startup message...");
    if let Err(e) = notifier.notify_text("Kijiji sniper started").await {
        warn!("Startup notification failed: {}", e);
    }

    let interval = Duration::from_secs(config.minutes_between_check * 60);
    loop {
        let report = watcher.run_cycle().await;
        info!(
            "Cycle done: {} fetched, {} new, {} known",
            report.fetched, report.new, report.total
        );

        info!("Next check in {} min", config.minutes_between_check);
        tokio::select! {
            _ = sleep(interval) => {}
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down.");
                break;
            }
        }
    }
}
