pub mod sender;

use crate::config::MapConfig;
use crate::model::{Ad, NotifyError};
use crate::notifier::Notifier;
use crate::notifier::format::{ads_found_message, pack_messages};
use reqwest::Client;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

const TELEGRAM_API: &str = "https://api.telegram.org";

/// Telegram allows about one message per second into a single chat.
const SEND_INTERVAL: Duration = Duration::from_secs(1);

pub struct TelegramNotifier {
    pub bot_token: String,
    pub chat_id: i64,
    pub client: Client,
    pub api_base: String,
    pub map: MapConfig,
    pub send_interval: Duration,
}

impl TelegramNotifier {
    pub fn new(bot_token: String, chat_id: i64, map: MapConfig) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| NotifyError::ApiError(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            bot_token,
            chat_id,
            client,
            api_base: TELEGRAM_API.to_string(),
            map,
            send_interval: SEND_INTERVAL,
        })
    }
}

#[async_trait::async_trait]
impl Notifier for TelegramNotifier {
    async fn notify_text(&self, text: &str) -> Result<(), NotifyError> {
        sender::send_message(self, text).await
    }

    async fn notify_ads(&self, ads: &[Ad]) -> Result<(), NotifyError> {
        info!("{}", ads_found_message(ads.len()));
        for ad in ads {
            info!("Sending new ad: {}", ad.title);
        }

        let messages = pack_messages(ads, &self.map);
        let mut failed = 0;
        for (i, message) in messages.iter().enumerate() {
            if i > 0 {
                sleep(self.send_interval).await;
            }
            if let Err(e) = sender::send_message(self, message).await {
                warn!("Failed to send message {} of {}: {}", i + 1, messages.len(), e);
                failed += 1;
            }
        }

        if failed > 0 {
            return Err(NotifyError::ApiError(format!(
                "{} of {} messages not delivered",
                failed,
                messages.len()
            )));
        }
        Ok(())
    }
}
