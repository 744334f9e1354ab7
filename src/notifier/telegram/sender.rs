// notifier/telegram/sender.rs

use crate::model::NotifyError;
use crate::notifier::telegram::TelegramNotifier;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Sends one HTML-formatted message to the configured chat.
pub async fn send_message(notifier: &TelegramNotifier, text: &str) -> Result<(), NotifyError> {
    let url = format!("{}/bot{}/sendMessage", notifier.api_base, notifier.bot_token);
    let params = [
        ("chat_id", notifier.chat_id.to_string()),
        ("text", text.to_string()),
        ("parse_mode", "HTML".to_string()),
    ];

    let response = match timeout(
        Duration::from_secs(10),
        notifier.client.post(&url).form(&params).send(),
    )
    .await
    {
        Ok(Ok(resp)) => resp,
        Ok(Err(e)) => {
            warn!("Telegram send() failed: {:?}", e);
            return Err(NotifyError::ApiError(format!("Send failed: {}", e)));
        }
        Err(_) => {
            warn!("Telegram send() timed out");
            return Err(NotifyError::Unreachable);
        }
    };

    let status = response.status();
    let body = response.text().await.unwrap_or_else(|_| "unknown".into());
    if !status.is_success() {
        warn!("Telegram API responded [{}]: {}", status, body);
        return Err(NotifyError::ApiError(format!("status {}: {}", status, body)));
    }
    debug!("Telegram response [{}]: {}", status, body);
    Ok(())
}
