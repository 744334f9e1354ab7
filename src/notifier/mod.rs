pub mod format;
pub mod telegram;

use crate::model::{Ad, NotifyError};

pub use telegram::TelegramNotifier;

/// Delivery channel for newly discovered ads.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn notify_text(&self, text: &str) -> Result<(), NotifyError>;

    /// Sends a summary followed by one message per ad.
    async fn notify_ads(&self, ads: &[Ad]) -> Result<(), NotifyError>;
}
