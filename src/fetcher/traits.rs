use crate::model::ScraperError;

#[async_trait::async_trait]
pub trait Scraper: Send + Sync {
    /// Returns the body of the page at `url`.
    async fn fetch(&self, url: &str) -> Result<String, ScraperError>;
}
