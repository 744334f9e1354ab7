// Core structs: Ad, AdDetails and the error types shared across modules
use chrono::{DateTime, Utc};
use std::hash::{Hash, Hasher};
use thiserror::Error;

/// One classifieds listing. The detail page url is the natural key.
#[derive(Debug, Clone, Default)]
pub struct Ad {
    pub url: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub price: String,
    pub images: Vec<String>,
    pub date_posted: Option<DateTime<Utc>>,
    pub is_business: bool,
    pub is_ignored: bool,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Ad {
    /// Merges data scraped from the detail page. The preview image is kept
    /// unless the detail page lists images of its own.
    pub fn apply_details(&mut self, details: AdDetails) {
        self.latitude = details.latitude;
        self.longitude = details.longitude;
        if !details.images.is_empty() {
            self.images = details.images;
        }
    }

    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

impl PartialEq for Ad {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url
    }
}

impl Eq for Ad {}

impl Hash for Ad {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.url.hash(state);
    }
}

/// Extra data only available on an ad's detail page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdDetails {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub images: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    HttpError(String),
    #[error("unexpected response status {0}")]
    InvalidResponse(u16),
}

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("invalid selector {0}")]
    Selector(String),
    #[error("missing field: {0}")]
    MissingField(String),
    #[error("invalid embedded JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("API error: {0}")]
    ApiError(String),
    #[error("notification endpoint unreachable")]
    Unreachable,
}
