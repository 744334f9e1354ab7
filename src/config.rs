use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Optional map rendering for ads with a known location.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MapConfig {
    pub google_maps_api_key: Option<String>,
    /// "lat,lng" marker drawn next to the ad's own marker.
    pub home_location: Option<String>,
}

impl MapConfig {
    pub fn static_map_params(&self) -> Option<(&str, &str)> {
        match (&self.google_maps_api_key, &self.home_location) {
            (Some(key), Some(home)) if !key.is_empty() && !home.is_empty() => {
                Some((key.as_str(), home.as_str()))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub urls: Vec<String>,
    #[serde(default = "default_minutes_between_check")]
    pub minutes_between_check: u64,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default)]
    pub no_business_ads: bool,
    #[serde(default = "default_load_details")]
    pub load_details: bool,
    pub telegram_bot_token: String,
    pub telegram_chat_id: i64,
    #[serde(default)]
    pub map: MapConfig,
}

fn default_minutes_between_check() -> u64 {
    10
}

fn default_load_details() -> bool {
    true
}

impl AppConfig {
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.urls.is_empty() {
            return Err(ConfigError::Invalid("no urls to watch".into()));
        }
        if self.minutes_between_check == 0 {
            return Err(ConfigError::Invalid("minutes_between_check must be positive".into()));
        }
        Ok(())
    }
}

pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    AppConfig::from_json(&content)
}
