use crate::error::TokenWatchError;
use serde::Deserialize;
use std::collections::HashSet;
use std::time::Duration;
use std::{fs, path::Path};

pub const DEFAULT_PRICE_API_URL: &str = "https://lite-api.jup.ag/price/v3";
const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// One entry of the watch-list. Immutable after startup.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WatchedAsset {
    #[serde(alias = "ticker")]
    pub symbol: String,
    #[serde(alias = "ca")]
    pub id: String,
    /// Fraction, 0.05 = 5%.
    #[serde(alias = "price_change", alias = "priceChange")]
    pub threshold: f64,
}

#[cfg(test)]
impl WatchedAsset {
    pub fn new(symbol: &str, id: &str, threshold: f64) -> Self {
        Self {
            symbol: symbol.to_string(),
            id: id.to_string(),
            threshold,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MonitorCfg {
    pub poll_interval_secs: u64,
}

impl Default for MonitorCfg {
    fn default() -> Self {
        Self {
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PriceApiCfg {
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for PriceApiCfg {
    fn default() -> Self {
        Self {
            url: DEFAULT_PRICE_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifierBackend {
    #[default]
    Desktop,
    Log,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NotificationsCfg {
    pub backend: NotifierBackend,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub tokens: Vec<WatchedAsset>,
    #[serde(default)]
    pub monitor: MonitorCfg,
    #[serde(default)]
    pub price_api: PriceApiCfg,
    #[serde(default)]
    pub notifications: NotificationsCfg,
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TokenWatchError> {
        let s = fs::read_to_string(path.as_ref())?;
        Self::from_toml(&s)
    }

    pub fn from_toml(s: &str) -> Result<Self, TokenWatchError> {
        let cfg: Self = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), TokenWatchError> {
        validate_watch_list(&self.tokens)?;
        if self.monitor.poll_interval_secs == 0 {
            return Err(TokenWatchError::InvalidConfig(
                "monitor.poll_interval_secs must be positive".into(),
            ));
        }
        if self.price_api.timeout_secs == 0 {
            return Err(TokenWatchError::InvalidConfig(
                "price_api.timeout_secs must be positive".into(),
            ));
        }
        if self.price_api.url.trim().is_empty() {
            return Err(TokenWatchError::InvalidConfig("price_api.url is empty".into()));
        }
        Ok(())
    }

    pub fn watch_list(&self) -> Vec<WatchedAsset> {
        self.tokens.clone()
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.monitor.poll_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.price_api.timeout_secs)
    }
}

/// Rejects empty lists, blank fields, bad thresholds and repeated identifiers.
pub fn validate_watch_list(assets: &[WatchedAsset]) -> Result<(), TokenWatchError> {
    if assets.is_empty() {
        return Err(TokenWatchError::InvalidConfig("watch-list is empty".into()));
    }

    let mut seen = HashSet::with_capacity(assets.len());
    for asset in assets {
        if asset.symbol.trim().is_empty() {
            return Err(TokenWatchError::InvalidConfig(format!(
                "asset {} has an empty symbol",
                asset.id
            )));
        }
        if asset.id.trim().is_empty() {
            return Err(TokenWatchError::InvalidConfig(format!(
                "asset {} has an empty identifier",
                asset.symbol
            )));
        }
        if !asset.threshold.is_finite() || asset.threshold < 0.0 {
            return Err(TokenWatchError::InvalidConfig(format!(
                "threshold for {} must be a non-negative fraction, got {}",
                asset.symbol, asset.threshold
            )));
        }
        if !seen.insert(asset.id.as_str()) {
            return Err(TokenWatchError::DuplicateAsset(asset.id.clone()));
        }
    }
    Ok(())
}
