pub mod jupiter;

use crate::error::TokenWatchError;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;

/// Current price entry returned by a price provider for one asset.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PriceQuote {
    #[serde(rename = "usdPrice")]
    pub usd_price: f64,
    #[serde(rename = "priceChange24h", default)]
    pub price_change_24h: Option<f64>,
}

#[cfg(test)]
impl PriceQuote {
    pub fn new(usd_price: f64) -> Self {
        Self {
            usd_price,
            price_change_24h: None,
        }
    }
}

/// Batch price lookup keyed by asset identifier.
///
/// A `None` value means the provider listed the identifier without a usable
/// entry.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch_prices(
        &self,
        ids: &[String],
    ) -> Result<HashMap<String, Option<PriceQuote>>, TokenWatchError>;
}
