use crate::api::{PriceQuote, PriceSource};
use crate::error::TokenWatchError;
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

const USER_AGENT: &str = concat!("tokenwatch/", env!("CARGO_PKG_VERSION"));

/// Jupiter price API (`/price/v3?ids=a,b,c`).
pub struct JupiterClient {
    client: Client,
    base_url: String,
}

impl JupiterClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, TokenWatchError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn request_url(&self, ids: &[String]) -> String {
        format!("{}?ids={}", self.base_url, ids.join(","))
    }
}

#[async_trait]
impl PriceSource for JupiterClient {
    async fn fetch_prices(
        &self,
        ids: &[String],
    ) -> Result<HashMap<String, Option<PriceQuote>>, TokenWatchError> {
        let url = self.request_url(ids);
        debug!("Requesting prices: {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TokenWatchError::StatusError(status));
        }

        let body = response.bytes().await?;
        let entries: HashMap<String, Value> = serde_json::from_slice(&body)?;
        debug!("Received {} price entries", entries.len());

        // A bad entry only costs that asset its price this cycle.
        let quotes = entries
            .into_iter()
            .map(|(id, entry)| {
                let quote = serde_json::from_value::<Option<PriceQuote>>(entry).unwrap_or_else(|e| {
                    warn!("Malformed price entry for {}: {}", id, e);
                    None
                });
                (id, quote)
            })
            .collect();
        Ok(quotes)
    }
}
