use crate::api::{PriceQuote, PriceSource};
use crate::config::{validate_watch_list, WatchedAsset};
use crate::tracker::alerts::evaluate;
use crate::error::TokenWatchError;
use crate::notify::Notifier;
use chrono::{DateTime, Local};
use log::{debug, error, info, warn};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{self, MissedTickBehavior};

/// Last accepted price for one watched asset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceObservation {
    pub last_price: f64,
    pub observed_at: DateTime<Local>,
}

pub struct PriceChangeMonitor {
    assets: Vec<WatchedAsset>,
    // keyed by asset id; absent until the first valid price arrives
    observations: HashMap<String, PriceObservation>,
    source: Arc<dyn PriceSource>,
    notifier: Arc<dyn Notifier>,
}

impl PriceChangeMonitor {
    pub fn new(
        watch_list: Vec<WatchedAsset>,
        source: Arc<dyn PriceSource>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, TokenWatchError> {
        validate_watch_list(&watch_list)?;

        Ok(Self {
            observations: HashMap::with_capacity(watch_list.len()),
            assets: watch_list,
            source,
            notifier,
        })
    }

    pub fn watch_list(&self) -> &[WatchedAsset] {
        &self.assets
    }

    #[cfg(test)]
    pub fn baseline(&self, id: &str) -> Option<f64> {
        self.observations.get(id).map(|o| o.last_price)
    }

    /// Runs one cycle now, then one per `poll_interval` until the process is
    /// killed. Cycles run back to back on this task and never overlap; a slow
    /// cycle pushes the next tick back instead of bursting.
    ///
    /// Panics if `poll_interval` is zero.
    pub async fn run_forever(&mut self, poll_interval: Duration) {
        info!(
            "Starting token price monitoring with {} tokens...",
            self.assets.len()
        );

        let mut ticker = time::interval(poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            self.run_cycle().await;
        }
    }

    /// One fetch, compare, alert, update pass over the whole watch-list.
    pub async fn run_cycle(&mut self) {
        let ids: Vec<String> = self.assets.iter().map(|a| a.id.clone()).collect();
        info!("Checking prices for {} tokens", ids.len());

        let mut quotes = match self.source.fetch_prices(&ids).await {
            Ok(quotes) => quotes,
            Err(e) => {
                error!("Error fetching token prices: {}", e);
                return;
            }
        };

        for asset in &self.assets {
            match quotes.remove(&asset.id) {
                Some(Some(quote)) => {
                    Self::observe(&mut self.observations, self.notifier.as_ref(), asset, quote)
                        .await
                }
                Some(None) => warn!("Empty price entry for {} ({})", asset.symbol, asset.id),
                None => debug!("No price returned for {} ({})", asset.symbol, asset.id),
            }
        }

        for id in quotes.keys() {
            warn!("Token {} not found in watch-list, ignoring", id);
        }
    }

    async fn observe(
        observations: &mut HashMap<String, PriceObservation>,
        notifier: &dyn Notifier,
        asset: &WatchedAsset,
        quote: PriceQuote,
    ) {
        let new_price = quote.usd_price;
        if !new_price.is_finite() || new_price <= 0.0 {
            warn!(
                "Ignoring invalid price {} for {} ({})",
                new_price, asset.symbol, asset.id
            );
            return;
        }

        if let Some(change_24h) = quote.price_change_24h {
            debug!("{} 24h change: {:.2}%", asset.symbol, change_24h);
        }

        let observation = PriceObservation {
            last_price: new_price,
            observed_at: Local::now(),
        };

        let last_price = match observations.insert(asset.id.clone(), observation) {
            Some(previous) => {
                debug!(
                    "{} baseline ${:.6} from {}",
                    asset.symbol,
                    previous.last_price,
                    previous.observed_at.format("%H:%M:%S")
                );
                previous.last_price
            }
            None => {
                info!("Initial price for {}: ${:.6}", asset.symbol, new_price);
                return;
            }
        };

        let (change, alert) = evaluate(asset, last_price, new_price);
        info!(
            "{}: ${:.6} -> ${:.6} ({:.2}% change)",
            asset.symbol,
            last_price,
            new_price,
            change * 100.0
        );

        if let Some(alert) = alert {
            info!("{}", alert.message());
            match notifier.notify(&alert.title(), &alert.message()).await {
                Ok(()) => info!("Notification sent for {}", asset.symbol),
                Err(e) => error!("Failed to send notification for {}: {}", asset.symbol, e),
            }
        }
    }
}
