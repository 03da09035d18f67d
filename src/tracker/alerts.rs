use crate::config::WatchedAsset;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Increased,
    Decreased,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Increased => "increased",
            Direction::Decreased => "decreased",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceAlert {
    pub symbol: String,
    pub direction: Direction,
    /// Absolute relative change as a fraction.
    pub magnitude: f64,
    pub last_price: f64,
    pub new_price: f64,
}

impl PriceAlert {
    pub fn title(&self) -> String {
        format!("Price Alert: {}", self.symbol)
    }

    pub fn message(&self) -> String {
        format!(
            "{} has {} by {:.2}% (from ${:.6} to ${:.6})",
            self.symbol,
            self.direction,
            self.magnitude * 100.0,
            self.last_price,
            self.new_price
        )
    }
}

/// Signed relative change from `last_price` to `new_price`, plus the alert it
/// triggers for `asset`, if any. `last_price` must be positive.
pub fn evaluate(asset: &WatchedAsset, last_price: f64, new_price: f64) -> (f64, Option<PriceAlert>) {
    let change = (new_price - last_price) / last_price;
    let magnitude = change.abs();

    if magnitude < asset.threshold {
        return (change, None);
    }

    let direction = if change >= 0.0 {
        Direction::Increased
    } else {
        Direction::Decreased
    };

    let alert = PriceAlert {
        symbol: asset.symbol.clone(),
        direction,
        magnitude,
        last_price,
        new_price,
    };
    (change, Some(alert))
}
