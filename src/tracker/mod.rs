pub mod alerts;
pub mod monitor;

pub use monitor::PriceChangeMonitor;
