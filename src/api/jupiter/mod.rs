pub mod price;

pub use price::JupiterClient;
