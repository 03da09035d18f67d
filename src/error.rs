use thiserror::Error;

#[derive(Error, Debug)]
pub enum TokenWatchError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("price API returned status {0}")]
    StatusError(reqwest::StatusCode),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    ConfigParseError(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("duplicate asset identifier in watch-list: {0}")]
    DuplicateAsset(String),

    #[error("notification error: {0}")]
    NotificationError(String),
}
