use thiserror::Error;

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Host unreachable: {0}")]
    Unreachable(String),

    #[error("Invalid response encoding: {0}")]
    InvalidEncoding(String),

    #[error("Malformed response: {0}")]
    Malformed(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize stored data: {0}")]
    Serialization(#[from] serde_json::Error),
}
