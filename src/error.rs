use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Backend returned HTTP {status}")]
    Status { status: u16 },

    #[error("Backend error: {message}")]
    Backend { message: String },

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Server error: {0}")]
    Server(#[from] hyper::Error),

    #[error("Fetch timed out after {0} ms")]
    Timeout(u64),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
