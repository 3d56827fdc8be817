use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    /// Network/connectivity issues reaching the catalog API
    #[error("Network Error: {0}")]
    NetworkError(String),

    /// Parsing errors for API responses or persisted state
    #[error("Parse Error: {0}")]
    ParseError(String),

    /// Durable storage read/write/remove failures
    #[error("Storage Error: {0}")]
    StorageError(String),

    /// Configuration errors
    #[error("Config Error: {0}")]
    ConfigError(String),

    /// Recommendation API returned an application-level error
    #[error("Recommendation API Error: {0}")]
    RecommendationApiError(String),

    /// Request exceeded its deadline
    #[error("Timeout Error: {0}")]
    TimeoutError(String),

    /// Invalid input parameters
    #[error("Invalid Input: {0}")]
    InvalidInput(String),

    /// Requested record does not exist
    #[error("Not Found: {0}")]
    NotFound(String),

    /// Unknown/unclassified errors
    #[error("Unknown Error: {0}")]
    Unknown(String),
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::ParseError(format!("JSON serialization/deserialization error: {}", err))
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CatalogError::TimeoutError(err.to_string())
        } else {
            CatalogError::NetworkError(err.to_string())
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::StorageError(err.to_string())
    }
}

impl From<anyhow::Error> for CatalogError {
    fn from(err: anyhow::Error) -> Self {
        // `{:#}` keeps the context chain in the message.
        CatalogError::Unknown(format!("{:#}", err))
    }
}

impl CatalogError {
    /// Determines if an error is recoverable through retry
    pub fn is_recoverable(&self) -> bool {
        match self {
            CatalogError::NetworkError(_) => true,
            CatalogError::TimeoutError(_) => true,
            CatalogError::RecommendationApiError(_) => true,
            CatalogError::StorageError(_) => true,
            CatalogError::ParseError(_) => false,
            CatalogError::ConfigError(_) => false,
            CatalogError::InvalidInput(_) => false,
            CatalogError::NotFound(_) => false,
            CatalogError::Unknown(_) => true,
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
