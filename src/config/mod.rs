pub mod settings;

pub use settings::Config;

use crate::error::CatalogError;
use std::sync::Arc;

/// Loads and returns the application configuration as an `Arc<Config>`.
/// Centralizes dotenv loading and validation of the essential settings.
pub fn load_config() -> Result<Arc<Config>, CatalogError> {
    dotenv::dotenv().ok(); // Load .env file if present, ignore errors

    let config = Config::from_env()?;

    if config.api_base_url.is_empty() {
        return Err(CatalogError::ConfigError(
            "API_BASE_URL cannot be empty".to_string(),
        ));
    }
    if config.community_storage_path.is_empty() {
        return Err(CatalogError::ConfigError(
            "COMMUNITY_STORAGE_PATH cannot be empty".to_string(),
        ));
    }

    config.validate_and_log();

    Ok(Arc::new(config))
}
