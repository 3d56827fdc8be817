use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub aroma_cache_ttl_secs: u64,
    pub community_storage_path: String,
    pub quiz_request_timeout_secs: u64,
    pub quiz_max_results: Option<usize>,
    pub price_exchange_rate: Option<f64>,
}

impl Config {
    /// Reads the configuration from the environment. Unset variables fall
    /// back to defaults; a variable that is set but unparsable is an error
    /// rather than a silent default.
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            api_base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080/api".to_string()),
            aroma_cache_ttl_secs: env_parse("AROMA_CACHE_TTL_SECS", 300)?,
            community_storage_path: env::var("COMMUNITY_STORAGE_PATH")
                .unwrap_or_else(|_| "data/community_storage.json".to_string()),
            quiz_request_timeout_secs: env_parse("QUIZ_REQUEST_TIMEOUT_SECS", 30)?,
            quiz_max_results: env_parse_opt("QUIZ_MAX_RESULTS")?,
            price_exchange_rate: env_parse_opt("PRICE_EXCHANGE_RATE")?,
        })
    }

    pub fn validate_and_log(&self) {
        log::info!("Application Configuration Loaded: {:?}", self);
        if self.api_base_url.is_empty() {
            log::error!("API_BASE_URL cannot be empty.");
        }
        if self.community_storage_path.is_empty() {
            log::error!("COMMUNITY_STORAGE_PATH cannot be empty.");
        }
    }
}

fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(value) => value
            .parse()
            .with_context(|| format!("invalid value for {}: {:?}", key, value)),
        Err(_) => Ok(default),
    }
}

fn env_parse_opt<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(value) => value
            .parse()
            .map(Some)
            .with_context(|| format!("invalid value for {}: {:?}", key, value)),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    // The environment is process-global, so these tests take turns.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn unset_variables_fall_back_to_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        env::remove_var("API_BASE_URL");
        env::remove_var("AROMA_CACHE_TTL_SECS");
        env::remove_var("QUIZ_MAX_RESULTS");

        let config = Config::from_env().unwrap();
        assert_eq!(config.aroma_cache_ttl_secs, 300);
        assert_eq!(config.api_base_url, "http://localhost:8080/api");
        assert!(config.quiz_max_results.is_none());
    }

    #[test]
    fn set_but_unparsable_variable_is_an_error() {
        let _guard = ENV_LOCK.lock().unwrap();
        env::set_var("QUIZ_REQUEST_TIMEOUT_SECS", "soon");

        let result = Config::from_env();
        env::remove_var("QUIZ_REQUEST_TIMEOUT_SECS");

        let err = result.unwrap_err();
        assert!(format!("{:#}", err).contains("QUIZ_REQUEST_TIMEOUT_SECS"));
    }

    #[test]
    fn optional_variables_parse_when_set() {
        let _guard = ENV_LOCK.lock().unwrap();
        env::set_var("PRICE_EXCHANGE_RATE", "16000.5");

        let config = Config::from_env().unwrap();
        env::remove_var("PRICE_EXCHANGE_RATE");
        assert_eq!(config.price_exchange_rate, Some(16000.5));
    }
}
