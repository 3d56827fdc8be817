// src/aroma/service.rs
//! Provides a TTL-bounded caching layer in front of the aroma category API,
//! with derived grouping and search views over the cached list.

use crate::error::{CatalogError, Result};
use crate::models::AromaCategory;
use async_trait::async_trait;
use log::{debug, warn};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// The fetch boundary for category data. Production uses HTTP; tests can
/// substitute an instrumented implementation to count calls.
#[async_trait]
pub trait CategoryFetcher: Send + Sync {
    async fn fetch_categories(&self) -> Result<Vec<AromaCategory>>;
}

/// Fetches categories from `GET {api_base_url}/aromas`.
pub struct HttpCategoryFetcher {
    client: reqwest::Client,
    api_base_url: String,
}

impl HttpCategoryFetcher {
    pub fn new(client: reqwest::Client, api_base_url: &str) -> Self {
        Self {
            client,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl CategoryFetcher for HttpCategoryFetcher {
    async fn fetch_categories(&self) -> Result<Vec<AromaCategory>> {
        let url = format!("{}/aromas", self.api_base_url);
        debug!("Fetching aroma categories from {}", url);
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(CatalogError::NetworkError(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }
        let categories: Vec<AromaCategory> = response.json().await?;
        Ok(categories)
    }
}

struct CachedCategoryList {
    items: Vec<AromaCategory>,
    expires_at: Instant,
}

/// Serves aroma categories while minimizing redundant network calls.
///
/// The cache is scoped to this service object rather than hidden global state,
/// so each construction starts cold and tests can exercise it in isolation.
pub struct AromaService {
    fetcher: Arc<dyn CategoryFetcher>,
    cache_ttl: Duration,
    cache: Mutex<Option<CachedCategoryList>>,
}

impl AromaService {
    /// Default cache lifetime, matching the backend's refresh cadence.
    pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

    pub fn new(fetcher: Arc<dyn CategoryFetcher>, cache_ttl: Duration) -> Self {
        Self {
            fetcher,
            cache_ttl,
            cache: Mutex::new(None),
        }
    }

    /// Returns all aroma categories, served from cache when fresh.
    ///
    /// On fetch failure the previous cache contents are returned even if
    /// expired, else an empty list. Failures are absorbed and logged; this
    /// never returns an error to the caller.
    pub async fn get_aroma_categories(&self) -> Vec<AromaCategory> {
        let mut cache = self.cache.lock().await;

        if let Some(entry) = cache.as_ref() {
            if Instant::now() < entry.expires_at {
                debug!("Aroma category cache HIT ({} entries)", entry.items.len());
                return entry.items.clone();
            }
        }

        match self.fetcher.fetch_categories().await {
            Ok(items) => {
                debug!("Fetched {} aroma categories", items.len());
                *cache = Some(CachedCategoryList {
                    items: items.clone(),
                    expires_at: Instant::now() + self.cache_ttl,
                });
                items
            }
            Err(e) => {
                warn!(
                    "Failed to fetch aroma categories: {}. Falling back to cached data.",
                    e
                );
                cache
                    .as_ref()
                    .map(|entry| entry.items.clone())
                    .unwrap_or_default()
            }
        }
    }

    /// Returns the sorted, deduplicated set of base category names, where the
    /// base is the first whitespace-delimited token of each category name
    /// (e.g. "Woody" from "Woody Spicy").
    pub async fn get_grouped_categories(&self) -> Vec<String> {
        let categories = self.get_aroma_categories().await;

        let mut bases: Vec<String> = categories
            .iter()
            .filter_map(|category| category.name.split_whitespace().next())
            .map(str::to_string)
            .collect();
        bases.sort();
        bases.dedup();
        bases
    }

    /// Returns categories whose name contains `group_name`, case-insensitively.
    pub async fn get_categories_by_group(&self, group_name: &str) -> Vec<AromaCategory> {
        let needle = group_name.to_lowercase();
        self.get_aroma_categories()
            .await
            .into_iter()
            .filter(|category| category.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Searches categories by name or slug, case-insensitively. An empty or
    /// whitespace-only query returns the full list.
    pub async fn search_categories(&self, query: &str) -> Vec<AromaCategory> {
        let categories = self.get_aroma_categories().await;

        if query.trim().is_empty() {
            return categories;
        }

        let needle = query.to_lowercase();
        categories
            .into_iter()
            .filter(|category| {
                category.name.to_lowercase().contains(&needle)
                    || category.slug.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Resets the cache, forcing the next call to refetch.
    pub async fn clear_cache(&self) {
        let mut cache = self.cache.lock().await;
        *cache = None;
        debug!("Aroma category cache cleared");
    }
}
