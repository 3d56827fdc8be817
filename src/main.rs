// src/main.rs
use log::{info, warn};
use perfume_catalog::aroma::{AromaService, HttpCategoryFetcher};
use perfume_catalog::community::{CommunityRepository, CommunityStore};
use perfume_catalog::error::CatalogError;
use perfume_catalog::pricing::{PriceConfig, PriceService};
use perfume_catalog::quiz::QuizClient;
use perfume_catalog::utils::setup_logging;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), CatalogError> {
    setup_logging().expect("Failed to initialize logging");
    info!("Perfume catalog services starting...");

    // --- Configuration & Initialization ---
    let app_config = perfume_catalog::load_config()?;

    let http_client = reqwest::Client::new();

    let fetcher = Arc::new(HttpCategoryFetcher::new(
        http_client.clone(),
        &app_config.api_base_url,
    ));
    let aroma_service = AromaService::new(
        fetcher,
        Duration::from_secs(app_config.aroma_cache_ttl_secs),
    );

    let repository = CommunityRepository::new(&app_config.community_storage_path);
    let community_store = CommunityStore::open(repository)?;

    let _quiz_client = QuizClient::new(
        http_client,
        &app_config.api_base_url,
        Duration::from_secs(app_config.quiz_request_timeout_secs),
        app_config.quiz_max_results,
    );

    let price_config = match app_config.price_exchange_rate {
        Some(exchange_rate) => PriceConfig {
            exchange_rate,
            ..PriceConfig::default()
        },
        None => PriceConfig::default(),
    };
    let price_service = PriceService::new(price_config);

    // --- Startup report ---
    let grouped = aroma_service.get_grouped_categories().await;
    if grouped.is_empty() {
        warn!("No aroma categories available (API unreachable and cache cold)");
    } else {
        info!("Aroma category groups: {}", grouped.join(", "));
    }

    info!(
        "Community store ready ({} perfume(s) with reviews)",
        community_store.reviewed_perfume_count()
    );
    info!(
        "Price service ready (1 USD = {})",
        price_service.format_idr(price_service.convert_usd_to_idr(1.0) as f64)
    );

    Ok(())
}
