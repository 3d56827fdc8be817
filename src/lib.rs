pub mod aroma;
pub mod community;
pub mod config;
pub mod error;
pub mod models;
pub mod pricing;
pub mod quiz;
pub mod utils;

// Re-export the primary entry points for a cleaner import path.
pub use aroma::AromaService;
pub use community::{CommunityRepository, CommunityStore};
pub use config::{load_config, Config};
pub use error::{CatalogError, Result};
pub use quiz::QuizClient;
