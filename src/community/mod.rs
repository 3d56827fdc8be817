// src/community/mod.rs
//! Community review store: review records, derived statistics, and the
//! JSON-file repository that keeps them across restarts.

pub mod repository;
pub mod stats;
pub mod store;
pub mod types;

pub use repository::CommunityRepository;
pub use store::CommunityStore;
pub use types::*;
