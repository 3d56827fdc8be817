// src/aroma/mod.rs
//! Aroma category service: cached fetching plus grouping and search helpers.

pub mod service;

pub use service::{AromaService, CategoryFetcher, HttpCategoryFetcher};
