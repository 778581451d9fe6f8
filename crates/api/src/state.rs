use std::sync::Arc;

use palmares_ai::{ScraperClient, TextGenClient};
use palmares_store::{BlobStore, LocalStore};

use crate::cache::ContestCache;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Constructed once in `main` and injected everywhere. There is no
/// module-level client singleton, so tests swap in their own stores and
/// clients by building a different state.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool (the authenticated path).
    pub pool: palmares_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Device-local JSON store (the unauthenticated path).
    pub local: Arc<LocalStore>,
    /// Object storage for uploaded file bytes.
    pub blobs: Arc<dyn BlobStore>,
    /// Generative-text completion client.
    pub genai: Arc<TextGenClient>,
    /// Page-scraping client.
    pub scraper: Arc<ScraperClient>,
    /// In-memory aggregation cache for contest lists.
    pub contest_cache: Arc<ContestCache>,
}
