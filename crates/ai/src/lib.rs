//! Clients for the two external AI collaborators.
//!
//! [`client`] wraps the generative-text completion API (idea generation,
//! structured field extraction, document review); [`scraper`] wraps the
//! page-scraping API. Both are single-attempt wrappers: no retries, no
//! backoff. Failures surface immediately to the caller.

pub mod client;
pub mod error;
pub mod ideas;
pub mod scraper;

pub use client::{GenerationParams, TextGenClient};
pub use error::AiError;
pub use scraper::ScraperClient;
