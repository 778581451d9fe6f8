//! HTTP client for the page-scraping API.

use serde::Deserialize;

use crate::error::AiError;

#[derive(Debug, Deserialize)]
struct ScrapeResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    markdown: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Client for the scraping API. One attempt per URL, no retry policy;
/// a failure is surfaced to the caller immediately.
pub struct ScraperClient {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
}

impl ScraperClient {
    pub fn new(api_url: String, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Whether an API key is configured.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Scrape `url`, returning the page content as markdown.
    pub async fn scrape(&self, url: &str) -> Result<String, AiError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(AiError::MissingApiKey { service: "scraper" })?;

        let body = serde_json::json!({ "url": url, "formats": ["markdown"] });

        let response = self
            .client
            .post(format!("{}/scrape", self.api_url))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let scraped: ScrapeResponse = response
            .json()
            .await
            .map_err(|err| AiError::EmptyResponse(err.to_string()))?;

        match (scraped.success, scraped.markdown) {
            (true, Some(markdown)) if !markdown.trim().is_empty() => Ok(markdown),
            (true, _) => Err(AiError::EmptyResponse("scrape returned no content".into())),
            (false, _) => Err(AiError::EmptyResponse(
                scraped.error.unwrap_or_else(|| "scrape failed".into()),
            )),
        }
    }
}
