//! HTTP client for the generative-text completion API.
//!
//! One `POST {api_url}/complete` per call with a natural-language
//! instruction and generation parameters in the JSON body. The reply text
//! comes back verbatim; parsing (line splitting for ideas, brace-matched
//! JSON for field extraction) happens in the callers.

use serde::{Deserialize, Serialize};

use palmares_core::extraction::{parse_extraction, ExtractedContest};
use palmares_core::types::Timestamp;

use crate::error::AiError;

/// Generation parameters sent with every completion request.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_output_tokens: 1024,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    text: String,
}

/// Client for the completion API.
pub struct TextGenClient {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
}

impl TextGenClient {
    /// Create a client for the completion API.
    ///
    /// * `api_url` - Base HTTP URL, e.g. `https://api.example.com/v1`.
    /// * `api_key` - `None` when the key is unconfigured; calls then fail
    ///   with [`AiError::MissingApiKey`] before any network traffic.
    pub fn new(api_url: String, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling across collaborators).
    pub fn with_client(client: reqwest::Client, api_url: String, api_key: Option<String>) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Whether an API key is configured.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Run one completion and return the raw reply text.
    ///
    /// Single attempt. Non-2xx responses surface as [`AiError::Api`] with
    /// the raw body; a 2xx response with blank text is
    /// [`AiError::EmptyResponse`].
    pub async fn complete(
        &self,
        instruction: &str,
        params: GenerationParams,
    ) -> Result<String, AiError> {
        let api_key = self.api_key.as_deref().ok_or(AiError::MissingApiKey {
            service: "text-generation",
        })?;

        let body = serde_json::json!({
            "instruction": instruction,
            "temperature": params.temperature,
            "max_output_tokens": params.max_output_tokens,
        });

        let response = self
            .client
            .post(format!("{}/complete", self.api_url))
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

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|err| AiError::EmptyResponse(err.to_string()))?;

        if completion.text.trim().is_empty() {
            return Err(AiError::EmptyResponse("completion text was blank".into()));
        }
        Ok(completion.text)
    }

    /// Extract the full contest field set from raw page or pasted text.
    ///
    /// Never partially fails: any reply, including malformed JSON,
    /// degrades to field-by-field defaults via
    /// [`palmares_core::extraction::parse_extraction`].
    pub async fn extract_contest_fields(
        &self,
        text: &str,
        now: Timestamp,
    ) -> Result<ExtractedContest, AiError> {
        let instruction = format!(
            "Extract contest details from the text below and answer with a single JSON \
             object using exactly these keys: title, organization, category, description, \
             theme, submission_format, schedule_note, prize, precautions, \
             result_announcement, url, deadline (ISO 8601 date). Use an empty string for \
             anything the text does not state.\n\n{text}"
        );
        let reply = self
            .complete(
                &instruction,
                GenerationParams {
                    temperature: 0.2,
                    ..GenerationParams::default()
                },
            )
            .await?;
        Ok(parse_extraction(&reply, now))
    }

    /// Review a document draft, returning unstructured prose.
    ///
    /// No structure contract beyond "non-empty string or error".
    pub async fn review_document(
        &self,
        text: &str,
        doc_type: &str,
    ) -> Result<String, AiError> {
        let instruction = format!(
            "You are reviewing a {doc_type} for a contest submission. Give concrete, \
             actionable feedback on the draft below.\n\n{text}"
        );
        self.complete(
            &instruction,
            GenerationParams {
                max_output_tokens: 2048,
                ..GenerationParams::default()
            },
        )
        .await
    }
}
