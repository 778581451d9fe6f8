/// Errors from the external AI API layer.
///
/// A missing key is deliberately distinct from a failed call: the first
/// routes the user to settings, the second is a plain upstream failure.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// No API key is configured for this collaborator.
    #[error("No API key configured for {service}")]
    MissingApiKey {
        /// Which collaborator is unconfigured (`"text-generation"`, `"scraper"`).
        service: &'static str,
    },

    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The upstream API returned a non-2xx status code.
    #[error("AI API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The upstream API answered 2xx but the payload was unusable.
    #[error("Empty or malformed AI response: {0}")]
    EmptyResponse(String),
}
