use crate::auth::jwt::JwtConfig;

/// Endpoint + key pair for one external AI collaborator.
#[derive(Debug, Clone)]
pub struct AiEndpointConfig {
    /// Base HTTP URL of the API.
    pub api_url: String,
    /// Bearer key. `None` means unconfigured: calls fail with a distinct
    /// missing-key error instead of hitting the network.
    pub api_key: Option<String>,
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret issued by the external identity provider).
    pub jwt: JwtConfig,
    /// Directory for the unauthenticated-mode JSON store.
    pub local_store_dir: String,
    /// Directory for the filesystem blob store.
    pub blob_dir: String,
    /// URL prefix under which blobs are served.
    pub blob_public_base: String,
    /// Generative-text completion API.
    pub genai: AiEndpointConfig,
    /// Page-scraping API.
    pub scraper: AiEndpointConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                           |
    /// |------------------------|-----------------------------------|
    /// | `HOST`                 | `0.0.0.0`                         |
    /// | `PORT`                 | `3000`                            |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`           |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                              |
    /// | `LOCAL_STORE_DIR`      | `.palmares/local`                 |
    /// | `BLOB_DIR`             | `.palmares/blobs`                 |
    /// | `BLOB_PUBLIC_BASE`     | `http://localhost:3000/blobs`     |
    /// | `GENAI_API_URL`        | `https://api.genai.example/v1`    |
    /// | `GENAI_API_KEY`        | (unset)                           |
    /// | `SCRAPER_API_URL`      | `https://api.scraper.example/v1`  |
    /// | `SCRAPER_API_KEY`      | (unset)                           |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let local_store_dir =
            std::env::var("LOCAL_STORE_DIR").unwrap_or_else(|_| ".palmares/local".into());
        let blob_dir = std::env::var("BLOB_DIR").unwrap_or_else(|_| ".palmares/blobs".into());
        let blob_public_base = std::env::var("BLOB_PUBLIC_BASE")
            .unwrap_or_else(|_| "http://localhost:3000/blobs".into());

        let genai = AiEndpointConfig {
            api_url: std::env::var("GENAI_API_URL")
                .unwrap_or_else(|_| "https://api.genai.example/v1".into()),
            api_key: std::env::var("GENAI_API_KEY").ok().filter(|k| !k.is_empty()),
        };
        let scraper = AiEndpointConfig {
            api_url: std::env::var("SCRAPER_API_URL")
                .unwrap_or_else(|_| "https://api.scraper.example/v1".into()),
            api_key: std::env::var("SCRAPER_API_KEY")
                .ok()
                .filter(|k| !k.is_empty()),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            local_store_dir,
            blob_dir,
            blob_public_base,
            genai,
            scraper,
        }
    }
}
