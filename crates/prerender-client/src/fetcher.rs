use std::time::Duration;

use prerender_core::UpstreamConfig;
use prerender_core::error::PrerenderError;
use prerender_core::traits::RenderFetcher;
use reqwest::Client;
use url::Url;

/// Default deadline for the whole upstream request.
const RENDER_TIMEOUT_SECS: u64 = 30;

/// HTTP fetcher for the rendering service, using reqwest.
///
/// The target is `{service_url}/{full original URL}` — the rendering
/// service receives the entire original URL as its own path, so it can
/// resolve relative assets against the original absolute origin.
#[derive(Debug, Clone)]
pub struct ReqwestRenderFetcher {
    client: Client,
    config: UpstreamConfig,
    timeout_secs: u64,
}

impl ReqwestRenderFetcher {
    /// Build a fetcher with the standard 30-second timeout.
    pub fn new(config: UpstreamConfig) -> Result<Self, PrerenderError> {
        Self::with_timeout(config, Duration::from_secs(RENDER_TIMEOUT_SECS))
    }

    pub fn with_timeout(config: UpstreamConfig, timeout: Duration) -> Result<Self, PrerenderError> {
        Url::parse(&config.service_url).map_err(|e| {
            PrerenderError::ConfigError(format!(
                "Invalid rendering service URL '{}': {e}",
                config.service_url
            ))
        })?;

        let timeout_secs = timeout.as_secs();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PrerenderError::HttpError(e.to_string()))?;

        Ok(Self {
            client,
            config,
            timeout_secs,
        })
    }

    /// Target URL for a snapshot: base URL (trailing slash trimmed)
    /// followed by the literal original URL as a single path.
    fn render_url(&self, original_url: &str) -> String {
        format!(
            "{}/{}",
            self.config.service_url.trim_end_matches('/'),
            original_url
        )
    }
}

impl RenderFetcher for ReqwestRenderFetcher {
    async fn fetch(&self, original_url: &str) -> Result<String, PrerenderError> {
        let target = self.render_url(original_url);
        tracing::debug!(%target, "requesting snapshot");

        let mut request = self.client.get(&target);

        if let (Some(username), Some(password)) = (&self.config.username, &self.config.password) {
            request = request.basic_auth(username, Some(password));
        }

        if let Some(token) = &self.config.token {
            request = request.header("x-prerender-token", token);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                PrerenderError::Timeout(self.timeout_secs)
            } else if e.is_connect() {
                PrerenderError::NetworkError(format!("Connection failed: {e}"))
            } else {
                PrerenderError::HttpError(e.to_string())
            }
        })?;

        // The upstream status code is not checked or remapped: on any
        // transport success the body is the authoritative snapshot.
        response
            .text()
            .await
            .map_err(|e| PrerenderError::HttpError(format!("Failed to read response body: {e}")))
    }
}
