//! HTTP content-type probe used on the classifier's slow path.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

use inkpad_core::{defaults, ContentTypeProbe, Error, Result};

/// Probes a URL with a GET request and reads its `Content-Type` header.
///
/// Only the response head is consumed; the body is dropped unread.
pub struct HttpContentTypeProbe {
    client: Client,
    timeout_secs: u64,
}

impl HttpContentTypeProbe {
    /// Create a probe with the given request timeout.
    pub fn new(timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .user_agent(defaults::PROBE_USER_AGENT)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            timeout_secs,
        })
    }

    /// Create from environment variables.
    pub fn from_env() -> Result<Self> {
        let timeout_secs = std::env::var(defaults::ENV_PROBE_TIMEOUT_SECS)
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(defaults::PROBE_TIMEOUT_SECS);
        Self::new(timeout_secs)
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }
}

#[async_trait]
impl ContentTypeProbe for HttpContentTypeProbe {
    #[instrument(skip(self), fields(subsystem = "paste", component = "http_probe", op = "probe"))]
    async fn content_type(&self, url: &str) -> Result<Option<String>> {
        let start = Instant::now();

        let response = self.client.get(url).send().await?;

        let status = response.status();
        let content_type = match response.headers().get(CONTENT_TYPE) {
            Some(value) => Some(
                value
                    .to_str()
                    .map_err(|e| Error::Network(format!("Malformed Content-Type header: {}", e)))?
                    .to_string(),
            ),
            None => None,
        };

        let elapsed = start.elapsed().as_millis() as u64;
        debug!(
            status = status.as_u16(),
            content_type = content_type.as_deref().unwrap_or("(none)"),
            duration_ms = elapsed,
            "Probe complete"
        );
        if !status.is_success() {
            warn!(status = status.as_u16(), "Probe returned non-success status");
        }

        Ok(content_type)
    }
}
