//! Mock content-type probe for deterministic testing.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use inkpad_paste::mock::MockProbe;
//!
//! let probe = MockProbe::content_type("image/gif");
//! let calls = probe.calls();
//! let classifier = PasteClassifier::new(Arc::new(probe));
//! // ... classify ...
//! assert_eq!(calls.count(), 1);
//! ```

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

use inkpad_core::{ContentTypeProbe, Error, Result};

#[derive(Debug, Clone)]
enum MockResponse {
    ContentType(String),
    Missing,
    Failure(String),
}

/// URLs a [`MockProbe`] has been asked about.
#[derive(Debug, Clone, Default)]
pub struct ProbeCalls(Arc<Mutex<Vec<String>>>);

impl ProbeCalls {
    pub fn count(&self) -> usize {
        self.0.lock().map(|urls| urls.len()).unwrap_or(0)
    }

    pub fn urls(&self) -> Vec<String> {
        self.0.lock().map(|urls| urls.clone()).unwrap_or_default()
    }

    fn record(&self, url: &str) {
        if let Ok(mut urls) = self.0.lock() {
            urls.push(url.to_string());
        }
    }
}

/// Probe that answers with a canned response.
#[derive(Clone)]
pub struct MockProbe {
    response: MockResponse,
    latency: Option<Duration>,
    gate: Option<Arc<Notify>>,
    calls: ProbeCalls,
}

impl MockProbe {
    /// Respond with the given `Content-Type`.
    pub fn content_type(content_type: impl Into<String>) -> Self {
        Self::with_response(MockResponse::ContentType(content_type.into()))
    }

    /// Respond without a `Content-Type` header.
    pub fn missing() -> Self {
        Self::with_response(MockResponse::Missing)
    }

    /// Fail as if the network request had been rejected.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_response(MockResponse::Failure(message.into()))
    }

    fn with_response(response: MockResponse) -> Self {
        Self {
            response,
            latency: None,
            gate: None,
            calls: ProbeCalls::default(),
        }
    }

    /// Delay every response.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Hold every response until the gate is notified.
    pub fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Handle on the recorded calls; stays valid after the probe is moved.
    pub fn calls(&self) -> ProbeCalls {
        self.calls.clone()
    }
}

#[async_trait]
impl ContentTypeProbe for MockProbe {
    async fn content_type(&self, url: &str) -> Result<Option<String>> {
        self.calls.record(url);

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        match &self.response {
            MockResponse::ContentType(content_type) => Ok(Some(content_type.clone())),
            MockResponse::Missing => Ok(None),
            MockResponse::Failure(message) => Err(Error::Network(message.clone())),
        }
    }
}
