//! Paste classification: decide whether inserted text is a remote image.
//!
//! Classification runs in three steps:
//!
//! 1. Text that is not an absolute `http(s)` URL passes through untouched.
//! 2. A URL whose last path segment ends in an allow-listed extension becomes
//!    an image immediately, without touching the network.
//! 3. Any other URL is probed for its `Content-Type`; an allow-listed subtype
//!    makes it an image, anything else (including a failed probe) passes
//!    through.
//!
//! No error ever escapes classification: failures are logged and degrade to
//! [`Classification::PassThrough`].

use reqwest::Url;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, field, instrument, warn, Span};

use inkpad_core::{
    logging, Classification, ContentTypeProbe, Error, ImageIntent, ImageTypes, PasteCandidate,
    Result,
};

/// Synchronous verdict on a payload, before any network work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Triage {
    /// Not a well-formed absolute URL.
    NotUrl,
    /// URL path names an allow-listed image extension.
    Image(ImageIntent),
    /// Well-formed URL without an image extension; needs a probe.
    NeedsProbe(Url),
}

/// Parse `payload` as an absolute `http`/`https` URL with a host.
///
/// Payloads containing whitespace are rejected even where the URL parser
/// would trim it.
pub fn parse_absolute_url(payload: &str) -> Result<Url> {
    if payload.is_empty() || payload.chars().any(char::is_whitespace) {
        return Err(Error::MalformedUrl(payload.to_string()));
    }

    let url = Url::parse(payload).map_err(|_| Error::MalformedUrl(payload.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::MalformedUrl(payload.to_string()));
    }
    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(Error::MalformedUrl(payload.to_string())),
    }
}

/// Turns pasted URLs into image intents.
#[derive(Clone)]
pub struct PasteClassifier {
    probe: Arc<dyn ContentTypeProbe>,
    image_types: ImageTypes,
}

impl PasteClassifier {
    /// Create a classifier with the default image allow-list.
    pub fn new(probe: Arc<dyn ContentTypeProbe>) -> Self {
        Self {
            probe,
            image_types: ImageTypes::default(),
        }
    }

    /// Replace the image allow-list.
    pub fn with_image_types(mut self, image_types: ImageTypes) -> Self {
        self.image_types = image_types;
        self
    }

    pub fn image_types(&self) -> &ImageTypes {
        &self.image_types
    }

    /// Steps 1 and 2: decide what can be decided without the network.
    pub fn triage(&self, payload: &str) -> Triage {
        let url = match parse_absolute_url(payload) {
            Ok(url) => url,
            Err(_) => return Triage::NotUrl,
        };

        match self.image_types.match_path(url.path()) {
            Some(extension) => {
                debug!(url = %payload, extension = %extension, "Image extension in URL path");
                Triage::Image(ImageIntent::new(payload))
            }
            None => Triage::NeedsProbe(url),
        }
    }

    /// Classify a candidate, probing the network if the URL alone is not enough.
    #[instrument(skip(self, candidate), fields(subsystem = "paste", component = "classifier", op = "classify", outcome = field::Empty))]
    pub async fn classify(&self, candidate: &PasteCandidate) -> Classification {
        let payload = candidate.payload();
        let classification = match self.triage(payload) {
            Triage::NotUrl => Classification::PassThrough,
            Triage::Image(intent) => Classification::Handled(intent),
            Triage::NeedsProbe(url) => self.probe(payload, &url).await,
        };
        Span::current().record(logging::OUTCOME, classification.label());
        classification
    }

    /// Step 3: probe `url` and classify by its content type.
    ///
    /// The intent's target is `payload` exactly as pasted, not the normalized
    /// URL.
    pub async fn probe(&self, payload: &str, url: &Url) -> Classification {
        let start = Instant::now();
        let result = self.try_probe(payload, url).await;
        let elapsed = start.elapsed().as_millis() as u64;

        match result {
            Ok(intent) => {
                debug!(url = %payload, duration_ms = elapsed, outcome = "image", "Probe classified URL as image");
                Classification::Handled(intent)
            }
            Err(Error::UnclassifiedContentType(content_type)) => {
                debug!(
                    url = %payload,
                    content_type = %content_type,
                    duration_ms = elapsed,
                    outcome = "pass_through",
                    "Probed content type is not an image"
                );
                Classification::PassThrough
            }
            Err(e) => {
                warn!(
                    url = %payload,
                    error = %e,
                    duration_ms = elapsed,
                    outcome = "pass_through",
                    "Probe failed, inserting text unchanged"
                );
                Classification::PassThrough
            }
        }
    }

    async fn try_probe(&self, payload: &str, url: &Url) -> Result<ImageIntent> {
        let content_type = self
            .probe
            .content_type(url.as_str())
            .await?
            .ok_or_else(|| Error::UnclassifiedContentType("(missing)".to_string()))?;

        match self.image_types.match_content_type(&content_type) {
            Some(_) => Ok(ImageIntent::new(payload)),
            None => Err(Error::UnclassifiedContentType(content_type)),
        }
    }
}
