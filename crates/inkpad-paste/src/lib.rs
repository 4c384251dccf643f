//! # inkpad-paste
//!
//! Paste interception for the inkpad editor.
//!
//! This crate provides:
//! - [`PasteClassifier`]: decides whether pasted text is a remote image
//! - [`HttpContentTypeProbe`]: `reqwest`-based content-type lookup for URLs
//!   whose path does not reveal an image extension
//! - [`upload`]: conversion of uploaded image files into data-URL image blocks
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use inkpad_core::PasteCandidate;
//! use inkpad_paste::{HttpContentTypeProbe, PasteClassifier};
//!
//! #[tokio::main]
//! async fn main() {
//!     let probe = HttpContentTypeProbe::from_env().unwrap();
//!     let classifier = PasteClassifier::new(Arc::new(probe));
//!     let candidate = PasteCandidate::Text("https://example.com/cat".to_string());
//!     println!("{:?}", classifier.classify(&candidate).await);
//! }
//! ```

pub mod classifier;
pub mod probe;
pub mod upload;

// Mock content-type probe for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use classifier::{parse_absolute_url, PasteClassifier, Triage};
pub use probe::HttpContentTypeProbe;
pub use upload::{data_url, image_block_from_file};
