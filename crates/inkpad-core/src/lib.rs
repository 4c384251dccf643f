//! # inkpad-core
//!
//! Core types, traits, and abstractions for the inkpad rich-text editor.
//!
//! This crate provides the data structures shared by the paste classifier,
//! the bounded persistence layer and the editor session, plus the capability
//! traits through which they reach the document model, the network, the user
//! and storage.

pub mod defaults;
pub mod error;
pub mod image_types;
pub mod logging;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use image_types::{
    detect_image_mime, extension_of_content_type, extension_of_path, mime_for_extension,
    ImageTypes,
};
pub use models::*;
pub use traits::*;
