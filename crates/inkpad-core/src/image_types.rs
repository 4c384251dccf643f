//! Image type allow-list and extension/MIME helpers.
//!
//! The same allow-list decides three things: whether a pasted URL is an image
//! by its path, whether a probed `Content-Type` names an image, and whether
//! an uploaded file may be inserted.

use once_cell::sync::Lazy;
use std::collections::BTreeSet;
use tracing::debug;

use crate::defaults;

static DEFAULT_TYPES: Lazy<ImageTypes> =
    Lazy::new(|| ImageTypes::new(defaults::IMAGE_TYPES.iter().copied()));

/// Case-insensitive set of image file extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageTypes {
    extensions: BTreeSet<String>,
}

impl ImageTypes {
    /// Build from extensions; leading dots and case are ignored, blanks dropped.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim().trim_start_matches('.').to_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();
        Self { extensions }
    }

    /// Parse a comma-separated list such as `"jpg, png,gif"`.
    pub fn parse_list(list: &str) -> Self {
        Self::new(list.split(','))
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }

    pub fn contains(&self, extension: &str) -> bool {
        self.extensions.contains(&extension.to_lowercase())
    }

    /// Extension of the final path segment, if it is allow-listed.
    pub fn match_path(&self, path: &str) -> Option<String> {
        extension_of_path(path).filter(|ext| self.contains(ext))
    }

    /// Image extension named by a `Content-Type`, if it is allow-listed.
    pub fn match_content_type(&self, content_type: &str) -> Option<String> {
        extension_of_content_type(content_type).filter(|ext| self.contains(ext))
    }
}

impl Default for ImageTypes {
    fn default() -> Self {
        DEFAULT_TYPES.clone()
    }
}

/// Lower-cased suffix after the last dot of the last `/`-separated segment.
///
/// `"/a/b/photo.PNG"` gives `"png"`; `"/doc"` and `"/dir.d/"` give `None`.
pub fn extension_of_path(path: &str) -> Option<String> {
    let segment = path.rsplit('/').next()?;
    let (_, ext) = segment.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}

/// Lower-cased subtype of a MIME type, without parameters or a `+xml`-style
/// structured suffix.
///
/// `"image/PNG"` gives `"png"`, `"image/svg+xml; charset=utf-8"` gives `"svg"`,
/// `"garbage"` gives `None`.
pub fn extension_of_content_type(content_type: &str) -> Option<String> {
    let essence = content_type.split(';').next()?.trim();
    let (_, subtype) = essence.split_once('/')?;
    let subtype = subtype.split('+').next()?.trim();
    if subtype.is_empty() {
        return None;
    }
    Some(subtype.to_lowercase())
}

/// MIME type for an image extension.
pub fn mime_for_extension(extension: &str) -> Option<&'static str> {
    match extension.to_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "svg" => Some("image/svg+xml"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        "ico" => Some("image/x-icon"),
        "tif" | "tiff" => Some("image/tiff"),
        "avif" => Some("image/avif"),
        _ => None,
    }
}

/// Detect the MIME type of image bytes.
///
/// Magic bytes win when they name an image; SVG and other formats without an
/// image signature fall back to the file extension, then to
/// `application/octet-stream`.
pub fn detect_image_mime(file_name: &str, data: &[u8]) -> String {
    if let Some(kind) = infer::get(data) {
        if kind.mime_type().starts_with("image/") {
            return kind.mime_type().to_string();
        }
        debug!(
            file_name = %file_name,
            detected = kind.mime_type(),
            "Magic bytes do not name an image, using extension"
        );
    }

    extension_of_path(file_name)
        .and_then(|ext| mime_for_extension(&ext))
        .unwrap_or("application/octet-stream")
        .to_string()
}
