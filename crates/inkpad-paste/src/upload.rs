//! Image upload: turn a picked file into an image block with a data URL.

use base64::Engine;
use tracing::{debug, warn};

use inkpad_core::{defaults, detect_image_mime, extension_of_path, BlockSpec, Error, ImageTypes, Result};

/// Encode bytes as a `data:` URL.
pub fn data_url(mime_type: &str, data: &[u8]) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(data);
    format!("data:{};base64,{}", mime_type, encoded)
}

/// Build an image block for an uploaded file.
///
/// The file name's extension must be allow-listed; the block's `src` is a
/// data URL whose MIME type comes from the file's magic bytes when they name
/// an image, otherwise from the extension.
pub fn image_block_from_file(
    file_name: &str,
    data: &[u8],
    image_types: &ImageTypes,
) -> Result<BlockSpec> {
    let extension = extension_of_path(file_name).unwrap_or_default();
    if !image_types.contains(&extension) {
        warn!(file_name = %file_name, extension = %extension, "Upload rejected: not an image");
        return Err(Error::UnsupportedImage(format!(
            "{}: {}",
            defaults::UNSUPPORTED_IMAGE_NOTICE,
            file_name
        )));
    }
    if data.is_empty() {
        return Err(Error::InvalidInput(format!("{} is empty", file_name)));
    }

    let mime_type = detect_image_mime(file_name, data);
    debug!(
        file_name = %file_name,
        mime_type = %mime_type,
        size_bytes = data.len(),
        "Encoding upload as data URL"
    );

    Ok(BlockSpec::image(data_url(&mime_type, data)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkpad_core::BlockType;

    const PNG: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_data_url_format() {
        assert_eq!(data_url("image/png", b"abc"), "data:image/png;base64,YWJj");
    }

    #[test]
    fn test_png_upload_becomes_image_block() {
        let block = image_block_from_file("photo.PNG", &PNG, &ImageTypes::default()).unwrap();
        assert_eq!(block.block_type, BlockType::Image);
        assert!(block.is_void);
        assert!(block.src().unwrap().starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_magic_bytes_override_extension() {
        let block = image_block_from_file("mislabelled.gif", &PNG, &ImageTypes::default()).unwrap();
        assert!(block.src().unwrap().starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_svg_upload_uses_extension_mime() {
        let svg = b"<svg xmlns=\"http://www.w3.org/2000/svg\"/>";
        let block = image_block_from_file("logo.svg", svg, &ImageTypes::default()).unwrap();
        assert!(block.src().unwrap().starts_with("data:image/svg+xml;base64,"));
    }

    #[test]
    fn test_non_image_extension_is_rejected() {
        let err = image_block_from_file("notes.txt", b"hello", &ImageTypes::default()).unwrap_err();
        match err {
            Error::UnsupportedImage(msg) => assert!(msg.contains("Please select an image file")),
            other => panic!("Expected UnsupportedImage, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_extension_is_rejected() {
        let err = image_block_from_file("README", &PNG, &ImageTypes::default()).unwrap_err();
        assert!(matches!(err, Error::UnsupportedImage(_)));
    }

    #[test]
    fn test_empty_file_is_rejected() {
        let err = image_block_from_file("empty.png", &[], &ImageTypes::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}
