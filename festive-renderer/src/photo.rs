//! Photo loading and decoding.
//!
//! Accepts raw bytes, files, and `data:` URIs (what a browser file reader
//! hands back).

use std::path::Path;

use festive_core::SourceImage;
use image::RgbaImage;

use crate::error::{RenderError, RenderResult};

/// Container format sniffed from a file header, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ImageFormat {
    Png,
    Jpeg,
    WebP,
    Unknown,
}

impl ImageFormat {
    pub(crate) fn from_magic_bytes(data: &[u8]) -> Self {
        if data.len() < 4 {
            return Self::Unknown;
        }

        // PNG: 89 50 4E 47
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return Self::Png;
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Self::Jpeg;
        }

        // WebP: RIFF....WEBP
        if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            return Self::WebP;
        }

        Self::Unknown
    }
}

/// A decoded photo in straight-alpha RGBA.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pixels: RgbaImage,
}

impl DecodedImage {
    /// Wrap already-decoded pixels.
    #[must_use]
    pub fn from_rgba(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    /// The pixels.
    #[must_use]
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

impl SourceImage for DecodedImage {
    fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }
}

/// Load an image from raw bytes.
///
/// # Errors
///
/// Returns an error if the image cannot be decoded.
pub fn load_image_from_bytes(data: &[u8]) -> RenderResult<DecodedImage> {
    let format = ImageFormat::from_magic_bytes(data);

    let img = image::load_from_memory(data).map_err(|e| RenderError::Decode(e.to_string()))?;

    let pixels = img.to_rgba8();
    tracing::debug!(
        "Decoded {:?} image {}x{}",
        format,
        pixels.width(),
        pixels.height()
    );

    Ok(DecodedImage { pixels })
}

/// Load an image from a file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded.
pub fn load_image_from_path(path: &Path) -> RenderResult<DecodedImage> {
    let bytes = std::fs::read(path)
        .map_err(|e| RenderError::Decode(format!("{}: {e}", path.display())))?;
    load_image_from_bytes(&bytes)
}

/// Load an image from a data URI (base64 or percent encoded).
///
/// Supports formats like: `data:image/png;base64,iVBORw0KGgo...`
///
/// # Errors
///
/// Returns an error if the data URI is malformed or the image cannot be decoded.
pub fn load_image_from_data_uri(uri: &str) -> RenderResult<DecodedImage> {
    let uri_data = uri
        .strip_prefix("data:")
        .ok_or_else(|| RenderError::Decode("Not a data URI".to_string()))?;

    // Find the comma separating metadata from data
    let comma_pos = uri_data
        .find(',')
        .ok_or_else(|| RenderError::Decode("Invalid data URI: missing comma".to_string()))?;

    let metadata = &uri_data[..comma_pos];
    let encoded_data = &uri_data[comma_pos + 1..];

    let bytes = if metadata.contains(";base64") {
        use base64::Engine;
        base64::engine::general_purpose::STANDARD
            .decode(encoded_data)
            .map_err(|e| RenderError::Decode(format!("Failed to decode base64: {e}")))?
    } else {
        urlencoding_decode(encoded_data)?
    };

    load_image_from_bytes(&bytes)
}

/// Load from a `data:` URI or a file path, whichever `source` is.
///
/// # Errors
///
/// Returns an error if the source cannot be read or decoded.
pub fn load_image(source: &str) -> RenderResult<DecodedImage> {
    if source.starts_with("data:") {
        load_image_from_data_uri(source)
    } else {
        load_image_from_path(Path::new(source))
    }
}

/// Simple URL decoding (percent-encoding).
fn urlencoding_decode(input: &str) -> RenderResult<Vec<u8>> {
    let bytes = input.as_bytes();
    let mut result = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let byte = input
                .get(i + 1..i + 3)
                .and_then(|hex| u8::from_str_radix(hex, 16).ok())
                .ok_or_else(|| RenderError::Decode("Invalid URL encoding".to_string()))?;
            result.push(byte);
            i += 3;
        } else {
            result.push(bytes[i]);
            i += 1;
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 1x1 red PNG.
    const PNG_BASE64: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8DwHwAFBQIAX8jx0gAAAABJRU5ErkJggg==";

    #[test]
    fn test_format_detection_from_magic_bytes() {
        assert_eq!(
            ImageFormat::from_magic_bytes(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]),
            ImageFormat::Png
        );
        assert_eq!(
            ImageFormat::from_magic_bytes(&[0xFF, 0xD8, 0xFF, 0xE0]),
            ImageFormat::Jpeg
        );
        assert_eq!(
            ImageFormat::from_magic_bytes(b"RIFF\x00\x00\x00\x00WEBP"),
            ImageFormat::WebP
        );
        assert_eq!(ImageFormat::from_magic_bytes(b"hi"), ImageFormat::Unknown);
    }

    #[test]
    fn test_data_uri_parsing() {
        let data_uri = format!("data:image/png;base64,{PNG_BASE64}");
        let image = load_image_from_data_uri(&data_uri).expect("Should parse valid data URI");
        assert_eq!(image.dimensions(), (1, 1));
        assert_eq!(image.pixels().get_pixel(0, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_invalid_data_uri() {
        assert!(load_image_from_data_uri("not a data uri").is_err());
        assert!(load_image_from_data_uri("data:image/png").is_err());
    }

    #[test]
    fn test_garbage_bytes_fail_to_decode() {
        let err = load_image_from_bytes(b"definitely not an image").expect_err("decode");
        assert!(matches!(err, RenderError::Decode(_)));
    }

    #[test]
    fn test_percent_decoding() {
        assert_eq!(urlencoding_decode("a%20b").expect("decode"), b"a b");
        assert!(urlencoding_decode("%G1").is_err());
        assert!(urlencoding_decode("%2").is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(load_image("/definitely/not/here.png").is_err());
    }
}
