//! Encoding rendered surfaces for download.

use base64::Engine as _;
use image::ImageEncoder;
use tiny_skia::Pixmap;

use crate::error::{RenderError, RenderResult};

/// Output encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    /// Lossless PNG.
    #[default]
    Png,
    /// JPEG, composited over a white background.
    Jpeg,
}

impl ExportFormat {
    /// MIME type for data URLs.
    #[must_use]
    pub fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }

    /// Guess the format from a file extension, defaulting to PNG.
    #[must_use]
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Self::Jpeg,
            _ => Self::Png,
        }
    }
}

/// Export settings.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// JPEG quality 1-100 (default: 92).
    pub jpeg_quality: u8,
    /// Color placed under translucent pixels for JPEG.
    pub background: [u8; 3],
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: 92,
            background: [255, 255, 255],
        }
    }
}

/// Encode a pixmap.
///
/// # Errors
///
/// Returns an error if encoding fails.
pub fn encode(
    pixmap: &Pixmap,
    format: ExportFormat,
    config: &ExportConfig,
) -> RenderResult<Vec<u8>> {
    match format {
        ExportFormat::Png => pixmap
            .encode_png()
            .map_err(|e| RenderError::Export(format!("PNG encoding failed: {e}"))),
        ExportFormat::Jpeg => encode_jpeg(pixmap, config),
    }
}

/// Encode a pixmap as a `data:` URL, the form a browser download link uses.
///
/// # Errors
///
/// Returns an error if encoding fails.
pub fn to_data_url(
    pixmap: &Pixmap,
    format: ExportFormat,
    config: &ExportConfig,
) -> RenderResult<String> {
    let bytes = encode(pixmap, format, config)?;
    let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
    Ok(format!("data:{};base64,{payload}", format.mime()))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn encode_jpeg(pixmap: &Pixmap, config: &ExportConfig) -> RenderResult<Vec<u8>> {
    let (width, height) = (pixmap.width(), pixmap.height());
    let bg = config.background;

    // Pixmap data is premultiplied, so compositing over bg is color + bg * (1 - alpha).
    let mut rgb = Vec::with_capacity((width * height * 3) as usize);
    for pixel in pixmap.data().chunks_exact(4) {
        let inv = 1.0 - f32::from(pixel[3]) / 255.0;
        for (&color, &under) in pixel[..3].iter().zip(&bg) {
            let value = f32::from(under).mul_add(inv, f32::from(color));
            rgb.push(value.round().clamp(0.0, 255.0) as u8);
        }
    }

    let mut buf = std::io::Cursor::new(Vec::new());
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, config.jpeg_quality);
    encoder
        .write_image(&rgb, width, height, image::ExtendedColorType::Rgb8)
        .map_err(|e| RenderError::Export(format!("JPEG encoding failed: {e}")))?;

    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red_square() -> Pixmap {
        let mut pixmap = Pixmap::new(16, 16).expect("pixmap");
        pixmap.fill(tiny_skia::Color::from_rgba8(255, 0, 0, 255));
        pixmap
    }

    #[test]
    fn test_png_export_produces_valid_bytes() {
        let config = ExportConfig::default();
        let png = encode(&red_square(), ExportFormat::Png, &config).expect("png");
        assert!(png.len() > 8);
        assert_eq!(&png[0..4], &[137, 80, 78, 71]);
    }

    #[test]
    fn test_jpeg_export_produces_valid_bytes() {
        let config = ExportConfig::default();
        let jpeg = encode(&red_square(), ExportFormat::Jpeg, &config).expect("jpeg");
        assert!(jpeg.len() > 2);
        assert_eq!(jpeg[0], 0xFF);
        assert_eq!(jpeg[1], 0xD8);
    }

    #[test]
    fn transparent_pixels_become_background_in_jpeg() {
        let pixmap = Pixmap::new(8, 8).expect("pixmap");
        let config = ExportConfig::default();
        let jpeg = encode(&pixmap, ExportFormat::Jpeg, &config).expect("jpeg");
        let decoded = image::load_from_memory(&jpeg).expect("decode").to_rgb8();
        let [r, g, b] = decoded.get_pixel(4, 4).0;
        assert!(r > 250 && g > 250 && b > 250);
    }

    #[test]
    fn data_url_has_mime_prefix() {
        let config = ExportConfig::default();
        let url = to_data_url(&red_square(), ExportFormat::Png, &config).expect("url");
        assert!(url.starts_with("data:image/png;base64,iVBORw0KGgo"));
    }

    #[test]
    fn extension_picks_format() {
        assert_eq!(ExportFormat::from_extension("JPG"), ExportFormat::Jpeg);
        assert_eq!(ExportFormat::from_extension("png"), ExportFormat::Png);
        assert_eq!(ExportFormat::from_extension("webp"), ExportFormat::Png);
    }
}
