//! # Festive Canvas Renderer
//!
//! Replays festive-core display lists onto tiny-skia pixmaps.
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │             DisplayList                     │
//! ├──────────────────────┬──────────────────────┤
//! │ Vector ops           │ Image ops            │
//! │ -> SVG -> resvg      │ -> resize -> filter  │
//! │ (shapes, text)       │ -> composite         │
//! ├──────────────────────┴──────────────────────┤
//! │        tiny-skia Pixmap -> PNG / JPEG       │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Runs of consecutive vector ops are drawn as one SVG document; image ops
//! split the runs so paint order is preserved.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod export;
pub mod filter;
pub mod font;
pub mod photo;
pub mod svg;

pub use error::{RenderError, RenderResult};
pub use export::{ExportConfig, ExportFormat};
pub use font::{FontBook, FontConfig};
pub use photo::{load_image, DecodedImage};

use festive_core::{CardComposer, DisplayList, DrawOp, Filter, Rgba, StickerEditor};
use image::imageops::FilterType;
use tiny_skia::{ColorU8, Pixmap, PixmapPaint, Transform};

/// Configuration for the renderer.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Font sources.
    pub fonts: FontConfig,
    /// Color the surface is cleared to before painting.
    pub background: Rgba,
    /// Encoding settings.
    pub export: ExportConfig,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            fonts: FontConfig::default(),
            background: Rgba { r: 0, g: 0, b: 0, a: 0 },
            export: ExportConfig::default(),
        }
    }
}

/// The main renderer interface.
#[derive(Debug)]
pub struct Renderer {
    config: RendererConfig,
    fonts: FontBook,
}

impl Renderer {
    /// Create a new renderer, loading fonts.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured font file cannot be loaded.
    pub fn new(config: RendererConfig) -> RenderResult<Self> {
        let fonts = FontBook::new(&config.fonts)?;
        Ok(Self::with_fonts(config, fonts))
    }

    /// Create a renderer around an existing font book.
    #[must_use]
    pub fn with_fonts(config: RendererConfig, fonts: FontBook) -> Self {
        Self { config, fonts }
    }

    /// Fonts used to measure and draw text.
    #[must_use]
    pub fn fonts(&self) -> &FontBook {
        &self.fonts
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Paint a display list onto a fresh pixmap.
    ///
    /// `source` is the photo drawn by [`DrawOp::Image`]; image ops are skipped
    /// with a warning when it is `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot be created or drawn.
    pub fn render(
        &self,
        list: &DisplayList,
        source: Option<&DecodedImage>,
    ) -> RenderResult<Pixmap> {
        let (width, height) = (list.width.max(1), list.height.max(1));
        let mut pixmap = Pixmap::new(width, height)
            .ok_or_else(|| RenderError::Surface(format!("Invalid surface size {width}x{height}")))?;
        let bg = self.config.background;
        pixmap.fill(tiny_skia::Color::from_rgba8(bg.r, bg.g, bg.b, bg.a));

        let mut batch: Vec<&DrawOp> = Vec::new();
        for op in &list.ops {
            if let DrawOp::Image {
                x,
                y,
                width,
                height,
                filter,
            } = op
            {
                self.flush(&mut pixmap, list, &mut batch)?;
                match source {
                    Some(photo) => {
                        draw_image(&mut pixmap, photo, (*x, *y, *width, *height), *filter)?;
                    }
                    None => tracing::warn!("Image op without a source image; skipped"),
                }
            } else {
                batch.push(op);
            }
        }
        self.flush(&mut pixmap, list, &mut batch)?;

        tracing::debug!(
            "Rendered {} ops to {}x{}",
            list.ops.len(),
            pixmap.width(),
            pixmap.height()
        );
        Ok(pixmap)
    }

    /// Lay out and paint a greeting card.
    ///
    /// # Errors
    ///
    /// Returns an error if drawing fails.
    pub fn render_card(&self, composer: &CardComposer) -> RenderResult<Pixmap> {
        let list = composer.display_list(&self.fonts);
        self.render(&list, None)
    }

    /// Paint the editor's canvas, or `None` before a photo is loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if drawing fails.
    pub fn render_editor(
        &self,
        editor: &StickerEditor<DecodedImage>,
    ) -> RenderResult<Option<Pixmap>> {
        editor
            .display_list()
            .map(|list| self.render(&list, editor.image()))
            .transpose()
    }

    /// Encode a rendered surface with the configured export settings.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn encode(&self, pixmap: &Pixmap, format: ExportFormat) -> RenderResult<Vec<u8>> {
        export::encode(pixmap, format, &self.config.export)
    }

    /// Encode a rendered surface as a `data:` URL.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn data_url(&self, pixmap: &Pixmap, format: ExportFormat) -> RenderResult<String> {
        export::to_data_url(pixmap, format, &self.config.export)
    }

    fn flush(
        &self,
        pixmap: &mut Pixmap,
        list: &DisplayList,
        batch: &mut Vec<&DrawOp>,
    ) -> RenderResult<()> {
        if batch.is_empty() {
            return Ok(());
        }
        let markup = svg::document(list.width, list.height, batch.drain(..), &self.fonts);

        let options = usvg::Options {
            fontdb: self.fonts.database(),
            ..usvg::Options::default()
        };
        let tree = usvg::Tree::from_str(&markup, &options)
            .map_err(|e| RenderError::Surface(format!("SVG parsing failed: {e}")))?;

        resvg::render(&tree, Transform::default(), &mut pixmap.as_mut());
        Ok(())
    }
}

/// Stretch `source` into `rect`, apply `filter`, and composite it.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn draw_image(
    pixmap: &mut Pixmap,
    source: &DecodedImage,
    rect: (f32, f32, f32, f32),
    filter: Filter,
) -> RenderResult<()> {
    let (x, y, width, height) = rect;
    let target_w = (width.round() as u32).max(1);
    let target_h = (height.round() as u32).max(1);

    let mut pixels = if source.pixels().dimensions() == (target_w, target_h) {
        source.pixels().clone()
    } else {
        image::imageops::resize(source.pixels(), target_w, target_h, FilterType::Triangle)
    };
    filter::apply_filter(&mut pixels, filter);

    let mut layer = Pixmap::new(target_w, target_h)
        .ok_or_else(|| RenderError::Surface(format!("Invalid image size {target_w}x{target_h}")))?;
    for (dst, src) in layer.pixels_mut().iter_mut().zip(pixels.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }

    pixmap.draw_pixmap(
        x.round() as i32,
        y.round() as i32,
        layer.as_ref(),
        &PixmapPaint::default(),
        Transform::identity(),
        None,
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use festive_core::{Swatch, TextMeasure};
    use image::RgbaImage;

    fn renderer() -> Renderer {
        Renderer::with_fonts(RendererConfig::default(), FontBook::empty())
    }

    fn pixel(pixmap: &Pixmap, x: u32, y: u32) -> [u8; 4] {
        let c = pixmap.pixel(x, y).expect("in bounds").demultiply();
        [c.red(), c.green(), c.blue(), c.alpha()]
    }

    #[test]
    fn card_background_uses_selected_swatch() {
        let mut composer = CardComposer::new();
        let pixmap = renderer().render_card(&composer).expect("render");
        assert_eq!((pixmap.width(), pixmap.height()), (600, 800));
        assert_eq!(pixel(&pixmap, 100, 250), [0xD4, 0x24, 0x26, 255]);

        composer.select_swatch(Swatch::Evergreen);
        let pixmap = renderer().render_card(&composer).expect("render");
        assert_eq!(pixel(&pixmap, 100, 250), [0x16, 0x5B, 0x33, 255]);
    }

    #[test]
    fn card_frame_and_ornaments_are_painted() {
        let pixmap = renderer().render_card(&CardComposer::new()).expect("render");
        // Frame stroke is centered on x = 20 and 10px wide.
        assert_eq!(pixel(&pixmap, 20, 400), [255, 255, 255, 255]);
        // Ornament centers.
        assert_eq!(pixel(&pixmap, 30, 30), [0xF8, 0xB2, 0x29, 255]);
        assert_eq!(pixel(&pixmap, 570, 770), [0xF8, 0xB2, 0x29, 255]);
    }

    #[test]
    fn editor_without_photo_renders_nothing() {
        let editor = StickerEditor::<DecodedImage>::new();
        assert!(renderer().render_editor(&editor).expect("render").is_none());
    }

    #[test]
    fn editor_photo_is_scaled_and_filtered() {
        let red = RgbaImage::from_pixel(1600, 600, image::Rgba([255, 0, 0, 255]));
        let photo = DecodedImage::from_rgba(red);
        let mut editor = StickerEditor::new();
        assert_eq!(editor.load_image(photo).expect("load"), (800, 300));

        let pixmap = renderer().render_editor(&editor).expect("render").expect("ready");
        assert_eq!((pixmap.width(), pixmap.height()), (800, 300));
        let [r, g, b, a] = pixel(&pixmap, 400, 150);
        assert!(r >= 254 && g == 0 && b == 0 && a == 255);

        editor.apply_filter("grayscale").expect("filter");
        let pixmap = renderer().render_editor(&editor).expect("render").expect("ready");
        assert_eq!(pixel(&pixmap, 400, 150), [54, 54, 54, 255]);
    }

    #[test]
    fn image_op_without_source_is_skipped() {
        let mut list = DisplayList::new(4, 4);
        list.push(DrawOp::Image {
            x: 0.0,
            y: 0.0,
            width: 4.0,
            height: 4.0,
            filter: Filter::None,
        });
        let pixmap = renderer().render(&list, None).expect("render");
        assert_eq!(pixel(&pixmap, 1, 1)[3], 0);
    }

    #[test]
    fn font_book_drives_card_wrapping() {
        let r = renderer();
        let font = festive_core::card::message_font();
        assert!(r.fonts().measure("abc", &font) > 0.0);
    }
}
