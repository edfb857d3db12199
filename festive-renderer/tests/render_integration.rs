//! End-to-end tests: state changes through festive-core, pixels and bytes
//! out of the renderer.

use festive_core::{CardComposer, DragState, PointerEvent, StickerEditor, Swatch};
use festive_renderer::{
    load_image, DecodedImage, ExportFormat, FontBook, FontConfig, Renderer, RendererConfig,
};
use image::{Rgba, RgbaImage};
use tiny_skia::Pixmap;

fn renderer() -> Renderer {
    Renderer::with_fonts(RendererConfig::default(), FontBook::empty())
}

/// A renderer over the installed fonts, or `None` on a machine without any.
fn text_renderer() -> Option<Renderer> {
    let fonts = FontBook::new(&FontConfig::default()).expect("font book");
    if fonts.face_count() == 0 {
        eprintln!("no system fonts installed; skipping text rendering check");
        return None;
    }
    Some(Renderer::with_fonts(RendererConfig::default(), fonts))
}

fn rgba(pixmap: &Pixmap, x: u32, y: u32) -> [u8; 4] {
    let c = pixmap.pixel(x, y).expect("in bounds").demultiply();
    [c.red(), c.green(), c.blue(), c.alpha()]
}

/// Pixels inside the box centered on `(cx, cy)` where `a` and `b` differ.
fn changed_around(a: &Pixmap, b: &Pixmap, cx: u32, cy: u32, half: u32) -> Vec<(u32, u32)> {
    let mut changed = Vec::new();
    for y in cy.saturating_sub(half)..(cy + half).min(a.height()) {
        for x in cx.saturating_sub(half)..(cx + half).min(a.width()) {
            if rgba(a, x, y) != rgba(b, x, y) {
                changed.push((x, y));
            }
        }
    }
    changed
}

fn solid_editor(color: [u8; 4]) -> StickerEditor<DecodedImage> {
    let photo = RgbaImage::from_pixel(800, 600, Rgba(color));
    let mut editor = StickerEditor::new();
    editor.load_image(DecodedImage::from_rgba(photo)).expect("accept");
    editor
}

fn checkerboard(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        if (x / 8 + y / 8) % 2 == 0 {
            Rgba([200, 30, 30, 255])
        } else {
            Rgba([30, 30, 200, 255])
        }
    })
}

#[test]
fn card_export_is_deterministic_png() {
    let mut composer = CardComposer::new();
    composer.set_message("Peace on earth and goodwill to all");
    composer.set_signature("The Smiths");
    composer.select_swatch(Swatch::Midnight);

    let r = renderer();
    let first = r
        .encode(&r.render_card(&composer).expect("render"), ExportFormat::Png)
        .expect("encode");
    let second = r
        .encode(&r.render_card(&composer).expect("render"), ExportFormat::Png)
        .expect("encode");

    assert_eq!(&first[0..8], b"\x89PNG\r\n\x1a\n");
    assert_eq!(first, second);
}

#[test]
fn photo_file_round_trip_through_editor() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("photo.png");
    checkerboard(400, 400).save(&path).expect("save");

    let photo = load_image(path.to_str().expect("utf-8 path")).expect("load");
    assert_eq!(photo.pixels().dimensions(), (400, 400));

    let mut editor = StickerEditor::new();
    assert_eq!(editor.load_image(photo).expect("accept"), (600, 600));

    editor.add_sticker("tree").expect("sticker");
    editor.handle_pointer(PointerEvent::down(310.0, 290.0));
    assert_eq!(editor.drag_state(), DragState::Dragging { index: 0 });
    assert!(editor.handle_pointer(PointerEvent::moved(100.0, 120.0)));
    editor.handle_pointer(PointerEvent::up(100.0, 120.0));
    assert_eq!((editor.stickers()[0].x, editor.stickers()[0].y), (100.0, 120.0));

    editor.apply_filter("sepia").expect("filter");
    let r = renderer();
    let pixmap = r.render_editor(&editor).expect("render").expect("ready");
    assert_eq!((pixmap.width(), pixmap.height()), (600, 600));

    let url = r.data_url(&pixmap, ExportFormat::Png).expect("url");
    let reloaded = load_image(&url).expect("decode data url");
    assert_eq!(reloaded.pixels().dimensions(), (600, 600));

    // Sepia output has red >= green >= blue for every opaque pixel.
    for px in reloaded.pixels().pixels().step_by(97) {
        let [red, green, blue, _] = px.0;
        assert!(red >= green && green >= blue, "{:?}", px.0);
    }
}

#[test]
fn grayscale_filter_leaves_equal_channels() {
    let mut editor: StickerEditor<DecodedImage> = StickerEditor::new();
    editor
        .load_image(DecodedImage::from_rgba(checkerboard(800, 600)))
        .expect("accept");
    editor.apply_filter("grayscale").expect("filter");

    let pixmap = renderer().render_editor(&editor).expect("render").expect("ready");
    for (x, y) in [(4, 4), (12, 4), (400, 300)] {
        let c = pixmap.pixel(x, y).expect("in bounds").demultiply();
        assert_eq!(c.red(), c.green());
        assert_eq!(c.green(), c.blue());
    }
}

#[test]
fn jpeg_download_of_card() {
    let r = renderer();
    let pixmap = r.render_card(&CardComposer::new()).expect("render");
    let jpeg = r.encode(&pixmap, ExportFormat::Jpeg).expect("encode");
    assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
}

#[test]
fn card_text_is_painted_with_installed_fonts() {
    let Some(r) = text_renderer() else { return };
    let mut composer = CardComposer::new();
    composer.set_signature("The Smiths");

    let pixmap = r.render_card(&composer).expect("render");
    let white_in_band = |top: u32, bottom: u32| {
        (top..bottom)
            .flat_map(|y| (40..560).map(move |x| (x, y)))
            .filter(|&(x, y)| rgba(&pixmap, x, y) == [255, 255, 255, 255])
            .count()
    };

    // Title baseline at 150, first message line at 300, signature at 700.
    assert!(white_in_band(90, 165) > 50, "title band is empty");
    assert!(white_in_band(270, 310) > 50, "message band is empty");
    assert!(white_in_band(675, 710) > 20, "signature band is empty");
    // Nothing between the title and the message.
    assert_eq!(white_in_band(200, 250), 0);
}

#[test]
fn card_with_text_encodes_identically_twice() {
    let Some(r) = text_renderer() else { return };
    let mut composer = CardComposer::new();
    composer.set_message("Peace on earth and goodwill to all, near and far away");

    let first = r
        .encode(&r.render_card(&composer).expect("render"), ExportFormat::Png)
        .expect("encode");
    let second = r
        .encode(&r.render_card(&composer).expect("render"), ExportFormat::Png)
        .expect("encode");
    assert_eq!(first, second);
}

#[test]
fn sticker_glyph_is_drawn_where_the_sticker_sits() {
    let Some(r) = text_renderer() else { return };
    let mut editor = solid_editor([40, 120, 200, 255]);
    let bare = r.render_editor(&editor).expect("render").expect("ready");

    editor.add_sticker("tree").expect("sticker");
    let centered = r.render_editor(&editor).expect("render").expect("ready");
    assert!(!changed_around(&bare, &centered, 400, 300, 40).is_empty());

    editor.handle_pointer(PointerEvent::down(400.0, 300.0));
    editor.handle_pointer(PointerEvent::moved(150.0, 150.0));
    editor.handle_pointer(PointerEvent::up(150.0, 150.0));
    let moved = r.render_editor(&editor).expect("render").expect("ready");
    assert!(!changed_around(&bare, &moved, 150, 150, 40).is_empty());
    assert!(changed_around(&bare, &moved, 400, 300, 40).is_empty());
}

#[test]
fn filter_leaves_sticker_glyphs_untouched() {
    let Some(r) = text_renderer() else { return };
    let mut warm = solid_editor([200, 40, 40, 255]);
    let mut cool = solid_editor([40, 40, 200, 255]);
    warm.add_sticker("gift").expect("sticker");
    cool.add_sticker("gift").expect("sticker");

    let warm_plain = r.render_editor(&warm).expect("render").expect("ready");
    let cool_plain = r.render_editor(&cool).expect("render").expect("ready");

    // Pixels that come out the same over both photos are fully covered by the glyph.
    let covered: Vec<(u32, u32)> = (260..340)
        .flat_map(|y| (360..440).map(move |x| (x, y)))
        .filter(|&(x, y)| rgba(&warm_plain, x, y) == rgba(&cool_plain, x, y))
        .collect();
    assert!(!covered.is_empty(), "sticker left no opaque pixels");

    warm.apply_filter("grayscale").expect("filter");
    let warm_gray = r.render_editor(&warm).expect("render").expect("ready");
    let [r0, g0, b0, _] = rgba(&warm_gray, 10, 10);
    assert!(r0 == g0 && g0 == b0, "photo was not filtered");
    for (x, y) in covered {
        assert_eq!(rgba(&warm_gray, x, y), rgba(&warm_plain, x, y), "({x}, {y})");
    }
}
