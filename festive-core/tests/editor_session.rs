//! Card and editor behavior through the public API only.

use festive_core::{
    card, CardComposer, DisplayList, DragState, DrawOp, FestiveError, Filter, FixedAdvance,
    ImageSize, PointerEvent, StickerEditor, StickerKind, Swatch, TextAlign, TextBaseline,
};

fn editor_with(width: u32, height: u32) -> StickerEditor<ImageSize> {
    let mut editor = StickerEditor::new();
    editor
        .load_image(ImageSize { width, height })
        .expect("non-empty image");
    editor
}

#[test]
fn portrait_photo_fits_height() {
    let editor = editor_with(300, 1200);
    // min(800/300, 600/1200) = 0.5
    assert_eq!(editor.canvas_size(), (150, 600));
    assert!(editor.is_ready());
}

#[test]
fn topmost_sticker_wins_and_moves_alone() {
    let mut editor = editor_with(800, 600);
    editor.add_sticker_kind(StickerKind::Hat).expect("ready");
    editor.add_sticker_kind(StickerKind::Gift).expect("ready");

    assert_eq!(editor.hit_test(420.0, 280.0), Some(1));
    editor.pointer_down(420.0, 280.0);
    editor.pointer_move(100.0, 100.0);
    editor.pointer_up();

    assert_eq!((editor.stickers()[0].x, editor.stickers()[0].y), (400.0, 300.0));
    assert_eq!((editor.stickers()[1].x, editor.stickers()[1].y), (100.0, 100.0));
    assert_eq!(editor.hit_test(400.0, 300.0), Some(0));
}

#[test]
fn hit_box_edges_are_exclusive() {
    let mut editor = editor_with(800, 600);
    editor.add_sticker("snowflake").expect("ready");
    assert_eq!(editor.hit_test(429.9, 300.0), Some(0));
    assert_eq!(editor.hit_test(430.0, 300.0), None);
    assert_eq!(editor.hit_test(400.0, 270.0), None);
}

#[test]
fn press_on_empty_space_starts_nothing() {
    let mut editor = editor_with(800, 600);
    editor.add_sticker("tree").expect("ready");
    assert!(!editor.pointer_down(10.0, 10.0));
    assert!(!editor.handle_pointer(PointerEvent::moved(400.0, 300.0)));
    assert_eq!(editor.drag_state(), DragState::Idle);
    assert_eq!((editor.stickers()[0].x, editor.stickers()[0].y), (400.0, 300.0));
}

#[test]
fn editor_display_list_order() {
    let mut editor = editor_with(1600, 1200);
    editor.add_sticker("hat").expect("ready");
    editor.apply_filter("sepia").expect("ready");

    let list = editor.display_list().expect("image loaded");
    assert_eq!((list.width, list.height), (800, 600));
    assert!(matches!(
        list.ops[0],
        DrawOp::Image {
            filter: Filter::Sepia,
            ..
        }
    ));
    match &list.ops[1] {
        DrawOp::Text {
            content,
            align,
            baseline,
            font,
            ..
        } => {
            assert_eq!(content, StickerKind::Hat.glyph());
            assert_eq!(*align, TextAlign::Center);
            assert_eq!(*baseline, TextBaseline::Middle);
            assert!((font.size_px - 50.0).abs() < f32::EPSILON);
        }
        other => panic!("expected text, got {other:?}"),
    }
}

#[test]
fn unready_editor_rejects_and_stays_empty() {
    let mut editor: StickerEditor<ImageSize> = StickerEditor::new();
    assert!(matches!(
        editor.add_sticker("hat"),
        Err(FestiveError::PreconditionNotMet(_))
    ));
    assert!(editor.apply_filter("sepia").is_err());
    assert!(editor.display_list().is_none());
    assert!(editor.stickers().is_empty());
}

#[test]
fn card_display_list_survives_json() {
    let mut composer = CardComposer::new();
    composer.set_message("A very merry holiday to you and yours, from all of us here");
    composer.set_signature("Grace");
    composer.select_swatch(Swatch::Midnight);

    let list = composer.display_list(&FixedAdvance::default());
    let texts: Vec<&str> = list.texts().collect();
    assert_eq!(texts[0], card::TITLE);
    assert_eq!(texts.last().copied(), Some("- Grace -"));
    assert!(texts.len() >= 4, "message should wrap: {texts:?}");

    let back = DisplayList::from_json(&list.to_json().expect("json")).expect("parse");
    assert_eq!(back, list);
}
