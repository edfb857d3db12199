//! Greeting card composer.
//!
//! The card is a fixed 600x800 layout: swatch background, white inset frame,
//! gold corner ornaments, a bold title, the word-wrapped message and an
//! optional signature. Every change rebuilds the whole display list.

use serde::{Deserialize, Serialize};

use crate::text::wrap_text;
use crate::{
    DisplayList, DrawOp, FontSpec, Rgba, Swatch, TextAlign, TextBaseline, TextMeasure,
};

/// Card surface width in pixels.
pub const CARD_WIDTH: u32 = 600;
/// Card surface height in pixels.
pub const CARD_HEIGHT: u32 = 800;

/// Title drawn at the top of every card.
pub const TITLE: &str = "Merry Christmas";
/// Message used when the message field is empty.
pub const DEFAULT_MESSAGE: &str = "Wishing you joy and happiness!";

const FRAME_INSET: f32 = 20.0;
const FRAME_WIDTH: f32 = 10.0;
const ORNAMENT_OFFSET: f32 = 30.0;
const ORNAMENT_RADIUS: f32 = 15.0;
const TITLE_Y: f32 = 150.0;
const MESSAGE_Y: f32 = 300.0;
const MESSAGE_MAX_WIDTH: f32 = 500.0;
const MESSAGE_LINE_HEIGHT: f32 = 40.0;
const SIGNATURE_BOTTOM_OFFSET: f32 = 100.0;

/// Font for the card title.
#[must_use]
pub fn title_font() -> FontSpec {
    FontSpec::new("Mountains of Christmas", 60.0).bold()
}

/// Font for the card message.
#[must_use]
pub fn message_font() -> FontSpec {
    FontSpec::new("Outfit", 30.0)
}

/// Font for the signature line.
#[must_use]
pub fn signature_font() -> FontSpec {
    FontSpec::new("Outfit", 24.0).italic()
}

/// User-entered card content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardState {
    /// Message body; empty means the default greeting.
    pub message: String,
    /// Sender name; empty means no signature line.
    pub signature: String,
    /// Background swatch.
    pub swatch: Swatch,
}

impl CardState {
    /// The message that will actually be drawn.
    #[must_use]
    pub fn effective_message(&self) -> &str {
        if self.message.is_empty() {
            DEFAULT_MESSAGE
        } else {
            &self.message
        }
    }

    /// The decorated signature, or `None` when no name was entered.
    #[must_use]
    pub fn signature_line(&self) -> Option<String> {
        (!self.signature.is_empty()).then(|| format!("- {} -", self.signature))
    }
}

/// Owns a [`CardState`] and lays it out on demand.
#[derive(Debug, Clone, Default)]
pub struct CardComposer {
    state: CardState,
}

impl CardComposer {
    /// Create a composer with default content.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current card content.
    #[must_use]
    pub fn state(&self) -> &CardState {
        &self.state
    }

    /// Replace the message text.
    pub fn set_message(&mut self, message: impl Into<String>) {
        self.state.message = message.into();
        tracing::debug!("Card message updated ({} chars)", self.state.message.len());
    }

    /// Replace the signature text.
    pub fn set_signature(&mut self, signature: impl Into<String>) {
        self.state.signature = signature.into();
        tracing::debug!("Card signature updated");
    }

    /// Choose a background swatch.
    pub fn select_swatch(&mut self, swatch: Swatch) {
        self.state.swatch = swatch;
        tracing::debug!("Card swatch selected: {swatch}");
    }

    /// Lay out the whole card.
    pub fn display_list<M: TextMeasure + ?Sized>(&self, measure: &M) -> DisplayList {
        layout_card(&self.state, measure)
    }
}

/// Lay out a card for the given state.
#[allow(clippy::cast_precision_loss)]
pub fn layout_card<M: TextMeasure + ?Sized>(state: &CardState, measure: &M) -> DisplayList {
    let width = CARD_WIDTH as f32;
    let height = CARD_HEIGHT as f32;
    let center_x = width / 2.0;
    let mut list = DisplayList::new(CARD_WIDTH, CARD_HEIGHT);

    list.push(DrawOp::FillRect {
        x: 0.0,
        y: 0.0,
        width,
        height,
        color: state.swatch.color(),
    });

    list.push(DrawOp::StrokeRect {
        x: FRAME_INSET,
        y: FRAME_INSET,
        width: width - FRAME_INSET * 2.0,
        height: height - FRAME_INSET * 2.0,
        color: Rgba::WHITE,
        line_width: FRAME_WIDTH,
    });

    for (cx, cy) in [
        (ORNAMENT_OFFSET, ORNAMENT_OFFSET),
        (width - ORNAMENT_OFFSET, ORNAMENT_OFFSET),
        (ORNAMENT_OFFSET, height - ORNAMENT_OFFSET),
        (width - ORNAMENT_OFFSET, height - ORNAMENT_OFFSET),
    ] {
        list.push(DrawOp::FillCircle {
            cx,
            cy,
            radius: ORNAMENT_RADIUS,
            color: Rgba::GOLD,
        });
    }

    let centered = |content: String, y: f32, font: FontSpec| DrawOp::Text {
        content,
        x: center_x,
        y,
        font,
        color: Rgba::WHITE,
        align: TextAlign::Center,
        baseline: TextBaseline::Alphabetic,
    };

    list.push(centered(TITLE.to_string(), TITLE_Y, title_font()));

    let font = message_font();
    for line in wrap_text(
        measure,
        state.effective_message(),
        &font,
        MESSAGE_MAX_WIDTH,
        MESSAGE_Y,
        MESSAGE_LINE_HEIGHT,
    ) {
        list.push(centered(line.text, line.y, font.clone()));
    }

    if let Some(signature) = state.signature_line() {
        list.push(centered(
            signature,
            height - SIGNATURE_BOTTOM_OFFSET,
            signature_font(),
        ));
    }

    tracing::trace!("Card laid out with {} ops", list.ops.len());
    list
}
