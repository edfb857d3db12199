//! Stickers - emoji glyphs placed on top of the photo.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Half the side of a sticker's square hit box, in pixels.
pub const HIT_HALF_EXTENT: f32 = 30.0;

/// Unique identifier for a sticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StickerId(Uuid);

impl StickerId {
    /// Create a new unique sticker ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for StickerId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for StickerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The fixed sticker vocabulary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StickerKind {
    /// Santa hat.
    Hat,
    /// Christmas tree.
    Tree,
    /// Snowflake.
    Snowflake,
    /// Wrapped present.
    Gift,
    /// Generic sparkle, used for anything unrecognized.
    #[default]
    Sparkle,
}

impl StickerKind {
    /// Every kind, sparkle last.
    pub const ALL: [Self; 5] = [
        Self::Hat,
        Self::Tree,
        Self::Snowflake,
        Self::Gift,
        Self::Sparkle,
    ];

    /// Resolve a sticker type name, falling back to [`StickerKind::Sparkle`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "hat" => Self::Hat,
            "tree" => Self::Tree,
            "snowflake" => Self::Snowflake,
            "gift" => Self::Gift,
            _ => Self::Sparkle,
        }
    }

    /// The glyph drawn for this kind. Never empty.
    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Hat => "\u{1F385}",
            Self::Tree => "\u{1F384}",
            Self::Snowflake => "\u{2744}\u{FE0F}",
            Self::Gift => "\u{1F381}",
            Self::Sparkle => "\u{2728}",
        }
    }
}

/// A glyph overlay positioned in canvas pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sticker {
    /// Unique identifier.
    pub id: StickerId,
    /// Which sticker this is.
    pub kind: StickerKind,
    /// Center x.
    pub x: f32,
    /// Center y.
    pub y: f32,
}

impl Sticker {
    /// Create a sticker centered at a point.
    #[must_use]
    pub fn new(kind: StickerKind, x: f32, y: f32) -> Self {
        Self {
            id: StickerId::new(),
            kind,
            x,
            y,
        }
    }

    /// The glyph to draw.
    #[must_use]
    pub fn glyph(&self) -> &'static str {
        self.kind.glyph()
    }

    /// Check if a point (in canvas coordinates) is within this sticker's hit box.
    #[must_use]
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        (x - self.x).abs() < HIT_HALF_EXTENT && (y - self.y).abs() < HIT_HALF_EXTENT
    }

    /// Move the sticker's center.
    pub fn move_to(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }
}
