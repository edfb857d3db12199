//! Colors and the card background palette.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{FestiveError, FestiveResult};

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

impl Rgba {
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(0xFF, 0xFF, 0xFF);
    /// Gold used for the card's corner ornaments.
    pub const GOLD: Self = Self::rgb(0xF8, 0xB2, 0x29);

    /// Create an opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (leading `#` optional).
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self {
                r: channel(0)?,
                g: channel(2)?,
                b: channel(4)?,
                a: channel(6)?,
            }),
            _ => None,
        }
    }

    /// Format as `#RRGGBB`, or `#RRGGBBAA` when not opaque.
    #[must_use]
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Predefined background choices for the card composer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Swatch {
    /// Christmas red.
    #[default]
    Crimson,
    /// Pine green.
    Evergreen,
    /// Night-sky blue.
    Midnight,
    /// Sugar-plum purple.
    Plum,
}

impl Swatch {
    /// Every swatch, in palette order.
    pub const ALL: [Self; 4] = [Self::Crimson, Self::Evergreen, Self::Midnight, Self::Plum];

    /// The fill color of this swatch.
    #[must_use]
    pub fn color(self) -> Rgba {
        match self {
            Self::Crimson => Rgba::rgb(0xD4, 0x24, 0x26),
            Self::Evergreen => Rgba::rgb(0x16, 0x5B, 0x33),
            Self::Midnight => Rgba::rgb(0x1B, 0x2A, 0x49),
            Self::Plum => Rgba::rgb(0x5B, 0x2A, 0x86),
        }
    }

    /// Lowercase name used by pickers and the CLI.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Crimson => "crimson",
            Self::Evergreen => "evergreen",
            Self::Midnight => "midnight",
            Self::Plum => "plum",
        }
    }

    /// Look up a swatch by name or by its hex color.
    ///
    /// # Errors
    ///
    /// Returns [`FestiveError::UnrecognizedOption`] for anything outside the palette.
    pub fn from_name(name: &str) -> FestiveResult<Self> {
        let wanted = name.trim().to_ascii_lowercase();
        let by_hex = Rgba::from_hex(&wanted);
        Self::ALL
            .into_iter()
            .find(|s| s.name() == wanted || Some(s.color()) == by_hex)
            .ok_or_else(|| FestiveError::UnrecognizedOption {
                kind: "swatch",
                value: name.to_string(),
            })
    }
}

impl fmt::Display for Swatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
