//! Font descriptions, text measurement and greedy word wrapping.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Font weight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    /// Regular weight (400).
    #[default]
    Normal,
    /// Bold weight (700).
    Bold,
}

/// Font slant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    /// Upright.
    #[default]
    Normal,
    /// Italic.
    Italic,
}

/// A font request: family, pixel size, weight and slant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    /// Preferred family name. Resolution falls back when it is not installed.
    pub family: String,
    /// Em size in pixels.
    pub size_px: f32,
    /// Weight.
    pub weight: FontWeight,
    /// Slant.
    pub style: FontStyle,
}

impl FontSpec {
    /// A regular upright font.
    #[must_use]
    pub fn new(family: impl Into<String>, size_px: f32) -> Self {
        Self {
            family: family.into(),
            size_px,
            weight: FontWeight::Normal,
            style: FontStyle::Normal,
        }
    }

    /// Make this font bold.
    #[must_use]
    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }

    /// Make this font italic.
    #[must_use]
    pub fn italic(mut self) -> Self {
        self.style = FontStyle::Italic;
        self
    }

    /// CSS `font` shorthand, e.g. `bold 60px "Mountains of Christmas"`.
    #[must_use]
    pub fn css(&self) -> String {
        let mut out = String::new();
        if self.style == FontStyle::Italic {
            out.push_str("italic ");
        }
        if self.weight == FontWeight::Bold {
            out.push_str("bold ");
        }
        out.push_str(&format!("{}px \"{}\"", self.size_px, self.family));
        out
    }
}

impl fmt::Display for FontSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.css())
    }
}

/// Horizontal anchor of a text run relative to its x coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// x is the left edge.
    #[default]
    Start,
    /// x is the center.
    Center,
    /// x is the right edge.
    End,
}

/// Vertical anchor of a text run relative to its y coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextBaseline {
    /// y is the alphabetic baseline.
    #[default]
    Alphabetic,
    /// y is the middle of the em box.
    Middle,
}

/// Measures the advance width of a text run in a given font.
pub trait TextMeasure {
    /// Width in pixels of `text` rendered with `font`.
    fn measure(&self, text: &str, font: &FontSpec) -> f32;
}

/// Deterministic measurement with a fixed advance per character.
///
/// Used when no font face can be resolved at all.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvance {
    /// Advance of one character as a fraction of the em size.
    pub em_ratio: f32,
}

impl Default for FixedAdvance {
    fn default() -> Self {
        Self { em_ratio: 0.5 }
    }
}

impl TextMeasure for FixedAdvance {
    #[allow(clippy::cast_precision_loss)]
    fn measure(&self, text: &str, font: &FontSpec) -> f32 {
        text.chars().count() as f32 * font.size_px * self.em_ratio
    }
}

impl<M: TextMeasure + ?Sized> TextMeasure for &M {
    fn measure(&self, text: &str, font: &FontSpec) -> f32 {
        (**self).measure(text, font)
    }
}

/// One committed line of wrapped text and its baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WrappedLine {
    /// Line content, including the trailing space that was measured.
    pub text: String,
    /// Baseline y coordinate.
    pub y: f32,
}

/// Greedy single-pass word wrap.
///
/// Words are accumulated as `line + word + " "`. When that candidate is wider
/// than `max_width` and the line already holds a word, the line is committed,
/// `y` advances by `line_height` and the word starts the next line. The last
/// line is always committed, so the result is never empty.
pub fn wrap_text<M: TextMeasure + ?Sized>(
    measure: &M,
    text: &str,
    font: &FontSpec,
    max_width: f32,
    start_y: f32,
    line_height: f32,
) -> Vec<WrappedLine> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut y = start_y;

    for word in text.split_whitespace() {
        let candidate = format!("{line}{word} ");
        let width = measure.measure(&candidate, font);
        if width > max_width && !line.is_empty() {
            lines.push(WrappedLine {
                text: std::mem::take(&mut line),
                y,
            });
            line = format!("{word} ");
            y += line_height;
        } else {
            line = candidate;
        }
    }

    lines.push(WrappedLine { text: line, y });
    lines
}
