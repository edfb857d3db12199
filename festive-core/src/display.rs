//! Display lists - the ordered draw operations a raster surface replays.

use serde::{Deserialize, Serialize};

use crate::{FestiveError, FestiveResult, FontSpec, Rgba, TextAlign, TextBaseline};

/// Whole-image visual transform applied while drawing the base image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    /// No transform.
    #[default]
    None,
    /// Full desaturation.
    Grayscale,
    /// Full sepia tone.
    Sepia,
}

impl Filter {
    /// Resolve a filter name. Anything unrecognized means no transform.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "grayscale" | "greyscale" => Self::Grayscale,
            "sepia" => Self::Sepia,
            _ => Self::None,
        }
    }

    /// CSS filter value, as a 2D canvas context would take it.
    #[must_use]
    pub fn css(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Grayscale => "grayscale(100%)",
            Self::Sepia => "sepia(100%)",
        }
    }
}

/// A single drawing primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    /// Fill an axis-aligned rectangle.
    FillRect {
        /// Left edge.
        x: f32,
        /// Top edge.
        y: f32,
        /// Width.
        width: f32,
        /// Height.
        height: f32,
        /// Fill color.
        color: Rgba,
    },

    /// Stroke an axis-aligned rectangle centered on its edges.
    StrokeRect {
        /// Left edge.
        x: f32,
        /// Top edge.
        y: f32,
        /// Width.
        width: f32,
        /// Height.
        height: f32,
        /// Stroke color.
        color: Rgba,
        /// Stroke width in pixels.
        line_width: f32,
    },

    /// Fill a full circle.
    FillCircle {
        /// Center x.
        cx: f32,
        /// Center y.
        cy: f32,
        /// Radius.
        radius: f32,
        /// Fill color.
        color: Rgba,
    },

    /// Draw a single run of text.
    Text {
        /// Text content.
        content: String,
        /// Anchor x.
        x: f32,
        /// Anchor y.
        y: f32,
        /// Font to draw with.
        font: FontSpec,
        /// Fill color.
        color: Rgba,
        /// Horizontal anchor.
        align: TextAlign,
        /// Vertical anchor.
        baseline: TextBaseline,
    },

    /// Draw the source image stretched to the given rectangle.
    Image {
        /// Left edge.
        x: f32,
        /// Top edge.
        y: f32,
        /// Target width.
        width: f32,
        /// Target height.
        height: f32,
        /// Filter applied to this draw only.
        filter: Filter,
    },
}

/// Surface size plus the operations that paint it, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayList {
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// Operations, painted first to last.
    pub ops: Vec<DrawOp>,
}

impl DisplayList {
    /// Create an empty display list for a surface.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    /// Append an operation.
    pub fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    /// Text runs in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { content, .. } => Some(content.as_str()),
            _ => None,
        })
    }

    /// Serialize the display list to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> FestiveResult<String> {
        serde_json::to_string(self).map_err(FestiveError::Serialization)
    }

    /// Deserialize a display list from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn from_json(json: &str) -> FestiveResult<Self> {
        serde_json::from_str(json).map_err(FestiveError::Serialization)
    }
}
