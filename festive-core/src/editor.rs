//! Photo sticker editor state.
//!
//! Owns the loaded image, the canvas size derived from it, the ordered sticker
//! list, the active filter and the drag state machine:
//!
//! ```text
//!   Idle ──down on sticker i──▶ Dragging(i) ──move──▶ Dragging(i)
//!    ▲                               │
//!    └──────────── up / leave ───────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    DisplayList, DrawOp, FestiveError, FestiveResult, Filter, FontSpec, PointerEvent,
    PointerPhase, Rgba, Sticker, StickerKind, TextAlign, TextBaseline,
};

/// Width of the box a loaded image is scaled to fit.
pub const MAX_CANVAS_WIDTH: u32 = 800;
/// Height of the box a loaded image is scaled to fit.
pub const MAX_CANVAS_HEIGHT: u32 = 600;

/// Anything with pixel dimensions can back the editor.
pub trait SourceImage {
    /// Width and height in pixels.
    fn dimensions(&self) -> (u32, u32);
}

/// Bare image dimensions, for hosts that keep the pixels elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl SourceImage for ImageSize {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Uniform scale that fits `width`x`height` inside `max_width`x`max_height`.
#[must_use]
pub fn fit_scale(width: u32, height: u32, max_width: u32, max_height: u32) -> f64 {
    (f64::from(max_width) / f64::from(width)).min(f64::from(max_height) / f64::from(height))
}

/// Canvas size for an image scaled by [`fit_scale`], truncated to whole pixels.
///
/// Each side is at least one pixel.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn fit_canvas(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    let scale = fit_scale(width, height, max_width, max_height);
    let w = (f64::from(width) * scale) as u32;
    let h = (f64::from(height) * scale) as u32;
    (w.max(1), h.max(1))
}

/// Font used for sticker glyphs.
#[must_use]
pub fn sticker_font() -> FontSpec {
    FontSpec::new("serif", 50.0)
}

/// Drag gesture state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum DragState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A sticker is following the pointer.
    Dragging {
        /// Index of the dragged sticker.
        index: usize,
    },
}

/// The photo sticker editor.
#[derive(Debug, Clone)]
pub struct StickerEditor<I> {
    image: Option<I>,
    canvas_width: u32,
    canvas_height: u32,
    stickers: Vec<Sticker>,
    filter: Filter,
    drag: DragState,
}

impl<I> Default for StickerEditor<I> {
    fn default() -> Self {
        Self {
            image: None,
            canvas_width: MAX_CANVAS_WIDTH,
            canvas_height: MAX_CANVAS_HEIGHT,
            stickers: Vec::new(),
            filter: Filter::None,
            drag: DragState::Idle,
        }
    }
}

impl<I: SourceImage> StickerEditor<I> {
    /// Create an empty editor with the placeholder canvas size.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an image has been loaded (download enabled, placeholder hidden).
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.image.is_some()
    }

    /// The loaded image, if any.
    #[must_use]
    pub fn image(&self) -> Option<&I> {
        self.image.as_ref()
    }

    /// Current canvas size.
    #[must_use]
    pub fn canvas_size(&self) -> (u32, u32) {
        (self.canvas_width, self.canvas_height)
    }

    /// Stickers in insertion (draw) order.
    #[must_use]
    pub fn stickers(&self) -> &[Sticker] {
        &self.stickers
    }

    /// The active filter.
    #[must_use]
    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// Current drag state.
    #[must_use]
    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Load a decoded image and resize the canvas to fit it.
    ///
    /// Stickers from a previous image are cleared, the filter resets and any
    /// drag ends. Returns the new canvas size.
    ///
    /// # Errors
    ///
    /// Returns [`FestiveError::Decode`] for an image with a zero dimension;
    /// the editor is left untouched.
    pub fn load_image(&mut self, image: I) -> FestiveResult<(u32, u32)> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(FestiveError::Decode(format!(
                "image has no pixels ({width}x{height})"
            )));
        }

        let (canvas_width, canvas_height) =
            fit_canvas(width, height, MAX_CANVAS_WIDTH, MAX_CANVAS_HEIGHT);
        self.canvas_width = canvas_width;
        self.canvas_height = canvas_height;
        self.image = Some(image);
        self.stickers.clear();
        self.filter = Filter::None;
        self.drag = DragState::Idle;

        tracing::debug!(
            "Loaded {width}x{height} image, canvas resized to {canvas_width}x{canvas_height}"
        );
        Ok((canvas_width, canvas_height))
    }

    /// Add a sticker by type name at the canvas center. Unknown names get the
    /// default glyph. Returns the new sticker's index.
    ///
    /// # Errors
    ///
    /// Returns [`FestiveError::PreconditionNotMet`] if no image is loaded; the
    /// sticker list is not touched.
    pub fn add_sticker(&mut self, name: &str) -> FestiveResult<usize> {
        self.add_sticker_kind(StickerKind::from_name(name))
    }

    /// Add a sticker of a known kind at the canvas center.
    ///
    /// # Errors
    ///
    /// Returns [`FestiveError::PreconditionNotMet`] if no image is loaded.
    #[allow(clippy::cast_precision_loss)]
    pub fn add_sticker_kind(&mut self, kind: StickerKind) -> FestiveResult<usize> {
        if self.image.is_none() {
            return Err(FestiveError::no_image());
        }
        let x = self.canvas_width as f32 / 2.0;
        let y = self.canvas_height as f32 / 2.0;
        self.stickers.push(Sticker::new(kind, x, y));
        tracing::debug!("Added {kind:?} sticker at ({x}, {y})");
        Ok(self.stickers.len() - 1)
    }

    /// Index of the topmost sticker whose hit box contains the point.
    #[must_use]
    pub fn hit_test(&self, x: f32, y: f32) -> Option<usize> {
        self.stickers
            .iter()
            .rposition(|sticker| sticker.contains_point(x, y))
    }

    /// Start dragging the sticker under the pointer. Returns whether a drag began.
    ///
    /// A press while already dragging is ignored.
    pub fn pointer_down(&mut self, x: f32, y: f32) -> bool {
        if let DragState::Dragging { index } = self.drag {
            tracing::debug!("Ignoring pointer down while dragging sticker {index}");
            return false;
        }
        match self.hit_test(x, y) {
            Some(index) => {
                self.drag = DragState::Dragging { index };
                tracing::debug!("Drag started on sticker {index}");
                true
            }
            None => false,
        }
    }

    /// Move the dragged sticker to the pointer. Returns whether a redraw is needed.
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        let DragState::Dragging { index } = self.drag else {
            return false;
        };
        if !(x.is_finite() && y.is_finite()) {
            return false;
        }
        match self.stickers.get_mut(index) {
            Some(sticker) => {
                sticker.move_to(x, y);
                tracing::trace!("Sticker {index} moved to ({x}, {y})");
                true
            }
            None => {
                self.drag = DragState::Idle;
                false
            }
        }
    }

    /// End any drag in progress.
    pub fn pointer_up(&mut self) {
        if let DragState::Dragging { index } = self.drag {
            tracing::debug!("Drag ended on sticker {index}");
        }
        self.drag = DragState::Idle;
    }

    /// The pointer left the surface; ends any drag like a release.
    pub fn pointer_leave(&mut self) {
        self.pointer_up();
    }

    /// Route a pointer event. Returns whether a redraw is needed.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        match event.phase {
            PointerPhase::Down => {
                self.pointer_down(event.x, event.y);
                false
            }
            PointerPhase::Move => self.pointer_move(event.x, event.y),
            PointerPhase::Up => {
                self.pointer_up();
                false
            }
            PointerPhase::Leave => {
                self.pointer_leave();
                false
            }
        }
    }

    /// Select a filter by name; unknown names clear it. Returns the filter now active.
    ///
    /// # Errors
    ///
    /// Returns [`FestiveError::PreconditionNotMet`] if no image is loaded.
    pub fn apply_filter(&mut self, name: &str) -> FestiveResult<Filter> {
        if self.image.is_none() {
            return Err(FestiveError::no_image());
        }
        self.filter = Filter::from_name(name);
        tracing::debug!("Filter set to {}", self.filter.css());
        Ok(self.filter)
    }

    /// Draw operations for the current state, or `None` before any image loads.
    ///
    /// The image covers the whole canvas with the active filter; sticker glyphs
    /// follow in insertion order with no filter.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn display_list(&self) -> Option<DisplayList> {
        self.image.as_ref()?;

        let mut list = DisplayList::new(self.canvas_width, self.canvas_height);
        list.push(DrawOp::Image {
            x: 0.0,
            y: 0.0,
            width: self.canvas_width as f32,
            height: self.canvas_height as f32,
            filter: self.filter,
        });

        let font = sticker_font();
        for sticker in &self.stickers {
            list.push(DrawOp::Text {
                content: sticker.glyph().to_string(),
                x: sticker.x,
                y: sticker.y,
                font: font.clone(),
                color: Rgba::rgb(0, 0, 0),
                align: TextAlign::Center,
                baseline: TextBaseline::Middle,
            });
        }
        Some(list)
    }
}
