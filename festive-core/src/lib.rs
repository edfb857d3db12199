//! # Festive Canvas Core
//!
//! Model and algorithms behind the festive page: the greeting card layout and
//! the photo sticker editor. Compiles to WASM for use from a browser page.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              festive-core                   │
//! ├─────────────────────────────────────────────┤
//! │  Card Composer   │  Sticker Editor          │
//! │  - Swatches      │  - Fit-to-box scaling    │
//! │  - Word wrap     │  - Hit testing           │
//! │  - Layout        │  - Drag state machine    │
//! ├─────────────────────────────────────────────┤
//! │  Display List (draw ops for any surface)    │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod card;
pub mod color;
pub mod display;
pub mod editor;
pub mod error;
pub mod event;
pub mod sticker;
pub mod text;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use card::{CardComposer, CardState};
pub use color::{Rgba, Swatch};
pub use display::{DisplayList, DrawOp, Filter};
pub use editor::{DragState, ImageSize, SourceImage, StickerEditor};
pub use error::{FestiveError, FestiveResult};
pub use event::{PointerEvent, PointerPhase};
pub use sticker::{Sticker, StickerId, StickerKind};
pub use text::{
    FixedAdvance, FontSpec, FontStyle, FontWeight, TextAlign, TextBaseline, TextMeasure,
    WrappedLine,
};

/// Festive core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
