//! # Festive Canvas Host
//!
//! Owns the page state: section navigation, the card composer and the photo
//! sticker editor. Components never call each other; everything goes through
//! [`App::dispatch`] with a [`Message`].
//!
//! ## Usage
//!
//! ```bash
//! festive card --message "Peace on earth" --signature "The Smiths" --swatch evergreen
//! festive photo --input me.jpg --sticker hat --drag 400,300:120,80 --filter sepia
//! festive swatches
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `AppConfig` - Font sources and export settings for the renderer
//! - `App` - Message dispatch, notices and downloads
//! - `Navigator` - Which section is visible

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

mod app;
mod error;
mod nav;

pub use app::{
    App, CardMessage, DragGesture, Download, EditorMessage, Message, Notice, NoticeLevel,
};
pub use error::{AppError, AppResult};
pub use nav::{Navigator, Section};

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use festive_renderer::{ExportConfig, FontConfig, RendererConfig};

/// Command-line arguments for `festive`.
#[derive(Debug, Clone, Parser)]
#[command(name = "festive")]
#[command(about = "Festive greeting cards and photo stickers")]
#[command(version)]
pub struct CliArgs {
    /// Extra font directory (repeatable)
    #[arg(long = "font-dir", env = "FESTIVE_FONT_DIRS", value_delimiter = ',', global = true)]
    pub font_dirs: Vec<PathBuf>,

    /// Extra font file (repeatable)
    #[arg(long = "font", env = "FESTIVE_FONTS", value_delimiter = ',', global = true)]
    pub font_files: Vec<PathBuf>,

    /// Do not load the platform's installed fonts
    #[arg(long, global = true)]
    pub no_system_fonts: bool,

    /// JPEG quality when writing `.jpg` output
    #[arg(long, default_value = "92", global = true)]
    pub jpeg_quality: u8,

    /// What to make
    #[command(subcommand)]
    pub command: Command,
}

/// `festive` subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Compose a greeting card
    Card {
        /// Card message
        #[arg(long)]
        message: Option<String>,
        /// Signature line
        #[arg(long)]
        signature: Option<String>,
        /// Background swatch name or hex color
        #[arg(long, default_value = "crimson")]
        swatch: String,
        /// Output file (default: christmas-card.png)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Decorate a photo with stickers
    Photo {
        /// Photo file or data URI
        #[arg(long)]
        input: String,
        /// Sticker to add at the canvas center (repeatable, in order)
        #[arg(long = "sticker")]
        stickers: Vec<String>,
        /// Drag replayed after the stickers are added, as X,Y:X,Y (repeatable)
        #[arg(long = "drag")]
        drags: Vec<DragGesture>,
        /// Filter applied last
        #[arg(long)]
        filter: Option<String>,
        /// Output file (default: festive-photo.png)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// List the card palette
    Swatches,
}

/// Host configuration.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Renderer settings.
    pub renderer: RendererConfig,
}

impl From<&CliArgs> for AppConfig {
    fn from(args: &CliArgs) -> Self {
        Self {
            renderer: RendererConfig {
                fonts: FontConfig {
                    system_fonts: !args.no_system_fonts,
                    font_dirs: args.font_dirs.clone(),
                    font_files: args.font_files.clone(),
                },
                export: ExportConfig {
                    jpeg_quality: args.jpeg_quality.clamp(1, 100),
                    ..ExportConfig::default()
                },
                ..RendererConfig::default()
            },
        }
    }
}
