//! The page host: owns navigation and both components, and routes messages
//! between them.

use std::path::Path;
use std::str::FromStr;

use festive_core::{CardComposer, FestiveError, PointerEvent, StickerEditor, Swatch};
use festive_renderer::photo::{load_image, load_image_from_bytes};
use festive_renderer::{DecodedImage, ExportFormat, Renderer};
use serde::{Deserialize, Serialize};
use tiny_skia::Pixmap;

use crate::error::{decode_error, AppError, AppResult};
use crate::nav::{Navigator, Section};
use crate::AppConfig;

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    /// Something happened.
    Info,
    /// The request was ignored; nothing changed.
    Warning,
    /// The request failed.
    Error,
}

/// A message for the user, the host's stand-in for a page alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Text shown to the user.
    pub text: String,
}

impl Notice {
    /// An info notice.
    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    /// A notice describing a failed request.
    #[must_use]
    pub fn from_error(err: &AppError) -> Self {
        Self {
            level: if err.is_warning() {
                NoticeLevel::Warning
            } else {
                NoticeLevel::Error
            },
            text: err.to_string(),
        }
    }
}

/// Card composer input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum CardMessage {
    /// Replace the message text.
    SetMessage(String),
    /// Replace the signature text.
    SetSignature(String),
    /// Pick a background swatch by name or hex color.
    SelectSwatch(String),
}

/// Sticker editor input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum EditorMessage {
    /// Decode and load encoded image bytes; empty means nothing was picked.
    LoadImage(Vec<u8>),
    /// Decode and load a file path or `data:` URI; blank means nothing was picked.
    LoadSource(String),
    /// Add a sticker by type name.
    AddSticker(String),
    /// Pointer input on the canvas.
    Pointer(PointerEvent),
    /// Select a filter by name.
    ApplyFilter(String),
}

/// Everything the page can ask the host to do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Message {
    /// Show a section by id.
    Navigate(String),
    /// Card composer input.
    Card(CardMessage),
    /// Sticker editor input.
    Editor(EditorMessage),
    /// Encode a section's canvas and queue it for download.
    Download(Section),
}

/// An encoded image ready to save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    /// Suggested file name.
    pub file_name: String,
    /// Encoded bytes.
    pub bytes: Vec<u8>,
}

impl Download {
    /// Write the bytes to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> AppResult<()> {
        std::fs::write(path, &self.bytes)?;
        tracing::info!("Saved {} ({} bytes)", path.display(), self.bytes.len());
        Ok(())
    }
}

/// A drag replayed as pointer down, move and up: `X,Y:X,Y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragGesture {
    /// Press point.
    pub from: (f32, f32),
    /// Release point.
    pub to: (f32, f32),
}

impl DragGesture {
    /// Pointer events for this gesture.
    #[must_use]
    pub fn events(&self) -> [PointerEvent; 3] {
        [
            PointerEvent::down(self.from.0, self.from.1),
            PointerEvent::moved(self.to.0, self.to.1),
            PointerEvent::up(self.to.0, self.to.1),
        ]
    }
}

impl FromStr for DragGesture {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AppError::InvalidInput {
            what: "drag",
            value: s.to_string(),
        };
        let point = |p: &str| -> Result<(f32, f32), AppError> {
            let (x, y) = p.split_once(',').ok_or_else(invalid)?;
            let x: f32 = x.trim().parse().map_err(|_| invalid())?;
            let y: f32 = y.trim().parse().map_err(|_| invalid())?;
            if x.is_finite() && y.is_finite() {
                Ok((x, y))
            } else {
                Err(invalid())
            }
        };
        let (from, to) = s.split_once(':').ok_or_else(invalid)?;
        Ok(Self {
            from: point(from)?,
            to: point(to)?,
        })
    }
}

/// The page host.
#[derive(Debug)]
pub struct App {
    nav: Navigator,
    card: CardComposer,
    editor: StickerEditor<DecodedImage>,
    renderer: Renderer,
    downloads: Vec<Download>,
}

impl App {
    /// Create the host and load fonts.
    ///
    /// # Errors
    ///
    /// Returns an error if the renderer cannot be created.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        Ok(Self::with_renderer(Renderer::new(config.renderer)?))
    }

    /// Create the host around an existing renderer.
    #[must_use]
    pub fn with_renderer(renderer: Renderer) -> Self {
        Self {
            nav: Navigator::new(),
            card: CardComposer::new(),
            editor: StickerEditor::new(),
            renderer,
            downloads: Vec::new(),
        }
    }

    /// Navigation state.
    #[must_use]
    pub fn navigator(&self) -> &Navigator {
        &self.nav
    }

    /// The card composer.
    #[must_use]
    pub fn card(&self) -> &CardComposer {
        &self.card
    }

    /// The sticker editor.
    #[must_use]
    pub fn editor(&self) -> &StickerEditor<DecodedImage> {
        &self.editor
    }

    /// The renderer.
    #[must_use]
    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Route a message and report what the user should see.
    pub fn dispatch(&mut self, message: Message) -> Vec<Notice> {
        tracing::trace!("Dispatch {message:?}");
        let result = match message {
            Message::Navigate(id) => {
                self.nav.navigate(&id);
                Ok(None)
            }
            Message::Card(msg) => self.card_message(msg).map(|()| None),
            Message::Editor(msg) => self.editor_message(msg),
            Message::Download(section) => self.download(section).map(|download| {
                let text = format!("{} is ready to download", download.file_name);
                self.downloads.push(download);
                Some(text)
            }),
        };

        match result {
            Ok(Some(text)) => vec![Notice::info(text)],
            Ok(None) => Vec::new(),
            Err(err) => {
                if err.is_warning() {
                    tracing::warn!("{err}");
                } else {
                    tracing::error!("{err}");
                }
                vec![Notice::from_error(&err)]
            }
        }
    }

    /// Downloads queued by [`Message::Download`], oldest first.
    pub fn take_downloads(&mut self) -> Vec<Download> {
        std::mem::take(&mut self.downloads)
    }

    fn card_message(&mut self, message: CardMessage) -> AppResult<()> {
        match message {
            CardMessage::SetMessage(text) => self.card.set_message(text),
            CardMessage::SetSignature(text) => self.card.set_signature(text),
            CardMessage::SelectSwatch(name) => self.card.select_swatch(Swatch::from_name(&name)?),
        }
        Ok(())
    }

    fn editor_message(&mut self, message: EditorMessage) -> AppResult<Option<String>> {
        match message {
            EditorMessage::LoadImage(bytes) => {
                if bytes.is_empty() {
                    tracing::debug!("No photo selected");
                    return Ok(None);
                }
                let image = load_image_from_bytes(&bytes).map_err(decode_error)?;
                self.load_decoded(image).map(Some)
            }
            EditorMessage::LoadSource(source) => {
                if source.trim().is_empty() {
                    tracing::debug!("No photo selected");
                    return Ok(None);
                }
                let image = load_image(&source).map_err(decode_error)?;
                self.load_decoded(image).map(Some)
            }
            EditorMessage::AddSticker(name) => {
                self.editor.add_sticker(&name)?;
                Ok(None)
            }
            EditorMessage::Pointer(event) => {
                self.editor.handle_pointer(event);
                Ok(None)
            }
            EditorMessage::ApplyFilter(name) => {
                self.editor.apply_filter(&name)?;
                Ok(None)
            }
        }
    }

    fn load_decoded(&mut self, image: DecodedImage) -> AppResult<String> {
        let (width, height) = self.editor.load_image(image)?;
        Ok(format!("Photo loaded ({width}x{height})"))
    }

    /// Replay a drag on the editor canvas. Returns whether a sticker moved.
    pub fn drag(&mut self, gesture: DragGesture) -> bool {
        let mut moved = false;
        for event in gesture.events() {
            moved |= self.editor.handle_pointer(event);
        }
        moved
    }

    /// Paint the current card.
    ///
    /// # Errors
    ///
    /// Returns an error if drawing fails.
    pub fn render_card(&self) -> AppResult<Pixmap> {
        Ok(self.renderer.render_card(&self.card)?)
    }

    /// Paint the editor canvas.
    ///
    /// # Errors
    ///
    /// Returns [`FestiveError::PreconditionNotMet`] before a photo is loaded.
    pub fn render_editor(&self) -> AppResult<Pixmap> {
        self.renderer
            .render_editor(&self.editor)?
            .ok_or_else(|| AppError::Festive(FestiveError::no_image()))
    }

    /// Encode a section's canvas as PNG under its download name.
    ///
    /// # Errors
    ///
    /// Returns an error for the home section, before a photo is loaded in
    /// the editor, or if drawing or encoding fails.
    pub fn download(&self, section: Section) -> AppResult<Download> {
        self.download_as(section, ExportFormat::Png)
    }

    /// Encode a section's canvas in the given format.
    ///
    /// # Errors
    ///
    /// See [`App::download`].
    pub fn download_as(&self, section: Section, format: ExportFormat) -> AppResult<Download> {
        let file_name = section.download_name().ok_or_else(|| {
            AppError::Festive(FestiveError::PreconditionNotMet(format!(
                "Nothing to download on {section}"
            )))
        })?;
        let pixmap = match section {
            Section::CardGenerator => self.render_card()?,
            _ => self.render_editor()?,
        };
        let bytes = self.renderer.encode(&pixmap, format)?;
        Ok(Download {
            file_name: file_name.to_string(),
            bytes,
        })
    }
}
