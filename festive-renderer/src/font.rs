//! Font discovery and glyph metrics.
//!
//! Faces are found with the same `fontdb` database that `usvg` uses to draw
//! text, so the face a line is measured with is the face it is painted with.
//! Resolution order for a requested family: the family itself, the serif and
//! sans-serif generics, then any installed face. With no faces at all,
//! measurement falls back to [`FixedAdvance`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use ab_glyph::{Font as _, FontVec, PxScale, ScaleFont as _};
use festive_core::{FixedAdvance, FontSpec, FontStyle, FontWeight, TextMeasure};
use usvg::fontdb;

use crate::error::{RenderError, RenderResult};

/// Where to look for fonts.
#[derive(Debug, Clone)]
pub struct FontConfig {
    /// Load the platform's installed fonts.
    pub system_fonts: bool,
    /// Extra directories scanned recursively.
    pub font_dirs: Vec<PathBuf>,
    /// Extra font files.
    pub font_files: Vec<PathBuf>,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            system_fonts: true,
            font_dirs: Vec::new(),
            font_files: Vec::new(),
        }
    }
}

/// A face chosen for a [`FontSpec`].
#[derive(Debug)]
pub struct ResolvedFace {
    /// Family name of the chosen face, as `usvg` will look it up.
    pub family: String,
    metrics: Option<FontVec>,
}

type FaceKey = (String, FontWeight, FontStyle);

/// Installed and configured fonts plus a per-request resolution cache.
pub struct FontBook {
    db: Arc<fontdb::Database>,
    resolved: RefCell<HashMap<FaceKey, Option<Arc<ResolvedFace>>>>,
    fallback: FixedAdvance,
}

impl std::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontBook")
            .field("faces", &self.db.len())
            .finish_non_exhaustive()
    }
}

impl FontBook {
    /// Build a font book from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly listed font file cannot be loaded.
    pub fn new(config: &FontConfig) -> RenderResult<Self> {
        let mut db = fontdb::Database::new();

        #[cfg(feature = "system-fonts")]
        if config.system_fonts {
            db.load_system_fonts();
        }

        for dir in &config.font_dirs {
            db.load_fonts_dir(dir);
        }
        for file in &config.font_files {
            db.load_font_file(file)
                .map_err(|e| RenderError::Font(format!("{}: {e}", file.display())))?;
        }

        tracing::debug!("Font book loaded {} faces", db.len());
        if db.is_empty() {
            tracing::warn!("No fonts available; text will be measured approximately and not drawn");
        }

        Ok(Self::from_database(db))
    }

    /// A font book with no faces at all.
    #[must_use]
    pub fn empty() -> Self {
        Self::from_database(fontdb::Database::new())
    }

    /// Wrap an existing database.
    #[must_use]
    pub fn from_database(db: fontdb::Database) -> Self {
        Self {
            db: Arc::new(db),
            resolved: RefCell::new(HashMap::new()),
            fallback: FixedAdvance::default(),
        }
    }

    /// Shared database, for `usvg` text rendering.
    #[must_use]
    pub fn database(&self) -> Arc<fontdb::Database> {
        Arc::clone(&self.db)
    }

    /// Number of loaded faces.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.db.len()
    }

    /// Resolve the face used for a font request, or `None` when no faces exist.
    #[must_use]
    pub fn resolve(&self, font: &FontSpec) -> Option<Arc<ResolvedFace>> {
        let key = (font.family.clone(), font.weight, font.style);
        if let Some(hit) = self.resolved.borrow().get(&key) {
            return hit.clone();
        }

        let face = self.lookup(font).map(Arc::new);
        match &face {
            Some(face) if face.family != font.family => {
                tracing::debug!("Font \"{}\" resolved to \"{}\"", font.family, face.family);
            }
            Some(_) => {}
            None => tracing::warn!("No face for {}", font.css()),
        }
        self.resolved.borrow_mut().insert(key, face.clone());
        face
    }

    fn lookup(&self, font: &FontSpec) -> Option<ResolvedFace> {
        let families = [
            generic_or_named(&font.family),
            fontdb::Family::Serif,
            fontdb::Family::SansSerif,
        ];
        let query = fontdb::Query {
            families: &families,
            weight: match font.weight {
                FontWeight::Normal => fontdb::Weight::NORMAL,
                FontWeight::Bold => fontdb::Weight::BOLD,
            },
            stretch: fontdb::Stretch::Normal,
            style: match font.style {
                FontStyle::Normal => fontdb::Style::Normal,
                FontStyle::Italic => fontdb::Style::Italic,
            },
        };

        let id = self
            .db
            .query(&query)
            .or_else(|| self.db.faces().next().map(|face| face.id))?;
        let family = self
            .db
            .face(id)?
            .families
            .first()
            .map(|(name, _)| name.clone())?;
        let metrics = self
            .db
            .with_face_data(id, |data, index| {
                FontVec::try_from_vec_and_index(data.to_vec(), index).ok()
            })
            .flatten();

        Some(ResolvedFace { family, metrics })
    }
}

impl TextMeasure for FontBook {
    fn measure(&self, text: &str, font: &FontSpec) -> f32 {
        match self.resolve(font) {
            Some(face) => match &face.metrics {
                Some(metrics) => advance_width(metrics, font.size_px, text),
                None => self.fallback.measure(text, font),
            },
            None => self.fallback.measure(text, font),
        }
    }
}

/// Sum of horizontal advances plus kerning, at an em size of `size_px`.
fn advance_width(font: &FontVec, size_px: f32, text: &str) -> f32 {
    let units_per_em = font.units_per_em().unwrap_or(1000.0);
    let scaled = font.as_scaled(PxScale::from(size_px * font.height_unscaled() / units_per_em));

    let mut width = 0.0;
    let mut prev = None;
    for ch in text.chars() {
        let id = font.glyph_id(ch);
        if let Some(prev_id) = prev {
            width += scaled.kern(prev_id, id);
        }
        width += scaled.h_advance(id);
        prev = Some(id);
    }
    width
}

fn generic_or_named(family: &str) -> fontdb::Family<'_> {
    match family {
        "serif" => fontdb::Family::Serif,
        "sans-serif" => fontdb::Family::SansSerif,
        "monospace" => fontdb::Family::Monospace,
        "cursive" => fontdb::Family::Cursive,
        "fantasy" => fontdb::Family::Fantasy,
        name => fontdb::Family::Name(name),
    }
}
