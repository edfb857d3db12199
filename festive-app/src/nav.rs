//! Section navigation.

use std::fmt;

use festive_core::{FestiveError, FestiveResult};
use serde::{Deserialize, Serialize};

/// A top-level page section. Exactly one is visible at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    /// Landing section with calls to action.
    #[default]
    Home,
    /// The greeting card composer.
    CardGenerator,
    /// The photo sticker editor.
    PhotoEditor,
}

impl Section {
    /// Every section, in tab order.
    pub const ALL: [Self; 3] = [Self::Home, Self::CardGenerator, Self::PhotoEditor];

    /// Element id of the section.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::CardGenerator => "card-generator",
            Self::PhotoEditor => "photo-editor",
        }
    }

    /// Look up a section by id.
    ///
    /// # Errors
    ///
    /// Returns [`FestiveError::UnrecognizedOption`] for an unknown id.
    pub fn from_id(id: &str) -> FestiveResult<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.id() == id.trim())
            .ok_or_else(|| FestiveError::UnrecognizedOption {
                kind: "section",
                value: id.to_string(),
            })
    }

    /// Suggested file name when downloading from this section.
    #[must_use]
    pub fn download_name(self) -> Option<&'static str> {
        match self {
            Self::Home => None,
            Self::CardGenerator => Some("christmas-card.png"),
            Self::PhotoEditor => Some("festive-photo.png"),
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Tracks the visible section.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    current: Section,
}

impl Navigator {
    /// Start on the home section.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The visible section.
    #[must_use]
    pub fn current(&self) -> Section {
        self.current
    }

    /// Whether `section` is the one shown.
    #[must_use]
    pub fn is_visible(&self, section: Section) -> bool {
        self.current == section
    }

    /// Show a section.
    pub fn show(&mut self, section: Section) {
        if self.current != section {
            tracing::debug!("Navigating {} -> {}", self.current, section);
        }
        self.current = section;
    }

    /// Show the section with the given id. Unknown ids are ignored and return false.
    pub fn navigate(&mut self, id: &str) -> bool {
        match Section::from_id(id) {
            Ok(section) => {
                self.show(section);
                true
            }
            Err(e) => {
                tracing::debug!("Navigation ignored: {e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_home_with_one_visible_section() {
        let nav = Navigator::new();
        assert_eq!(nav.current(), Section::Home);
        assert_eq!(
            Section::ALL.iter().filter(|s| nav.is_visible(**s)).count(),
            1
        );
    }

    #[test]
    fn navigate_by_id() {
        let mut nav = Navigator::new();
        assert!(nav.navigate("photo-editor"));
        assert!(nav.is_visible(Section::PhotoEditor));
        assert!(!nav.is_visible(Section::Home));
        assert!(nav.navigate("card-generator"));
        assert_eq!(nav.current(), Section::CardGenerator);
    }

    #[test]
    fn unknown_id_is_ignored() {
        let mut nav = Navigator::new();
        nav.show(Section::CardGenerator);
        assert!(!nav.navigate("gallery"));
        assert_eq!(nav.current(), Section::CardGenerator);
    }

    #[test]
    fn ids_round_trip_through_serde() {
        let json = serde_json::to_string(&Section::PhotoEditor).expect("serialize");
        assert_eq!(json, "\"photo-editor\"");
        assert_eq!(
            Section::from_id("card-generator").expect("known"),
            Section::CardGenerator
        );
    }

    #[test]
    fn download_names() {
        assert_eq!(Section::Home.download_name(), None);
        assert_eq!(
            Section::CardGenerator.download_name(),
            Some("christmas-card.png")
        );
        assert_eq!(
            Section::PhotoEditor.download_name(),
            Some("festive-photo.png")
        );
    }
}
