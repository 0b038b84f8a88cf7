//! Slide data and deck loading.
//!
//! A [`SlideDeck`] is static configuration: it is built once at startup,
//! shared with the renderer, and never mutated afterwards.
//!
//! # Example
//!
//! ```
//! use folio_carousel::SlideDeck;
//!
//! let deck = SlideDeck::from_toml_str(r#"
//! [[slides]]
//! title = "Tile server"
//! description = "Streams slide tiles from S3"
//! tech = ["Rust", "axum"]
//! image_ref = "img/tiles.png"
//! external_link_ref = "https://example.com/tiles"
//! "#)?;
//!
//! assert_eq!(deck.len(), 1);
//! assert_eq!(deck.get(0).map(|s| s.tech.len()), Some(2));
//! # Ok::<(), folio_carousel::Error>(())
//! ```

use std::ops::Index;
use std::path::Path;
use std::sync::Arc;

use folio_core::logging::targets;
use serde::Deserialize;

use crate::error::{Error, Result};

/// One project shown by the carousel.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Slide {
    /// Project title.
    pub title: String,
    /// One-line summary.
    pub description: String,
    /// Longer write-up shown under the summary.
    #[serde(default)]
    pub details: String,
    /// Technologies used, in display order.
    #[serde(default)]
    pub tech: Vec<String>,
    /// Reference to the slide image (path or URL).
    #[serde(alias = "image")]
    pub image_ref: String,
    /// Reference to the external project page.
    #[serde(alias = "link")]
    pub external_link_ref: String,
}

impl Slide {
    /// Create a slide with no details or tech tags.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        image_ref: impl Into<String>,
        external_link_ref: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            details: String::new(),
            tech: Vec::new(),
            image_ref: image_ref.into(),
            external_link_ref: external_link_ref.into(),
        }
    }

    /// Set the long-form details.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }

    /// Set the technology tags.
    pub fn with_tech<I, S>(mut self, tech: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tech = tech.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Deserialize)]
struct DeckFile {
    #[serde(default)]
    slides: Vec<Slide>,
}

/// An immutable, cheaply clonable ordered sequence of slides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlideDeck {
    slides: Arc<[Slide]>,
}

impl SlideDeck {
    /// Create a deck from slides.
    pub fn new(slides: Vec<Slide>) -> Self {
        Self {
            slides: slides.into(),
        }
    }

    /// Parse a deck from a TOML document with a `[[slides]]` array.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: DeckFile = toml::from_str(text).map_err(|e| Error::parse("slide deck", e))?;
        tracing::debug!(target: targets::CONFIG, slides = file.slides.len(), "parsed slide deck");
        Ok(Self::new(file.slides))
    }

    /// Read and parse a deck from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml_str(&text)
    }

    /// Number of slides.
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Whether the deck has no slides.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// The slide at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    /// Iterate over the slides in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Slide> {
        self.slides.iter()
    }
}

impl Index<usize> for SlideDeck {
    type Output = Slide;

    fn index(&self, index: usize) -> &Slide {
        &self.slides[index]
    }
}

impl FromIterator<Slide> for SlideDeck {
    fn from_iter<I: IntoIterator<Item = Slide>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a SlideDeck {
    type Item = &'a Slide;
    type IntoIter = std::slice::Iter<'a, Slide>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deck_from_toml_with_aliases_and_defaults() {
        let deck = SlideDeck::from_toml_str(
            r#"
            [[slides]]
            title = "A"
            description = "first"
            image = "a.png"
            link = "https://a.example"

            [[slides]]
            title = "B"
            description = "second"
            details = "more"
            tech = ["Rust", "wasm"]
            image_ref = "b.png"
            external_link_ref = "https://b.example"
            "#,
        )
        .unwrap();

        assert_eq!(deck.len(), 2);
        assert_eq!(deck[0].image_ref, "a.png");
        assert!(deck[0].tech.is_empty());
        assert_eq!(deck[1].tech, vec!["Rust".to_string(), "wasm".to_string()]);
        assert_eq!(deck[1].details, "more");
    }

    #[test]
    fn test_empty_document_is_empty_deck() {
        let deck = SlideDeck::from_toml_str("").unwrap();
        assert!(deck.is_empty());
    }

    #[test]
    fn test_missing_title_is_parse_error() {
        let err = SlideDeck::from_toml_str(
            r#"
            [[slides]]
            description = "no title"
            image_ref = "x.png"
            external_link_ref = "x"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Parse { what: "slide deck", .. }));
    }

    #[test]
    fn test_clones_share_slides() {
        let deck: SlideDeck = (0..3)
            .map(|i| Slide::new(format!("S{i}"), "d", "i", "l"))
            .collect();
        let other = deck.clone();
        assert!(Arc::ptr_eq(&deck.slides, &other.slides));
        assert_eq!(other.iter().map(|s| s.title.as_str()).collect::<Vec<_>>(), ["S0", "S1", "S2"]);
    }
}
