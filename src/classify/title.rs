//! Title detection: the first reasonably long text block in the document.

use crate::model::PageLayout;

/// Returned when no block qualifies as a title.
pub const UNTITLED: &str = "Untitled Document";

/// Minimum number of words in a title.
pub const MIN_TITLE_WORDS: usize = 5;

/// Maximum number of characters in a title.
pub const MAX_TITLE_CHARS: usize = 120;

/// Finds the document title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleExtractor {
    min_words: usize,
    max_chars: usize,
}

impl TitleExtractor {
    /// Create an extractor with the default bounds.
    pub fn new() -> Self {
        Self {
            min_words: MIN_TITLE_WORDS,
            max_chars: MAX_TITLE_CHARS,
        }
    }

    /// Whether a trimmed block is within the title bounds.
    pub fn accepts(&self, text: &str) -> bool {
        text.split_whitespace().count() >= self.min_words
            && text.chars().count() <= self.max_chars
    }

    /// Return the trimmed text of the first text container, across all pages
    /// in order, with at least five words and at most 120 characters, or
    /// [`UNTITLED`] when none qualifies.
    pub fn extract(&self, pages: &[PageLayout]) -> String {
        pages
            .iter()
            .flat_map(|page| page.text_containers())
            .map(|container| container.text().trim())
            .find(|text| self.accepts(text))
            .unwrap_or(UNTITLED)
            .to_string()
    }
}

impl Default for TitleExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract the title with the default bounds.
pub fn extract_title(pages: &[PageLayout]) -> String {
    TitleExtractor::new().extract(pages)
}
