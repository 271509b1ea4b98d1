//! Page layout primitives produced by the layout parser.

use serde::{Deserialize, Serialize};

/// One parsed page: its 1-based number and its layout elements in reading order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    /// Page number (1-indexed)
    pub number: u32,

    /// Layout elements on the page
    pub elements: Vec<LayoutElement>,
}

impl PageLayout {
    /// Create an empty page.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            elements: Vec::new(),
        }
    }

    /// Add an element to the page.
    pub fn push(&mut self, element: LayoutElement) {
        self.elements.push(element);
    }

    /// Add a text container holding `text`.
    pub fn push_text(&mut self, text: impl Into<String>) {
        self.elements
            .push(LayoutElement::Text(TextContainer::new(text)));
    }

    /// Builder form of [`push_text`](Self::push_text).
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.push_text(text);
        self
    }

    /// Iterate over the text containers of the page, skipping other elements.
    pub fn text_containers(&self) -> impl Iterator<Item = &TextContainer> {
        self.elements.iter().filter_map(LayoutElement::as_text)
    }

    /// Check if the page has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// A layout element on a page.
///
/// Only [`LayoutElement::Text`] carries extractable text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayoutElement {
    /// A contiguous run of text
    Text(TextContainer),

    /// An image placed on the page
    Figure {
        /// XObject resource name
        name: String,
    },
}

impl LayoutElement {
    /// The text container, if this element is one.
    pub fn as_text(&self) -> Option<&TextContainer> {
        match self {
            LayoutElement::Text(container) => Some(container),
            LayoutElement::Figure { .. } => None,
        }
    }
}

/// A block of text, possibly spanning several lines separated by `\n`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextContainer {
    text: String,
}

impl TextContainer {
    /// Create a container holding the given raw text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Raw text, including embedded and trailing newlines.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Raw lines, split on `\n` and not trimmed.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }

    /// Check if the container holds only whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}
