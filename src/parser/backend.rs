//! Layout parser abstraction.
//!
//! The classifier and the pipeline only see [`PageLayout`]s. Anything that can
//! turn a file into pages of text containers can stand in for the lopdf
//! implementation, which keeps the pipeline testable without real PDFs.

use std::path::Path;

use crate::error::Result;
use crate::model::PageLayout;

use super::options::ParseOptions;
use super::pdf_parser::PdfParser;

/// Produces page layouts for a document on disk.
pub trait LayoutParser: Send + Sync {
    /// Parse the file at `path` into pages, in page order.
    fn parse_path(&self, path: &Path) -> Result<Vec<PageLayout>>;
}

/// [`LayoutParser`] backed by [`PdfParser`].
#[derive(Debug, Clone, Default)]
pub struct PdfLayoutParser {
    options: ParseOptions,
}

impl PdfLayoutParser {
    /// Create a parser with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    /// The options used for every document.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse an in-memory PDF.
    pub fn parse_bytes(&self, data: &[u8]) -> Result<Vec<PageLayout>> {
        PdfParser::from_bytes_with_options(data, self.options.clone())?.parse()
    }
}

impl LayoutParser for PdfLayoutParser {
    fn parse_path(&self, path: &Path) -> Result<Vec<PageLayout>> {
        PdfParser::open_with_options(path, self.options.clone())?.parse()
    }
}

impl<T: LayoutParser + ?Sized> LayoutParser for &T {
    fn parse_path(&self, path: &Path) -> Result<Vec<PageLayout>> {
        (**self).parse_path(path)
    }
}
