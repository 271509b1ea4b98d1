//! # pdf-outline
//!
//! Title and heading outline extraction from PDF documents.
//!
//! Each document is laid out into pages of text containers, then two
//! classifiers run over the text alone:
//!
//! - the **title** is the first text block with at least five words and at
//!   most 120 characters, or `"Untitled Document"`;
//! - the **outline** is every line that is not a form label, a bare number,
//!   a fragment of fewer than four words or a short numbered field. When every
//!   surviving line starts with a number the document is treated as a form and
//!   the outline is dropped.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdf_outline::{extract_file, render, JsonFormat};
//!
//! fn main() -> pdf_outline::Result<()> {
//!     let result = extract_file("document.pdf")?;
//!     println!("{}", render::to_json(&result, JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! The classifiers work on any [`PageLayout`] sequence, so they can be used
//! without a PDF at all:
//!
//! ```
//! use pdf_outline::{extract_headings, extract_title, PageLayout};
//!
//! let pages = vec![PageLayout::new(1)
//!     .with_text("Logo\n")
//!     .with_text("Overview of the Foundation Level Extensions\n")];
//!
//! assert_eq!(extract_title(&pages), "Overview of the Foundation Level Extensions");
//! assert_eq!(extract_headings(&pages).len(), 1);
//! ```

pub mod classify;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod render;

// Re-export commonly used types
pub use classify::{
    extract_headings, extract_title, Denylist, HeadingClassifier, RejectRule, TitleExtractor,
    UNTITLED,
};
pub use detect::{detect_format_from_bytes, detect_format_from_path, has_pdf_extension, PdfFormat};
pub use error::{Error, Result};
pub use model::{
    DocumentResult, HeadingCandidate, HeadingLevel, LayoutElement, PageLayout, TextContainer,
};
pub use parser::{ErrorMode, LayoutParser, ParseOptions, PdfLayoutParser, PdfParser};
pub use pipeline::{DocumentPipeline, FileOutcome, PipelineConfig, RunReport};
pub use render::JsonFormat;

use std::path::Path;

/// Title and outline of the pages, with the default denylist and texts trimmed.
pub fn analyze(pages: &[PageLayout]) -> DocumentResult {
    DocumentResult::new(extract_title(pages), extract_headings(pages)).normalized()
}

/// Parse a PDF file and extract its title and outline.
///
/// # Example
///
/// ```no_run
/// let result = pdf_outline::extract_file("document.pdf").unwrap();
/// println!("{}: {} headings", result.title, result.outline.len());
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<DocumentResult> {
    let pages = PdfParser::open(path)?.parse()?;
    Ok(analyze(&pages))
}

/// Parse a PDF file with custom options and extract its title and outline.
pub fn extract_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ParseOptions,
) -> Result<DocumentResult> {
    let pages = PdfParser::open_with_options(path, options)?.parse()?;
    Ok(analyze(&pages))
}

/// Extract the title and outline of an in-memory PDF.
pub fn extract_bytes(data: &[u8]) -> Result<DocumentResult> {
    let pages = PdfParser::from_bytes(data)?.parse()?;
    Ok(analyze(&pages))
}

/// Extract a PDF file straight to a JSON string.
///
/// ```no_run
/// use pdf_outline::{to_json, JsonFormat};
///
/// let json = to_json("document.pdf", JsonFormat::Pretty).unwrap();
/// std::fs::write("document.json", json).unwrap();
/// ```
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    render::to_json(&extract_file(path)?, format)
}
