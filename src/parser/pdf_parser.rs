//! PDF document parser using lopdf.

use std::path::Path;

use lopdf::Document as LopdfDocument;

use crate::detect::{detect_format_from_bytes, detect_format_from_path};
use crate::error::{Error, Result};
use crate::model::{LayoutElement, PageLayout};

use super::layout::LayoutAnalyzer;
use super::options::{ErrorMode, ParseOptions};

/// PDF document parser producing page layouts.
pub struct PdfParser {
    doc: LopdfDocument,
    options: ParseOptions,
}

impl PdfParser {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();
        detect_format_from_path(path)?;
        let doc = LopdfDocument::load(path)?;
        Ok(Self { doc, options })
    }

    /// Parse a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        detect_format_from_bytes(data)?;
        let doc = LopdfDocument::load_mem(data)?;
        Ok(Self { doc, options })
    }

    /// Lay out every page, in page order.
    pub fn parse(&self) -> Result<Vec<PageLayout>> {
        let analyzer = LayoutAnalyzer::new(&self.doc, self.options.block_gap_ratio);

        self.doc
            .get_pages()
            .into_iter()
            .map(|(number, page_id)| match analyzer.analyze_page(page_id) {
                Ok((blocks, xobjects)) => {
                    let mut page = PageLayout::new(number);
                    for block in &blocks {
                        page.push_text(block.text());
                    }
                    for name in xobjects {
                        page.push(LayoutElement::Figure { name });
                    }
                    log::debug!(
                        "Page {}: {} text blocks, {} figures",
                        number,
                        blocks.len(),
                        page.elements.len() - blocks.len()
                    );
                    Ok(page)
                }
                Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                    log::warn!("Failed to lay out page {}: {}", number, e);
                    Ok(PageLayout::new(number))
                }
                Err(e) => Err(match e {
                    Error::TextExtract(msg) => Error::TextExtract(format!("Page {}: {}", number, msg)),
                    other => other,
                }),
            })
            .collect()
    }

    /// Get the number of pages.
    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Check if the document is encrypted.
    pub fn is_encrypted(&self) -> bool {
        self.doc.is_encrypted()
    }

    /// Get PDF version.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }
}
