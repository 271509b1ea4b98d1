//! PDF layout parsing: documents to pages of text containers.

mod backend;
mod layout;
mod options;
mod pdf_parser;

pub use backend::{LayoutParser, PdfLayoutParser};
pub use layout::{
    decode_text_simple, group_lines_into_blocks, group_spans_into_lines, LayoutAnalyzer,
    PageContent, TextBlock, TextLine, TextSpan,
};
pub use options::{ErrorMode, ParseOptions, DEFAULT_BLOCK_GAP_RATIO};
pub use pdf_parser::PdfParser;
