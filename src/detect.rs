//! Recognizing PDF inputs by file name and header bytes.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// PDF header information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfFormat {
    /// PDF version (e.g., "1.7", "2.0")
    pub version: String,
}

impl std::fmt::Display for PdfFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PDF {}", self.version)
    }
}

const PDF_MAGIC: &[u8] = b"%PDF-";

/// How far into the file the header may start. Some writers emit junk
/// before `%PDF-`, which readers tolerate within the first kilobyte.
const HEADER_SEARCH_LEN: usize = 1024;

/// Whether a path names a PDF input: its extension is `pdf` in any case.
///
/// ```
/// use pdf_outline::detect::has_pdf_extension;
///
/// assert!(has_pdf_extension("report.PDF"));
/// assert!(!has_pdf_extension("report.pdf.txt"));
/// ```
pub fn has_pdf_extension<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Read the header of a file and check that it is a PDF.
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<PdfFormat> {
    let read_len = HEADER_SEARCH_LEN + PDF_MAGIC.len() + 3;
    let mut header = Vec::with_capacity(read_len);
    File::open(path)?
        .take(read_len as u64)
        .read_to_end(&mut header)?;
    detect_format_from_bytes(&header)
}

/// Check that `data` has a `%PDF-x.y` header within its first kilobyte.
pub fn detect_format_from_bytes(data: &[u8]) -> Result<PdfFormat> {
    let window = &data[..data.len().min(HEADER_SEARCH_LEN + PDF_MAGIC.len())];
    let Some(start) = window
        .windows(PDF_MAGIC.len())
        .position(|w| w == PDF_MAGIC)
    else {
        return Err(Error::UnknownFormat);
    };
    let rest = &data[start + PDF_MAGIC.len()..];
    let Some(version) = rest.get(..3) else {
        return Err(Error::UnknownFormat);
    };

    match version {
        [major, b'.', minor] if major.is_ascii_digit() && minor.is_ascii_digit() => {
            Ok(PdfFormat {
                version: String::from_utf8_lossy(version).into_owned(),
            })
        }
        _ => Err(Error::UnsupportedVersion(
            String::from_utf8_lossy(version).into_owned(),
        )),
    }
}

/// Check if bytes start with a valid PDF header.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}
