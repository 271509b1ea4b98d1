//! Error types for pdf-outline.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pdf-outline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing a PDF or writing its outline.
///
/// A document without a title or without headings is not an error: those
/// cases produce the "Untitled Document" sentinel and an empty outline.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading inputs or writing outputs.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file does not start with a PDF header.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The header carries a version string we cannot read.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// Error decoding a page's text content.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// Error serializing a result.
    #[error("Rendering error: {0}")]
    Render(String),

    /// A denylist file could not be read.
    #[error("Invalid denylist: {0}")]
    Denylist(String),

    /// Failure while processing a specific input file.
    #[error("{}: {source}", path.display())]
    File {
        /// The input file being processed
        path: PathBuf,
        /// The underlying failure
        #[source]
        source: Box<Error>,
    },

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Attach the input path to an error raised while processing it.
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        match self {
            Error::File { .. } => self,
            other => Error::File {
                path: path.into(),
                source: Box::new(other),
            },
        }
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Render(format!("JSON serialization error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Encrypted;
        assert_eq!(err.to_string(), "Document is encrypted");

        let err = Error::UnsupportedVersion("x.y".to_string());
        assert_eq!(err.to_string(), "Unsupported PDF version: x.y");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_in_file_wraps_once() {
        let err = Error::UnknownFormat.in_file("a.pdf").in_file("b.pdf");
        match &err {
            Error::File { path, source } => {
                assert_eq!(path, &PathBuf::from("a.pdf"));
                assert!(matches!(**source, Error::UnknownFormat));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(
            err.to_string(),
            "a.pdf: Unknown file format: not a valid PDF"
        );
    }
}
