//! Error types for the sheetvet library.

use std::io;
use thiserror::Error;

/// Result type alias for sheetvet operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort an analysis run.
///
/// Content-level problems (limit violations, unparsable embedded parts) are
/// never surfaced here; they are recorded as [`Finding`](crate::Finding)s and
/// the run continues. Only conditions where no meaningful analysis is
/// possible reach the caller as an `Error`.
#[derive(Error, Debug)]
pub enum Error {
    /// The path does not resolve to a readable file.
    #[error("file not found: {0}")]
    NotFound(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The container signature or ZIP index is invalid.
    #[error("corrupt archive: {0}")]
    CorruptArchive(String),

    /// A named entry is missing from the container.
    #[error("missing entry: {0}")]
    EntryMissing(String),

    /// Error parsing XML content.
    ///
    /// Internal to scan stages: a parse failure in one embedded part degrades
    /// to a CRITICAL finding for that part instead of propagating.
    #[error("XML parse error: {0}")]
    XmlParse(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::CorruptArchive(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NotFound("missing.xlsx".to_string());
        assert_eq!(err.to_string(), "file not found: missing.xlsx");

        let err = Error::CorruptArchive("invalid header".to_string());
        assert_eq!(err.to_string(), "corrupt archive: invalid header");

        let err = Error::EntryMissing("xl/workbook.xml".to_string());
        assert_eq!(err.to_string(), "missing entry: xl/workbook.xml");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
