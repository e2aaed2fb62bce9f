//! Error types for pdf2text.

use std::io;
use thiserror::Error;

/// Result type alias for pdf2text operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting text.
///
/// Most pipeline failures never reach the caller: codec and syntax errors
/// are logged and the affected object is skipped. Only configuration
/// errors and the explicit `try_*` entry points surface an `Error`.
#[derive(Error, Debug)]
pub enum Error {
    /// No input file was given to the extractor.
    #[error("No filename specified")]
    NoInput,

    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input does not start with a PDF header.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF header names a version we cannot read.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// A stream filter could not decode its input.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Error during rendering (JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NoInput;
        assert_eq!(err.to_string(), "No filename specified");

        let err = Error::Decode("ASCII85Decode: invalid character 'v'".to_string());
        assert_eq!(
            err.to_string(),
            "Decode error: ASCII85Decode: invalid character 'v'"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
