//! Error types for the protanno library.

use thiserror::Error;

use crate::segment::LineCode;

/// Errors that can occur while reading DAT and keyword-list sources.
#[derive(Debug, Error)]
pub enum Error {
    /// An I/O error occurred, including undecodable gzip or UTF-8 input.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A parse error occurred while reading input data.
    #[error("{0}")]
    Parse(String),

    /// A validation constraint was violated.
    #[error("{0}")]
    Validation(String),

    /// A file format error was detected.
    #[error("{0}")]
    Format(String),

    /// A single field of a record could not be extracted.
    /// The assembler leaves the field at its default rather than dropping the record.
    #[error("{code} field: {message}")]
    Field { code: LineCode, message: String },

    /// A keyword that is not part of the catalog was passed to category bucketing.
    #[error("unknown keyword: '{0}'")]
    UnknownKeyword(String),
}

impl Error {
    pub(crate) fn field(code: LineCode, message: impl Into<String>) -> Self {
        Self::Field {
            code,
            message: message.into(),
        }
    }
}
