//! Error types for the reference catalogue.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating reference data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
    /// The reference file could not be read.
    #[error("failed to read reference file at '{path}': {message}")]
    IoError {
        /// Path to the reference file.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The reference JSON is malformed or missing required fields.
    #[error("invalid reference JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The reference document version is not supported.
    #[error("unsupported reference version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the document.
        actual: u32,
    },

    /// The service catalogue is empty, so bookings cannot pick a default.
    #[error("reference data contains no services")]
    EmptyServices,

    /// Two services share the same identifier.
    #[error("duplicate service id {id}")]
    DuplicateServiceId {
        /// The repeated identifier.
        id: u32,
    },

    /// Two foods share the same lookup key.
    #[error("duplicate food key '{key}'")]
    DuplicateFoodKey {
        /// The repeated key.
        key: String,
    },

    /// A named entry has a blank name or title.
    #[error("blank {section} entry at index {index}")]
    BlankEntry {
        /// Section of the document holding the entry.
        section: &'static str,
        /// Index of the entry within its section.
        index: usize,
    },
}
