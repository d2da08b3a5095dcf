//! XLSX error types

use thiserror::Error;

/// Result type for XLSX operations
pub type XlsxResult<T> = std::result::Result<T, XlsxError>;

/// Errors that can occur during XLSX reading/writing
#[derive(Debug, Error)]
pub enum XlsxError {
    /// The archive lacks the document-properties members every package carries
    #[error("Not an Office Open XML package: missing {0}")]
    NotAPackage(String),

    /// The package holds a document kind this library does not implement
    #[error("Unsupported document kind: {0}")]
    UnsupportedKind(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// XML error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// A package was asked to write itself back but has no stored path
    #[error("Package has no path to write to")]
    MissingPath,

    /// Missing required part
    #[error("Missing required part: {0}")]
    MissingPart(String),

    /// A cell address in a worksheet part could not be decoded
    #[error("Malformed cell address '{address}' in {part}")]
    MalformedAddress {
        /// Archive member the address came from
        part: String,
        /// The offending text
        address: String,
    },

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] ox_sheets_core::Error),
}
