//! Error types for the wire layer.

use thiserror::Error;

/// The primary error type for wire encoding, decoding, and XML handling.
#[derive(Error, Debug)]
pub enum WireError {
    /// A scalar value could not be encoded or decoded under the fixed wire
    /// format. Detected before any I/O on serialize, or while parsing a
    /// response on deserialize.
    #[error("field {field}: cannot decode {raw:?} as {expected}")]
    Format {
        /// Wire name of the offending field.
        field: String,
        /// The raw wire text that failed to decode.
        raw: String,
        /// Human-readable name of the expected format.
        expected: &'static str,
    },

    /// A required child element was absent.
    #[error("element <{element}> is missing required child <{field}>")]
    MissingField { element: String, field: String },

    /// The document is not well formed, or uses a construct the wire layer
    /// does not carry (mixed content, unknown entity references).
    #[error("malformed document: {message}")]
    Malformed { message: String },

    /// XML reader/writer error.
    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// IO error while writing a document.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl WireError {
    /// Convenience constructor for [`WireError::Format`].
    pub fn format(field: impl Into<String>, raw: impl Into<String>, expected: &'static str) -> Self {
        WireError::Format {
            field: field.into(),
            raw: raw.into(),
            expected,
        }
    }

    /// Convenience constructor for [`WireError::MissingField`].
    pub fn missing(element: impl Into<String>, field: impl Into<String>) -> Self {
        WireError::MissingField {
            element: element.into(),
            field: field.into(),
        }
    }

    /// Convenience constructor for [`WireError::Malformed`].
    pub fn malformed(message: impl Into<String>) -> Self {
        WireError::Malformed {
            message: message.into(),
        }
    }
}

/// Result type alias for wire operations.
pub type Result<T> = std::result::Result<T, WireError>;
