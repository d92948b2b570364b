//! Parse failures for topology and DIDL-Lite documents

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    /// quick-xml could not map the document onto our types
    #[error("XML deserialization failed: {0}")]
    XmlDeserializationFailed(String),

    /// The document parsed but lacks an element we depend on
    #[error("Missing required element: {0}")]
    MissingRequiredElement(String),
}

pub type ParseResult<T> = Result<T, ParseError>;
