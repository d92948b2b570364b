//! Errors from a single SOAP exchange

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SoapError {
    /// Connect failure, timeout or a broken response stream
    #[error("Network/HTTP error: {0}")]
    Network(String),

    /// The device answered with an HTTP error and no SOAP body
    #[error("HTTP status {0}")]
    Status(u16),

    /// Body was not the XML envelope we expected
    #[error("XML parsing error: {0}")]
    Parse(String),

    /// UPnP fault, carrying the device's error code
    #[error("SOAP fault: error code {0}")]
    Fault(u16),
}
