use soap_client::SoapError;
use thiserror::Error;

/// High-level API errors for Sonos operations
#[derive(Debug, Error)]
pub enum ApiError {
    /// The device could not be reached or did not answer in time
    #[error("Network error: {0}")]
    NetworkError(String),

    /// The device answered with something we could not interpret
    #[error("Parse error: {0}")]
    ParseError(String),

    /// SOAP fault returned by the device (UPnP error code)
    #[error("SOAP fault: error code {0}")]
    SoapFault(u16),

    /// The device answered with a bare HTTP error status
    #[error("Device error: {0}")]
    DeviceError(String),
}

/// Type alias for results that can return an ApiError
pub type Result<T> = std::result::Result<T, ApiError>;

impl From<SoapError> for ApiError {
    fn from(error: SoapError) -> Self {
        match error {
            SoapError::Network(msg) => ApiError::NetworkError(msg),
            SoapError::Status(code) => ApiError::DeviceError(format!("HTTP status {}", code)),
            SoapError::Parse(msg) => ApiError::ParseError(msg),
            SoapError::Fault(code) => ApiError::SoapFault(code),
        }
    }
}

impl From<sonos_parser::ParseError> for ApiError {
    fn from(error: sonos_parser::ParseError) -> Self {
        ApiError::ParseError(error.to_string())
    }
}

impl ApiError {
    /// Whether the failure means the device itself is unreachable, as opposed
    /// to a device that answered with a fault or unexpected content
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::NetworkError(_))
    }
}
