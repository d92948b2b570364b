use xmltree::Element;

use crate::error::ApiError;
use crate::service::Service;

/// Base trait for all Sonos API operations
///
/// Implementors are zero-sized markers; the associated types carry the data.
pub trait SonosOperation {
    /// The request type for this operation
    type Request;

    /// The response type for this operation
    type Response;

    /// The UPnP service this operation belongs to
    const SERVICE: Service;

    /// The SOAP action name for this operation
    const ACTION: &'static str;

    /// Build the XML arguments that go inside the action element.
    ///
    /// Free-text arguments must be passed through [`escape`].
    fn build_payload(request: &Self::Request) -> String;

    /// Parse the `{ACTION}Response` element into the typed response
    fn parse_response(xml: &Element) -> Result<Self::Response, ApiError>;
}

/// XML-escape an argument value for inclusion in a payload
pub fn escape(value: &str) -> String {
    quick_xml::escape::escape(value).into_owned()
}

/// Text of a child element, or an empty string when absent
pub(crate) fn child_text(xml: &Element, name: &str) -> String {
    xml.get_child(name)
        .and_then(|e| e.get_text())
        .map(|s| s.to_string())
        .unwrap_or_default()
}

/// Text of a child element that the response must contain
pub(crate) fn required_text(xml: &Element, name: &str) -> Result<String, ApiError> {
    xml.get_child(name)
        .map(|e| e.get_text().map(|s| s.to_string()).unwrap_or_default())
        .ok_or_else(|| ApiError::ParseError(format!("Missing {} element", name)))
}

/// Numeric child element; missing or malformed values are a parse error
pub(crate) fn required_u32(xml: &Element, name: &str) -> Result<u32, ApiError> {
    let text = required_text(xml, name)?;
    text.trim()
        .parse::<u32>()
        .map_err(|_| ApiError::ParseError(format!("Invalid {} value: {:?}", name, text)))
}
