//! Private SOAP client for UPnP device communication
//!
//! This crate provides a minimal, blocking SOAP client for talking to Sonos
//! speakers. Every call is capped by a single overall timeout so that a dead
//! speaker costs at most one timeout per request.

mod error;

pub use error::SoapError;

use std::time::Duration;
use tracing::trace;
use xmltree::Element;

/// Port Sonos speakers serve their UPnP control endpoints on
pub const DEFAULT_PORT: u16 = 1400;

/// Per-call cap used when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(4);

/// A minimal SOAP client for UPnP device communication
#[derive(Debug, Clone)]
pub struct SoapClient {
    agent: ureq::Agent,
    timeout: Duration,
}

impl SoapClient {
    /// Create a new SOAP client with the default per-call timeout
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a SOAP client whose requests are capped at `timeout` each
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new()
                .timeout_connect(timeout)
                .timeout(timeout)
                .build(),
            timeout,
        }
    }

    /// The overall cap applied to every request
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Send a SOAP request and return the parsed `{action}Response` element
    ///
    /// `host` is either a bare address (port 1400 is assumed) or `address:port`.
    pub fn call(
        &self,
        host: &str,
        endpoint: &str,
        service_uri: &str,
        action: &str,
        payload: &str,
    ) -> Result<Element, SoapError> {
        let body = format!(
            r#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/" s:encodingStyle="http://schemas.xmlsoap.org/soap/encoding/"><s:Body><u:{action} xmlns:u="{service_uri}">{payload}</u:{action}></s:Body></s:Envelope>"#,
            action = action,
            service_uri = service_uri,
            payload = payload
        );

        let url = format!("http://{}/{}", with_default_port(host), endpoint);
        let soap_action = format!("\"{}#{}\"", service_uri, action);
        trace!(%url, action, "sending SOAP request");

        let xml_text = match self
            .agent
            .post(&url)
            .set("Content-Type", "text/xml; charset=\"utf-8\"")
            .set("SOAPACTION", &soap_action)
            .send_string(&body)
        {
            Ok(response) => response
                .into_string()
                .map_err(|e| SoapError::Network(e.to_string()))?,
            // UPnP faults arrive as HTTP 500 with a SOAP body worth reading
            Err(ureq::Error::Status(code, response)) => {
                let text = response
                    .into_string()
                    .map_err(|e| SoapError::Network(e.to_string()))?;
                if text.trim().is_empty() {
                    return Err(SoapError::Status(code));
                }
                text
            }
            Err(e) => return Err(SoapError::Network(e.to_string())),
        };

        let xml = Element::parse(xml_text.as_bytes())
            .map_err(|e| SoapError::Parse(e.to_string()))?;

        self.extract_response(&xml, action)
    }

    fn extract_response(&self, xml: &Element, action: &str) -> Result<Element, SoapError> {
        let body = xml
            .get_child("Body")
            .ok_or_else(|| SoapError::Parse("Missing SOAP Body".to_string()))?;

        if let Some(fault) = body.get_child("Fault") {
            let error_code = fault
                .get_child("detail")
                .and_then(|d| d.get_child("UPnPError").or_else(|| d.get_child("UpnPError")))
                .and_then(|e| e.get_child("errorCode"))
                .and_then(|c| c.get_text())
                .and_then(|t| t.trim().parse::<u16>().ok())
                .unwrap_or(500);
            return Err(SoapError::Fault(error_code));
        }

        let response_name = format!("{}Response", action);
        body.get_child(response_name.as_str())
            .cloned()
            .ok_or_else(|| SoapError::Parse(format!("Missing {} element", response_name)))
    }
}

impl Default for SoapClient {
    fn default() -> Self {
        Self::new()
    }
}

fn with_default_port(host: &str) -> String {
    if host.contains(':') {
        host.to_string()
    } else {
        format!("{}:{}", host, DEFAULT_PORT)
    }
}
