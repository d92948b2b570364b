use std::time::Duration;

use soap_client::SoapClient;
use tracing::debug;

use crate::{Result, SonosOperation};

/// A client for executing Sonos operations against actual devices
///
/// Bridges the stateless operation definitions and the SOAP transport.
/// Cloning is cheap; clones share the underlying HTTP agent.
#[derive(Debug, Clone)]
pub struct SonosClient {
    soap_client: SoapClient,
}

impl SonosClient {
    /// Create a client with the default per-call timeout
    pub fn new() -> Self {
        Self {
            soap_client: SoapClient::new(),
        }
    }

    /// Create a client whose every request is capped at `timeout`
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            soap_client: SoapClient::with_timeout(timeout),
        }
    }

    /// Create a client around a preconfigured SOAP client
    pub fn with_soap_client(soap_client: SoapClient) -> Self {
        Self { soap_client }
    }

    /// Execute a Sonos operation against a device
    ///
    /// `ip` is the speaker's address, optionally with a `:port` suffix.
    pub fn execute<Op: SonosOperation>(&self, ip: &str, request: &Op::Request) -> Result<Op::Response> {
        let service_info = Op::SERVICE.info();
        let payload = Op::build_payload(request);
        debug!(ip, service = Op::SERVICE.name(), action = Op::ACTION, "executing operation");

        let xml = self.soap_client.call(
            ip,
            service_info.endpoint,
            service_info.service_uri,
            Op::ACTION,
            &payload,
        )?;

        Op::parse_response(&xml)
    }
}

impl Default for SonosClient {
    fn default() -> Self {
        Self::new()
    }
}
