//! Pause operation for AVTransport service

use xmltree::Element;
use crate::{ApiError, Service, SonosOperation};

/// Pause operation
pub struct PauseOperation;

/// Request for pause operation
#[derive(Debug, Clone, Default)]
pub struct PauseRequest {
    pub instance_id: u32,
}

impl SonosOperation for PauseOperation {
    type Request = PauseRequest;
    type Response = ();

    const SERVICE: Service = Service::AVTransport;
    const ACTION: &'static str = "Pause";

    fn build_payload(request: &Self::Request) -> String {
        format!("<InstanceID>{}</InstanceID>", request.instance_id)
    }

    fn parse_response(_xml: &Element) -> Result<Self::Response, ApiError> {
        Ok(())
    }
}
