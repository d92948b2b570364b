//! BecomeCoordinatorOfStandaloneGroup operation for AVTransport service
//!
//! Sent to a grouped speaker, this detaches it into a group of its own.

use xmltree::Element;
use crate::{ApiError, Service, SonosOperation};

pub struct BecomeCoordinatorOfStandaloneGroupOperation;

#[derive(Debug, Clone, Default)]
pub struct BecomeCoordinatorOfStandaloneGroupRequest {
    pub instance_id: u32,
}

impl SonosOperation for BecomeCoordinatorOfStandaloneGroupOperation {
    type Request = BecomeCoordinatorOfStandaloneGroupRequest;
    type Response = ();

    const SERVICE: Service = Service::AVTransport;
    const ACTION: &'static str = "BecomeCoordinatorOfStandaloneGroup";

    fn build_payload(request: &Self::Request) -> String {
        format!("<InstanceID>{}</InstanceID>", request.instance_id)
    }

    fn parse_response(_xml: &Element) -> Result<Self::Response, ApiError> {
        Ok(())
    }
}
