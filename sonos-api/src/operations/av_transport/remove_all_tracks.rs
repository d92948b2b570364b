//! RemoveAllTracksFromQueue operation for AVTransport service

use xmltree::Element;
use crate::{ApiError, Service, SonosOperation};

pub struct RemoveAllTracksFromQueueOperation;

#[derive(Debug, Clone, Default)]
pub struct RemoveAllTracksFromQueueRequest {
    pub instance_id: u32,
}

impl SonosOperation for RemoveAllTracksFromQueueOperation {
    type Request = RemoveAllTracksFromQueueRequest;
    type Response = ();

    const SERVICE: Service = Service::AVTransport;
    const ACTION: &'static str = "RemoveAllTracksFromQueue";

    fn build_payload(request: &Self::Request) -> String {
        format!("<InstanceID>{}</InstanceID>", request.instance_id)
    }

    fn parse_response(_xml: &Element) -> Result<Self::Response, ApiError> {
        Ok(())
    }
}
