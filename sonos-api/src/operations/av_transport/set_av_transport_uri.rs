//! SetAVTransportURI operation for AVTransport service
//!
//! Loads a URI as the speaker's current media. Loading `x-rincon:{uuid}`
//! makes the speaker follow that coordinator; `x-rincon-queue:{uuid}#0`
//! points it back at its own queue.

use xmltree::Element;
use crate::operation::escape;
use crate::{ApiError, Service, SonosOperation};

pub struct SetAVTransportURIOperation;

#[derive(Debug, Clone, Default)]
pub struct SetAVTransportURIRequest {
    pub instance_id: u32,
    pub current_uri: String,
    /// DIDL-Lite metadata, may be empty
    pub current_uri_meta_data: String,
}

impl SetAVTransportURIRequest {
    /// Request that joins the group coordinated by `coordinator_uuid`
    pub fn join(coordinator_uuid: &str) -> Self {
        Self {
            current_uri: format!("x-rincon:{}", coordinator_uuid),
            ..Self::default()
        }
    }

    /// Request that switches the speaker to playing its own queue
    pub fn own_queue(speaker_uuid: &str) -> Self {
        Self {
            current_uri: format!("x-rincon-queue:{}#0", speaker_uuid),
            ..Self::default()
        }
    }
}

impl SonosOperation for SetAVTransportURIOperation {
    type Request = SetAVTransportURIRequest;
    type Response = ();

    const SERVICE: Service = Service::AVTransport;
    const ACTION: &'static str = "SetAVTransportURI";

    fn build_payload(request: &Self::Request) -> String {
        format!(
            "<InstanceID>{}</InstanceID><CurrentURI>{}</CurrentURI><CurrentURIMetaData>{}</CurrentURIMetaData>",
            request.instance_id,
            escape(&request.current_uri),
            escape(&request.current_uri_meta_data)
        )
    }

    fn parse_response(_xml: &Element) -> Result<Self::Response, ApiError> {
        Ok(())
    }
}
