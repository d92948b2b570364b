//! AddURIToQueue operation for AVTransport service

use xmltree::Element;
use crate::operation::{child_text, escape};
use crate::{ApiError, Service, SonosOperation};

pub struct AddURIToQueueOperation;

#[derive(Debug, Clone, Default)]
pub struct AddURIToQueueRequest {
    pub instance_id: u32,
    pub enqueued_uri: String,
    pub enqueued_uri_meta_data: String,
    /// 0 appends at the end
    pub desired_first_track_number_enqueued: u32,
    pub enqueue_as_next: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AddURIToQueueResponse {
    pub first_track_number_enqueued: u32,
    pub new_queue_length: u32,
}

impl SonosOperation for AddURIToQueueOperation {
    type Request = AddURIToQueueRequest;
    type Response = AddURIToQueueResponse;

    const SERVICE: Service = Service::AVTransport;
    const ACTION: &'static str = "AddURIToQueue";

    fn build_payload(request: &Self::Request) -> String {
        format!(
            "<InstanceID>{}</InstanceID><EnqueuedURI>{}</EnqueuedURI><EnqueuedURIMetaData>{}</EnqueuedURIMetaData><DesiredFirstTrackNumberEnqueued>{}</DesiredFirstTrackNumberEnqueued><EnqueueAsNext>{}</EnqueueAsNext>",
            request.instance_id,
            escape(&request.enqueued_uri),
            escape(&request.enqueued_uri_meta_data),
            request.desired_first_track_number_enqueued,
            if request.enqueue_as_next { 1 } else { 0 }
        )
    }

    fn parse_response(xml: &Element) -> Result<Self::Response, ApiError> {
        Ok(AddURIToQueueResponse {
            first_track_number_enqueued: child_text(xml, "FirstTrackNumberEnqueued")
                .trim()
                .parse()
                .unwrap_or(0),
            new_queue_length: child_text(xml, "NewQueueLength").trim().parse().unwrap_or(0),
        })
    }
}
