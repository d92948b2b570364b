//! GetMediaInfo operation for AVTransport service

use xmltree::Element;
use crate::operation::{child_text, required_u32};
use crate::{ApiError, Service, SonosOperation};

/// GetMediaInfo operation
pub struct GetMediaInfoOperation;

#[derive(Debug, Clone, Default)]
pub struct GetMediaInfoRequest {
    pub instance_id: u32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GetMediaInfoResponse {
    /// Number of tracks in the loaded media (the queue length when playing from the queue)
    pub nr_tracks: u32,
    pub current_uri: String,
    pub current_uri_meta_data: String,
}

impl SonosOperation for GetMediaInfoOperation {
    type Request = GetMediaInfoRequest;
    type Response = GetMediaInfoResponse;

    const SERVICE: Service = Service::AVTransport;
    const ACTION: &'static str = "GetMediaInfo";

    fn build_payload(request: &Self::Request) -> String {
        format!("<InstanceID>{}</InstanceID>", request.instance_id)
    }

    fn parse_response(xml: &Element) -> Result<Self::Response, ApiError> {
        Ok(GetMediaInfoResponse {
            nr_tracks: required_u32(xml, "NrTracks")?,
            current_uri: child_text(xml, "CurrentURI"),
            current_uri_meta_data: child_text(xml, "CurrentURIMetaData"),
        })
    }
}
