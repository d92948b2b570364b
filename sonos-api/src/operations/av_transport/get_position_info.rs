//! GetPositionInfo operation for AVTransport service

use xmltree::Element;
use crate::operation::child_text;
use crate::{ApiError, Service, SonosOperation};

/// GetPositionInfo operation
pub struct GetPositionInfoOperation;

#[derive(Debug, Clone, Default)]
pub struct GetPositionInfoRequest {
    pub instance_id: u32,
}

/// Current track and playhead
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GetPositionInfoResponse {
    pub track: u32,
    pub track_duration: String,
    pub track_meta_data: String,
    pub track_uri: String,
    /// Playhead within the track, `H:MM:SS`
    pub rel_time: String,
}

impl SonosOperation for GetPositionInfoOperation {
    type Request = GetPositionInfoRequest;
    type Response = GetPositionInfoResponse;

    const SERVICE: Service = Service::AVTransport;
    const ACTION: &'static str = "GetPositionInfo";

    fn build_payload(request: &Self::Request) -> String {
        format!("<InstanceID>{}</InstanceID>", request.instance_id)
    }

    fn parse_response(xml: &Element) -> Result<Self::Response, ApiError> {
        if xml.get_child("TrackURI").is_none() {
            return Err(ApiError::ParseError("Missing TrackURI element".to_string()));
        }

        Ok(GetPositionInfoResponse {
            track: child_text(xml, "Track").trim().parse().unwrap_or(0),
            track_duration: child_text(xml, "TrackDuration"),
            track_meta_data: child_text(xml, "TrackMetaData"),
            track_uri: child_text(xml, "TrackURI"),
            rel_time: child_text(xml, "RelTime"),
        })
    }
}
