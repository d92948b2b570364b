//! GetTransportInfo operation for AVTransport service

use xmltree::Element;
use crate::operation::{child_text, required_text};
use crate::{ApiError, Service, SonosOperation};

/// GetTransportInfo operation
pub struct GetTransportInfoOperation;

/// Request for GetTransportInfo operation
#[derive(Debug, Clone, Default)]
pub struct GetTransportInfoRequest {
    pub instance_id: u32,
}

/// Transport state as reported by the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    Playing,
    PausedPlayback,
    Stopped,
    Transitioning,
    NoMediaPresent,
}

impl PlayState {
    /// Parse the `CurrentTransportState` value
    pub fn from_wire(value: &str) -> Option<Self> {
        match value.trim() {
            "PLAYING" => Some(PlayState::Playing),
            "PAUSED_PLAYBACK" => Some(PlayState::PausedPlayback),
            "STOPPED" => Some(PlayState::Stopped),
            "TRANSITIONING" => Some(PlayState::Transitioning),
            "NO_MEDIA_PRESENT" => Some(PlayState::NoMediaPresent),
            _ => None,
        }
    }
}

/// Response for GetTransportInfo operation
#[derive(Debug, Clone, PartialEq)]
pub struct GetTransportInfoResponse {
    pub current_transport_state: PlayState,
    pub current_transport_status: String,
    pub current_speed: String,
}

impl SonosOperation for GetTransportInfoOperation {
    type Request = GetTransportInfoRequest;
    type Response = GetTransportInfoResponse;

    const SERVICE: Service = Service::AVTransport;
    const ACTION: &'static str = "GetTransportInfo";

    fn build_payload(request: &Self::Request) -> String {
        format!("<InstanceID>{}</InstanceID>", request.instance_id)
    }

    fn parse_response(xml: &Element) -> Result<Self::Response, ApiError> {
        let state = required_text(xml, "CurrentTransportState")?;
        let current_transport_state = PlayState::from_wire(&state)
            .ok_or_else(|| ApiError::ParseError(format!("Unknown transport state: {}", state)))?;

        Ok(GetTransportInfoResponse {
            current_transport_state,
            current_transport_status: child_text(xml, "CurrentTransportStatus"),
            current_speed: child_text(xml, "CurrentSpeed"),
        })
    }
}
