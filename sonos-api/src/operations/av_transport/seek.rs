//! Seek operation for AVTransport service

use xmltree::Element;
use crate::operation::escape;
use crate::{ApiError, Service, SonosOperation};

/// Seek operation
pub struct SeekOperation;

/// What the seek target counts in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekUnit {
    /// Position within the current track, `H:MM:SS`
    RelTime,
    /// 1-based queue position
    TrackNr,
}

impl SeekUnit {
    fn as_str(&self) -> &'static str {
        match self {
            SeekUnit::RelTime => "REL_TIME",
            SeekUnit::TrackNr => "TRACK_NR",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SeekRequest {
    pub instance_id: u32,
    pub unit: SeekUnit,
    pub target: String,
}

impl SonosOperation for SeekOperation {
    type Request = SeekRequest;
    type Response = ();

    const SERVICE: Service = Service::AVTransport;
    const ACTION: &'static str = "Seek";

    fn build_payload(request: &Self::Request) -> String {
        format!(
            "<InstanceID>{}</InstanceID><Unit>{}</Unit><Target>{}</Target>",
            request.instance_id,
            request.unit.as_str(),
            escape(&request.target)
        )
    }

    fn parse_response(_xml: &Element) -> Result<Self::Response, ApiError> {
        Ok(())
    }
}
