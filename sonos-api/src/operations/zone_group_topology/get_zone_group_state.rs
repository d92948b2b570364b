//! GetZoneGroupState operation for ZoneGroupTopology service

use sonos_parser::ZoneGroupState;
use xmltree::Element;
use crate::operation::required_text;
use crate::{ApiError, Service, SonosOperation};

pub struct GetZoneGroupStateOperation;

#[derive(Debug, Clone, Default)]
pub struct GetZoneGroupStateRequest;

#[derive(Debug, Clone, PartialEq)]
pub struct GetZoneGroupStateResponse {
    pub zone_group_state: ZoneGroupState,
}

impl SonosOperation for GetZoneGroupStateOperation {
    type Request = GetZoneGroupStateRequest;
    type Response = GetZoneGroupStateResponse;

    const SERVICE: Service = Service::ZoneGroupTopology;
    const ACTION: &'static str = "GetZoneGroupState";

    fn build_payload(_request: &Self::Request) -> String {
        String::new()
    }

    fn parse_response(xml: &Element) -> Result<Self::Response, ApiError> {
        let document = required_text(xml, "ZoneGroupState")?;
        Ok(GetZoneGroupStateResponse {
            zone_group_state: ZoneGroupState::from_xml(&document)?,
        })
    }
}
