//! ZoneGroupTopology parsing
//!
//! `GetZoneGroupState` returns the household topology as an escaped XML
//! document. Current firmware wraps it in `<ZoneGroupState>`, older firmware
//! returns `<ZoneGroups>` at the root; both parse into [`ZoneGroupState`].

use serde::{Deserialize, Serialize};
use crate::common::xml_decode;
use crate::error::{ParseError, ParseResult};

/// Household topology: every zone group and its members.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ZoneGroupState {
    pub zone_groups: Vec<ZoneGroup>,
}

#[derive(Debug, Deserialize)]
struct RawTopology {
    /// Present when the root is `<ZoneGroupState>`
    #[serde(rename = "ZoneGroups", default)]
    zone_groups: Option<RawZoneGroups>,

    /// Present when the root is `<ZoneGroups>` itself
    #[serde(rename = "ZoneGroup", default)]
    groups: Vec<ZoneGroup>,
}

#[derive(Debug, Deserialize)]
struct RawZoneGroups {
    #[serde(rename = "ZoneGroup", default)]
    groups: Vec<ZoneGroup>,
}

/// A set of speakers playing together under one coordinator.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ZoneGroup {
    /// UUID of the coordinator (RINCON_...)
    #[serde(rename = "@Coordinator")]
    pub coordinator: String,

    #[serde(rename = "@ID")]
    pub id: String,

    #[serde(rename = "ZoneGroupMember", default)]
    pub members: Vec<ZoneGroupMember>,
}

/// A speaker inside a zone group.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ZoneGroupMember {
    #[serde(rename = "@UUID")]
    pub uuid: String,

    /// Device description URL, e.g. `http://192.168.1.102:1400/xml/device_description.xml`
    #[serde(rename = "@Location")]
    pub location: String,

    #[serde(rename = "@ZoneName")]
    pub zone_name: String,

    /// "1" for the hidden half of a stereo pair or bonded surround
    #[serde(rename = "@Invisible", default)]
    pub invisible: Option<String>,
}

impl ZoneGroupState {
    /// Parse the (already unescaped) ZoneGroupState document.
    pub fn from_xml(xml: &str) -> ParseResult<Self> {
        let raw: RawTopology = xml_decode::parse(xml)?;
        let zone_groups = match raw.zone_groups {
            Some(wrapped) => wrapped.groups,
            None => raw.groups,
        };
        if zone_groups.is_empty() {
            return Err(ParseError::MissingRequiredElement("ZoneGroup".to_string()));
        }
        Ok(Self { zone_groups })
    }

    /// The group containing the speaker with `uuid`
    pub fn group_of(&self, uuid: &str) -> Option<&ZoneGroup> {
        self.zone_groups
            .iter()
            .find(|group| group.members.iter().any(|m| m.uuid == uuid))
    }

    /// Look up the member whose device description is served from `host`
    pub fn member_by_host(&self, host: &str) -> Option<&ZoneGroupMember> {
        self.zone_groups
            .iter()
            .flat_map(|group| group.members.iter())
            .find(|m| m.host() == Some(host))
    }
}

impl ZoneGroup {
    /// The coordinator's member entry
    pub fn coordinator_member(&self) -> Option<&ZoneGroupMember> {
        self.members.iter().find(|m| m.uuid == self.coordinator)
    }

    /// Members a user would see in the app (hidden bonded speakers excluded)
    pub fn visible_members(&self) -> impl Iterator<Item = &ZoneGroupMember> {
        self.members.iter().filter(|m| !m.is_invisible())
    }
}

impl ZoneGroupMember {
    /// Host portion of the member's `Location` URL
    pub fn host(&self) -> Option<&str> {
        self.location
            .split("//")
            .nth(1)?
            .split(|c| c == ':' || c == '/')
            .next()
            .filter(|host| !host.is_empty())
    }

    pub fn is_invisible(&self) -> bool {
        self.invisible.as_deref() == Some("1")
    }
}
