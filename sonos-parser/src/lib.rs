//! # sonos-parser
//!
//! XML parsing for the pieces of Sonos UPnP responses the toggle needs:
//! the zone group topology (who coordinates whom) and DIDL-Lite browse
//! results (queue contents and favorites).
//!
//! ```rust,ignore
//! use sonos_parser::{ZoneGroupState, DidlLite};
//!
//! let topology = ZoneGroupState::from_xml(&response.zone_group_state)?;
//! let favorites = DidlLite::from_xml(&browse.result)?;
//! ```

pub mod error;
pub mod common;
pub mod services;

pub use error::{ParseError, ParseResult};
pub use common::{DidlLite, DidlItem, DidlResource};
pub use services::zone_group_topology::{ZoneGroup, ZoneGroupMember, ZoneGroupState};
