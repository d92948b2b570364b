//! Utilities and data structures shared across UPnP services
//!
//! - [`xml_decode`]: namespace stripping before serde decoding
//! - [`didl`]: DIDL-Lite browse results

pub mod xml_decode;
pub mod didl;

pub use didl::{DidlLite, DidlItem, DidlResource};
