//! Sonos API operations organized by service

pub mod av_transport;
pub mod content_directory;
pub mod zone_group_topology;
