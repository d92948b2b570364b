//! AVTransport service operations
//!
//! Playback control, media inspection, queue loading and group membership.
//! Transport commands must go to a group coordinator.

mod add_uri_to_queue;
mod become_standalone;
mod get_media_info;
mod get_position_info;
mod get_transport_info;
mod pause;
mod play;
mod remove_all_tracks;
mod seek;
mod set_av_transport_uri;

pub use add_uri_to_queue::{AddURIToQueueOperation, AddURIToQueueRequest, AddURIToQueueResponse};
pub use become_standalone::{
    BecomeCoordinatorOfStandaloneGroupOperation, BecomeCoordinatorOfStandaloneGroupRequest,
};
pub use get_media_info::{GetMediaInfoOperation, GetMediaInfoRequest, GetMediaInfoResponse};
pub use get_position_info::{GetPositionInfoOperation, GetPositionInfoRequest, GetPositionInfoResponse};
pub use get_transport_info::{
    GetTransportInfoOperation, GetTransportInfoRequest, GetTransportInfoResponse, PlayState,
};
pub use pause::{PauseOperation, PauseRequest};
pub use play::{PlayOperation, PlayRequest};
pub use remove_all_tracks::{RemoveAllTracksFromQueueOperation, RemoveAllTracksFromQueueRequest};
pub use seek::{SeekOperation, SeekRequest, SeekUnit};
pub use set_av_transport_uri::{SetAVTransportURIOperation, SetAVTransportURIRequest};
