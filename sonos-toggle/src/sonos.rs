//! [`DeviceControl`] over the Sonos UPnP API

use std::time::Duration;

use sonos_api::operations::av_transport::{
    AddURIToQueueOperation, AddURIToQueueRequest, BecomeCoordinatorOfStandaloneGroupOperation,
    BecomeCoordinatorOfStandaloneGroupRequest, GetMediaInfoOperation, GetMediaInfoRequest,
    GetPositionInfoOperation, GetPositionInfoRequest, GetTransportInfoOperation,
    GetTransportInfoRequest, PauseOperation, PauseRequest, PlayOperation, PlayRequest,
    RemoveAllTracksFromQueueOperation, RemoveAllTracksFromQueueRequest, SeekOperation, SeekRequest,
    SeekUnit, SetAVTransportURIOperation, SetAVTransportURIRequest,
};
use sonos_api::operations::content_directory::browse::{FAVORITES_OBJECT_ID, QUEUE_OBJECT_ID};
use sonos_api::operations::content_directory::{BrowseOperation, BrowseRequest};
use sonos_api::operations::zone_group_topology::{
    GetZoneGroupStateOperation, GetZoneGroupStateRequest,
};
use sonos_api::{ApiError, SonosClient, SonosOperation};
use sonos_parser::{ZoneGroupMember, ZoneGroupState};
use tracing::debug;

use crate::control::DeviceControl;
use crate::error::ControlError;
use crate::model::{
    Favorite, MediaSource, ProbedSpeaker, Speaker, TransportCommand, TransportState,
};

/// Favorites fetched per lookup
const FAVORITES_PAGE: u32 = 100;

/// Talks to real speakers; one blocking request per call
#[derive(Debug, Clone, Default)]
pub struct SonosControl {
    client: SonosClient,
}

type QueueStrategy = fn(&SonosControl, &Speaker) -> Option<u32>;

impl SonosControl {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: SonosClient::with_timeout(timeout),
        }
    }

    pub fn with_client(client: SonosClient) -> Self {
        Self { client }
    }

    fn call<Op: SonosOperation>(
        &self,
        speaker: &Speaker,
        operation: &'static str,
        request: &Op::Request,
    ) -> Result<Op::Response, ControlError> {
        self.client
            .execute::<Op>(&speaker.address, request)
            .map_err(|e| classify(speaker, operation, e))
    }

    fn topology(&self, address: &str) -> Result<ZoneGroupState, ControlError> {
        self.client
            .execute::<GetZoneGroupStateOperation>(address, &GetZoneGroupStateRequest)
            .map(|response| response.zone_group_state)
            .map_err(|e| ControlError::unreachable(address, e))
    }

    fn queue_size_from_browse(&self, speaker: &Speaker) -> Option<u32> {
        self.call::<BrowseOperation>(speaker, "browse queue", &BrowseRequest::children(QUEUE_OBJECT_ID, 1))
            .map(|r| r.total_matches)
            .map_err(|e| debug!("queue size via browse failed: {}", e))
            .ok()
    }

    fn queue_size_from_media_info(&self, speaker: &Speaker) -> Option<u32> {
        self.call::<GetMediaInfoOperation>(speaker, "media info", &GetMediaInfoRequest::default())
            .map(|r| r.nr_tracks)
            .map_err(|e| debug!("queue size via media info failed: {}", e))
            .ok()
    }
}

fn classify(speaker: &Speaker, operation: &'static str, error: ApiError) -> ControlError {
    if error.is_network() {
        ControlError::unreachable(speaker.address.clone(), error)
    } else {
        ControlError::command(speaker.name.clone(), operation, error)
    }
}

/// Host part of `address`, which may carry a `:port`
pub(crate) fn host_of(address: &str) -> &str {
    address.split(':').next().unwrap_or(address)
}

fn member_speaker(member: &ZoneGroupMember) -> Option<Speaker> {
    let host = member.host()?;
    Some(Speaker::new(member.uuid.as_str(), member.zone_name.clone(), host))
}

/// Coordinator of `uuid`'s group in `state`
fn coordinator_of(state: &ZoneGroupState, uuid: &str) -> Option<Speaker> {
    let group = state.group_of(uuid)?;
    member_speaker(group.coordinator_member()?)
}

impl DeviceControl for SonosControl {
    fn probe(&self, address: &str) -> Result<ProbedSpeaker, ControlError> {
        let state = self.topology(address)?;
        let me = state.member_by_host(host_of(address)).ok_or_else(|| {
            ControlError::unreachable(address, "speaker is missing from its own topology")
        })?;

        let speaker = Speaker::new(me.uuid.as_str(), me.zone_name.clone(), address);
        let coordinator = match coordinator_of(&state, &me.uuid) {
            Some(c) if c.id == speaker.id => speaker.clone(),
            Some(c) => c,
            None => {
                return Err(ControlError::unreachable(
                    address,
                    "group coordinator missing from topology",
                ))
            }
        };

        Ok(ProbedSpeaker { speaker, coordinator })
    }

    fn group_coordinator(&self, speaker: &Speaker) -> Result<Speaker, ControlError> {
        let state = self.topology(&speaker.address)?;
        match coordinator_of(&state, speaker.id.as_str()) {
            Some(c) if c.id == speaker.id => Ok(speaker.clone()),
            Some(c) => Ok(c),
            None => Err(ControlError::command(
                speaker.name.clone(),
                "group coordinator",
                "speaker is missing from its own topology",
            )),
        }
    }

    fn group_members(&self, coordinator: &Speaker) -> Result<Vec<Speaker>, ControlError> {
        let state = self.topology(&coordinator.address)?;
        let group = state.group_of(coordinator.id.as_str()).ok_or_else(|| {
            ControlError::command(coordinator.name.clone(), "group members", "no group found")
        })?;
        Ok(group.visible_members().filter_map(member_speaker).collect())
    }

    fn transport_state(&self, speaker: &Speaker) -> Result<TransportState, ControlError> {
        self.call::<GetTransportInfoOperation>(speaker, "transport info", &GetTransportInfoRequest::default())
            .map(|info| info.current_transport_state.into())
    }

    /// Browse count first, then the media info track count. When neither
    /// answers the queue is treated as empty.
    fn queue_empty(&self, speaker: &Speaker) -> Result<bool, ControlError> {
        let strategies: [QueueStrategy; 2] = [
            SonosControl::queue_size_from_browse,
            SonosControl::queue_size_from_media_info,
        ];
        let size = strategies.iter().find_map(|strategy| strategy(self, speaker));
        if size.is_none() {
            debug!(speaker = %speaker.name, "queue size unavailable, assuming empty");
        }
        Ok(size.unwrap_or(0) == 0)
    }

    fn current_source(&self, speaker: &Speaker) -> Result<Option<MediaSource>, ControlError> {
        let info = self.call::<GetPositionInfoOperation>(speaker, "position info", &GetPositionInfoRequest::default())?;
        let uri = info.track_uri.trim();
        // A follower's track URI only points at its coordinator
        if uri.is_empty() || uri.starts_with("x-rincon:") {
            return Ok(None);
        }
        Ok(Some(MediaSource {
            uri: uri.to_string(),
            position: Some(info.rel_time).filter(|p| !p.trim().is_empty()),
            metadata: info.track_meta_data,
        }))
    }

    fn dispatch(&self, speaker: &Speaker, command: TransportCommand) -> Result<(), ControlError> {
        match command {
            TransportCommand::Play => self.call::<PlayOperation>(speaker, "play", &PlayRequest::default()),
            TransportCommand::Pause => self.call::<PauseOperation>(speaker, "pause", &PauseRequest::default()),
        }
    }

    fn seek(&self, speaker: &Speaker, position: &str) -> Result<(), ControlError> {
        let request = SeekRequest {
            instance_id: 0,
            unit: SeekUnit::RelTime,
            target: position.to_string(),
        };
        self.call::<SeekOperation>(speaker, "seek", &request)
    }

    fn join_group(&self, speaker: &Speaker, coordinator: &Speaker) -> Result<(), ControlError> {
        self.call::<SetAVTransportURIOperation>(
            speaker,
            "join group",
            &SetAVTransportURIRequest::join(coordinator.id.as_str()),
        )
    }

    fn leave_group(&self, speaker: &Speaker) -> Result<(), ControlError> {
        self.call::<BecomeCoordinatorOfStandaloneGroupOperation>(
            speaker,
            "leave group",
            &BecomeCoordinatorOfStandaloneGroupRequest::default(),
        )
    }

    fn favorites(&self, speaker: &Speaker) -> Result<Vec<Favorite>, ControlError> {
        let response = self.call::<BrowseOperation>(
            speaker,
            "browse favorites",
            &BrowseRequest::children(FAVORITES_OBJECT_ID, FAVORITES_PAGE),
        )?;
        let didl = response
            .didl()
            .map_err(|e| ControlError::command(speaker.name.clone(), "browse favorites", e))?;

        Ok(didl
            .items
            .iter()
            .filter_map(|item| {
                Some(Favorite {
                    title: item.title.clone().unwrap_or_default(),
                    uri: item.uri()?.to_string(),
                    metadata: item.res_md.clone().unwrap_or_default(),
                })
            })
            .collect())
    }

    fn load_uri(&self, speaker: &Speaker, uri: &str, metadata: &str) -> Result<(), ControlError> {
        let request = SetAVTransportURIRequest {
            instance_id: 0,
            current_uri: uri.to_string(),
            current_uri_meta_data: metadata.to_string(),
        };
        self.call::<SetAVTransportURIOperation>(speaker, "load uri", &request)
    }

    fn enqueue_uri(&self, speaker: &Speaker, uri: &str) -> Result<(), ControlError> {
        self.call::<RemoveAllTracksFromQueueOperation>(
            speaker,
            "clear queue",
            &RemoveAllTracksFromQueueRequest::default(),
        )?;
        let request = AddURIToQueueRequest {
            enqueued_uri: uri.to_string(),
            ..AddURIToQueueRequest::default()
        };
        self.call::<AddURIToQueueOperation>(speaker, "add to queue", &request)?;
        self.call::<SetAVTransportURIOperation>(
            speaker,
            "play from queue",
            &SetAVTransportURIRequest::own_queue(speaker.id.as_str()),
        )
    }
}
