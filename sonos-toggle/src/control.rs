//! The device-control capability the toggle runs against
//!
//! [`SonosControl`](crate::sonos::SonosControl) implements it over UPnP; tests
//! implement it in memory. Every method is a single best-effort attempt.

use crate::error::ControlError;
use crate::model::{
    Favorite, MediaSource, ProbedSpeaker, Speaker, StationHint, TransportCommand, TransportState,
};
use crate::station::{self, StationCandidate};

pub trait DeviceControl {
    /// Check that a speaker answers at `address` and learn its identity and
    /// group coordinator
    fn probe(&self, address: &str) -> Result<ProbedSpeaker, ControlError>;

    /// Current coordinator of the speaker's group
    fn group_coordinator(&self, speaker: &Speaker) -> Result<Speaker, ControlError>;

    /// Visible members of the group `coordinator` leads, coordinator included
    fn group_members(&self, coordinator: &Speaker) -> Result<Vec<Speaker>, ControlError>;

    fn transport_state(&self, speaker: &Speaker) -> Result<TransportState, ControlError>;

    fn queue_empty(&self, speaker: &Speaker) -> Result<bool, ControlError>;

    /// The loaded track or stream, `None` when nothing resolvable is loaded
    fn current_source(&self, speaker: &Speaker) -> Result<Option<MediaSource>, ControlError>;

    /// Send PLAY or PAUSE. `speaker` must be a coordinator.
    fn dispatch(&self, speaker: &Speaker, command: TransportCommand) -> Result<(), ControlError>;

    /// Seek within the current track to `position` (`H:MM:SS`)
    fn seek(&self, speaker: &Speaker, position: &str) -> Result<(), ControlError>;

    fn join_group(&self, speaker: &Speaker, coordinator: &Speaker) -> Result<(), ControlError>;

    fn leave_group(&self, speaker: &Speaker) -> Result<(), ControlError>;

    fn favorites(&self, speaker: &Speaker) -> Result<Vec<Favorite>, ControlError>;

    /// Load `uri` as the current media without touching the queue
    fn load_uri(&self, speaker: &Speaker, uri: &str, metadata: &str) -> Result<(), ControlError>;

    /// Replace the queue with `uri` and switch the speaker to its queue
    fn enqueue_uri(&self, speaker: &Speaker, uri: &str) -> Result<(), ControlError>;

    /// Load the default station, leaving the speaker ready for PLAY
    fn load_station(
        &self,
        speaker: &Speaker,
        hint: &StationHint,
    ) -> Result<StationCandidate, ControlError> {
        station::load(self, speaker, hint)
    }
}
