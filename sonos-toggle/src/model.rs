//! Speakers, transport states and decisions

use serde::{Deserialize, Serialize};
use sonos_api::operations::av_transport::PlayState;
use std::fmt;

/// Unique identifier for a Sonos speaker
///
/// The `RINCON_...` UUID from the zone group topology, normalized to strip a
/// leading "uuid:" if present.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpeakerId(String);

impl SpeakerId {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let normalized = id.strip_prefix("uuid:").unwrap_or(&id);
        Self(normalized.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpeakerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SpeakerId {
    fn from(s: &str) -> Self {
        SpeakerId::new(s)
    }
}

/// An addressable speaker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Speaker {
    pub id: SpeakerId,
    pub name: String,
    /// IP address, optionally with a `:port` suffix
    pub address: String,
}

impl Speaker {
    pub fn new(id: impl Into<SpeakerId>, name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: address.into(),
        }
    }
}

impl From<String> for SpeakerId {
    fn from(s: String) -> Self {
        SpeakerId::new(s)
    }
}

/// What a successful probe learns about a speaker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbedSpeaker {
    pub speaker: Speaker,
    /// Coordinator of the speaker's group; the speaker itself when standalone
    pub coordinator: Speaker,
}

impl ProbedSpeaker {
    pub fn is_coordinator(&self) -> bool {
        self.speaker.id == self.coordinator.id
    }
}

/// Playback status of a speaker as the toggle sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransportState {
    Playing,
    Paused,
    Stopped,
    NoMedia,
    /// Unreachable, mid-transition, or the query failed
    Unknown,
}

impl TransportState {
    pub fn is_playing(&self) -> bool {
        matches!(self, TransportState::Playing)
    }
}

impl From<PlayState> for TransportState {
    fn from(state: PlayState) -> Self {
        match state {
            PlayState::Playing => TransportState::Playing,
            PlayState::PausedPlayback => TransportState::Paused,
            PlayState::Stopped => TransportState::Stopped,
            PlayState::NoMediaPresent => TransportState::NoMedia,
            PlayState::Transitioning => TransportState::Unknown,
        }
    }
}

impl fmt::Display for TransportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TransportState::Playing => "PLAYING",
            TransportState::Paused => "PAUSED",
            TransportState::Stopped => "STOPPED",
            TransportState::NoMedia => "NO_MEDIA",
            TransportState::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

/// The two commands a coordinator can be sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportCommand {
    Play,
    Pause,
}

impl TransportCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportCommand::Play => "PLAY",
            TransportCommand::Pause => "PAUSE",
        }
    }
}

/// The action a run settles on
///
/// The house toggle distinguishes how playback was started; all three play
/// variants end in a PLAY command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Play,
    Pause,
    PlayFromStation,
    PlayFromResume,
}

impl Action {
    pub fn command(&self) -> TransportCommand {
        match self {
            Action::Pause => TransportCommand::Pause,
            Action::Play | Action::PlayFromStation | Action::PlayFromResume => TransportCommand::Play,
        }
    }
}

/// One speaker in a snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub speaker: Speaker,
    pub coordinator: SpeakerId,
    pub transport_state: TransportState,
    pub queue_empty: bool,
}

impl Endpoint {
    pub fn is_coordinator(&self) -> bool {
        self.speaker.id == self.coordinator
    }
}

/// A configured room left out of a run, with the reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exclusion {
    pub name: String,
    pub address: String,
    pub reason: String,
}

/// Action plus the coordinators it goes to, in snapshot order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub action: Action,
    pub targets: Vec<Speaker>,
}

/// What a speaker is currently playing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaSource {
    pub uri: String,
    /// Playhead as `H:MM:SS`, when the device reports one
    pub position: Option<String>,
    /// DIDL-Lite metadata for `uri`, may be empty
    pub metadata: String,
}

impl MediaSource {
    /// The position worth seeking back to, if any
    pub fn resumable_position(&self) -> Option<&str> {
        self.position
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty() && *p != "0:00:00" && *p != "NOT_IMPLEMENTED")
    }
}

/// A Sonos favorite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Favorite {
    pub title: String,
    pub uri: String,
    pub metadata: String,
}

/// Where the default station can come from, tried in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationHint {
    /// Matched case-insensitively against favorite titles
    pub name: String,
    /// Stream loaded through the queue when no favorite matches
    pub uri: Option<String>,
    /// Last resort so that PLAY always has something to play
    pub placeholder_uri: String,
}

pub const DEFAULT_STATION_NAME: &str = "Eclectic Rock Radio";
pub const PLACEHOLDER_TONE_URI: &str = "x-rincon-mp3radio://tone@440";

impl Default for StationHint {
    fn default() -> Self {
        Self {
            name: DEFAULT_STATION_NAME.to_string(),
            uri: None,
            placeholder_uri: PLACEHOLDER_TONE_URI.to_string(),
        }
    }
}
