//! Group-aware play/pause toggle for Sonos rooms
//!
//! A run probes a fixed list of rooms, reduces them to their group
//! coordinators and sends every coordinator the same command: PAUSE if any
//! group is playing, PLAY otherwise. The house toggle instead drives one
//! preferred speaker, resuming what it was playing or falling back to a
//! default station.
//!
//! ```rust,ignore
//! use sonos_toggle::{toggle_all, Room, SonosControl};
//!
//! let control = SonosControl::new(std::time::Duration::from_secs(4));
//! let rooms = vec![Room::new("Kitchen", "10.6.2.45")];
//! let outcome = toggle_all(&control, &rooms, false)?;
//! ```

pub mod config;
pub mod control;
pub mod decider;
pub mod error;
pub mod house;
pub mod logging;
pub mod model;
pub mod report;
pub mod snapshot;
pub mod sonos;
pub mod station;

pub use config::Config;
pub use control::DeviceControl;
pub use decider::{toggle_all, DispatchReport, GlobalOutcome, ToggleDecider};
pub use error::{ConfigError, ControlError, ToggleError};
pub use house::{HouseOutcome, HouseSettings, HouseToggle};
pub use model::{
    Action, Decision, Endpoint, Exclusion, Favorite, MediaSource, ProbedSpeaker, Speaker,
    SpeakerId, StationHint, TransportCommand, TransportState,
};
pub use snapshot::{Room, Snapshot};
pub use sonos::SonosControl;
