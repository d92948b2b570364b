//! House toggle: one preferred speaker, resumed rather than restarted
//!
//! The primary speaker is the coordinator whenever it answers. A secondary
//! speaker is kept in the primary's group and takes over only when the
//! primary is down. Every step after probing is best-effort: a failure is
//! logged, recorded in [`HouseOutcome::skipped`], and the run goes on.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::control::DeviceControl;
use crate::error::{ControlError, ToggleError};
use crate::model::{Action, ProbedSpeaker, Speaker, StationHint, TransportCommand, TransportState};
use crate::snapshot::Room;
use crate::sonos::host_of;

/// Time a speaker needs after leaving a group before it accepts new media
pub const DEFAULT_DETACH_SETTLE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq)]
pub struct HouseSettings {
    pub primary: Room,
    pub secondary: Option<Room>,
    pub station: StationHint,
    pub detach_settle: Duration,
    /// Every configured room, used to name group members in the outcome
    pub rooms: Vec<Room>,
}

impl HouseSettings {
    pub fn new(primary: Room) -> Self {
        Self {
            primary,
            secondary: None,
            station: StationHint::default(),
            detach_settle: DEFAULT_DETACH_SETTLE,
            rooms: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HouseOutcome {
    pub action: Action,
    pub coordinator: Speaker,
    /// Names of the coordinator's group members after acting
    pub group: Vec<String>,
    /// Best-effort steps that failed
    pub skipped: Vec<String>,
}

pub struct HouseToggle<'a, C: DeviceControl + ?Sized> {
    control: &'a C,
    settings: &'a HouseSettings,
    skipped: Vec<String>,
}

impl<'a, C: DeviceControl + ?Sized> HouseToggle<'a, C> {
    pub fn new(control: &'a C, settings: &'a HouseSettings) -> Self {
        Self {
            control,
            settings,
            skipped: Vec::new(),
        }
    }

    pub fn run(mut self) -> Result<HouseOutcome, ToggleError> {
        let settings = self.settings;
        let primary = self.probe(&settings.primary);
        let secondary = match &settings.secondary {
            Some(room) => self.probe(room),
            None => None,
        };

        let (coordinator, action) = match (primary, secondary) {
            (Some(primary), secondary) => {
                let action = if primary.is_coordinator() {
                    None
                } else {
                    Some(self.detach_and_resume(&primary))
                };

                let coordinator = self.room_speaker(&primary.speaker, &settings.primary);
                if let Some(secondary) = secondary {
                    // Detaching the primary may have reshaped the secondary's group
                    self.attach_secondary(&secondary, &coordinator, action.is_some());
                }

                let action = match action {
                    Some(action) => action,
                    None => self.toggle_in_place(&coordinator),
                };
                (coordinator, action)
            }
            (None, Some(secondary)) => {
                let room = settings.secondary.as_ref().unwrap_or(&settings.primary);
                let coordinator = self.room_speaker(&secondary.speaker, room);
                warn!(
                    primary = %settings.primary.name,
                    fallback = %coordinator.name,
                    "primary unreachable, falling back"
                );
                if !secondary.is_coordinator() {
                    self.leave(&coordinator);
                    std::thread::sleep(settings.detach_settle);
                }
                let action = self.toggle_in_place(&coordinator);
                (coordinator, action)
            }
            (None, None) => {
                let mut excluded = vec![settings.primary.name.clone()];
                excluded.extend(settings.secondary.iter().map(|r| r.name.clone()));
                return Err(ToggleError::NoReachableEndpoints { excluded });
            }
        };

        let group = match self.control.group_members(&coordinator) {
            Ok(members) if !members.is_empty() => members.iter().map(|m| self.room_name(m)).collect(),
            Ok(_) => vec![coordinator.name.clone()],
            Err(e) => {
                debug!("group re-read failed: {}", e);
                vec![coordinator.name.clone()]
            }
        };

        info!(coordinator = %coordinator.name, action = action.command().as_str(), "house toggle done");
        Ok(HouseOutcome {
            action,
            coordinator,
            group,
            skipped: self.skipped,
        })
    }

    fn probe(&self, room: &Room) -> Option<ProbedSpeaker> {
        match self.control.probe(&room.address) {
            Ok(probed) => Some(probed),
            Err(e) => {
                warn!(room = %room.name, "skipping room: {}", e);
                None
            }
        }
    }

    /// The probed speaker under its configured name and address
    fn room_speaker(&self, speaker: &Speaker, room: &Room) -> Speaker {
        Speaker::new(speaker.id.clone(), room.name.clone(), room.address.clone())
    }

    /// Configured name of the room at `speaker`'s address, else its zone name
    fn room_name(&self, speaker: &Speaker) -> String {
        let settings = self.settings;
        std::iter::once(&settings.primary)
            .chain(settings.secondary.iter())
            .chain(settings.rooms.iter())
            .find(|room| host_of(&room.address) == host_of(&speaker.address))
            .map(|room| room.name.clone())
            .unwrap_or_else(|| speaker.name.clone())
    }

    fn skip(&mut self, step: &str, error: ControlError) {
        warn!("skipping {}: {}", step, error);
        self.skipped.push(format!("{}: {}", step, error));
    }

    fn leave(&mut self, speaker: &Speaker) {
        if let Err(e) = self.control.leave_group(speaker) {
            self.skip("leave group", e);
        }
    }

    fn play(&mut self, speaker: &Speaker) {
        if let Err(e) = self.control.dispatch(speaker, TransportCommand::Play) {
            self.skip("play", e);
        }
    }

    /// Load the default station. When nothing loads the caller still
    /// issues PLAY.
    fn load_station(&mut self, speaker: &Speaker) {
        let settings = self.settings;
        if let Err(e) = self.control.load_station(speaker, &settings.station) {
            self.skip("load station", e);
        }
    }

    /// The primary follows a group it did not start: take over what that
    /// group is playing, then leave it. Falls back to the station.
    fn detach_and_resume(&mut self, primary: &ProbedSpeaker) -> Action {
        let speaker = self.room_speaker(&primary.speaker, &self.settings.primary);
        let other = &primary.coordinator;
        info!(primary = %speaker.name, coordinator = %other.name, "primary is following an external group");

        let source = match self.control.current_source(other) {
            Ok(source) => source,
            Err(e) => {
                self.skip("read external source", e);
                None
            }
        };

        let mut resumed = false;
        if let Some(source) = source {
            match self.control.load_uri(&speaker, &source.uri, &source.metadata) {
                Ok(()) => {
                    resumed = true;
                    self.play(&speaker);
                    if let Some(position) = source.resumable_position() {
                        if let Err(e) = self.control.seek(&speaker, position) {
                            self.skip("seek", e);
                        }
                    }
                }
                Err(e) => self.skip("resume external source", e),
            }
        }

        self.leave(&speaker);

        if resumed {
            Action::PlayFromResume
        } else {
            std::thread::sleep(self.settings.detach_settle);
            self.load_station(&speaker);
            self.play(&speaker);
            Action::PlayFromStation
        }
    }

    /// Keep the secondary in the primary's group. With `refresh` the
    /// secondary's coordinator is re-read instead of taken from the probe.
    fn attach_secondary(&mut self, secondary: &ProbedSpeaker, primary: &Speaker, refresh: bool) {
        let settings = self.settings;
        let room = settings.secondary.as_ref().unwrap_or(&settings.primary);
        let speaker = self.room_speaker(&secondary.speaker, room);

        let mut leader = secondary.coordinator.clone();
        if refresh {
            match self.control.group_coordinator(&speaker) {
                Ok(current) => leader = current,
                Err(e) => debug!(secondary = %speaker.name, "keeping probed coordinator: {}", e),
            }
        }

        if leader.id == primary.id {
            debug!(secondary = %speaker.name, "secondary already follows the primary");
            return;
        }
        if leader.id != speaker.id {
            self.leave(&speaker);
        }
        match self.control.join_group(&speaker, primary) {
            Ok(()) => info!(secondary = %speaker.name, primary = %primary.name, "joined"),
            Err(e) => self.skip("join group", e),
        }
    }

    /// Toggle a coordinator that is not following anyone
    fn toggle_in_place(&mut self, coordinator: &Speaker) -> Action {
        let state = self.control.transport_state(coordinator).unwrap_or_else(|e| {
            warn!(speaker = %coordinator.name, "transport state unknown: {}", e);
            TransportState::Unknown
        });
        debug!(speaker = %coordinator.name, %state, "in-place toggle");

        match state {
            TransportState::Playing => {
                if let Err(e) = self.control.dispatch(coordinator, TransportCommand::Pause) {
                    self.skip("pause", e);
                }
                Action::Pause
            }
            TransportState::Paused => {
                // Resuming from pause keeps the position, no seek needed
                if self.has_source(coordinator) {
                    self.play(coordinator);
                    Action::Play
                } else {
                    self.load_station(coordinator);
                    self.play(coordinator);
                    Action::PlayFromStation
                }
            }
            TransportState::Stopped | TransportState::NoMedia | TransportState::Unknown => {
                let queue_empty = self.control.queue_empty(coordinator).unwrap_or_else(|e| {
                    warn!(speaker = %coordinator.name, "queue size unknown: {}", e);
                    true
                });
                let action = if queue_empty || !self.has_source(coordinator) {
                    self.load_station(coordinator);
                    Action::PlayFromStation
                } else {
                    Action::Play
                };
                self.play(coordinator);
                action
            }
        }
    }

    fn has_source(&mut self, speaker: &Speaker) -> bool {
        match self.control.current_source(speaker) {
            Ok(source) => source.is_some(),
            Err(e) => {
                self.skip("read current source", e);
                false
            }
        }
    }
}
