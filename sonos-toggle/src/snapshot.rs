//! One observation of every configured room
//!
//! Built once per run and never mutated afterwards. Rooms that cannot be
//! probed are kept as [`Exclusion`]s so they can be reported.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::control::DeviceControl;
use crate::error::ToggleError;
use crate::model::{Endpoint, Exclusion, ProbedSpeaker, Speaker, SpeakerId, TransportState};

/// A configured room: display name and network address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
    pub address: String,
}

impl Room {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    endpoints: Vec<Endpoint>,
    excluded: Vec<Exclusion>,
}

impl Snapshot {
    pub fn new(endpoints: Vec<Endpoint>, excluded: Vec<Exclusion>) -> Self {
        Self { endpoints, excluded }
    }

    /// Probe every room in order and query each distinct coordinator once
    pub fn collect<C: DeviceControl + ?Sized>(control: &C, rooms: &[Room]) -> Self {
        let mut excluded = Vec::new();
        let mut members: Vec<(Speaker, Speaker)> = Vec::new();

        for room in rooms {
            match control.probe(&room.address) {
                Ok(ProbedSpeaker { speaker, coordinator }) => {
                    if members.iter().any(|(s, _)| s.id == speaker.id) {
                        debug!(room = %room.name, "speaker already probed under another room");
                        continue;
                    }
                    let coordinator = if coordinator.id == speaker.id {
                        Speaker::new(speaker.id.clone(), room.name.clone(), room.address.clone())
                    } else {
                        coordinator
                    };
                    let speaker = Speaker::new(speaker.id, room.name.clone(), room.address.clone());
                    debug!(room = %room.name, coordinator = %coordinator.id, "probed");
                    members.push((speaker, coordinator));
                }
                Err(e) => {
                    warn!(room = %room.name, address = %room.address, "skipping room: {}", e);
                    excluded.push(Exclusion {
                        name: room.name.clone(),
                        address: room.address.clone(),
                        reason: e.reason().to_string(),
                    });
                }
            }
        }

        // Coordinators outside the configured rooms are probed so every
        // follower's coordinator resolves inside the snapshot
        let known: HashSet<SpeakerId> = members.iter().map(|(s, _)| s.id.clone()).collect();
        let mut extra: Vec<(Speaker, Speaker)> = Vec::new();
        let mut lost: HashSet<SpeakerId> = HashSet::new();
        for (_, coordinator) in &members {
            if known.contains(&coordinator.id)
                || lost.contains(&coordinator.id)
                || extra.iter().any(|(s, _)| s.id == coordinator.id)
            {
                continue;
            }
            match control.probe(&coordinator.address) {
                Ok(probed) if probed.speaker.id == coordinator.id => {
                    debug!(coordinator = %coordinator.name, "probed coordinator outside configured rooms");
                    extra.push((coordinator.clone(), coordinator.clone()));
                }
                Ok(probed) => {
                    warn!(
                        coordinator = %coordinator.id,
                        answered = %probed.speaker.id,
                        "coordinator address answered as a different speaker"
                    );
                    lost.insert(coordinator.id.clone());
                }
                Err(e) => {
                    warn!(coordinator = %coordinator.name, "coordinator unreachable: {}", e);
                    lost.insert(coordinator.id.clone());
                }
            }
        }

        let mut reachable = Vec::new();
        for (speaker, coordinator) in members.into_iter().chain(extra) {
            if lost.contains(&coordinator.id) {
                warn!(room = %speaker.name, "skipping room: coordinator unreachable");
                excluded.push(Exclusion {
                    name: speaker.name,
                    address: speaker.address,
                    reason: "coordinator unreachable".to_string(),
                });
            } else {
                reachable.push((speaker, coordinator.id));
            }
        }

        let mut states: HashMap<SpeakerId, (TransportState, bool)> = HashMap::new();
        for (speaker, coordinator) in &reachable {
            if speaker.id != *coordinator || states.contains_key(coordinator) {
                continue;
            }
            let state = control.transport_state(speaker).unwrap_or_else(|e| {
                warn!(speaker = %speaker.name, "transport state unknown: {}", e);
                TransportState::Unknown
            });
            let queue_empty = control.queue_empty(speaker).unwrap_or_else(|e| {
                warn!(speaker = %speaker.name, "queue size unknown: {}", e);
                false
            });
            debug!(speaker = %speaker.name, %state, queue_empty, "coordinator state");
            states.insert(coordinator.clone(), (state, queue_empty));
        }

        let endpoints = reachable
            .into_iter()
            .map(|(speaker, coordinator)| {
                let (transport_state, queue_empty) = states
                    .get(&coordinator)
                    .copied()
                    .unwrap_or((TransportState::Unknown, false));
                Endpoint {
                    speaker,
                    coordinator,
                    transport_state,
                    queue_empty,
                }
            })
            .collect();

        Self { endpoints, excluded }
    }

    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    pub fn excluded(&self) -> &[Exclusion] {
        &self.excluded
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    pub fn endpoint(&self, id: &SpeakerId) -> Option<&Endpoint> {
        self.endpoints.iter().find(|e| e.speaker.id == *id)
    }

    /// Distinct coordinators in order of first appearance
    ///
    /// Fails when an endpoint's coordinator is missing from the snapshot or is
    /// itself following another speaker.
    pub fn coordinators(&self) -> Result<Vec<&Endpoint>, ToggleError> {
        let mut seen = HashSet::new();
        let mut coordinators = Vec::new();

        for endpoint in &self.endpoints {
            if !seen.insert(&endpoint.coordinator) {
                continue;
            }
            let coordinator = self.endpoint(&endpoint.coordinator).ok_or_else(|| {
                ToggleError::CoordinatorUndetermined(format!(
                    "{} follows {}, which is not in the snapshot",
                    endpoint.speaker.name, endpoint.coordinator
                ))
            })?;
            if !coordinator.is_coordinator() {
                return Err(ToggleError::CoordinatorUndetermined(format!(
                    "{} follows {}, which itself follows {}",
                    endpoint.speaker.name, coordinator.speaker.name, coordinator.coordinator
                )));
            }
            coordinators.push(coordinator);
        }

        Ok(coordinators)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(id: &str, coordinator: &str, state: TransportState) -> Endpoint {
        Endpoint {
            speaker: Speaker::new(id, id, format!("10.0.0.{}", id.len())),
            coordinator: SpeakerId::new(coordinator),
            transport_state: state,
            queue_empty: false,
        }
    }

    #[test]
    fn test_coordinators_dedupe_in_first_appearance_order() {
        let snapshot = Snapshot::new(
            vec![
                endpoint("B", "A", TransportState::Paused),
                endpoint("C", "C", TransportState::Stopped),
                endpoint("A", "A", TransportState::Paused),
            ],
            vec![],
        );

        let ids: Vec<_> = snapshot
            .coordinators()
            .unwrap()
            .iter()
            .map(|e| e.speaker.id.as_str())
            .collect();
        assert_eq!(ids, vec!["A", "C"]);
    }

    #[test]
    fn test_missing_coordinator_is_undetermined() {
        let snapshot = Snapshot::new(vec![endpoint("B", "A", TransportState::Paused)], vec![]);
        assert!(matches!(
            snapshot.coordinators(),
            Err(ToggleError::CoordinatorUndetermined(_))
        ));
    }

    #[test]
    fn test_chained_coordinator_is_undetermined() {
        let snapshot = Snapshot::new(
            vec![
                endpoint("C", "B", TransportState::Paused),
                endpoint("B", "A", TransportState::Paused),
                endpoint("A", "A", TransportState::Paused),
            ],
            vec![],
        );
        assert!(matches!(
            snapshot.coordinators(),
            Err(ToggleError::CoordinatorUndetermined(_))
        ));
    }
}
