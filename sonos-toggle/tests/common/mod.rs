//! In-memory speakers for exercising the toggle without a network.
//!
//! `MockControl` keeps a tiny household model (grouping, transport state,
//! queue, current source) and records every call as a short string such as
//! `"pause Kitchen"` or `"join Gym House"` so tests can assert on order.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashSet;

use sonos_toggle::{
    ControlError, DeviceControl, Favorite, MediaSource, ProbedSpeaker, Room, Speaker,
    TransportCommand, TransportState,
};

#[derive(Debug, Clone)]
pub struct MockSpeaker {
    pub id: String,
    pub name: String,
    pub address: String,
    pub reachable: bool,
    pub coordinator: String,
    pub state: TransportState,
    /// `None` makes the queue query fail
    pub queue_len: Option<u32>,
    pub source: Option<MediaSource>,
}

impl MockSpeaker {
    fn to_speaker(&self) -> Speaker {
        Speaker::new(self.id.as_str(), self.name.clone(), self.address.clone())
    }
}

#[derive(Debug, Default)]
pub struct MockControl {
    speakers: RefCell<Vec<MockSpeaker>>,
    favorites: Vec<Favorite>,
    failing: HashSet<(String, &'static str)>,
    calls: RefCell<Vec<String>>,
}

impl MockControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a reachable, standalone, stopped speaker with an empty queue.
    /// PLAY leaves such a speaker stopped until media is queued or loaded.
    /// The id is `RINCON_{name}` and the address `10.0.0.{n}`.
    pub fn speaker(self, name: &str) -> Self {
        let n = self.speakers.borrow().len() + 1;
        let id = format!("RINCON_{}", name);
        self.speakers.borrow_mut().push(MockSpeaker {
            id: id.clone(),
            name: name.to_string(),
            address: format!("10.0.0.{}", n),
            reachable: true,
            coordinator: id,
            state: TransportState::Stopped,
            queue_len: Some(0),
            source: None,
        });
        self
    }

    pub fn following(self, name: &str, coordinator: &str) -> Self {
        let id = format!("RINCON_{}", coordinator);
        self.edit(name, |s| s.coordinator = id);
        self
    }

    pub fn state(self, name: &str, state: TransportState) -> Self {
        self.edit(name, |s| s.state = state);
        self
    }

    pub fn queue(self, name: &str, len: Option<u32>) -> Self {
        self.edit(name, |s| s.queue_len = len);
        self
    }

    pub fn source(self, name: &str, uri: &str, position: Option<&str>) -> Self {
        let source = MediaSource {
            uri: uri.to_string(),
            position: position.map(str::to_string),
            metadata: String::new(),
        };
        self.edit(name, |s| s.source = Some(source));
        self
    }

    pub fn unreachable(self, name: &str) -> Self {
        self.edit(name, |s| s.reachable = false);
        self
    }

    /// Make `operation` fail on `name`. Operations are named after the trait
    /// methods, e.g. `"dispatch"`, `"leave_group"`.
    pub fn fail(mut self, name: &str, operation: &'static str) -> Self {
        self.failing.insert((name.to_string(), operation));
        self
    }

    pub fn favorite(mut self, title: &str, uri: &str) -> Self {
        self.favorites.push(Favorite {
            title: title.to_string(),
            uri: uri.to_string(),
            metadata: format!("<DIDL-Lite>{}</DIDL-Lite>", title),
        });
        self
    }

    pub fn room(&self, name: &str) -> Room {
        let s = self.get(name);
        Room::new(s.name, s.address)
    }

    pub fn rooms(&self, names: &[&str]) -> Vec<Room> {
        names.iter().map(|n| self.room(n)).collect()
    }

    pub fn get(&self, name: &str) -> MockSpeaker {
        self.speakers
            .borrow()
            .iter()
            .find(|s| s.name == name)
            .cloned()
            .unwrap_or_else(|| panic!("no mock speaker named {}", name))
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Calls other than the read-only queries
    pub fn commands(&self) -> Vec<String> {
        const READS: [&str; 7] = [
            "probe",
            "group_coordinator",
            "group_members",
            "transport_state",
            "queue_empty",
            "current_source",
            "favorites",
        ];
        self.calls()
            .into_iter()
            .filter(|c| !READS.iter().any(|r| c.starts_with(&format!("{} ", r))))
            .collect()
    }

    fn edit(&self, name: &str, f: impl FnOnce(&mut MockSpeaker)) {
        let mut speakers = self.speakers.borrow_mut();
        let speaker = speakers
            .iter_mut()
            .find(|s| s.name == name)
            .unwrap_or_else(|| panic!("no mock speaker named {}", name));
        f(speaker);
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    /// Reachability and failure injection shared by every call
    fn check(&self, speaker: &Speaker, operation: &'static str) -> Result<MockSpeaker, ControlError> {
        let mock = self
            .speakers
            .borrow()
            .iter()
            .find(|s| s.id == speaker.id.as_str())
            .cloned()
            .ok_or_else(|| ControlError::unreachable(speaker.address.clone(), "unknown speaker"))?;
        if !mock.reachable {
            return Err(ControlError::unreachable(mock.address.clone(), "no route to host"));
        }
        if self.failing.contains(&(mock.name.clone(), operation)) {
            return Err(ControlError::command(mock.name.clone(), operation, "UPnP error 701"));
        }
        Ok(mock)
    }

    fn by_id(&self, id: &str) -> Option<MockSpeaker> {
        self.speakers.borrow().iter().find(|s| s.id == id).cloned()
    }
}

impl DeviceControl for MockControl {
    fn probe(&self, address: &str) -> Result<ProbedSpeaker, ControlError> {
        self.record(format!("probe {}", address));
        let mock = self
            .speakers
            .borrow()
            .iter()
            .find(|s| s.address == address)
            .cloned()
            .ok_or_else(|| ControlError::unreachable(address, "no speaker at address"))?;
        if !mock.reachable {
            return Err(ControlError::unreachable(address, "no route to host"));
        }
        let coordinator = self
            .by_id(&mock.coordinator)
            .map(|c| c.to_speaker())
            .ok_or_else(|| ControlError::unreachable(address, "coordinator missing from topology"))?;
        Ok(ProbedSpeaker {
            speaker: mock.to_speaker(),
            coordinator,
        })
    }

    fn group_coordinator(&self, speaker: &Speaker) -> Result<Speaker, ControlError> {
        self.record(format!("group_coordinator {}", speaker.name));
        let mock = self.check(speaker, "group_coordinator")?;
        self.by_id(&mock.coordinator)
            .map(|c| c.to_speaker())
            .ok_or_else(|| ControlError::command(speaker.name.clone(), "group_coordinator", "missing"))
    }

    fn group_members(&self, coordinator: &Speaker) -> Result<Vec<Speaker>, ControlError> {
        self.record(format!("group_members {}", coordinator.name));
        self.check(coordinator, "group_members")?;
        Ok(self
            .speakers
            .borrow()
            .iter()
            .filter(|s| s.coordinator == coordinator.id.as_str())
            .map(MockSpeaker::to_speaker)
            .collect())
    }

    fn transport_state(&self, speaker: &Speaker) -> Result<TransportState, ControlError> {
        self.record(format!("transport_state {}", speaker.name));
        Ok(self.check(speaker, "transport_state")?.state)
    }

    fn queue_empty(&self, speaker: &Speaker) -> Result<bool, ControlError> {
        self.record(format!("queue_empty {}", speaker.name));
        let mock = self.check(speaker, "queue_empty")?;
        mock.queue_len
            .map(|len| len == 0)
            .ok_or_else(|| ControlError::command(speaker.name.clone(), "queue_empty", "not supported"))
    }

    fn current_source(&self, speaker: &Speaker) -> Result<Option<MediaSource>, ControlError> {
        self.record(format!("current_source {}", speaker.name));
        Ok(self.check(speaker, "current_source")?.source)
    }

    fn dispatch(&self, speaker: &Speaker, command: TransportCommand) -> Result<(), ControlError> {
        let verb = match command {
            TransportCommand::Play => "play",
            TransportCommand::Pause => "pause",
        };
        self.record(format!("{} {}", verb, speaker.name));
        let mock = self.check(speaker, "dispatch")?;
        assert_eq!(
            mock.coordinator, mock.id,
            "transport command sent to {}, which is not a coordinator",
            mock.name
        );
        // PLAY with nothing queued and nothing loaded stays silent
        let silent = mock.queue_len == Some(0) && mock.source.is_none();
        self.edit(&mock.name, |s| match command {
            TransportCommand::Play if silent => {}
            TransportCommand::Play => s.state = TransportState::Playing,
            TransportCommand::Pause => s.state = TransportState::Paused,
        });
        Ok(())
    }

    fn seek(&self, speaker: &Speaker, position: &str) -> Result<(), ControlError> {
        self.record(format!("seek {} {}", speaker.name, position));
        self.check(speaker, "seek")?;
        Ok(())
    }

    fn join_group(&self, speaker: &Speaker, coordinator: &Speaker) -> Result<(), ControlError> {
        self.record(format!("join {} {}", speaker.name, coordinator.name));
        let mock = self.check(speaker, "join_group")?;
        let id = coordinator.id.as_str().to_string();
        self.edit(&mock.name, |s| s.coordinator = id);
        Ok(())
    }

    fn leave_group(&self, speaker: &Speaker) -> Result<(), ControlError> {
        self.record(format!("leave {}", speaker.name));
        let mock = self.check(speaker, "leave_group")?;
        self.edit(&mock.name, |s| s.coordinator = s.id.clone());
        Ok(())
    }

    fn favorites(&self, speaker: &Speaker) -> Result<Vec<Favorite>, ControlError> {
        self.record(format!("favorites {}", speaker.name));
        self.check(speaker, "favorites")?;
        Ok(self.favorites.clone())
    }

    fn load_uri(&self, speaker: &Speaker, uri: &str, _metadata: &str) -> Result<(), ControlError> {
        self.record(format!("load {} {}", speaker.name, uri));
        let mock = self.check(speaker, "load_uri")?;
        let source = MediaSource {
            uri: uri.to_string(),
            position: None,
            metadata: String::new(),
        };
        // Loading media makes a follower leave its group
        self.edit(&mock.name, |s| {
            s.coordinator = s.id.clone();
            s.source = Some(source);
        });
        Ok(())
    }

    fn enqueue_uri(&self, speaker: &Speaker, uri: &str) -> Result<(), ControlError> {
        self.record(format!("enqueue {} {}", speaker.name, uri));
        let mock = self.check(speaker, "enqueue_uri")?;
        let source = MediaSource {
            uri: uri.to_string(),
            position: None,
            metadata: String::new(),
        };
        self.edit(&mock.name, |s| {
            s.coordinator = s.id.clone();
            s.queue_len = Some(1);
            s.source = Some(source);
        });
        Ok(())
    }
}
