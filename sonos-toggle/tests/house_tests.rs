//! House toggle scenarios against mock speakers

mod common;

use std::time::Duration;

use common::MockControl;
use sonos_toggle::{
    Action, HouseSettings, HouseToggle, Room, StationHint, ToggleError, TransportState,
};

const TONE: &str = "x-rincon-mp3radio://tone@440";
const ROCK: &str = "x-sonosapi-stream:s1234?sid=254";
const TRACK: &str = "x-file-cifs://nas/music/track.flac";

fn household() -> MockControl {
    MockControl::new().speaker("House").speaker("Gym")
}

fn settings(control: &MockControl, with_secondary: bool) -> HouseSettings {
    HouseSettings {
        primary: control.room("House"),
        secondary: with_secondary.then(|| control.room("Gym")),
        station: StationHint::default(),
        detach_settle: Duration::ZERO,
        rooms: Vec::new(),
    }
}

// ============================================================================
// Primary acting on its own state
// ============================================================================

#[test]
fn test_playing_primary_is_paused() {
    let control = household()
        .state("House", TransportState::Playing)
        .source("House", TRACK, Some("0:01:00"));
    let settings = settings(&control, false);

    let outcome = HouseToggle::new(&control, &settings).run().unwrap();

    assert_eq!(outcome.action, Action::Pause);
    assert_eq!(outcome.coordinator.name, "House");
    assert_eq!(control.commands(), vec!["pause House"]);
}

#[test]
fn test_paused_primary_resumes_in_place_without_seek() {
    let control = household()
        .state("House", TransportState::Paused)
        .source("House", TRACK, Some("0:04:10"));
    let settings = settings(&control, false);

    let outcome = HouseToggle::new(&control, &settings).run().unwrap();

    assert_eq!(outcome.action, Action::Play);
    assert_eq!(control.commands(), vec!["play House"]);
}

#[test]
fn test_paused_primary_without_source_starts_station() {
    let control = household()
        .state("House", TransportState::Paused)
        .favorite("Eclectic Rock Radio", ROCK);
    let settings = settings(&control, false);

    let outcome = HouseToggle::new(&control, &settings).run().unwrap();

    assert_eq!(outcome.action, Action::PlayFromStation);
    assert_eq!(
        control.commands(),
        vec![format!("load House {}", ROCK), "play House".to_string()]
    );
}

#[test]
fn test_stopped_with_empty_queue_loads_station_then_plays() {
    let control = household()
        .state("House", TransportState::Stopped)
        .queue("House", Some(0))
        .favorite("Morning Jazz", "x-sonosapi-stream:jazz")
        .favorite("eclectic rock radio (TuneIn)", ROCK);
    let settings = settings(&control, false);

    let outcome = HouseToggle::new(&control, &settings).run().unwrap();

    assert_eq!(outcome.action, Action::PlayFromStation);
    assert_eq!(
        control.commands(),
        vec![format!("load House {}", ROCK), "play House".to_string()]
    );
}

#[test]
fn test_stopped_with_queue_and_source_just_plays() {
    let control = household()
        .state("House", TransportState::Stopped)
        .queue("House", Some(12))
        .source("House", "x-rincon-queue:RINCON_House#0", None);
    let settings = settings(&control, false);

    let outcome = HouseToggle::new(&control, &settings).run().unwrap();

    assert_eq!(outcome.action, Action::Play);
    assert_eq!(control.commands(), vec!["play House"]);
}

#[test]
fn test_station_lookup_failure_falls_back_to_tone() {
    let control = household()
        .state("House", TransportState::NoMedia)
        .fail("House", "favorites");
    let settings = settings(&control, false);

    let outcome = HouseToggle::new(&control, &settings).run().unwrap();

    assert_eq!(outcome.action, Action::PlayFromStation);
    assert_eq!(
        control.commands(),
        vec![format!("load House {}", TONE), "play House".to_string()]
    );
    assert!(outcome.skipped.is_empty());
}

#[test]
fn test_configured_station_goes_through_the_queue() {
    let control = household().state("House", TransportState::Stopped);
    let mut settings = settings(&control, false);
    settings.station.uri = Some("x-sonosapi-hls:Api%3atune?sid=37&sn=31".to_string());

    let outcome = HouseToggle::new(&control, &settings).run().unwrap();

    assert_eq!(outcome.action, Action::PlayFromStation);
    assert_eq!(
        control.commands(),
        vec![
            "enqueue House x-sonosapi-hls:Api%3atune?sid=37&sn=31".to_string(),
            "play House".to_string(),
        ]
    );
}

#[test]
fn test_total_station_failure_still_plays() {
    let control = household()
        .state("House", TransportState::Stopped)
        .fail("House", "load_uri");
    let settings = settings(&control, false);

    let outcome = HouseToggle::new(&control, &settings).run().unwrap();

    assert_eq!(outcome.action, Action::PlayFromStation);
    assert_eq!(control.commands().last().unwrap(), "play House");
    assert_eq!(outcome.skipped.len(), 1);
    assert!(outcome.skipped[0].starts_with("load station"));
}

#[test]
fn test_failed_pause_is_skipped_not_fatal() {
    let control = household()
        .state("House", TransportState::Playing)
        .fail("House", "dispatch");
    let settings = settings(&control, false);

    let outcome = HouseToggle::new(&control, &settings).run().unwrap();

    assert_eq!(outcome.action, Action::Pause);
    assert_eq!(outcome.skipped.len(), 1);
}

// ============================================================================
// External groups
// ============================================================================

#[test]
fn test_external_group_is_resumed_then_left() {
    let control = household()
        .speaker("Kitchen")
        .following("House", "Kitchen")
        .state("Kitchen", TransportState::Playing)
        .source("Kitchen", TRACK, Some("0:03:12"));
    let settings = settings(&control, false);

    let outcome = HouseToggle::new(&control, &settings).run().unwrap();

    assert_eq!(outcome.action, Action::PlayFromResume);
    assert_eq!(
        control.commands(),
        vec![
            format!("load House {}", TRACK),
            "play House".to_string(),
            "seek House 0:03:12".to_string(),
            "leave House".to_string(),
        ]
    );
}

#[test]
fn test_external_group_at_track_start_is_not_seeked() {
    let control = household()
        .speaker("Kitchen")
        .following("House", "Kitchen")
        .source("Kitchen", TRACK, Some("0:00:00"));
    let settings = settings(&control, false);

    HouseToggle::new(&control, &settings).run().unwrap();

    assert!(control.commands().iter().all(|c| !c.starts_with("seek")));
}

#[test]
fn test_external_group_without_source_falls_back_to_station() {
    let control = household()
        .speaker("Kitchen")
        .following("House", "Kitchen")
        .favorite("Eclectic Rock Radio", ROCK);
    let settings = settings(&control, false);

    let outcome = HouseToggle::new(&control, &settings).run().unwrap();

    assert_eq!(outcome.action, Action::PlayFromStation);
    assert_eq!(
        control.commands(),
        vec![
            "leave House".to_string(),
            format!("load House {}", ROCK),
            "play House".to_string(),
        ]
    );
}

// ============================================================================
// Secondary speaker
// ============================================================================

#[test]
fn test_secondary_already_following_is_left_alone() {
    let control = household()
        .following("Gym", "House")
        .state("House", TransportState::Playing);
    let settings = settings(&control, true);

    let outcome = HouseToggle::new(&control, &settings).run().unwrap();

    assert_eq!(outcome.action, Action::Pause);
    assert_eq!(control.commands(), vec!["pause House"]);
    assert_eq!(outcome.group, vec!["House", "Gym"]);
}

#[test]
fn test_standalone_secondary_joins_before_play() {
    let control = household()
        .state("House", TransportState::Paused)
        .source("House", TRACK, None);
    let settings = settings(&control, true);

    let outcome = HouseToggle::new(&control, &settings).run().unwrap();

    assert_eq!(outcome.action, Action::Play);
    assert_eq!(control.commands(), vec!["join Gym House", "play House"]);
    assert_eq!(outcome.group, vec!["House", "Gym"]);
}

#[test]
fn test_secondary_in_another_group_leaves_then_joins() {
    let control = household()
        .speaker("Kitchen")
        .following("Gym", "Kitchen")
        .state("House", TransportState::Playing);
    let settings = settings(&control, true);

    HouseToggle::new(&control, &settings).run().unwrap();

    assert_eq!(
        control.commands(),
        vec!["leave Gym", "join Gym House", "pause House"]
    );
}

#[test]
fn test_primary_following_secondary_takes_over_and_pulls_it_in() {
    let control = household()
        .following("House", "Gym")
        .state("Gym", TransportState::Playing)
        .source("Gym", TRACK, Some("0:02:00"));
    let settings = settings(&control, true);

    let outcome = HouseToggle::new(&control, &settings).run().unwrap();

    assert_eq!(outcome.action, Action::PlayFromResume);
    assert_eq!(
        control.commands(),
        vec![
            format!("load House {}", TRACK),
            "play House".to_string(),
            "seek House 0:02:00".to_string(),
            "leave House".to_string(),
            "join Gym House".to_string(),
        ]
    );
    assert_eq!(outcome.group, vec!["House", "Gym"]);
}

#[test]
fn test_shared_external_group_is_split_and_regrouped() {
    let control = household()
        .speaker("Kitchen")
        .following("House", "Kitchen")
        .following("Gym", "Kitchen")
        .source("Kitchen", TRACK, None);
    let settings = settings(&control, true);

    HouseToggle::new(&control, &settings).run().unwrap();

    assert_eq!(
        control.commands(),
        vec![
            format!("load House {}", TRACK),
            "play House".to_string(),
            "leave House".to_string(),
            "leave Gym".to_string(),
            "join Gym House".to_string(),
        ]
    );
    assert!(control.calls().contains(&"group_coordinator Gym".to_string()));
}

#[test]
fn test_group_uses_configured_room_names() {
    let control = household()
        .speaker("Kitchen")
        .following("Gym", "House")
        .following("Kitchen", "House")
        .state("House", TransportState::Playing);
    let settings = HouseSettings {
        primary: Room::new("Living Room", control.get("House").address),
        secondary: Some(Room::new("Gym Corner", control.get("Gym").address)),
        station: StationHint::default(),
        detach_settle: Duration::ZERO,
        rooms: Vec::new(),
    };

    let outcome = HouseToggle::new(&control, &settings).run().unwrap();

    assert_eq!(outcome.coordinator.name, "Living Room");
    // Kitchen is not a configured room and keeps its zone name
    assert_eq!(outcome.group, vec!["Living Room", "Gym Corner", "Kitchen"]);
}

#[test]
fn test_secondary_takes_over_when_primary_is_down() {
    let control = household()
        .speaker("Kitchen")
        .unreachable("House")
        .following("Gym", "Kitchen")
        .queue("Gym", Some(0));
    let settings = settings(&control, true);

    let outcome = HouseToggle::new(&control, &settings).run().unwrap();

    assert_eq!(outcome.coordinator.name, "Gym");
    assert_eq!(outcome.action, Action::PlayFromStation);
    assert_eq!(
        control.commands(),
        vec![
            "leave Gym".to_string(),
            format!("load Gym {}", TONE),
            "play Gym".to_string(),
        ]
    );
}

#[test]
fn test_primary_down_without_secondary_is_fatal() {
    let control = household().unreachable("House");
    let settings = settings(&control, false);

    match HouseToggle::new(&control, &settings).run() {
        Err(ToggleError::NoReachableEndpoints { excluded }) => {
            assert_eq!(excluded, vec!["House".to_string()]);
        }
        other => panic!("Expected NoReachableEndpoints, got {:?}", other),
    }
    assert!(control.commands().is_empty());
}
