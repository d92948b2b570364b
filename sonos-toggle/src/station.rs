//! Default station fallback chain
//!
//! Strategies are tried in order and the first one that both resolves and
//! loads wins: a matching favorite, then the configured stream, then the
//! placeholder tone.

use tracing::{debug, info, warn};

use crate::control::DeviceControl;
use crate::error::ControlError;
use crate::model::{Favorite, Speaker, StationHint};

/// Where a station came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationOrigin {
    Favorite,
    Configured,
    Placeholder,
}

/// How a station URI reaches the speaker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Loaded as the current media
    Direct,
    /// Loaded into the queue, which becomes the current media
    Queue,
}

/// A resolved station, ready to load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationCandidate {
    pub origin: StationOrigin,
    pub title: String,
    pub uri: String,
    pub metadata: String,
    pub delivery: Delivery,
}

type Strategy<C> = fn(&C, &Speaker, &StationHint) -> Option<StationCandidate>;

fn strategies<C: DeviceControl + ?Sized>() -> [Strategy<C>; 3] {
    [from_favorites::<C>, from_configured::<C>, from_placeholder::<C>]
}

/// Resolve and load the default station on `speaker`
pub fn load<C: DeviceControl + ?Sized>(
    control: &C,
    speaker: &Speaker,
    hint: &StationHint,
) -> Result<StationCandidate, ControlError> {
    for strategy in strategies::<C>() {
        let Some(candidate) = strategy(control, speaker, hint) else {
            continue;
        };

        let loaded = match candidate.delivery {
            Delivery::Direct => control.load_uri(speaker, &candidate.uri, &candidate.metadata),
            Delivery::Queue => control.enqueue_uri(speaker, &candidate.uri),
        };

        match loaded {
            Ok(()) => {
                info!(speaker = %speaker.name, station = %candidate.title, "loaded station");
                return Ok(candidate);
            }
            Err(e) => warn!(speaker = %speaker.name, station = %candidate.title, "skipping station: {}", e),
        }
    }

    Err(ControlError::command(
        speaker.name.clone(),
        "load station",
        "no station source could be loaded",
    ))
}

/// First favorite whose title contains `name`, ignoring case
pub fn find_favorite<'a>(favorites: &'a [Favorite], name: &str) -> Option<&'a Favorite> {
    let needle = name.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    favorites
        .iter()
        .find(|f| f.title.to_lowercase().contains(&needle))
}

fn from_favorites<C: DeviceControl + ?Sized>(
    control: &C,
    speaker: &Speaker,
    hint: &StationHint,
) -> Option<StationCandidate> {
    let favorites = match control.favorites(speaker) {
        Ok(favorites) => favorites,
        Err(e) => {
            debug!(speaker = %speaker.name, "favorites lookup failed: {}", e);
            return None;
        }
    };

    find_favorite(&favorites, &hint.name).map(|f| StationCandidate {
        origin: StationOrigin::Favorite,
        title: f.title.clone(),
        uri: f.uri.clone(),
        metadata: f.metadata.clone(),
        delivery: Delivery::Direct,
    })
}

fn from_configured<C: DeviceControl + ?Sized>(
    _control: &C,
    _speaker: &Speaker,
    hint: &StationHint,
) -> Option<StationCandidate> {
    let uri = hint.uri.as_deref().map(str::trim).filter(|u| !u.is_empty())?;
    Some(StationCandidate {
        origin: StationOrigin::Configured,
        title: hint.name.clone(),
        uri: uri.to_string(),
        metadata: String::new(),
        delivery: Delivery::Queue,
    })
}

fn from_placeholder<C: DeviceControl + ?Sized>(
    _control: &C,
    _speaker: &Speaker,
    hint: &StationHint,
) -> Option<StationCandidate> {
    Some(StationCandidate {
        origin: StationOrigin::Placeholder,
        title: "placeholder".to_string(),
        uri: hint.placeholder_uri.clone(),
        metadata: String::new(),
        delivery: Delivery::Direct,
    })
}
