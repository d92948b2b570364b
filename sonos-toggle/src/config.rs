//! TOML configuration
//!
//! ```toml
//! request_timeout_secs = 4
//!
//! [[room]]
//! name = "Kitchen"
//! address = "10.6.2.45"
//!
//! [house]
//! primary = "House AMX Sonos"
//! secondary = "Sonos-Gym"
//! station_name = "Eclectic Rock Radio"
//! ```
//!
//! Rooms are toggled in file order.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::house::HouseSettings;
use crate::model::{StationHint, DEFAULT_STATION_NAME, PLACEHOLDER_TONE_URI};
use crate::snapshot::Room;

const DEFAULT_TIMEOUT_SECS: u64 = 4;
const DEFAULT_DETACH_SETTLE_MS: u64 = 500;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Cap on every single device request
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(rename = "room", default)]
    pub rooms: Vec<Room>,

    #[serde(default)]
    pub house: Option<HouseConfig>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HouseConfig {
    /// Room name of the preferred coordinator
    pub primary: String,

    /// Room that should always follow the primary
    #[serde(default)]
    pub secondary: Option<String>,

    #[serde(default = "default_station_name")]
    pub station_name: String,

    #[serde(default)]
    pub station_uri: Option<String>,

    #[serde(default = "default_placeholder_uri")]
    pub placeholder_uri: String,

    #[serde(default = "default_detach_settle_ms")]
    pub detach_settle_ms: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_station_name() -> String {
    DEFAULT_STATION_NAME.to_string()
}

fn default_placeholder_uri() -> String {
    PLACEHOLDER_TONE_URI.to_string()
}

fn default_detach_settle_ms() -> u64 {
    DEFAULT_DETACH_SETTLE_MS
}

impl Config {
    /// `$XDG_CONFIG_HOME/sonos-toggle/config.toml` or the platform equivalent
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sonos-toggle").join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.rooms.is_empty() {
            return Err(ConfigError::Invalid("at least one [[room]] is required".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid("request_timeout_secs must be positive".to_string()));
        }

        let mut names = HashSet::new();
        for room in &self.rooms {
            if room.name.trim().is_empty() || room.address.trim().is_empty() {
                return Err(ConfigError::Invalid("rooms need a name and an address".to_string()));
            }
            if !names.insert(room.name.as_str()) {
                return Err(ConfigError::Invalid(format!("duplicate room name {:?}", room.name)));
            }
        }

        if let Some(house) = &self.house {
            if self.room(&house.primary).is_none() {
                return Err(ConfigError::Invalid(format!(
                    "house primary {:?} is not a configured room",
                    house.primary
                )));
            }
            if let Some(secondary) = &house.secondary {
                if self.room(secondary).is_none() {
                    return Err(ConfigError::Invalid(format!(
                        "house secondary {:?} is not a configured room",
                        secondary
                    )));
                }
                if *secondary == house.primary {
                    return Err(ConfigError::Invalid(
                        "house primary and secondary must differ".to_string(),
                    ));
                }
            }
        }

        Ok(())
    }

    pub fn room(&self, name: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.name == name)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Settings for the house toggle; errors when there is no `[house]` table
    pub fn house_settings(&self) -> Result<HouseSettings, ConfigError> {
        let house = self
            .house
            .as_ref()
            .ok_or_else(|| ConfigError::Invalid("no [house] section configured".to_string()))?;

        let lookup = |name: &str| {
            self.room(name)
                .cloned()
                .ok_or_else(|| ConfigError::Invalid(format!("{:?} is not a configured room", name)))
        };

        Ok(HouseSettings {
            primary: lookup(&house.primary)?,
            secondary: house.secondary.as_deref().map(lookup).transpose()?,
            station: StationHint {
                name: house.station_name.clone(),
                uri: house.station_uri.clone(),
                placeholder_uri: house.placeholder_uri.clone(),
            },
            detach_settle: Duration::from_millis(house.detach_settle_ms),
            rooms: self.rooms.clone(),
        })
    }
}
