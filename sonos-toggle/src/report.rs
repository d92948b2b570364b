//! JSON run summaries printed on stdout

use chrono::Local;
use serde::Serialize;

use crate::decider::GlobalOutcome;
use crate::house::HouseOutcome;
use crate::model::{Action, Exclusion};

/// Local time with second precision, e.g. `2024-05-01T07:30:12`
pub fn timestamp() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S").to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobalSummary {
    pub timestamp: String,
    pub action: &'static str,
    /// Coordinators that accepted the command
    pub targets: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub excluded: Vec<Exclusion>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub dry_run: bool,
}

impl GlobalSummary {
    pub fn new(timestamp: String, outcome: &GlobalOutcome) -> Self {
        Self {
            timestamp,
            action: outcome.decision.action.command().as_str(),
            targets: outcome.report.succeeded.iter().map(|s| s.name.clone()).collect(),
            failed: outcome.report.failed.iter().map(|s| s.name.clone()).collect(),
            excluded: outcome.excluded.clone(),
            dry_run: outcome.dry_run,
        }
    }
}

/// How the house toggle got the coordinator playing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaySource {
    InPlace,
    Resume,
    Station,
    None,
}

impl From<Action> for PlaySource {
    fn from(action: Action) -> Self {
        match action {
            Action::Play => PlaySource::InPlace,
            Action::PlayFromResume => PlaySource::Resume,
            Action::PlayFromStation => PlaySource::Station,
            Action::Pause => PlaySource::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HouseSummary {
    pub timestamp: String,
    pub action: &'static str,
    pub source: PlaySource,
    pub coordinator: String,
    pub group: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<String>,
}

impl HouseSummary {
    pub fn new(timestamp: String, outcome: &HouseOutcome) -> Self {
        Self {
            timestamp,
            action: outcome.action.command().as_str(),
            source: outcome.action.into(),
            coordinator: outcome.coordinator.name.clone(),
            group: outcome.group.clone(),
            skipped: outcome.skipped.clone(),
        }
    }
}

/// Pretty-printed JSON, two-space indented
pub fn to_json<T: Serialize>(summary: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(summary)
}
