//! Global toggle: one action for every group
//!
//! If any coordinator is playing, every coordinator is paused; otherwise every
//! coordinator is sent PLAY. Coordinators that are already in the target
//! state get the command anyway.

use tracing::{info, warn};

use crate::control::DeviceControl;
use crate::error::ToggleError;
use crate::model::{Action, Decision, Exclusion, Speaker};
use crate::snapshot::{Room, Snapshot};

pub struct ToggleDecider;

impl ToggleDecider {
    /// Reduce a snapshot to a single decision
    pub fn decide(snapshot: &Snapshot) -> Result<Decision, ToggleError> {
        if snapshot.is_empty() {
            return Err(ToggleError::NoReachableEndpoints {
                excluded: snapshot.excluded().iter().map(|e| e.name.clone()).collect(),
            });
        }

        let coordinators = snapshot.coordinators()?;
        let any_playing = coordinators.iter().any(|c| c.transport_state.is_playing());
        let action = if any_playing { Action::Pause } else { Action::Play };

        Ok(Decision {
            action,
            targets: coordinators.into_iter().map(|c| c.speaker.clone()).collect(),
        })
    }

    /// Send the decision's command to each target. A failed target does not
    /// stop the others.
    pub fn dispatch<C: DeviceControl + ?Sized>(control: &C, decision: &Decision) -> DispatchReport {
        let command = decision.action.command();
        let mut report = DispatchReport::default();

        for target in &decision.targets {
            match control.dispatch(target, command) {
                Ok(()) => {
                    info!(speaker = %target.name, command = command.as_str(), "dispatched");
                    report.succeeded.push(target.clone());
                }
                Err(e) => {
                    warn!(speaker = %target.name, command = command.as_str(), "skipping: {}", e);
                    report.failed.push(target.clone());
                }
            }
        }

        report
    }
}

/// Which targets accepted the command
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispatchReport {
    pub succeeded: Vec<Speaker>,
    pub failed: Vec<Speaker>,
}

/// Everything a global run produced
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalOutcome {
    pub decision: Decision,
    pub report: DispatchReport,
    pub excluded: Vec<Exclusion>,
    pub dry_run: bool,
}

/// Snapshot, decide, and (unless `dry_run`) dispatch
pub fn toggle_all<C: DeviceControl + ?Sized>(
    control: &C,
    rooms: &[Room],
    dry_run: bool,
) -> Result<GlobalOutcome, ToggleError> {
    let snapshot = Snapshot::collect(control, rooms);
    let decision = ToggleDecider::decide(&snapshot)?;
    info!(
        action = decision.action.command().as_str(),
        targets = decision.targets.len(),
        excluded = snapshot.excluded().len(),
        "decided"
    );

    let report = if dry_run {
        DispatchReport {
            succeeded: decision.targets.clone(),
            failed: Vec::new(),
        }
    } else {
        ToggleDecider::dispatch(control, &decision)
    };

    Ok(GlobalOutcome {
        decision,
        report,
        excluded: snapshot.excluded().to_vec(),
        dry_run,
    })
}
