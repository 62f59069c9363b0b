//! Events surfaced by the simulation to the host, per §6's exit codes and
//! the user-facing messages named throughout §4.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Events surfaced to the host after a tick. Distinct from `Alert`: these
/// are structured outcomes a host may act on (e.g. re-enable a UI control),
/// not just text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    InitFailed { reason: String },
    RenderRecovered,
    BurnComplete { node_label: String },
    BurnCancelled { reason: String },
    AssumeControlFailed { reason: String },
    TerrainFollowingDisabled { reason: String },
}

/// Alert for the UI alert queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
    pub tick: u64,
}
