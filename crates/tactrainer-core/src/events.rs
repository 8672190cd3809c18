//! Events emitted by the simulation for UI and audio feedback.

use serde::{Deserialize, Serialize};

use crate::components::{AssetId, WeaponId};
use crate::enums::*;

/// Discrete things that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// Munition left the rail.
    WeaponLaunched {
        weapon: WeaponId,
        firer: AssetId,
        target: AssetId,
        variant: String,
    },
    /// Fire request refused; the transient "out of range" cue among others.
    FireRejected {
        firer: AssetId,
        target: AssetId,
        category: WeaponCategory,
        reason: String,
    },
    /// Munition reached its target. Both are gone unless the target is ownship.
    Impact { weapon: WeaponId, target: AssetId },
    /// First intercept of an (asset, emitter) pair.
    NewEsmContact { serial: u32, asset: AssetId, emitter: String },
    WaypointReached { asset: AssetId, remaining: usize },
    TrackReported { asset: AssetId, track_number: u32 },
    BuoyDeployed { buoy: u32 },
}

/// Alert for the UI alert queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
    pub tick: u64,
}
