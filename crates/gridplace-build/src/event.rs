//! Buffered notifications for the rendering host.
//!
//! The controller records an event for every lifecycle change. Hosts drain
//! the buffer once per frame to spawn, move, rotate or despawn the visual
//! for the pending object.

use gridplace_core::grid::{Cell, Footprint, Rotation};
use gridplace_core::id::{ObjectId, PrefabId};
use gridplace_spatial::{PlacementRejection, SpatialError};

/// Why a pending object was discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscardReason {
    /// Explicit cancel input.
    Cancelled,
    /// Commit attempted on an illegal position.
    Illegal(PlacementRejection),
    /// Validation passed but the grid refused the commit.
    CommitFailed(SpatialError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementEvent {
    Spawned {
        object: ObjectId,
        prefab: PrefabId,
        anchor: Cell,
    },
    Moved {
        object: ObjectId,
        anchor: Cell,
    },
    Rotated {
        object: ObjectId,
        rotation: Rotation,
        footprint: Footprint,
    },
    Placed {
        object: ObjectId,
        anchor: Cell,
        footprint: Footprint,
    },
    Discarded {
        object: ObjectId,
        reason: DiscardReason,
    },
    /// A placement request was refused because another object is pending.
    RequestRejected {
        prefab: PrefabId,
        pending: ObjectId,
    },
}
