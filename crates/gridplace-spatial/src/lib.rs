//! Occupancy grid and placement validation.
//!
//! [`OccupancyGrid`] is an explicit blocked-cell layer kept apart from the
//! visual tile map. [`PlacementValidator`] decides whether a footprint may be
//! placed by scanning a padded area of that layer.

use gridplace_core::grid::{Cell, Footprint, GridBounds};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub mod validation;
pub use validation::{PlacementRejection, PlacementValidator};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// How cells outside the grid's bounds read and whether they may be committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutOfBoundsPolicy {
    /// Cells outside the bounds read as blocked; commits that leave the
    /// bounds are rejected.
    #[default]
    Blocked,
    /// Cells outside the bounds read as free and may be committed, like an
    /// unbounded tilemap that returns no tile outside its painted area.
    Open,
}

/// Errors from occupancy mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpatialError {
    #[error("area {width}x{depth} at ({x}, {y}) leaves the map bounds")]
    OutOfBounds { x: i32, y: i32, width: u32, depth: u32 },
    #[error("area has zero extent")]
    EmptyArea,
    #[error("area {width}x{depth} at ({x}, {y}) runs past the addressable grid")]
    OutOfRange { x: i32, y: i32, width: u32, depth: u32 },
}

// ---------------------------------------------------------------------------
// OccupancyGrid
// ---------------------------------------------------------------------------

/// Tracks which cells are blocked.
///
/// A grid without bounds is unbounded: every cell is in bounds and reads as
/// free until committed.
#[derive(Debug, Clone, Default)]
pub struct OccupancyGrid {
    blocked: BTreeSet<Cell>,
    bounds: Option<GridBounds>,
    policy: OutOfBoundsPolicy,
}

impl OccupancyGrid {
    /// An empty, unbounded grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty grid limited to `bounds`.
    pub fn bounded(bounds: GridBounds, policy: OutOfBoundsPolicy) -> Self {
        Self {
            blocked: BTreeSet::new(),
            bounds: Some(bounds),
            policy,
        }
    }

    /// Pre-block cells, e.g. those painted unplaceable in the authored map.
    pub fn with_blocked<I: IntoIterator<Item = Cell>>(mut self, cells: I) -> Self {
        self.blocked.extend(cells);
        self
    }

    pub fn bounds(&self) -> Option<GridBounds> {
        self.bounds
    }

    pub fn policy(&self) -> OutOfBoundsPolicy {
        self.policy
    }

    /// Whether a cell lies inside the bounds (always true when unbounded).
    pub fn in_bounds(&self, cell: Cell) -> bool {
        self.bounds.map_or(true, |b| b.contains(cell))
    }

    // -- Point queries --

    pub fn is_blocked(&self, cell: Cell) -> bool {
        if !self.in_bounds(cell) && self.policy == OutOfBoundsPolicy::Blocked {
            return true;
        }
        self.blocked.contains(&cell)
    }

    // -- Area queries --

    /// Blocked flags for every cell of `size` anchored at `origin`, row by
    /// row (y outer, x inner). Empty for a zero-extent size or one that does
    /// not [fit](Footprint::fits_at) at `origin`.
    pub fn query_area(&self, origin: Cell, size: Footprint) -> Vec<bool> {
        size.cells(origin).map(|c| self.is_blocked(c)).collect()
    }

    /// First blocked cell of the area in scan order, if any. An area that
    /// does not fit at `origin` has no cells to report.
    pub fn first_blocked(&self, origin: Cell, size: Footprint) -> Option<Cell> {
        size.cells(origin).find(|&c| self.is_blocked(c))
    }

    // -- Mutation --

    /// Mark every cell of `size` anchored at `origin` as blocked.
    ///
    /// Either the whole rectangle is committed or nothing is: a rectangle
    /// leaving the bounds under [`OutOfBoundsPolicy::Blocked`] is rejected
    /// before any cell changes, as is one running past the `i32` range
    /// under either policy.
    pub fn commit_area(&mut self, origin: Cell, size: Footprint) -> Result<(), SpatialError> {
        if size.is_empty() {
            return Err(SpatialError::EmptyArea);
        }
        if !size.fits_at(origin) {
            return Err(SpatialError::OutOfRange {
                x: origin.x,
                y: origin.y,
                width: size.width,
                depth: size.depth,
            });
        }
        let leaves_bounds = self
            .bounds
            .is_some_and(|b| !b.contains_area(origin, size));
        if leaves_bounds && self.policy == OutOfBoundsPolicy::Blocked {
            return Err(SpatialError::OutOfBounds {
                x: origin.x,
                y: origin.y,
                width: size.width,
                depth: size.depth,
            });
        }
        self.blocked.extend(size.cells(origin));
        tracing::trace!(
            x = origin.x,
            y = origin.y,
            width = size.width,
            depth = size.depth,
            "area committed"
        );
        Ok(())
    }

    // -- Stats --

    /// Number of explicitly blocked cells (out-of-bounds cells not counted).
    pub fn blocked_count(&self) -> usize {
        self.blocked.len()
    }

    /// Explicitly blocked cells in ascending (x, y) order.
    pub fn blocked_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.blocked.iter().copied()
    }
}
