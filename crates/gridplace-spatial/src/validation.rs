//! Placement legality check.
//!
//! The validator scans the footprint padded by a margin (one cell by
//! default) along +x and +y. Padding is applied to validation only; commits
//! always use the true footprint.

use crate::OccupancyGrid;
use gridplace_core::grid::{Cell, Footprint};
use serde::{Deserialize, Serialize};

/// Margin added to each footprint extent when validating.
pub const DEFAULT_MARGIN: u32 = 1;

/// Why a placement was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PlacementRejection {
    #[error("cell ({}, {}) is blocked", .0.x, .0.y)]
    Blocked(Cell),
    #[error("footprint has zero extent")]
    EmptyFootprint,
    #[error("padded area at ({}, {}) runs past the addressable grid", .0.x, .0.y)]
    OutOfRange(Cell),
}

/// Decides whether a footprint may be placed on an [`OccupancyGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementValidator {
    margin: u32,
}

impl Default for PlacementValidator {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
        }
    }
}

impl PlacementValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_margin(margin: u32) -> Self {
        Self { margin }
    }

    pub fn margin(&self) -> u32 {
        self.margin
    }

    /// The area actually scanned for a footprint.
    pub fn query_size(&self, size: Footprint) -> Footprint {
        size.padded(self.margin)
    }

    /// True iff every cell of the padded area is free.
    pub fn can_place(&self, grid: &OccupancyGrid, origin: Cell, size: Footprint) -> bool {
        self.check(grid, origin, size).is_ok()
    }

    /// Like [`can_place`](Self::can_place), reporting the first blocked cell
    /// in scan order.
    pub fn check(
        &self,
        grid: &OccupancyGrid,
        origin: Cell,
        size: Footprint,
    ) -> Result<(), PlacementRejection> {
        if size.is_empty() {
            return Err(PlacementRejection::EmptyFootprint);
        }
        let query = self.query_size(size);
        if !query.fits_at(origin) {
            return Err(PlacementRejection::OutOfRange(origin));
        }
        match grid.first_blocked(origin, query) {
            Some(c) => Err(PlacementRejection::Blocked(c)),
            None => Ok(()),
        }
    }
}
