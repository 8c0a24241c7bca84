//! The boundary between world space (owned by the rendering host) and grid
//! space.
//!
//! The host supplies a [`GridLayout`] for coordinate conversion and a
//! [`PointerSource`] for the current pointer position. [`RectGridLayout`] is
//! a plain rectangular layout usable by hosts that have no grid of their own
//! and by tests.

use crate::grid::Cell;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// WorldPoint
// ---------------------------------------------------------------------------

/// A point in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl WorldPoint {
    pub const ZERO: WorldPoint = WorldPoint {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// A point on the z = 0 plane.
    pub fn planar(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }
}

// ---------------------------------------------------------------------------
// Host seams
// ---------------------------------------------------------------------------

/// World <-> grid conversion owned by the tile/grid host.
pub trait GridLayout {
    /// The cell containing a world position.
    fn world_to_cell(&self, pos: WorldPoint) -> Cell;

    /// The world-space center of a cell, on the grid's layer plane.
    fn cell_center_world(&self, cell: Cell) -> WorldPoint;

    /// Snap a world position to the center of the cell containing it.
    fn snap_to_grid(&self, pos: WorldPoint) -> WorldPoint {
        self.cell_center_world(self.world_to_cell(pos))
    }
}

impl<T: GridLayout + ?Sized> GridLayout for &T {
    fn world_to_cell(&self, pos: WorldPoint) -> Cell {
        (**self).world_to_cell(pos)
    }

    fn cell_center_world(&self, cell: Cell) -> WorldPoint {
        (**self).cell_center_world(cell)
    }
}

/// Source of the pointer's current world position.
///
/// Returns `None` when the pointer does not hit anything in the world (for
/// example a ray that misses every collider).
pub trait PointerSource {
    fn pointer_world_position(&self) -> Option<WorldPoint>;
}

impl PointerSource for WorldPoint {
    fn pointer_world_position(&self) -> Option<WorldPoint> {
        Some(*self)
    }
}

impl PointerSource for Option<WorldPoint> {
    fn pointer_world_position(&self) -> Option<WorldPoint> {
        *self
    }
}

// ---------------------------------------------------------------------------
// RectGridLayout
// ---------------------------------------------------------------------------

/// Which world axes the grid's x/y map onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Swizzle {
    /// Grid lies in the world XY plane (2D tilemaps).
    #[default]
    Xy,
    /// Grid lies on the world XZ ground plane; world z maps to cell y.
    Xzy,
}

/// Errors constructing a layout.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("cell size must be positive and finite, got {0}")]
    InvalidCellSize(f32),
}

/// A rectangular grid of square cells.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectGridLayout {
    pub cell_size: f32,
    #[serde(default)]
    pub origin: WorldPoint,
    #[serde(default)]
    pub swizzle: Swizzle,
}

impl Default for RectGridLayout {
    fn default() -> Self {
        Self {
            cell_size: 1.0,
            origin: WorldPoint::ZERO,
            swizzle: Swizzle::Xy,
        }
    }
}

impl RectGridLayout {
    pub fn new(cell_size: f32, origin: WorldPoint, swizzle: Swizzle) -> Result<Self, LayoutError> {
        let layout = Self {
            cell_size,
            origin,
            swizzle,
        };
        layout.validate()?;
        Ok(layout)
    }

    /// Check the cell size. Layouts built through serde skip the constructor,
    /// so loaders call this after deserializing.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.cell_size.is_finite() && self.cell_size > 0.0 {
            Ok(())
        } else {
            Err(LayoutError::InvalidCellSize(self.cell_size))
        }
    }

    fn to_cell_axis(&self, world: f32, origin: f32) -> i32 {
        ((world - origin) / self.cell_size).floor() as i32
    }

    fn to_world_axis(&self, cell: i32, origin: f32) -> f32 {
        origin + (cell as f32 + 0.5) * self.cell_size
    }
}

impl GridLayout for RectGridLayout {
    fn world_to_cell(&self, pos: WorldPoint) -> Cell {
        match self.swizzle {
            Swizzle::Xy => Cell::new(
                self.to_cell_axis(pos.x, self.origin.x),
                self.to_cell_axis(pos.y, self.origin.y),
            ),
            Swizzle::Xzy => Cell::new(
                self.to_cell_axis(pos.x, self.origin.x),
                self.to_cell_axis(pos.z, self.origin.z),
            ),
        }
    }

    fn cell_center_world(&self, cell: Cell) -> WorldPoint {
        match self.swizzle {
            Swizzle::Xy => WorldPoint::new(
                self.to_world_axis(cell.x, self.origin.x),
                self.to_world_axis(cell.y, self.origin.y),
                self.origin.z,
            ),
            Swizzle::Xzy => WorldPoint::new(
                self.to_world_axis(cell.x, self.origin.x),
                self.origin.y,
                self.to_world_axis(cell.y, self.origin.z),
            ),
        }
    }
}
