use gridplace_core::grid::GridBounds;
use gridplace_core::layout::{RectGridLayout, WorldPoint};
use gridplace_spatial::validation::DEFAULT_MARGIN;
use gridplace_spatial::{OccupancyGrid, OutOfBoundsPolicy, PlacementValidator};
use serde::{Deserialize, Serialize};

/// Settings for a placement session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Layout used when the host does not supply its own.
    #[serde(default)]
    pub layout: RectGridLayout,
    /// Authored map extent. `None` means unbounded.
    #[serde(default)]
    pub bounds: Option<GridBounds>,
    #[serde(default)]
    pub out_of_bounds: OutOfBoundsPolicy,
    /// Cells added to each footprint extent during validation.
    #[serde(default = "default_margin")]
    pub margin: u32,
    /// Where new objects appear before the first pointer move.
    #[serde(default)]
    pub spawn_point: WorldPoint,
}

fn default_margin() -> u32 {
    DEFAULT_MARGIN
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            layout: RectGridLayout::default(),
            bounds: None,
            out_of_bounds: OutOfBoundsPolicy::default(),
            margin: default_margin(),
            spawn_point: WorldPoint::ZERO,
        }
    }
}

impl BuildConfig {
    /// An empty occupancy grid honoring the configured bounds and policy.
    pub fn occupancy_grid(&self) -> OccupancyGrid {
        match self.bounds {
            Some(bounds) => OccupancyGrid::bounded(bounds, self.out_of_bounds),
            None => OccupancyGrid::new(),
        }
    }

    pub fn validator(&self) -> PlacementValidator {
        PlacementValidator::with_margin(self.margin)
    }
}
