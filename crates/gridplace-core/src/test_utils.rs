//! Shared test helpers for unit tests, integration tests, and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]`.

use crate::grid::{Cell, Footprint};
use crate::id::{PrefabId, TileId};
use crate::layout::{RectGridLayout, WorldPoint};
use crate::prefab::PrefabCatalog;
use crate::tile::{TileData, TileDataRegistry, TileLayer, TileMap};

// ===========================================================================
// Grid helpers
// ===========================================================================

pub fn cell(x: i32, y: i32) -> Cell {
    Cell::new(x, y)
}

pub fn fp(width: u32, depth: u32) -> Footprint {
    Footprint::new(width, depth)
}

/// Unit-size XY layout anchored at the world origin.
pub fn unit_layout() -> RectGridLayout {
    RectGridLayout::default()
}

/// World point at the center of a cell on the unit layout.
pub fn center_of(x: i32, y: i32) -> WorldPoint {
    WorldPoint::planar(x as f32 + 0.5, y as f32 + 0.5)
}

// ===========================================================================
// Prefabs
// ===========================================================================

pub fn small_house() -> PrefabId {
    PrefabId(0)
}
pub fn long_wall() -> PrefabId {
    PrefabId(1)
}
pub fn big_barn() -> PrefabId {
    PrefabId(2)
}

/// Catalog with `small_house` (1x1), `long_wall` (2x1) and `big_barn` (3x2)
/// registered in that order.
pub fn sample_catalog() -> PrefabCatalog {
    let mut catalog = PrefabCatalog::new();
    for (name, footprint) in [
        ("small_house", fp(1, 1)),
        ("long_wall", fp(2, 1)),
        ("big_barn", fp(3, 2)),
    ] {
        catalog
            .register(name, footprint)
            .expect("sample catalog names are unique");
    }
    catalog
}

// ===========================================================================
// Tiles
// ===========================================================================

pub fn grass() -> TileId {
    TileId(0)
}
pub fn mud() -> TileId {
    TileId(1)
}

/// 4x4 map of grass with a mud column at x = 3. Grass carries `data1 = 1.0`,
/// mud `data1 = 0.25`.
pub fn sample_tile_map() -> TileMap {
    let layer: TileLayer = (0..4)
        .flat_map(|y| (0..4).map(move |x| (cell(x, y), if x == 3 { mud() } else { grass() })))
        .collect();
    let registry = TileDataRegistry::load([
        (grass(), TileData { data1: 1.0 }),
        (mud(), TileData { data1: 0.25 }),
    ])
    .expect("sample tiles are unique");
    TileMap::new(layer, registry)
}
