//! Serde data file structs for placement content.
//!
//! These structs define the on-disk format for tile data tables, prefabs and
//! maps. They are deserialized from RON, JSON, or TOML files and then
//! resolved into core types by the loader.

use serde::Deserialize;
use std::collections::BTreeMap;

// ===========================================================================
// Tiles
// ===========================================================================

/// One tile data record shared by every tile listed in `tiles`.
#[derive(Debug, Clone, Deserialize)]
pub struct TileDataDef {
    pub tiles: Vec<String>,
    pub data1: f32,
}

// ===========================================================================
// Prefabs
// ===========================================================================

/// A placeable prefab definition.
#[derive(Debug, Clone, Deserialize)]
pub struct PrefabData {
    pub name: String,
    pub width: u32,
    pub depth: u32,
}

// ===========================================================================
// Map
// ===========================================================================

/// An authored map drawn as rows of legend characters.
///
/// Row `i` covers cells `y = origin.1 + i`; column `j` covers
/// `x = origin.0 + j`. The map's extent (widest row by row count) becomes the
/// grid bounds unless the build config sets its own.
#[derive(Debug, Clone, Deserialize)]
pub struct MapData {
    #[serde(default)]
    pub origin: (i32, i32),
    pub rows: Vec<String>,
    pub legend: BTreeMap<char, LegendEntry>,
}

/// What a legend character puts in its cell.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegendEntry {
    /// Tile name for the data map. `None` leaves the cell empty.
    #[serde(default)]
    pub tile: Option<String>,
    /// Whether the cell starts out unplaceable.
    #[serde(default)]
    pub blocked: bool,
}
