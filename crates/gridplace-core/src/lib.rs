//! Gridplace Core -- shared types for grid-based building placement.
//!
//! This crate holds the vocabulary every other gridplace crate speaks:
//! grid cells and footprints, the world/grid coordinate boundary owned by the
//! rendering host, tile metadata, and the prefab catalog.
//!
//! # Key Types
//!
//! - [`grid::Cell`] -- Integer (x, y) coordinate in grid space.
//! - [`grid::Footprint`] -- Width/depth of a placeable object in cells.
//! - [`grid::Rotation`] -- One of four discrete orientations.
//! - [`layout::GridLayout`] -- World <-> cell conversion supplied by the host.
//! - [`tile::TileDataRegistry`] -- Immutable tile identity -> metadata map.
//! - [`tile::TileLayer`] -- Sparse cell -> tile identity map (the data map).
//! - [`prefab::PrefabCatalog`] -- Placeable prefab definitions.

pub mod grid;
pub mod id;
pub mod layout;
pub mod prefab;
pub mod tile;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
