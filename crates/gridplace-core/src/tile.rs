//! Tile metadata: the immutable tile -> data registry and the sparse data map
//! that says which tile sits in which cell.

use crate::grid::Cell;
use crate::id::TileId;
use crate::layout::{GridLayout, WorldPoint};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Gameplay metadata attached to a tile kind. Immutable after load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileData {
    pub data1: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TileDataError {
    #[error("tile {0:?} has more than one data entry")]
    DuplicateTile(TileId),
    #[error("duplicate tile name '{0}'")]
    DuplicateName(String),
}

// ---------------------------------------------------------------------------
// TileNames
// ---------------------------------------------------------------------------

/// Dense name <-> [`TileId`] table. Ids are assigned in insertion order.
#[derive(Debug, Clone, Default)]
pub struct TileNames {
    names: Vec<String>,
    name_to_id: HashMap<String, TileId>,
}

impl TileNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new tile name. Fails if the name is already taken.
    pub fn register(&mut self, name: &str) -> Result<TileId, TileDataError> {
        if self.name_to_id.contains_key(name) {
            return Err(TileDataError::DuplicateName(name.to_string()));
        }
        let id = TileId(self.names.len() as u32);
        self.names.push(name.to_string());
        self.name_to_id.insert(name.to_string(), id);
        Ok(id)
    }

    pub fn id(&self, name: &str) -> Option<TileId> {
        self.name_to_id.get(name).copied()
    }

    pub fn name(&self, id: TileId) -> Option<&str> {
        self.names.get(id.0 as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

// ---------------------------------------------------------------------------
// TileDataRegistry
// ---------------------------------------------------------------------------

/// Immutable registry of tile metadata. Frozen after [`load`](Self::load).
#[derive(Debug, Clone, Default)]
pub struct TileDataRegistry {
    data: HashMap<TileId, TileData>,
}

impl TileDataRegistry {
    /// Build the registry from `(tile, data)` pairs.
    ///
    /// A tile appearing twice is rejected; the first repeated tile in entry
    /// order is reported.
    pub fn load<I>(entries: I) -> Result<Self, TileDataError>
    where
        I: IntoIterator<Item = (TileId, TileData)>,
    {
        let mut data = HashMap::new();
        for (tile, tile_data) in entries {
            if data.insert(tile, tile_data).is_some() {
                return Err(TileDataError::DuplicateTile(tile));
            }
        }
        Ok(Self { data })
    }

    /// Metadata for a tile, or `None` if the tile has none registered.
    pub fn lookup(&self, tile: TileId) -> Option<TileData> {
        self.data.get(&tile).copied()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

// ---------------------------------------------------------------------------
// TileLayer / TileMap
// ---------------------------------------------------------------------------

/// Sparse map from cell to tile kind. Cells without an entry are empty
/// (background).
#[derive(Debug, Clone, Default)]
pub struct TileLayer {
    tiles: BTreeMap<Cell, TileId>,
}

impl TileLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tile at a cell, returning the previous one.
    pub fn set(&mut self, cell: Cell, tile: TileId) -> Option<TileId> {
        self.tiles.insert(cell, tile)
    }

    /// Clear a cell, returning the tile that was there.
    pub fn clear(&mut self, cell: Cell) -> Option<TileId> {
        self.tiles.remove(&cell)
    }

    pub fn tile_at(&self, cell: Cell) -> Option<TileId> {
        self.tiles.get(&cell).copied()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Cell, TileId)> + '_ {
        self.tiles.iter().map(|(&c, &t)| (c, t))
    }
}

impl FromIterator<(Cell, TileId)> for TileLayer {
    fn from_iter<I: IntoIterator<Item = (Cell, TileId)>>(iter: I) -> Self {
        Self {
            tiles: iter.into_iter().collect(),
        }
    }
}

/// A data map paired with the registry that describes its tiles. Answers
/// "what is the tile data here" for gameplay objects.
#[derive(Debug, Clone, Default)]
pub struct TileMap {
    pub layer: TileLayer,
    pub registry: TileDataRegistry,
}

impl TileMap {
    pub fn new(layer: TileLayer, registry: TileDataRegistry) -> Self {
        Self { layer, registry }
    }

    /// Tile data for the tile at `cell`. `None` for an empty cell or a tile
    /// without registered data.
    pub fn data_at_cell(&self, cell: Cell) -> Option<TileData> {
        let Some(tile) = self.layer.tile_at(cell) else {
            tracing::debug!(x = cell.x, y = cell.y, "no tile to read data from");
            return None;
        };
        let data = self.registry.lookup(tile);
        if data.is_none() {
            tracing::debug!(x = cell.x, y = cell.y, tile = tile.0, "tile has no registered data");
        }
        data
    }

    /// `data1` of the tile under a world position.
    pub fn data_at_world<L: GridLayout + ?Sized>(&self, layout: &L, pos: WorldPoint) -> Option<f32> {
        self.data_at_cell(layout.world_to_cell(pos)).map(|d| d.data1)
    }
}
