use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    /// Identifies a placeable object (pending or placed) in the object store.
    pub struct ObjectId;
}

/// Identifies a tile kind. Assigned densely by the tile-name table at load
/// time; cheap to copy and compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileId(pub u32);

/// Identifies a prefab in the [`PrefabCatalog`](crate::prefab::PrefabCatalog).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PrefabId(pub u32);
