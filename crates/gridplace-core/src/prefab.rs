use crate::grid::Footprint;
use crate::id::PrefabId;
use std::collections::HashMap;

/// A placeable prefab: what the player picks before dragging it onto the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefabDef {
    pub name: String,
    /// Footprint in the prefab's unrotated orientation.
    pub footprint: Footprint,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate prefab name '{0}'")]
    DuplicateName(String),
    #[error("prefab '{name}' has an empty footprint ({width}x{depth})")]
    EmptyFootprint { name: String, width: u32, depth: u32 },
    #[error("prefab '{name}' footprint {width}x{depth} exceeds the grid's addressable extent")]
    OversizedFootprint { name: String, width: u32, depth: u32 },
}

/// Catalog of prefabs available for placement.
#[derive(Debug, Clone, Default)]
pub struct PrefabCatalog {
    prefabs: Vec<PrefabDef>,
    name_to_id: HashMap<String, PrefabId>,
}

impl PrefabCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a prefab. Returns its ID.
    pub fn register(&mut self, name: &str, footprint: Footprint) -> Result<PrefabId, CatalogError> {
        if footprint.is_empty() {
            return Err(CatalogError::EmptyFootprint {
                name: name.to_string(),
                width: footprint.width,
                depth: footprint.depth,
            });
        }
        if footprint.width > Footprint::MAX_EXTENT || footprint.depth > Footprint::MAX_EXTENT {
            return Err(CatalogError::OversizedFootprint {
                name: name.to_string(),
                width: footprint.width,
                depth: footprint.depth,
            });
        }
        if self.name_to_id.contains_key(name) {
            return Err(CatalogError::DuplicateName(name.to_string()));
        }
        let id = PrefabId(self.prefabs.len() as u32);
        self.prefabs.push(PrefabDef {
            name: name.to_string(),
            footprint,
        });
        self.name_to_id.insert(name.to_string(), id);
        Ok(id)
    }

    pub fn get(&self, id: PrefabId) -> Option<&PrefabDef> {
        self.prefabs.get(id.0 as usize)
    }

    pub fn id(&self, name: &str) -> Option<PrefabId> {
        self.name_to_id.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.prefabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefabs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PrefabId, &PrefabDef)> {
        self.prefabs
            .iter()
            .enumerate()
            .map(|(i, def)| (PrefabId(i as u32), def))
    }
}
