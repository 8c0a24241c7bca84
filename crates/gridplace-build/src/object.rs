use gridplace_core::grid::{Cell, Footprint, Rotation};
use gridplace_core::id::PrefabId;
use gridplace_core::layout::WorldPoint;
use serde::{Deserialize, Serialize};

/// Where an object is in its placement lifecycle.
///
/// Discarded objects are removed from the controller's store rather than
/// kept with a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementStatus {
    /// Being positioned; follows the pointer and may rotate.
    Pending,
    /// Committed to the grid. Never changes again.
    Placed,
}

/// An object being placed, or already placed, on the grid.
///
/// Mutation is crate-private and only allowed while pending; hosts read it
/// through the accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceableObject {
    prefab: PrefabId,
    base_footprint: Footprint,
    rotation: Rotation,
    anchor: Cell,
    position: WorldPoint,
    status: PlacementStatus,
}

impl PlaceableObject {
    pub(crate) fn pending(
        prefab: PrefabId,
        footprint: Footprint,
        anchor: Cell,
        position: WorldPoint,
    ) -> Self {
        Self {
            prefab,
            base_footprint: footprint,
            rotation: Rotation::None,
            anchor,
            position,
            status: PlacementStatus::Pending,
        }
    }

    pub fn prefab(&self) -> PrefabId {
        self.prefab
    }

    /// Footprint in the prefab's unrotated orientation.
    pub fn base_footprint(&self) -> Footprint {
        self.base_footprint
    }

    /// Footprint after rotation; this is what validation and commit use.
    pub fn footprint(&self) -> Footprint {
        self.base_footprint.rotated(self.rotation)
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// The cell the footprint extends from (toward +x and +y).
    pub fn anchor(&self) -> Cell {
        self.anchor
    }

    /// Snapped world position (center of the anchor cell).
    pub fn position(&self) -> WorldPoint {
        self.position
    }

    pub fn status(&self) -> PlacementStatus {
        self.status
    }

    pub fn is_placed(&self) -> bool {
        self.status == PlacementStatus::Placed
    }

    /// Returns true if the anchor changed.
    pub(crate) fn move_to(&mut self, anchor: Cell, position: WorldPoint) -> bool {
        debug_assert_eq!(self.status, PlacementStatus::Pending);
        let moved = self.anchor != anchor;
        self.anchor = anchor;
        self.position = position;
        moved
    }

    pub(crate) fn rotate(&mut self) -> Rotation {
        debug_assert_eq!(self.status, PlacementStatus::Pending);
        self.rotation = self.rotation.rotate_cw();
        self.rotation
    }

    pub(crate) fn place(&mut self) {
        self.status = PlacementStatus::Placed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridplace_core::test_utils::*;

    fn wall() -> PlaceableObject {
        PlaceableObject::pending(long_wall(), fp(2, 1), cell(0, 0), center_of(0, 0))
    }

    #[test]
    fn new_object_is_pending_and_unrotated() {
        let obj = wall();
        assert_eq!(obj.status(), PlacementStatus::Pending);
        assert_eq!(obj.rotation(), Rotation::None);
        assert_eq!(obj.footprint(), fp(2, 1));
        assert!(!obj.is_placed());
    }

    #[test]
    fn rotate_swaps_effective_footprint() {
        let mut obj = wall();
        assert_eq!(obj.rotate(), Rotation::Cw90);
        assert_eq!(obj.footprint(), fp(1, 2));
        assert_eq!(obj.base_footprint(), fp(2, 1));
    }

    #[test]
    fn four_rotations_restore_base_footprint() {
        let mut obj = wall();
        for _ in 0..4 {
            obj.rotate();
        }
        assert_eq!(obj.rotation(), Rotation::None);
        assert_eq!(obj.footprint(), fp(2, 1));
    }

    #[test]
    fn move_reports_anchor_change() {
        let mut obj = wall();
        assert!(!obj.move_to(cell(0, 0), center_of(0, 0)));
        assert!(obj.move_to(cell(3, 1), center_of(3, 1)));
        assert_eq!(obj.anchor(), cell(3, 1));
        assert_eq!(obj.position(), center_of(3, 1));
    }
}
