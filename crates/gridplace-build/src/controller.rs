//! The placement controller: single pending slot, drag, rotate, validate and
//! commit.
//!
//! The controller owns its occupancy grid, so validation and commit happen
//! inside one `&mut self` call and nothing can mutate the grid between them.

use crate::config::BuildConfig;
use crate::event::{DiscardReason, PlacementEvent};
use crate::object::PlaceableObject;
use gridplace_core::grid::{Cell, Rotation};
use gridplace_core::id::{ObjectId, PrefabId};
use gridplace_core::layout::{GridLayout, PointerSource, RectGridLayout, WorldPoint};
use gridplace_core::prefab::PrefabCatalog;
use gridplace_spatial::{OccupancyGrid, PlacementRejection, PlacementValidator, SpatialError};
use slotmap::SlotMap;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Errors from controller operations. Apart from `Spatial`, which follows a
/// discard, none of them change state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    #[error("an object is already pending placement ({pending:?})")]
    AlreadyPending { pending: ObjectId },
    #[error("unknown prefab {0:?}")]
    UnknownPrefab(PrefabId),
    #[error("no object is pending placement")]
    NothingPending,
    #[error("occupancy commit failed: {0}")]
    Spatial(#[from] SpatialError),
}

/// Result of a commit attempt on the pending object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The object was placed and its footprint committed.
    Placed(ObjectId),
    /// The position was illegal; the object was discarded.
    Discarded(PlacementRejection),
}

/// Discrete inputs from the host's input layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlacementInput {
    RequestPlacement(PrefabId),
    PointerMoved(WorldPoint),
    Rotate,
    Cancel,
    Commit,
}

/// What [`PlacementController::handle`] did with an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResponse {
    Spawned(ObjectId),
    Moved(Cell),
    Rotated(Rotation),
    Cancelled,
    Committed(CommitOutcome),
}

/// Coarse controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    Pending(ObjectId),
}

// ---------------------------------------------------------------------------
// PlacementController
// ---------------------------------------------------------------------------

/// Drives placement of one object at a time onto an [`OccupancyGrid`].
#[derive(Debug)]
pub struct PlacementController<L> {
    layout: L,
    grid: OccupancyGrid,
    validator: PlacementValidator,
    catalog: PrefabCatalog,
    objects: SlotMap<ObjectId, PlaceableObject>,
    pending: Option<ObjectId>,
    spawn_point: WorldPoint,
    events: Vec<PlacementEvent>,
}

impl PlacementController<RectGridLayout> {
    /// Controller using the config's own layout, an empty grid built from its
    /// bounds, and its validation margin.
    pub fn from_config(config: &BuildConfig, catalog: PrefabCatalog) -> Self {
        Self::new(
            config.layout,
            config.occupancy_grid(),
            config.validator(),
            catalog,
        )
        .with_spawn_point(config.spawn_point)
    }
}

impl<L: GridLayout> PlacementController<L> {
    pub fn new(
        layout: L,
        grid: OccupancyGrid,
        validator: PlacementValidator,
        catalog: PrefabCatalog,
    ) -> Self {
        Self {
            layout,
            grid,
            validator,
            catalog,
            objects: SlotMap::with_key(),
            pending: None,
            spawn_point: WorldPoint::ZERO,
            events: Vec::new(),
        }
    }

    /// Set where new objects appear (snapped to its cell center).
    pub fn with_spawn_point(mut self, spawn_point: WorldPoint) -> Self {
        self.spawn_point = spawn_point;
        self
    }

    // -- Transitions --

    /// Begin placing a prefab. Fails without any state change if another
    /// object is already pending or the prefab is unknown.
    pub fn request_placement(&mut self, prefab: PrefabId) -> Result<ObjectId, PlacementError> {
        if let Some(pending) = self.pending {
            tracing::debug!(
                prefab = prefab.0,
                ?pending,
                "placement request rejected: already placing"
            );
            self.events
                .push(PlacementEvent::RequestRejected { prefab, pending });
            return Err(PlacementError::AlreadyPending { pending });
        }
        let def = self
            .catalog
            .get(prefab)
            .ok_or(PlacementError::UnknownPrefab(prefab))?;

        let anchor = self.layout.world_to_cell(self.spawn_point);
        let position = self.layout.cell_center_world(anchor);
        let object = PlaceableObject::pending(prefab, def.footprint, anchor, position);
        let id = self.objects.insert(object);
        self.pending = Some(id);

        tracing::debug!(prefab = %def.name, x = anchor.x, y = anchor.y, "placement started");
        self.events.push(PlacementEvent::Spawned {
            object: id,
            prefab,
            anchor,
        });
        Ok(id)
    }

    /// Snap the pending object to the cell under `pos`. Returns its anchor.
    pub fn pointer_moved(&mut self, pos: WorldPoint) -> Result<Cell, PlacementError> {
        let id = self.pending.ok_or(PlacementError::NothingPending)?;
        let anchor = self.layout.world_to_cell(pos);
        let position = self.layout.cell_center_world(anchor);
        let object = self
            .objects
            .get_mut(id)
            .ok_or(PlacementError::NothingPending)?;
        if object.move_to(anchor, position) {
            self.events.push(PlacementEvent::Moved { object: id, anchor });
        }
        Ok(anchor)
    }

    /// Per-frame drag: follow the host pointer. A pointer that hits nothing
    /// reads as the world origin. Does nothing while idle.
    pub fn update<P: PointerSource + ?Sized>(&mut self, pointer: &P) -> Option<Cell> {
        if self.pending.is_none() {
            return None;
        }
        let pos = pointer.pointer_world_position().unwrap_or(WorldPoint::ZERO);
        self.pointer_moved(pos).ok()
    }

    /// Turn the pending object 90 degrees clockwise.
    pub fn rotate(&mut self) -> Result<Rotation, PlacementError> {
        let id = self.pending.ok_or(PlacementError::NothingPending)?;
        let object = self
            .objects
            .get_mut(id)
            .ok_or(PlacementError::NothingPending)?;
        let rotation = object.rotate();
        self.events.push(PlacementEvent::Rotated {
            object: id,
            rotation,
            footprint: object.footprint(),
        });
        Ok(rotation)
    }

    /// Discard the pending object. The grid is untouched.
    pub fn cancel(&mut self) -> Result<(), PlacementError> {
        let id = self.pending.ok_or(PlacementError::NothingPending)?;
        self.discard(id, DiscardReason::Cancelled);
        Ok(())
    }

    /// Validate the pending object and, if legal, commit its footprint and
    /// fix it in place. An illegal position discards the object.
    pub fn commit(&mut self) -> Result<CommitOutcome, PlacementError> {
        let id = self.pending.ok_or(PlacementError::NothingPending)?;
        let (anchor, footprint) = {
            let object = self.objects.get(id).ok_or(PlacementError::NothingPending)?;
            (object.anchor(), object.footprint())
        };

        if let Err(rejection) = self.validator.check(&self.grid, anchor, footprint) {
            tracing::debug!(
                x = anchor.x,
                y = anchor.y,
                %rejection,
                "placement rejected"
            );
            self.discard(id, DiscardReason::Illegal(rejection));
            return Ok(CommitOutcome::Discarded(rejection));
        }

        if let Err(err) = self.grid.commit_area(anchor, footprint) {
            tracing::warn!(x = anchor.x, y = anchor.y, %err, "validated placement failed to commit");
            self.discard(id, DiscardReason::CommitFailed(err.clone()));
            return Err(err.into());
        }

        if let Some(object) = self.objects.get_mut(id) {
            object.place();
        }
        self.pending = None;
        tracing::info!(
            x = anchor.x,
            y = anchor.y,
            width = footprint.width,
            depth = footprint.depth,
            "object placed"
        );
        self.events.push(PlacementEvent::Placed {
            object: id,
            anchor,
            footprint,
        });
        Ok(CommitOutcome::Placed(id))
    }

    /// Dispatch a discrete input.
    pub fn handle(&mut self, input: PlacementInput) -> Result<InputResponse, PlacementError> {
        match input {
            PlacementInput::RequestPlacement(prefab) => {
                self.request_placement(prefab).map(InputResponse::Spawned)
            }
            PlacementInput::PointerMoved(pos) => self.pointer_moved(pos).map(InputResponse::Moved),
            PlacementInput::Rotate => self.rotate().map(InputResponse::Rotated),
            PlacementInput::Cancel => self.cancel().map(|()| InputResponse::Cancelled),
            PlacementInput::Commit => self.commit().map(InputResponse::Committed),
        }
    }

    fn discard(&mut self, id: ObjectId, reason: DiscardReason) {
        self.objects.remove(id);
        self.pending = None;
        tracing::debug!(?id, ?reason, "pending object discarded");
        self.events
            .push(PlacementEvent::Discarded { object: id, reason });
    }

    // -- Queries --

    pub fn state(&self) -> ControllerState {
        match self.pending {
            Some(id) => ControllerState::Pending(id),
            None => ControllerState::Idle,
        }
    }

    pub fn pending(&self) -> Option<&PlaceableObject> {
        self.pending.and_then(|id| self.objects.get(id))
    }

    pub fn pending_id(&self) -> Option<ObjectId> {
        self.pending
    }

    /// Whether committing now would place the pending object. `None` while
    /// idle. Hosts use this to tint the dragged preview.
    pub fn pending_is_legal(&self) -> Option<bool> {
        let object = self.pending()?;
        Some(
            self.validator
                .can_place(&self.grid, object.anchor(), object.footprint()),
        )
    }

    /// A pending or placed object. Discarded objects are gone.
    pub fn object(&self, id: ObjectId) -> Option<&PlaceableObject> {
        self.objects.get(id)
    }

    pub fn placed_objects(&self) -> impl Iterator<Item = (ObjectId, &PlaceableObject)> {
        self.objects.iter().filter(|(_, o)| o.is_placed())
    }

    pub fn placed_count(&self) -> usize {
        self.placed_objects().count()
    }

    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    pub fn validator(&self) -> &PlacementValidator {
        &self.validator
    }

    pub fn catalog(&self) -> &PrefabCatalog {
        &self.catalog
    }

    pub fn layout(&self) -> &L {
        &self.layout
    }

    /// Take all buffered events, oldest first.
    pub fn drain_events(&mut self) -> Vec<PlacementEvent> {
        std::mem::take(&mut self.events)
    }
}
