//! Placement state machine for grid building.
//!
//! A [`PlacementController`] owns the [`OccupancyGrid`](gridplace_spatial::OccupancyGrid)
//! and holds at most one pending [`PlaceableObject`]. The host feeds it
//! discrete inputs and pointer positions; it answers with outcomes and
//! buffered [`PlacementEvent`]s the renderer can mirror.
//!
//! ```text
//! Idle --request--> Pending --commit (legal)--> Placed
//!                     |  ^
//!                     |  +-- pointer moved / rotate
//!                     +--cancel / commit (illegal)--> Discarded
//! ```

pub mod config;
pub mod controller;
pub mod event;
pub mod object;

pub use config::BuildConfig;
pub use controller::{
    CommitOutcome, ControllerState, InputResponse, PlacementController, PlacementError,
    PlacementInput,
};
pub use event::{DiscardReason, PlacementEvent};
pub use object::{PlaceableObject, PlacementStatus};
