//! Deterministic simulation module
//!
//! All shape logic lives here. This module must be pure and deterministic:
//! - Injected, seeded RNG only
//! - Stable iteration order (by shape ID, which is spawn order)
//! - No rendering, timer or platform dependencies

pub mod geometry;
pub mod interaction;
pub mod physics;
pub mod spawn;
pub mod state;

pub use geometry::{GeometryType, Rgb, create_shape};
pub use interaction::{ClickEvent, ClickOutcome, ClickTarget, handle_click};
pub use physics::{apply_gravity, evict_out_of_bounds, physics_tick};
pub use spawn::{SpawnTimer, spawn_tick};
pub use state::{RemovalMode, RemoveOutcome, Shape, ShapeId, SimulationState};
