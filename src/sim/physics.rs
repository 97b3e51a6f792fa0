//! Per-frame physics
//!
//! Movement for every shape happens before any eviction check in the same
//! frame. Velocity is constant per frame; elapsed wall time is ignored.

use super::state::{ShapeId, SimulationState};
use crate::config::Viewport;
use crate::consts::GRAVITY_VELOCITY_FACTOR;
use crate::counters::CounterPublisher;

/// Advance every shape by one frame of gravity
pub fn apply_gravity(state: &mut SimulationState) {
    let dy = GRAVITY_VELOCITY_FACTOR * state.gravity() as f32;
    for shape in state.iter_mut() {
        shape.position.y += dy;
    }
}

/// Remove shapes below the eviction line, returning their ids in spawn order
pub fn evict_out_of_bounds(
    state: &mut SimulationState,
    viewport: &Viewport,
    publisher: &mut impl CounterPublisher,
) -> Vec<ShapeId> {
    let line = viewport.eviction_line();
    let evicted: Vec<ShapeId> = state
        .iter()
        .filter(|s| s.position.y > line)
        .map(|s| s.id)
        .collect();

    for id in &evicted {
        state.remove_shape(*id, publisher);
    }
    if !evicted.is_empty() {
        log::debug!("Evicted {} shape(s), {} live", evicted.len(), state.len());
    }
    evicted
}

/// One frame: movement, then eviction
pub fn physics_tick(
    state: &mut SimulationState,
    viewport: &Viewport,
    publisher: &mut impl CounterPublisher,
) -> Vec<ShapeId> {
    apply_gravity(state);
    evict_out_of_bounds(state, viewport, publisher)
}
