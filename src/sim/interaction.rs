//! Pointer interaction
//!
//! Clicking empty background spawns a shape under the pointer; clicking a
//! shape removes it.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::{GeometryType, create_shape};
use super::state::{RemoveOutcome, ShapeId, SimulationState};
use crate::counters::CounterPublisher;

/// What the rendering host reports as struck by a click
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClickTarget {
    /// The full-viewport background plane
    Background,
    Shape(ShapeId),
}

/// A hit-tested pointer click in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClickEvent {
    pub position: Vec2,
    pub target: ClickTarget,
    /// Set once handled so the host does not dispatch it again
    #[serde(skip)]
    pub propagation_stopped: bool,
}

impl ClickEvent {
    pub fn new(position: Vec2, target: ClickTarget) -> Self {
        Self {
            position,
            target,
            propagation_stopped: false,
        }
    }

    pub fn on_background(x: f32, y: f32) -> Self {
        Self::new(Vec2::new(x, y), ClickTarget::Background)
    }

    pub fn on_shape(x: f32, y: f32, id: ShapeId) -> Self {
        Self::new(Vec2::new(x, y), ClickTarget::Shape(id))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    Spawned(ShapeId),
    Removed(RemoveOutcome),
    /// Event was already handled, or the spawned shape was rejected
    Ignored,
}

/// Apply one click to the state and stop its propagation.
pub fn handle_click(
    state: &mut SimulationState,
    rng: &mut impl Rng,
    event: &mut ClickEvent,
    publisher: &mut impl CounterPublisher,
) -> ClickOutcome {
    if event.propagation_stopped {
        return ClickOutcome::Ignored;
    }
    event.propagation_stopped = true;

    match event.target {
        ClickTarget::Background => {
            let id = state.allocate_id();
            let geometry_type = GeometryType::random(rng);
            if !state.add_shape(create_shape(id, event.position, geometry_type, rng), publisher) {
                return ClickOutcome::Ignored;
            }
            log::debug!("Click at {} spawned {}", event.position, id);
            ClickOutcome::Spawned(id)
        }
        ClickTarget::Shape(id) => {
            let outcome = state.remove_shape(id, publisher);
            log::debug!("Click removed {id}");
            ClickOutcome::Removed(outcome)
        }
    }
}
