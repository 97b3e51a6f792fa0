//! Rendering host adapter
//!
//! Turns shapes into vertex data and pointer positions into click targets.
//! The actual GPU/canvas backend belongs to the host.

pub mod shapes;
pub mod vertex;

use glam::Vec2;

pub use shapes::shape_vertices;
pub use vertex::Vertex;

use crate::sim::{ClickEvent, ClickTarget, SimulationState};

/// Vertices for the whole scene, oldest shape first so newer ones draw on top
pub fn scene_vertices(state: &SimulationState) -> Vec<Vertex> {
    state.iter().flat_map(shape_vertices).collect()
}

/// Topmost shape under `point`, or the background plane
pub fn hit_test(state: &SimulationState, point: Vec2) -> ClickTarget {
    state
        .iter()
        .rev()
        .find(|s| s.contains_point(point))
        .map(|s| ClickTarget::Shape(s.id))
        .unwrap_or(ClickTarget::Background)
}

/// Build a click event for a pointer press at `point`
pub fn pointer_click(state: &SimulationState, point: Vec2) -> ClickEvent {
    ClickEvent::new(point, hit_test(state, point))
}
