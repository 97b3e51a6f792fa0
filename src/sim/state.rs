//! Simulation state and core types
//!
//! One `SimulationState` exists per session. It only does bookkeeping;
//! scheduling and input live in the sibling modules.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{GeometryType, Rgb};
use crate::consts::*;
use crate::counters::{CounterKind, CounterPublisher};

/// Stable shape identity, monotonic per session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShapeId(pub u32);

impl std::fmt::Display for ShapeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A falling shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: ShapeId,
    pub geometry_type: GeometryType,
    /// Center of the bounding box (y grows downward)
    pub position: Vec2,
    pub fill_color: Rgb,
    pub border_color: Rgb,
    pub width: u32,
    pub height: u32,
}

impl Shape {
    /// Footprint used by the area counter
    pub fn footprint(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Whether `point` lies inside the bounding box
    pub fn contains_point(&self, point: Vec2) -> bool {
        let half = Vec2::new(self.width as f32, self.height as f32) / 2.0;
        let d = (point - self.position).abs();
        d.x <= half.x && d.y <= half.y
    }
}

/// Behavior of `remove_shape` when the requested shape is not present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RemovalMode {
    /// A miss is a no-op
    #[default]
    Strict,
    /// A miss removes the most recently spawned shape instead
    Legacy,
}

/// Result of a removal request
#[derive(Debug, Clone, PartialEq)]
pub enum RemoveOutcome {
    Removed(Shape),
    /// Target absent; nothing changed
    Missed,
    /// Target absent; the last shape was removed in its place (legacy mode)
    LegacyFallback(Shape),
}

impl RemoveOutcome {
    pub fn removed(&self) -> Option<&Shape> {
        match self {
            RemoveOutcome::Removed(shape) | RemoveOutcome::LegacyFallback(shape) => Some(shape),
            RemoveOutcome::Missed => None,
        }
    }
}

/// Live shapes and the user-adjustable scalars
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationState {
    /// Keyed by id; ids are monotonic so key order is spawn order
    shapes: BTreeMap<ShapeId, Shape>,
    gravity: i32,
    spawn_rate: i32,
    occupied_area: u64,
    removal_mode: RemovalMode,
    next_id: u32,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new(DEFAULT_GRAVITY, DEFAULT_SPAWN_RATE, RemovalMode::Strict)
    }
}

impl SimulationState {
    pub fn new(gravity: i32, spawn_rate: i32, removal_mode: RemovalMode) -> Self {
        Self {
            shapes: BTreeMap::new(),
            gravity,
            spawn_rate,
            occupied_area: 0,
            removal_mode,
            next_id: 1,
        }
    }

    /// Allocate a new shape ID.
    ///
    /// Once the id space is exhausted this keeps returning `u32::MAX`, which
    /// `add_shape` then rejects as a duplicate.
    pub fn allocate_id(&mut self) -> ShapeId {
        let id = ShapeId(self.next_id);
        match self.next_id.checked_add(1) {
            Some(next) => self.next_id = next,
            None => log::warn!("Shape id space exhausted at {id}"),
        }
        id
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.shapes.contains_key(&id)
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    /// Shapes in spawn order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Shape> {
        self.shapes.values()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Shape> {
        self.shapes.values_mut()
    }

    pub fn gravity(&self) -> i32 {
        self.gravity
    }

    pub fn spawn_rate(&self) -> i32 {
        self.spawn_rate
    }

    pub fn occupied_area(&self) -> u64 {
        self.occupied_area
    }

    pub fn removal_mode(&self) -> RemovalMode {
        self.removal_mode
    }

    /// Insert a shape and refresh the shape count and area counters.
    ///
    /// The area is the new shape's footprint times the new shape count. This
    /// is not the sum of all footprints; displays depend on the exact value.
    ///
    /// Returns `false` and changes nothing if a shape with the same id is
    /// already present.
    pub fn add_shape(&mut self, shape: Shape, publisher: &mut impl CounterPublisher) -> bool {
        if self.shapes.contains_key(&shape.id) {
            log::warn!("Rejected duplicate shape {}", shape.id);
            return false;
        }
        // Keep ids monotonic even for shapes built outside allocate_id
        self.next_id = self.next_id.max(shape.id.0.saturating_add(1));

        let footprint = shape.footprint();
        log::trace!("Added {} {} at {}", shape.geometry_type.as_str(), shape.id, shape.position);
        self.shapes.insert(shape.id, shape);

        self.occupied_area = footprint * self.shapes.len() as u64;
        publisher.publish(CounterKind::ShapeCount, self.shapes.len() as i64);
        publisher.publish(CounterKind::Area, self.occupied_area as i64);
        true
    }

    /// Remove a shape by identity.
    pub fn remove_shape(
        &mut self,
        id: ShapeId,
        publisher: &mut impl CounterPublisher,
    ) -> RemoveOutcome {
        let outcome = match self.shapes.remove(&id) {
            Some(shape) => RemoveOutcome::Removed(shape),
            None => match self.removal_mode {
                RemovalMode::Strict => {
                    log::warn!("Remove miss: shape {id} is not present");
                    return RemoveOutcome::Missed;
                }
                RemovalMode::Legacy => match self.shapes.pop_last() {
                    Some((_, shape)) => {
                        log::warn!("Remove miss: shape {id} is not present, removed {} instead", shape.id);
                        RemoveOutcome::LegacyFallback(shape)
                    }
                    None => {
                        log::warn!("Remove miss: shape {id} is not present and no shapes remain");
                        return RemoveOutcome::Missed;
                    }
                },
            },
        };

        publisher.publish(CounterKind::ShapeCount, self.shapes.len() as i64);
        if self.shapes.is_empty() && self.occupied_area != 0 {
            self.occupied_area = 0;
            publisher.publish(CounterKind::Area, 0);
        }
        outcome
    }

    pub fn set_gravity(&mut self, delta: i32, publisher: &mut impl CounterPublisher) {
        self.gravity = self.gravity.saturating_add(delta);
        publisher.publish(CounterKind::Gravity, i64::from(self.gravity));
    }

    pub fn set_spawn_rate(&mut self, delta: i32, publisher: &mut impl CounterPublisher) {
        self.spawn_rate = self.spawn_rate.saturating_add(delta);
        publisher.publish(CounterKind::SpawnRate, i64::from(self.spawn_rate));
    }

    /// Push every counter, e.g. to initialize freshly attached displays
    pub fn publish_all(&self, publisher: &mut impl CounterPublisher) {
        publisher.publish(CounterKind::ShapeCount, self.shapes.len() as i64);
        publisher.publish(CounterKind::Gravity, i64::from(self.gravity));
        publisher.publish(CounterKind::SpawnRate, i64::from(self.spawn_rate));
        publisher.publish(CounterKind::Area, self.occupied_area as i64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counters::{CounterBoard, NullPublisher};
    use crate::sim::geometry::create_shape;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn spawn(state: &mut SimulationState, kind: GeometryType, board: &mut CounterBoard) -> ShapeId {
        let mut rng = Pcg32::seed_from_u64(3);
        let id = state.allocate_id();
        state.add_shape(create_shape(id, Vec2::ZERO, kind, &mut rng), board);
        id
    }

    /// Identical geometry and colors for every shape, only ids differ
    fn twin(id: ShapeId) -> Shape {
        Shape {
            id,
            geometry_type: GeometryType::Rect,
            position: Vec2::new(5.0, 5.0),
            fill_color: Rgb(0x00FF00),
            border_color: Rgb(0x000000),
            width: 100,
            height: 100,
        }
    }

    #[test]
    fn test_defaults() {
        let state = SimulationState::default();
        assert_eq!(state.gravity(), 1);
        assert_eq!(state.spawn_rate(), 1);
        assert_eq!(state.occupied_area(), 0);
        assert!(state.is_empty());
    }

    #[test]
    fn test_area_uses_last_footprint_times_count() {
        let mut state = SimulationState::default();
        let mut board = CounterBoard::new();

        spawn(&mut state, GeometryType::Triangle, &mut board);
        assert_eq!(state.occupied_area(), 160 * 80);

        spawn(&mut state, GeometryType::Rect, &mut board);
        assert_eq!(state.occupied_area(), 100 * 100 * 2);

        spawn(&mut state, GeometryType::Circle, &mut board);
        assert_eq!(state.occupied_area(), 120 * 120 * 3);
        assert_eq!(board.get(CounterKind::Area), Some(120 * 120 * 3));
        assert_eq!(board.get(CounterKind::ShapeCount), Some(3));
    }

    #[test]
    fn test_area_resets_when_emptied() {
        let mut state = SimulationState::default();
        let mut board = CounterBoard::new();
        let a = spawn(&mut state, GeometryType::Rect, &mut board);
        let b = spawn(&mut state, GeometryType::Rect, &mut board);

        state.remove_shape(a, &mut board);
        // Not recomputed on ordinary removals
        assert_eq!(state.occupied_area(), 20000);

        state.remove_shape(b, &mut board);
        assert_eq!(state.occupied_area(), 0);
        assert_eq!(board.get(CounterKind::Area), Some(0));
        assert_eq!(board.get(CounterKind::ShapeCount), Some(0));
    }

    #[test]
    fn test_iteration_is_spawn_order() {
        let mut state = SimulationState::default();
        let mut board = CounterBoard::new();
        let ids: Vec<_> = (0..5)
            .map(|_| spawn(&mut state, GeometryType::Circle, &mut board))
            .collect();
        let seen: Vec<_> = state.iter().map(|s| s.id).collect();
        assert_eq!(seen, ids);
    }

    #[test]
    fn test_strict_miss_is_noop() {
        let mut state = SimulationState::default();
        let mut board = CounterBoard::new();
        let a = spawn(&mut state, GeometryType::Rect, &mut board);
        let b = spawn(&mut state, GeometryType::Rect, &mut board);

        assert!(matches!(state.remove_shape(a, &mut board), RemoveOutcome::Removed(_)));
        board.clear_history();

        assert_eq!(state.remove_shape(a, &mut board), RemoveOutcome::Missed);
        assert_eq!(state.len(), 1);
        assert!(state.contains(b));
        assert!(board.history().is_empty());
    }

    #[test]
    fn test_legacy_miss_removes_last() {
        let mut state = SimulationState::new(1, 1, RemovalMode::Legacy);
        let mut board = CounterBoard::new();
        let a = spawn(&mut state, GeometryType::Rect, &mut board);
        let b = spawn(&mut state, GeometryType::Rect, &mut board);
        let c = spawn(&mut state, GeometryType::Rect, &mut board);
        state.remove_shape(a, &mut board);

        match state.remove_shape(a, &mut board) {
            RemoveOutcome::LegacyFallback(shape) => assert_eq!(shape.id, c),
            other => panic!("expected legacy fallback, got {other:?}"),
        }
        assert_eq!(state.len(), 1);
        assert!(state.contains(b));
        assert_eq!(board.get(CounterKind::ShapeCount), Some(1));
    }

    #[test]
    fn test_legacy_miss_on_empty_is_noop() {
        let mut state = SimulationState::new(1, 1, RemovalMode::Legacy);
        assert_eq!(state.remove_shape(ShapeId(9), &mut NullPublisher), RemoveOutcome::Missed);
    }

    #[test]
    fn test_scalars_go_negative() {
        let mut state = SimulationState::default();
        let mut board = CounterBoard::new();
        state.set_spawn_rate(-1, &mut board);
        state.set_spawn_rate(-1, &mut board);
        assert_eq!(state.spawn_rate(), -1);
        assert_eq!(board.get(CounterKind::SpawnRate), Some(-1));

        state.set_gravity(-3, &mut board);
        assert_eq!(state.gravity(), -2);
        assert_eq!(board.get(CounterKind::Gravity), Some(-2));
    }

    #[test]
    fn test_publish_all() {
        let state = SimulationState::default();
        let mut board = CounterBoard::new();
        state.publish_all(&mut board);
        for kind in CounterKind::ALL {
            assert!(board.get(kind).is_some());
        }
        assert_eq!(board.get(CounterKind::Gravity), Some(1));
    }

    #[test]
    fn test_external_ids_do_not_collide() {
        let mut state = SimulationState::default();
        state.add_shape(twin(ShapeId(10)), &mut NullPublisher);
        assert_eq!(state.allocate_id(), ShapeId(11));
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let mut state = SimulationState::default();
        let mut board = CounterBoard::new();
        assert!(state.add_shape(twin(ShapeId(1)), &mut board));
        let area = state.occupied_area();
        board.clear_history();

        let mut moved = twin(ShapeId(1));
        moved.position = Vec2::new(99.0, 99.0);
        assert!(!state.add_shape(moved, &mut board));

        assert_eq!(state.len(), 1);
        assert_eq!(state.occupied_area(), area);
        assert_eq!(state.get(ShapeId(1)).map(|s| s.position), Some(Vec2::new(5.0, 5.0)));
        assert!(board.history().is_empty());
    }

    #[test]
    fn test_max_id_does_not_overflow() {
        let mut state = SimulationState::default();
        assert!(state.add_shape(twin(ShapeId(u32::MAX)), &mut NullPublisher));

        // Id space is exhausted; allocation saturates and the add is refused
        let id = state.allocate_id();
        assert_eq!(id, ShapeId(u32::MAX));
        assert_eq!(state.allocate_id(), ShapeId(u32::MAX));
        assert!(!state.add_shape(twin(id), &mut NullPublisher));
        assert_eq!(state.len(), 1);
    }

    proptest! {
        #[test]
        fn prop_add_grows_by_one(count in 1usize..60) {
            let mut state = SimulationState::default();
            let mut board = CounterBoard::new();
            for n in 1..=count {
                let id = state.allocate_id();
                state.add_shape(twin(id), &mut board);
                prop_assert_eq!(state.len(), n);
                prop_assert_eq!(board.get(CounterKind::ShapeCount), Some(n as i64));
            }
        }

        #[test]
        fn prop_remove_by_identity_among_twins(count in 1usize..30, pick in 0usize..30) {
            let mut state = SimulationState::default();
            let ids: Vec<_> = (0..count)
                .map(|_| {
                    let id = state.allocate_id();
                    state.add_shape(twin(id), &mut NullPublisher);
                    id
                })
                .collect();
            let target = ids[pick % count];

            let outcome = state.remove_shape(target, &mut NullPublisher);
            prop_assert_eq!(outcome.removed().map(|s| s.id), Some(target));
            prop_assert_eq!(state.len(), count - 1);
            prop_assert!(!state.contains(target));
            for id in ids.iter().filter(|id| **id != target) {
                prop_assert!(state.contains(*id));
            }
        }

        #[test]
        fn prop_gravity_round_trip(start in -1000i32..1000) {
            let mut state = SimulationState::new(start, 1, RemovalMode::Strict);
            state.set_gravity(1, &mut NullPublisher);
            state.set_gravity(-1, &mut NullPublisher);
            prop_assert_eq!(state.gravity(), start);
        }
    }
}
