//! Timed spawning
//!
//! The spawn timer runs on virtual time, independent of the frame cadence.
//! Every firing produces `spawn_rate` shapes on the spawn row.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::{GeometryType, create_shape};
use super::state::{ShapeId, SimulationState};
use crate::config::Viewport;
use crate::consts::{MAX_SPAWN_CATCH_UP, SPAWN_INTERVAL_MS};
use crate::counters::CounterPublisher;

/// Fixed-interval timer driven by elapsed virtual milliseconds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnTimer {
    interval_ms: u64,
    /// Time accumulated toward the next firing
    accumulator_ms: u64,
    running: bool,
}

impl Default for SpawnTimer {
    fn default() -> Self {
        Self::new(SPAWN_INTERVAL_MS)
    }
}

impl SpawnTimer {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            accumulator_ms: 0,
            running: true,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Advance by `elapsed_ms` and return how many times the timer fired
    pub fn advance(&mut self, elapsed_ms: u64) -> u32 {
        if !self.running {
            return 0;
        }
        self.accumulator_ms = self.accumulator_ms.saturating_add(elapsed_ms);
        let due = self.accumulator_ms / self.interval_ms;
        self.accumulator_ms %= self.interval_ms;

        // Cap catch-up after a long stall; the backlog beyond it is dropped
        let firings = due.min(u64::from(MAX_SPAWN_CATCH_UP));
        if due > firings {
            log::warn!("Spawn timer fell {due} intervals behind, firing {firings}");
        }
        firings as u32
    }

    /// Cancel the timer; later calls to `advance` never fire
    pub fn stop(&mut self) {
        if self.running {
            log::info!("Spawn timer stopped");
        }
        self.running = false;
        self.accumulator_ms = 0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

/// Run one spawn firing: create `spawn_rate` random shapes on the spawn row.
///
/// A non-positive spawn rate produces nothing.
pub fn spawn_tick(
    state: &mut SimulationState,
    rng: &mut impl Rng,
    viewport: &Viewport,
    publisher: &mut impl CounterPublisher,
) -> Vec<ShapeId> {
    let count = state.spawn_rate().max(0) as usize;
    let mut spawned = Vec::with_capacity(count);

    for _ in 0..count {
        // Whole-pixel column in [0, width)
        let x = (rng.random::<f32>() * viewport.width).floor();
        let position = Vec2::new(x.min(viewport.width - 1.0).max(0.0), viewport.spawn_row());
        let geometry_type = GeometryType::random(rng);

        let id = state.allocate_id();
        if state.add_shape(create_shape(id, position, geometry_type, rng), publisher) {
            spawned.push(id);
        }
    }

    if !spawned.is_empty() {
        log::debug!("Spawn tick added {} shape(s), {} live", spawned.len(), state.len());
    }
    spawned
}
