//! Session orchestration
//!
//! Owns the single `SimulationState` and serializes the three mutation
//! sources (spawn timer, frame driver, user input) through one FIFO queue.
//! Time is virtual: hosts call [`Session::advance`] with elapsed milliseconds
//! and [`Session::frame`] once per rendered frame, so tests never wait on
//! real timers.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::config::SessionConfig;
use crate::counters::CounterPublisher;
use crate::sim::{
    ClickEvent, ClickOutcome, SimulationState, SpawnTimer, handle_click, physics_tick, spawn_tick,
};

/// The four UI buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    GravityDown,
    GravityUp,
    SpawnRateDown,
    SpawnRateUp,
}

/// Unit of work on the session queue
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    SpawnTick,
    FrameTick,
    Click(ClickEvent),
    Control(Control),
}

/// One running simulation: the shared state plus the loops that mutate it.
///
/// All mutation goes through the task queue, so spawn ticks, frames and
/// input never interleave.
pub struct Session<P: CounterPublisher> {
    config: SessionConfig,
    state: SimulationState,
    rng: Pcg32,
    publisher: P,
    queue: VecDeque<Task>,
    spawn_timer: SpawnTimer,
    frames_running: bool,
    clock_ms: u64,
    frame_count: u64,
}

impl<P: CounterPublisher> Session<P> {
    /// Create a session and push initial values to every counter
    pub fn new(config: SessionConfig, mut publisher: P) -> Self {
        let state = SimulationState::new(
            config.initial_gravity,
            config.initial_spawn_rate,
            config.removal_mode,
        );
        state.publish_all(&mut publisher);
        log::info!(
            "Session started: seed={}, viewport={}x{}, removal={:?}",
            config.seed,
            config.viewport.width,
            config.viewport.height,
            config.removal_mode
        );

        Self {
            rng: Pcg32::seed_from_u64(config.seed),
            config,
            state,
            publisher,
            queue: VecDeque::new(),
            spawn_timer: SpawnTimer::default(),
            frames_running: true,
            clock_ms: 0,
            frame_count: 0,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    pub fn publisher_mut(&mut self) -> &mut P {
        &mut self.publisher
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_spawning(&self) -> bool {
        self.spawn_timer.is_running()
    }

    pub fn is_framing(&self) -> bool {
        self.frames_running
    }

    /// Queue a task without running it
    pub fn submit(&mut self, task: Task) {
        self.queue.push_back(task);
    }

    /// Run queued tasks in FIFO order until the queue is empty
    pub fn run_pending(&mut self) {
        while let Some(task) = self.queue.pop_front() {
            self.run_task(task);
        }
    }

    fn run_task(&mut self, task: Task) {
        match task {
            Task::SpawnTick => {
                if !self.spawn_timer.is_running() {
                    return;
                }
                spawn_tick(
                    &mut self.state,
                    &mut self.rng,
                    &self.config.viewport,
                    &mut self.publisher,
                );
            }
            Task::FrameTick => {
                if !self.frames_running {
                    return;
                }
                self.frame_count += 1;
                physics_tick(&mut self.state, &self.config.viewport, &mut self.publisher);
            }
            Task::Click(mut event) => {
                let outcome = self.apply_click(&mut event);
                log::debug!("Queued click at {} -> {:?}", event.position, outcome);
            }
            Task::Control(control) => self.apply_control(control),
        }
    }

    fn apply_click(&mut self, event: &mut ClickEvent) -> ClickOutcome {
        handle_click(&mut self.state, &mut self.rng, event, &mut self.publisher)
    }

    fn apply_control(&mut self, control: Control) {
        let publisher = &mut self.publisher;
        match control {
            Control::GravityDown => self.state.set_gravity(-1, publisher),
            Control::GravityUp => self.state.set_gravity(1, publisher),
            Control::SpawnRateDown => self.state.set_spawn_rate(-1, publisher),
            Control::SpawnRateUp => self.state.set_spawn_rate(1, publisher),
        }
    }

    /// Advance virtual time, queueing one spawn tick per timer firing
    pub fn advance(&mut self, elapsed_ms: u64) {
        self.clock_ms = self.clock_ms.saturating_add(elapsed_ms);
        for _ in 0..self.spawn_timer.advance(elapsed_ms) {
            self.queue.push_back(Task::SpawnTick);
        }
        self.run_pending();
    }

    /// Run one render frame (movement, then eviction)
    pub fn frame(&mut self) {
        self.submit(Task::FrameTick);
        self.run_pending();
    }

    /// Deliver a click; earlier queued work runs first
    pub fn click(&mut self, mut event: ClickEvent) -> ClickOutcome {
        self.run_pending();
        self.apply_click(&mut event)
    }

    /// Deliver a button press
    pub fn press(&mut self, control: Control) {
        self.submit(Task::Control(control));
        self.run_pending();
    }

    /// Cancel the spawn loop; queued spawn ticks are dropped
    pub fn stop_spawning(&mut self) {
        self.spawn_timer.stop();
        self.queue.retain(|t| *t != Task::SpawnTick);
    }

    /// Cancel the frame loop; queued frame ticks are dropped
    pub fn stop_frames(&mut self) {
        if self.frames_running {
            log::info!("Frame driver stopped after {} frames", self.frame_count);
        }
        self.frames_running = false;
        self.queue.retain(|t| *t != Task::FrameTick);
    }

    /// Stop both loops. Input is still accepted.
    pub fn stop(&mut self) {
        self.stop_spawning();
        self.stop_frames();
    }
}
