//! Falling Shapes - a viewport of falling, clickable 2D shapes
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, state, spawning, physics, clicks)
//! - `session`: Single-threaded task queue that drives the simulation in virtual time
//! - `counters`: Display sinks for the four live counters
//! - `renderer`: Vertex generation and hit-testing for a rendering host
//! - `config`: Serializable session configuration

pub mod config;
pub mod counters;
pub mod error;
pub mod renderer;
pub mod session;
pub mod sim;

pub use config::{SessionConfig, Viewport};
pub use counters::{CounterBoard, CounterKind, CounterPublisher, LogPublisher, NullPublisher};
pub use error::{Result, SimError};
pub use session::{Control, Session, Task};

/// Simulation configuration constants
pub mod consts {
    /// Default viewport dimensions
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;

    /// Spawn timer interval (one firing per second of virtual time)
    pub const SPAWN_INTERVAL_MS: u64 = 1000;
    /// Maximum spawn firings per `advance` call, to bound catch-up after a stall
    pub const MAX_SPAWN_CATCH_UP: u32 = 60;

    /// Vertical distance moved per frame per unit of gravity
    pub const GRAVITY_VELOCITY_FACTOR: f32 = 0.5;
    /// Shapes below `viewport.height + EVICTION_MARGIN` are removed
    pub const EVICTION_MARGIN: f32 = 150.0;
    /// Spawn row sits this far above the viewport bottom
    pub const SPAWN_ROW_OFFSET: f32 = 450.0;

    pub const DEFAULT_GRAVITY: i32 = 1;
    pub const DEFAULT_SPAWN_RATE: i32 = 1;

    /// Shape outline width in pixels
    pub const BORDER_WIDTH: f32 = 2.0;
    /// Segments used to tessellate a circle
    pub const CIRCLE_SEGMENTS: u32 = 32;
}
