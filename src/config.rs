//! Session configuration
//!
//! Loaded once at startup; every field has a default so partial JSON is fine.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::Result;
use crate::sim::RemovalMode;

/// Fixed viewport dimensions (y grows downward from the top edge)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: VIEWPORT_WIDTH,
            height: VIEWPORT_HEIGHT,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Row where scheduled shapes appear (above the visible area)
    pub fn spawn_row(&self) -> f32 {
        self.height - SPAWN_ROW_OFFSET
    }

    /// Shapes strictly below this line are evicted
    pub fn eviction_line(&self) -> f32 {
        self.height + EVICTION_MARGIN
    }
}

/// Configuration for one simulation session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub viewport: Viewport,
    /// Seed for colors, spawn positions and geometry choice
    pub seed: u64,
    /// What `remove_shape` does when the target is already gone
    pub removal_mode: RemovalMode,
    pub initial_gravity: i32,
    pub initial_spawn_rate: i32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            seed: 0,
            removal_mode: RemovalMode::Strict,
            initial_gravity: DEFAULT_GRAVITY,
            initial_spawn_rate: DEFAULT_SPAWN_RATE,
        }
    }
}

impl SessionConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load configuration from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded session config from {}", path.display());
        Ok(config)
    }
}
