//! Counter displays
//!
//! The simulation pushes every changed scalar through a [`CounterPublisher`].
//! Hosts wire this to their UI; tests use [`CounterBoard`].

use serde::{Deserialize, Serialize};

/// The four live counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CounterKind {
    ShapeCount,
    Gravity,
    SpawnRate,
    Area,
}

impl CounterKind {
    pub const ALL: [CounterKind; 4] = [
        CounterKind::ShapeCount,
        CounterKind::Gravity,
        CounterKind::SpawnRate,
        CounterKind::Area,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CounterKind::ShapeCount => "shapes",
            CounterKind::Gravity => "gravity",
            CounterKind::SpawnRate => "spawn_rate",
            CounterKind::Area => "area",
        }
    }

    fn index(self) -> usize {
        match self {
            CounterKind::ShapeCount => 0,
            CounterKind::Gravity => 1,
            CounterKind::SpawnRate => 2,
            CounterKind::Area => 3,
        }
    }
}

/// Sink for counter updates. Called synchronously after each mutation;
/// publishing the same value twice must be harmless.
pub trait CounterPublisher {
    fn publish(&mut self, kind: CounterKind, value: i64);
}

impl<P: CounterPublisher + ?Sized> CounterPublisher for &mut P {
    fn publish(&mut self, kind: CounterKind, value: i64) {
        (**self).publish(kind, value);
    }
}

/// Discards every update
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPublisher;

impl CounterPublisher for NullPublisher {
    fn publish(&mut self, _kind: CounterKind, _value: i64) {}
}

/// Writes every update to the log at debug level
#[derive(Debug, Clone, Copy, Default)]
pub struct LogPublisher;

impl CounterPublisher for LogPublisher {
    fn publish(&mut self, kind: CounterKind, value: i64) {
        log::debug!("counter {} = {}", kind.as_str(), value);
    }
}

/// In-memory display: latest value per counter plus the full publish history
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CounterBoard {
    values: [Option<i64>; 4],
    history: Vec<(CounterKind, i64)>,
}

impl CounterBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last published value, if the counter was ever published
    pub fn get(&self, kind: CounterKind) -> Option<i64> {
        self.values[kind.index()]
    }

    pub fn history(&self) -> &[(CounterKind, i64)] {
        &self.history
    }

    /// Number of publishes for one counter
    pub fn publish_count(&self, kind: CounterKind) -> usize {
        self.history.iter().filter(|(k, _)| *k == kind).count()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

impl CounterPublisher for CounterBoard {
    fn publish(&mut self, kind: CounterKind, value: i64) {
        self.values[kind.index()] = Some(value);
        self.history.push((kind, value));
    }
}
