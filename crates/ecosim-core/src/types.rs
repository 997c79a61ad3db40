//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::NOMINAL_FRAME_MS;

/// Stable organism identity. Allocated monotonically, never reused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrganismId(pub u64);

/// 2D position in arena space (top-left origin, same units as the viewport).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// 2D velocity in arena units per nominal frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub dx: f64,
    pub dy: f64,
}

/// Arena bounds supplied by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f64,
    pub height: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Cycle counter (increments by 1 each tick regardless of time factor).
    pub tick: u64,
    /// Simulated milliseconds, accumulated as `time_factor * NOMINAL_FRAME_MS`.
    pub elapsed_ms: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn as_dvec2(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        self.as_dvec2().distance(other.as_dvec2())
    }

    /// Whether both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Velocity {
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    pub fn is_zero(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }
}

impl Arena {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Largest x an organism of `size` may occupy.
    pub fn max_x(&self, size: f64) -> f64 {
        (self.width - size).max(0.0)
    }

    /// Largest y an organism of `size` may occupy.
    pub fn max_y(&self, size: f64) -> f64 {
        (self.height - size).max(0.0)
    }

    /// Clamp a position so an organism of `size` lies inside the arena.
    /// Non-finite coordinates collapse to 0.
    pub fn clamp(&self, pos: Position, size: f64) -> Position {
        let x = if pos.x.is_finite() { pos.x } else { 0.0 };
        let y = if pos.y.is_finite() { pos.y } else { 0.0 };
        Position {
            x: x.clamp(0.0, self.max_x(size)),
            y: y.clamp(0.0, self.max_y(size)),
        }
    }

    /// Whether `pos` is inside the bounds for an organism of `size`.
    pub fn contains(&self, pos: &Position, size: f64) -> bool {
        pos.x >= 0.0 && pos.x <= self.max_x(size) && pos.y >= 0.0 && pos.y <= self.max_y(size)
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(
            crate::constants::DEFAULT_ARENA_WIDTH,
            crate::constants::DEFAULT_ARENA_HEIGHT,
        )
    }
}

impl SimTime {
    /// Advance by one tick scaled by `time_factor`.
    pub fn advance(&mut self, time_factor: f64) {
        self.tick += 1;
        self.elapsed_ms += time_factor * NOMINAL_FRAME_MS;
    }
}
