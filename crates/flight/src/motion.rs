//! Cosmetic periodic motion for level geometry.

use std::f32::consts::TAU;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Bobs between a start position and `start + movement` once per period.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Oscillator {
    pub movement: Vec3,
    /// Seconds per full cycle.
    pub period: f32,
    #[serde(skip)]
    start: Vec3,
}

impl Default for Oscillator {
    fn default() -> Self {
        Self {
            movement: Vec3::splat(10.0),
            period: 2.0,
            start: Vec3::ZERO,
        }
    }
}

impl Oscillator {
    pub fn new(movement: Vec3, period: f32) -> Self {
        Self {
            movement,
            period,
            start: Vec3::ZERO,
        }
    }

    /// Record the pose the oscillation is measured from.
    pub fn anchored_at(mut self, start: Vec3) -> Self {
        self.start = start;
        self
    }

    pub fn start(&self) -> Vec3 {
        self.start
    }

    /// Position after `elapsed` seconds, or `None` for a degenerate period.
    pub fn position_at(&self, elapsed: f32) -> Option<Vec3> {
        if self.period <= f32::EPSILON {
            return None;
        }
        let cycles = elapsed / self.period;
        let factor = (cycles * TAU).sin() / 2.0 + 0.5;
        Some(self.start + self.movement * factor)
    }
}

/// Constant-rate spin about a fixed axis.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Rotator {
    #[serde(default = "forward")]
    pub axis: Vec3,
    /// Degrees per second.
    pub rate: f32,
}

fn forward() -> Vec3 {
    Vec3::Z
}

impl Default for Rotator {
    fn default() -> Self {
        Self {
            axis: forward(),
            rate: 0.0,
        }
    }
}

impl Rotator {
    pub fn new(rate: f32) -> Self {
        Self {
            axis: forward(),
            rate,
        }
    }

    /// `orientation` advanced by `delta` seconds, applied in local space.
    pub fn step(&self, orientation: Quat, delta: f32) -> Quat {
        let axis = self.axis.try_normalize().unwrap_or(Vec3::Z);
        orientation * Quat::from_axis_angle(axis, (self.rate * delta).to_radians())
    }
}
