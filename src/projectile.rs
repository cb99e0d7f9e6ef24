use crate::math::{add, scale, Vec3};
use std::time::Duration;

/// Upward speed of a rising (non-shooting) feather, in units per second
pub const RISE_SPEED: f64 = 1.5;

/// How a feather moves after it is spawned
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trajectory {
    pub spawn_time: Duration,
    pub velocity: Vec3,
    pub shooting: bool,
}

impl Trajectory {
    /// Straight-up drift at `RISE_SPEED`
    pub fn rising(spawn_time: Duration) -> Self {
        Trajectory {
            spawn_time,
            velocity: [0.0, RISE_SPEED, 0.0],
            shooting: false,
        }
    }

    pub fn shooting(spawn_time: Duration, velocity: Vec3) -> Self {
        Trajectory {
            spawn_time,
            velocity,
            shooting: true,
        }
    }

    /// Position for the frame ending at `now`, `delta` seconds after the previous one.
    ///
    /// Shooting feathers integrate their velocity. Rising feathers recompute their height
    /// from the time since spawn, so frame timing never accumulates drift.
    pub fn step(&self, position: Vec3, now: Duration, delta: f64) -> Vec3 {
        if self.shooting {
            add(&position, &scale(&self.velocity, delta))
        } else {
            let elapsed = now.saturating_sub(self.spawn_time).as_secs_f64();
            [position[0], elapsed * RISE_SPEED, position[2]]
        }
    }
}
