//! Pool of drifting feathers.
//!
//! Feathers enter from two producers, pointer movement and a fixed interval,
//! and leave once their height exits the visible band.

use crate::math::Vec3;
use crate::oscillator::{Oscillator, WiggleParameters};
use crate::projectile::Trajectory;
use crate::random::RandomSource;
use log::debug;
use std::f64::consts::TAU;
use std::time::Duration;

/// Feathers at or below this height are retired
pub const RETIRE_FLOOR: f64 = -5.0;
/// Feathers at or above this height are retired
pub const RETIRE_CEILING: f64 = 40.0;
/// Smallest feather scale; spawned scales fall in `[BASE_SCALE, 3 * BASE_SCALE)`
pub const BASE_SCALE: f64 = 3.5;
pub const DEFAULT_SHOOTING_CHANCE: f64 = 0.05;

/// Which producer created a feather
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnSource {
    Pointer,
    Timer,
}

#[derive(Debug, Clone)]
pub struct Feather {
    pub position: Vec3,
    /// Orientation chosen at spawn
    pub rotation: Vec3,
    /// Absolute per-axis wiggle angles, applied inside `rotation`
    pub sway: Vec3,
    pub scale: f64,
    pub trajectory: Trajectory,
    pub wiggle_x: Option<Oscillator>,
    pub wiggle_y: Option<Oscillator>,
    pub source: SpawnSource,
}

impl Feather {
    /// Whether the feather's height lies strictly inside the visible band
    pub fn in_band(&self) -> bool {
        self.position[1] > RETIRE_FLOOR && self.position[1] < RETIRE_CEILING
    }
}

fn random_rotation(rng: &mut dyn RandomSource) -> Vec3 {
    [0.0, rng.range(0.0, TAU), 0.0]
}

fn random_scale(rng: &mut dyn RandomSource) -> f64 {
    BASE_SCALE * (1.0 + rng.range(0.0, 2.0))
}

#[derive(Debug)]
pub struct FeatherPool {
    feathers: Vec<Feather>,
    shooting_chance: f64,
    wiggle_x: bool,
}

impl FeatherPool {
    pub fn new(shooting_chance: f64) -> Self {
        FeatherPool {
            feathers: Vec::new(),
            shooting_chance,
            wiggle_x: false,
        }
    }

    /// Also gives timer feathers an independent wiggle about x
    pub fn with_x_wiggle(mut self, enabled: bool) -> Self {
        self.wiggle_x = enabled;
        self
    }

    /// Spawns a feather where the pointer meets the floor plane.
    ///
    /// A small share of these shoot off horizontally instead of rising.
    pub fn spawn_at_pointer(&mut self, point: Vec3, now: Duration, rng: &mut dyn RandomSource) {
        let rotation = random_rotation(rng);
        let scale = random_scale(rng);
        let trajectory = if rng.chance(self.shooting_chance) {
            let angle = rng.range(0.0, TAU);
            let speed = rng.range(2.0, 4.0);
            let lift = rng.range(0.5, 1.5);
            Trajectory::shooting(now, [angle.cos() * speed, lift, angle.sin() * speed])
        } else {
            Trajectory::rising(now)
        };
        if trajectory.shooting {
            debug!("shooting feather at ({:.2}, {:.2})", point[0], point[2]);
        }

        self.feathers.push(Feather {
            position: [point[0], 0.0, point[2]],
            rotation,
            sway: [0.0; 3],
            scale,
            trajectory,
            wiggle_x: None,
            wiggle_y: None,
            source: SpawnSource::Pointer,
        });
    }

    /// Spawns a rising, wiggling feather at the origin
    pub fn spawn_from_timer(&mut self, now: Duration, rng: &mut dyn RandomSource) {
        let rotation = random_rotation(rng);
        let scale = random_scale(rng);
        let wiggle_y = Oscillator::new(WiggleParameters::random(rng));
        let wiggle_x = self.wiggle_x.then(|| Oscillator::new(WiggleParameters::random(rng)));
        debug!("timer feather at {:?}: {:?}", now, wiggle_y.params());

        self.feathers.push(Feather {
            position: [0.0; 3],
            rotation,
            sway: [0.0; 3],
            scale,
            trajectory: Trajectory::rising(now),
            wiggle_x,
            wiggle_y: Some(wiggle_y),
            source: SpawnSource::Timer,
        });
    }

    /// Runs one frame: move every feather, then wiggle, then retire those outside the band
    pub fn update(&mut self, now: Duration, delta: f64, rng: &mut dyn RandomSource) {
        for feather in self.feathers.iter_mut() {
            feather.position = feather.trajectory.step(feather.position, now, delta);
        }

        for feather in self.feathers.iter_mut() {
            if let Some(wiggle) = feather.wiggle_x.as_mut() {
                feather.sway[0] = wiggle.advance(delta, rng);
            }
            if let Some(wiggle) = feather.wiggle_y.as_mut() {
                feather.sway[1] = wiggle.advance(delta, rng);
            }
        }

        let before = self.feathers.len();
        self.feathers.retain(Feather::in_band);
        let retired = before - self.feathers.len();
        if retired > 0 {
            debug!("retired {} feather(s), {} remain", retired, self.feathers.len());
        }
    }

    pub fn clear(&mut self) {
        self.feathers.clear();
    }

    pub fn len(&self) -> usize {
        self.feathers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.feathers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Feather> {
        self.feathers.iter()
    }

    pub fn count_from(&self, source: SpawnSource) -> usize {
        self.feathers.iter().filter(|f| f.source == source).count()
    }
}
