use crate::random::RandomSource;
use std::f64::consts::TAU;

/// Upper bound of the uniform noise sample, before scaling
const NOISE_CEILING: f64 = 0.1;

/// Parameters of one axis' wiggle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WiggleParameters {
    pub amplitude: f64,
    /// Radians per second
    pub frequency: f64,
    /// Fraction removed from every output, in `[0, 1)`
    pub damping_factor: f64,
    pub noise_influence: f64,
    /// Accumulated phase in radians
    pub phase: f64,
}

impl WiggleParameters {
    /// Fresh parameters for a timer-spawned feather
    pub fn random(rng: &mut dyn RandomSource) -> Self {
        WiggleParameters {
            amplitude: rng.range(0.1, 0.2),
            frequency: rng.range(0.5, 2.5),
            damping_factor: rng.range(0.01, 0.04),
            noise_influence: rng.range(0.1, 0.3),
            phase: rng.range(0.0, TAU),
        }
    }

    /// Largest magnitude `Oscillator::advance` can return for these parameters
    #[cfg(test)]
    pub fn max_output(&self) -> f64 {
        let peak = self.amplitude + NOISE_CEILING * self.noise_influence * self.amplitude;
        peak * (1.0 - self.damping_factor)
    }
}

/// Damped, noisy sinusoid driving the absolute rotation of a single axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillator {
    params: WiggleParameters,
}

impl Oscillator {
    pub fn new(params: WiggleParameters) -> Self {
        Oscillator { params }
    }

    pub fn params(&self) -> &WiggleParameters {
        &self.params
    }

    /// Advances the phase by `delta` seconds and returns the axis angle in radians
    pub fn advance(&mut self, delta: f64, rng: &mut dyn RandomSource) -> f64 {
        let p = &mut self.params;
        p.phase += delta * p.frequency;
        let raw = p.phase.sin() * p.amplitude;
        let noise = rng.range(0.0, NOISE_CEILING) * p.noise_influence * p.amplitude;
        (raw + noise) * (1.0 - p.damping_factor)
    }
}
