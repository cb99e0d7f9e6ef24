use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform random numbers for every randomized scene decision
pub trait RandomSource {
    /// Uniform sample in `[0, 1)`
    fn next_f64(&mut self) -> f64;

    /// Uniform sample in `[low, high)`
    fn range(&mut self, low: f64, high: f64) -> f64 {
        low + self.next_f64() * (high - low)
    }

    /// `true` with probability `p`
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

/// `StdRng`-backed source, reproducible when built from a seed
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn from_seed(seed: u64) -> Self {
        SeededRandom {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        SeededRandom {
            rng: StdRng::from_entropy(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SeededRandom::from_seed(7);
        let mut b = SeededRandom::from_seed(7);
        for _ in 0..16 {
            let sample = a.next_f64();
            assert_eq!(sample, b.next_f64());
            assert!((0.0..1.0).contains(&sample));
        }
    }

    #[test]
    fn range_and_chance_scale_the_sample() {
        let mut rng = testing::FixedRandom(0.25);
        assert_eq!(rng.range(2.0, 4.0), 2.5);
        assert!(rng.chance(0.3));
        assert!(!rng.chance(0.25));
    }
}
