//! Non-reproducible source backed by the host's entropy.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::error::{RandomError, Result};
use crate::source::RandomSource;

/// A [`RandomSource`] for callers that do not need determinism.
///
/// Shares the interface of [`crate::JavaRandom`] but not its algorithm, so two
/// instances never agree on a sequence. [`RandomSource::set_seed`] is ignored.
#[derive(Debug, Clone)]
pub struct AmbientRandom {
    rng: StdRng,
    next_gaussian: Option<f64>,
}

impl AmbientRandom {
    /// Create a source seeded from operating-system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            next_gaussian: None,
        }
    }
}

impl Default for AmbientRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for AmbientRandom {
    fn next_boolean(&mut self) -> bool {
        self.rng.gen()
    }

    fn next_bytes(&mut self, buf: &mut [u8]) {
        self.rng.fill_bytes(buf);
    }

    fn next_double(&mut self) -> f64 {
        self.rng.gen()
    }

    fn next_float(&mut self) -> f32 {
        self.rng.gen()
    }

    fn next_gaussian(&mut self) -> f64 {
        if let Some(cached) = self.next_gaussian.take() {
            return cached;
        }
        loop {
            let v1 = 2.0 * self.next_double() - 1.0;
            let v2 = 2.0 * self.next_double() - 1.0;
            let s = v1 * v1 + v2 * v2;
            if s < 1.0 && s != 0.0 {
                let multiplier = (-2.0 * s.ln() / s).sqrt();
                self.next_gaussian = Some(v2 * multiplier);
                return v1 * multiplier;
            }
        }
    }

    fn next_int(&mut self) -> i32 {
        self.rng.gen()
    }

    fn next_int_bounded(&mut self, bound: i32) -> Result<i32> {
        if bound <= 0 {
            return Err(RandomError::invalid(format!(
                "bound must be positive, got {bound}"
            )));
        }
        Ok(self.rng.gen_range(0..bound))
    }

    fn next_long(&mut self) -> i64 {
        self.rng.gen()
    }

    fn set_seed(&mut self, _seed: i64) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_respect_ranges() {
        let mut rng = AmbientRandom::new();
        for _ in 0..10_000 {
            assert!((0.0..1.0).contains(&rng.next_double()));
            assert!((0.0..1.0).contains(&rng.next_float()));
            assert!((0..7).contains(&rng.next_int_bounded(7).unwrap()));
        }
    }

    #[test]
    fn rejects_non_positive_bound() {
        let mut rng = AmbientRandom::new();
        assert!(rng.next_int_bounded(0).is_err());
    }

    #[test]
    fn gaussians_are_finite_and_centered() {
        let mut rng = AmbientRandom::new();
        let mean = (0..20_000).map(|_| rng.next_gaussian()).sum::<f64>() / 20_000.0;
        assert!(mean.abs() < 0.1, "mean {mean}");
    }

    #[test]
    fn works_behind_trait_object() {
        let mut source: Box<dyn RandomSource> = Box::new(AmbientRandom::new());
        source.set_seed(1);
        let mut buf = [0u8; 3];
        source.next_bytes(&mut buf);
        assert!((0..3).contains(&source.next_int_bounded(3).unwrap()));
    }
}
