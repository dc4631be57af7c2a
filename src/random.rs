use std::ops::Range;

/// Uniform random numbers for every source of variance in the show.
pub struct Random {
    rng: fastrand::Rng,
}

impl Random {
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Returns `x` with `min <= x < max`.
    pub fn uniform(&mut self, min: f32, max: f32) -> f32 {
        let x = min + self.rng.f32() * (max - min);
        // f32 rounding can land exactly on `max` for wide ranges
        if x < max { x } else { min }
    }

    /// Integer count drawn from a half-open range.
    pub fn count(&mut self, range: Range<usize>) -> usize {
        if range.is_empty() {
            return range.start;
        }
        self.rng.usize(range)
    }
}

impl Default for Random {
    fn default() -> Self {
        Self::new()
    }
}
