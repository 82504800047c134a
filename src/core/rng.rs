//! Seedable noise for the `demo` command; no `rand` dependency.

use std::time::{SystemTime, UNIX_EPOCH};

const MUL: u64 = 6_364_136_223_846_793_005;
const FALLBACK_SEED: u64 = 0x2545_f491_4f6c_dd1d;

/// Linear congruential stream producing demo magnitudes.
#[derive(Clone, Debug)]
pub struct DemoRng {
    state: u64,
}

impl DemoRng {
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self { state: seed }
    }

    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn from_clock() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(FALLBACK_SEED, |d| d.as_nanos() as u64);
        Self::seeded(nanos)
    }

    #[inline]
    fn step(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(MUL).wrapping_add(1);
        (self.state >> 32) as u32
    }

    /// Uniform in `(0, 1]`.
    #[inline]
    fn unit(&mut self) -> f64 {
        (f64::from(self.step()) + 1.0) / (f64::from(u32::MAX) + 1.0)
    }

    /// Gaussian sample around `mean` (Box-Muller).
    pub fn gauss(&mut self, mean: f64, sd: f64) -> f64 {
        let (u1, u2) = (self.unit(), self.unit());
        let z = (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos();
        mean + sd * z
    }

    /// Index in `[0, n)`; zero when `n` is zero.
    pub fn index(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        self.step() as usize % n
    }

    /// One chance in `n` of returning `true`.
    pub fn one_in(&mut self, n: usize) -> bool {
        self.index(n) == 0
    }
}
