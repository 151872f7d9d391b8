// random source for every stochastic decision in a layout

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::error::CityError;

/// Uniform integer and float draws. Implementors own their state, so a
/// stream must not be shared across concurrent layout runs.
pub trait RandomStream {
    /// Uniform integer in `[low, high)`. Fails with `InvalidRange` when the
    /// range is empty.
    fn next_int_in_range(&mut self, low: u64, high: u64) -> Result<u64, CityError>;

    /// Uniform float in `[0, 1)`.
    fn next_float01(&mut self) -> f64;
}

/// `StdRng` backed stream, the one the app uses.
pub struct SeededStream {
    rng: StdRng,
}

impl SeededStream {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    // not reproducible
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

/// Seed for a new city, taken from an unseeded stream so it can still be
/// shown and replayed.
pub fn fresh_seed() -> u64 {
    SeededStream::from_entropy().rng.random()
}

impl RandomStream for SeededStream {
    fn next_int_in_range(&mut self, low: u64, high: u64) -> Result<u64, CityError> {
        if high <= low {
            return Err(CityError::InvalidRange { low, high });
        }
        Ok(self.rng.random_range(low..high))
    }

    fn next_float01(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Draw a `u32` in `[low, high)`.
pub fn draw_u32(rand: &mut impl RandomStream, low: u32, high: u32) -> Result<u32, CityError> {
    let value = rand.next_int_in_range(u64::from(low), u64::from(high))?;
    // value < high, so it always fits
    Ok(value as u32)
}
