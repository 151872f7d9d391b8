// weighted shape selection
// one integer draw over the summed weights, then walk the cumulative bounds
// no float division involved, so 8:2 splits stay exact

use super::building::ShapeKind;
use super::error::CityError;
use super::params::ShapeWeights;
use super::random::RandomStream;

pub struct ShapeSelector;

impl ShapeSelector {
    pub fn select(weights: &ShapeWeights, rand: &mut impl RandomStream) -> Result<ShapeKind, CityError> {
        let total = weights.total();
        if total == 0 {
            return Err(CityError::NoEligibleShape);
        }

        let r = rand.next_int_in_range(0, total)?;
        Ok(Self::pick(weights, r))
    }

    /// First kind whose cumulative upper bound exceeds `r`.
    /// `r` must be below `weights.total()`.
    pub fn pick(weights: &ShapeWeights, r: u64) -> ShapeKind {
        let mut upper = 0u64;
        for (kind, weight) in weights.iter() {
            upper += u64::from(weight);
            if r < upper {
                return kind;
            }
        }
        // r >= total, fall back to the last kind that has any weight
        weights
            .iter()
            .filter(|(_, w)| *w > 0)
            .map(|(kind, _)| kind)
            .last()
            .unwrap_or(ShapeKind::Cube)
    }
}
