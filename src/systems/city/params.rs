// city generation parameters, the value object handed to the layout engine

use std::fs;
use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::*;
use super::building::ShapeKind;
use super::error::{CityError, ConfigLoadError};

/// Relative draw weights per shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeWeights {
    pub cube: u32,
    pub cylinder: u32,
    pub cone: u32,
}

impl ShapeWeights {
    #[cfg(test)]
    pub fn only(kind: ShapeKind, weight: u32) -> Self {
        let mut weights = Self { cube: 0, cylinder: 0, cone: 0 };
        *weights.get_mut(kind) = weight;
        weights
    }

    pub fn get(&self, kind: ShapeKind) -> u32 {
        match kind {
            ShapeKind::Cube => self.cube,
            ShapeKind::Cylinder => self.cylinder,
            ShapeKind::Cone => self.cone,
        }
    }

    pub fn get_mut(&mut self, kind: ShapeKind) -> &mut u32 {
        match kind {
            ShapeKind::Cube => &mut self.cube,
            ShapeKind::Cylinder => &mut self.cylinder,
            ShapeKind::Cone => &mut self.cone,
        }
    }

    /// Weights in selection order.
    pub fn iter(&self) -> impl Iterator<Item = (ShapeKind, u32)> + '_ {
        ShapeKind::ALL.into_iter().map(|kind| (kind, self.get(kind)))
    }

    pub fn total(&self) -> u64 {
        self.iter().map(|(_, w)| u64::from(w)).sum()
    }
}

impl Default for ShapeWeights {
    fn default() -> Self {
        Self {
            cube: CUBE_WEIGHT,
            cylinder: CYLINDER_WEIGHT,
            cone: CONE_WEIGHT,
        }
    }
}

/// Probability as a ratio, drawn as an integer in `[0, denominator)`
/// compared against `numerator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AntennaChance {
    pub numerator: u32,
    pub denominator: u32,
}

impl AntennaChance {
    pub fn new(numerator: u32, denominator: u32) -> Self {
        Self { numerator, denominator }
    }

    pub fn as_f32(&self) -> f32 {
        if self.denominator == 0 {
            return 0.0;
        }
        self.numerator as f32 / self.denominator as f32
    }
}

impl Default for AntennaChance {
    fn default() -> Self {
        Self::new(ANTENNA_CHANCE_NUMERATOR, ANTENNA_CHANCE_DENOMINATOR)
    }
}

// setting these parameters as a resource allows for runtime modifications
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CityConfig {
    pub min_height: u32,
    pub max_height: u32, // exclusive
    pub building_gap: f32,
    pub width_x: u32,
    pub depth_z: u32,
    pub shape_weights: ShapeWeights,
    pub antenna_enabled: bool,
    pub antenna_chance: AntennaChance,
}

impl Default for CityConfig {
    fn default() -> Self {
        Self {
            min_height: MIN_HEIGHT,
            max_height: MAX_HEIGHT,
            building_gap: BUILDING_GAP,
            width_x: WIDTH_X,
            depth_z: DEPTH_Z,
            shape_weights: ShapeWeights::default(),
            antenna_enabled: ANTENNA_ENABLED,
            antenna_chance: AntennaChance::default(),
        }
    }
}

impl CityConfig {
    /// Rejects the config without clamping anything.
    pub fn validate(&self) -> Result<(), CityError> {
        if self.max_height <= self.min_height {
            return Err(CityError::InvalidConfig(format!(
                "max height {} must be greater than min height {}",
                self.max_height, self.min_height
            )));
        }
        if !self.building_gap.is_finite() || self.building_gap < 0.0 {
            return Err(CityError::InvalidConfig(format!(
                "building gap {} must be a non-negative number",
                self.building_gap
            )));
        }
        if self.width_x == 0 || self.depth_z == 0 {
            return Err(CityError::InvalidConfig(format!(
                "footprint {}x{} must be positive on both axes",
                self.width_x, self.depth_z
            )));
        }
        if self.shape_weights.total() == 0 {
            return Err(CityError::InvalidConfig(
                "at least one shape weight must be non-zero".to_string(),
            ));
        }
        if self.antenna_chance.denominator == 0
            || self.antenna_chance.numerator > self.antenna_chance.denominator
        {
            return Err(CityError::InvalidConfig(format!(
                "antenna chance {}/{} must lie in [0, 1]",
                self.antenna_chance.numerator, self.antenna_chance.denominator
            )));
        }
        Ok(())
    }

    /// Load and validate a JSON parameter file; missing fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigLoadError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: CityConfig =
            serde_json::from_str(&text).map_err(|source| ConfigLoadError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }
}
