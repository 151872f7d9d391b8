// layout engine: drives the partitioner and the building draws together
// and returns the whole city as plain data, nothing is spawned here

use bevy::prelude::*;

use crate::config::{
    PLOT_WIDTH_MAX, PLOT_WIDTH_MIN, RADIAL_SUBDIVISIONS_MAX, RADIAL_SUBDIVISIONS_MIN,
};
use super::building::{BuildingSpec, ShapeKind};
use super::error::CityError;
use super::params::CityConfig;
use super::partition::{GridPartitioner, PlotOrigin};
use super::random::{RandomStream, draw_u32};
use super::selector::ShapeSelector;

/// Where a building goes. The body's vertical center is `height / 2` above `base_y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub spec: BuildingSpec,
    pub center_x: f32,
    pub center_z: f32,
    pub base_y: f32,
}

impl Placement {
    pub fn at_plot(origin: PlotOrigin, spec: BuildingSpec, gap: f32) -> Self {
        let half = spec.width as f32 / 2.0;
        Self {
            spec,
            center_x: origin.x + half + gap,
            center_z: origin.z + half + gap,
            base_y: 0.0,
        }
    }

    pub fn body_center(&self) -> Vec3 {
        Vec3::new(
            self.center_x,
            self.base_y + self.spec.height as f32 / 2.0,
            self.center_z,
        )
    }

    /// Rooftop mount point, only for buildings that carry an antenna.
    pub fn antenna_mount(&self) -> Option<Vec3> {
        self.spec.has_antenna().then(|| {
            Vec3::new(self.center_x, self.base_y + self.spec.height as f32, self.center_z)
        })
    }
}

/// A generated city: every placement in generation order plus the ground footprint.
#[derive(Debug, Clone, PartialEq)]
pub struct CityLayout {
    pub placements: Vec<Placement>,
    pub width_x: u32,
    pub depth_z: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutStats {
    pub buildings: usize,
    pub cubes: usize,
    pub cylinders: usize,
    pub cones: usize,
    pub antennas: usize,
}

impl CityLayout {
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn ground_center(&self) -> Vec3 {
        Vec3::new(self.width_x as f32 / 2.0, 0.0, self.depth_z as f32 / 2.0)
    }

    pub fn stats(&self) -> LayoutStats {
        let mut stats = LayoutStats {
            buildings: self.len(),
            ..default()
        };
        for placement in &self.placements {
            match placement.spec.kind() {
                ShapeKind::Cube => stats.cubes += 1,
                ShapeKind::Cylinder => stats.cylinders += 1,
                ShapeKind::Cone => stats.cones += 1,
            }
            if placement.spec.has_antenna() {
                stats.antennas += 1;
            }
        }
        stats
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CityLayoutEngine {
    plot_limit: Option<usize>,
}

impl CityLayoutEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail with `PlotLimitExceeded` instead of producing more than `limit` plots.
    pub fn with_plot_limit(limit: usize) -> Self {
        Self { plot_limit: Some(limit) }
    }

    /// Lay out a full city. Either every plot is filled or an error comes
    /// back, never a partial layout.
    pub fn generate(
        &self,
        config: &CityConfig,
        rand: &mut impl RandomStream,
    ) -> Result<CityLayout, CityError> {
        config.validate()?;

        let mut grid = GridPartitioner::new(config.width_x, config.depth_z, config.building_gap);
        let mut placements = Vec::new();

        while let Some(origin) = grid.current() {
            if let Some(limit) = self.plot_limit {
                if placements.len() >= limit {
                    return Err(CityError::PlotLimitExceeded { limit });
                }
            }

            let spec = Self::draw_building(config, rand)?;
            trace!("plot ({}, {}): {}", origin.x, origin.z, spec.info());
            placements.push(Placement::at_plot(origin, spec, config.building_gap));

            let rows = grid.rows_finished();
            grid.advance(spec.width);
            if grid.rows_finished() != rows {
                debug!(
                    "row {} done at x = {}, next row at x = {}",
                    rows,
                    origin.x,
                    grid.cursor_x()
                );
            }
        }

        Ok(CityLayout {
            placements,
            width_x: config.width_x,
            depth_z: config.depth_z,
        })
    }

    // draw order is fixed: height, shape, width, sides, antenna
    fn draw_building(
        config: &CityConfig,
        rand: &mut impl RandomStream,
    ) -> Result<BuildingSpec, CityError> {
        let height = draw_u32(rand, config.min_height, config.max_height)?;
        let kind = ShapeSelector::select(&config.shape_weights, rand)?;
        let width = draw_u32(rand, PLOT_WIDTH_MIN, PLOT_WIDTH_MAX)?;

        let spec = match kind {
            ShapeKind::Cylinder => {
                let sides = draw_u32(rand, RADIAL_SUBDIVISIONS_MIN, RADIAL_SUBDIVISIONS_MAX)?;
                BuildingSpec::cylinder(width, height, sides)
            }
            ShapeKind::Cube => BuildingSpec::cube(width, height, Self::draw_antenna(config, kind, rand)?),
            ShapeKind::Cone => BuildingSpec::cone(width, height, Self::draw_antenna(config, kind, rand)?),
        };
        Ok(spec)
    }

    // no draw at all unless antennas are on and the roof can take one
    fn draw_antenna(
        config: &CityConfig,
        kind: ShapeKind,
        rand: &mut impl RandomStream,
    ) -> Result<bool, CityError> {
        if !config.antenna_enabled || !kind.is_boxy() {
            return Ok(false);
        }
        let chance = config.antenna_chance;
        Ok(draw_u32(rand, 0, chance.denominator)? < chance.numerator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::city::params::ShapeWeights;
    use crate::systems::city::random::SeededStream;

    #[test]
    fn placement_centers_include_half_width_and_gap() {
        let spec = BuildingSpec::cube(2, 6, true);
        let placement = Placement::at_plot(PlotOrigin { x: 4.0, z: 1.0 }, spec, 0.25);
        assert_eq!(placement.center_x, 5.25);
        assert_eq!(placement.center_z, 2.25);
        assert_eq!(placement.body_center(), Vec3::new(5.25, 3.0, 2.25));
        assert_eq!(placement.antenna_mount(), Some(Vec3::new(5.25, 6.0, 2.25)));
    }

    #[test]
    fn no_antenna_mount_without_antenna() {
        let spec = BuildingSpec::cylinder(1, 4, 5);
        let placement = Placement::at_plot(PlotOrigin { x: 0.0, z: 0.0 }, spec, 0.0);
        assert_eq!(placement.antenna_mount(), None);
    }

    #[test]
    fn plot_limit_aborts_without_partial_layout() {
        let config = CityConfig { width_x: 50, depth_z: 50, ..default() };
        let engine = CityLayoutEngine::with_plot_limit(10);
        let mut stream = SeededStream::seeded(5);
        assert_eq!(
            engine.generate(&config, &mut stream),
            Err(CityError::PlotLimitExceeded { limit: 10 })
        );
    }

    #[test]
    fn stats_count_every_kind() {
        let config = CityConfig {
            shape_weights: ShapeWeights { cube: 1, cylinder: 1, cone: 1 },
            antenna_enabled: true,
            ..default()
        };
        let layout = CityLayoutEngine::new()
            .generate(&config, &mut SeededStream::seeded(77))
            .unwrap();
        let stats = layout.stats();
        assert_eq!(stats.buildings, layout.len());
        assert_eq!(stats.cubes + stats.cylinders + stats.cones, stats.buildings);
        assert!(stats.antennas <= stats.cubes + stats.cones);
        assert_eq!(layout.ground_center(), Vec3::new(10.0, 0.0, 10.0));
    }
}
