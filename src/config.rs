// Configuration file, all measurements in scene units (1 unit = 1 grid cell)
// This controls the initial generation parameter settings

pub const INITIAL_SEED: u64 = 1512086461918454205;

// City footprint
pub const WIDTH_X: u32 = 20;
pub const DEPTH_Z: u32 = 20;
pub const FOOTPRINT_MAX: u32 = 200; // upper bound offered by the form

// Building heights, max is exclusive
pub const MIN_HEIGHT: u32 = 0;
pub const MAX_HEIGHT: u32 = 20;
pub const HEIGHT_SLIDER_MAX: u32 = 20;

// Spacing between neighbouring plots
pub const BUILDING_GAP: f32 = 0.0;
pub const BUILDING_GAP_MAX: f32 = 1.0;

// Plot widths are drawn from [PLOT_WIDTH_MIN, PLOT_WIDTH_MAX)
pub const PLOT_WIDTH_MIN: u32 = 1;
pub const PLOT_WIDTH_MAX: u32 = 3;

// Cylinder side count is drawn from [RADIAL_SUBDIVISIONS_MIN, RADIAL_SUBDIVISIONS_MAX)
pub const RADIAL_SUBDIVISIONS_MIN: u32 = 3;
pub const RADIAL_SUBDIVISIONS_MAX: u32 = 12;

// Shape weights, 8:2 cube to cylinder with cones off
pub const CUBE_WEIGHT: u32 = 8;
pub const CYLINDER_WEIGHT: u32 = 2;
pub const CONE_WEIGHT: u32 = 0;
pub const WEIGHT_SLIDER_MAX: u32 = 10;

// Rooftop antennas, 2 in 10
pub const ANTENNA_ENABLED: bool = false;
pub const ANTENNA_CHANCE_NUMERATOR: u32 = 2;
pub const ANTENNA_CHANCE_DENOMINATOR: u32 = 10;
pub const ANTENNA_RADIUS: f32 = 0.2;
pub const ANTENNA_HEIGHT: f32 = 2.0;

// hard cap on plots per generation run, 200x200 at width 1 stays well under it
pub const PLOT_LIMIT: usize = 100_000;
