// this is the entry point for the city generation plugin
use bevy::prelude::*;

use crate::config::INITIAL_SEED;

pub mod building;
pub mod error;
pub mod layout;
pub mod params;
pub mod partition;
pub mod random;
pub mod scene;
pub mod selector;
pub mod spawn;

pub use building::{BuildingSpec, ShapeExtra, ShapeKind};
pub use error::{CityError, ConfigLoadError};
pub use layout::{CityLayout, CityLayoutEngine, LayoutStats, Placement};
pub use params::{AntennaChance, CityConfig, ShapeWeights};
pub use partition::{GridPartitioner, PlotOrigin};
pub use random::{RandomStream, SeededStream, fresh_seed};
pub use scene::{BodyShape, SceneBackend, antenna_shape, materialize};
pub use selector::ShapeSelector;

// resources
#[derive(Resource)]
pub struct Seed(pub u64);

// outcome of the latest generate/demolish request, shown in the form
#[derive(Resource, Default, Debug, Clone, PartialEq)]
pub enum CityStatus {
    #[default]
    Empty,
    Built { seed: u64, stats: LayoutStats },
    Rejected(String),
    Demolished,
}

impl CityStatus {
    pub fn is_built(&self) -> bool {
        matches!(self, CityStatus::Built { .. })
    }

    /// Whether a parameter edit should rebuild right away. A rejected edit
    /// leaves the last city standing, so the next valid one replaces it.
    pub fn rebuilds_on_change(&self, city_standing: bool) -> bool {
        match self {
            CityStatus::Rejected(_) => city_standing,
            _ => self.is_built(),
        }
    }
}

// Event for generation, replaces the standing city
#[derive(Event)]
pub struct GenerateEvent {
    pub seed: u64,
}

// Event for removing every generated object
#[derive(Event)]
pub struct DemolishEvent;

// main plugin for generation
pub struct CityGenerationPlugin {
    pub config: CityConfig,
    pub seed: u64,
}

impl Default for CityGenerationPlugin {
    fn default() -> Self {
        Self {
            config: CityConfig::default(),
            seed: INITIAL_SEED,
        }
    }
}

impl Plugin for CityGenerationPlugin {
    fn build(&self, app: &mut App) {
        let seed = self.seed;
        app
            .insert_resource(Seed(seed))
            .insert_resource(self.config.clone())
            .insert_resource(CityStatus::default())
            .add_event::<GenerateEvent>()
            .add_event::<DemolishEvent>()
            .add_systems(Startup, spawn::setup_materials)
            // build the first city on start
            .add_systems(PostStartup, move |mut events: EventWriter<GenerateEvent>| {
                events.write(GenerateEvent { seed });
            })
            .add_systems(Update, (spawn::handle_generation, spawn::handle_demolish).chain());
    }
}
