use bevy::prelude::*;

use crate::config::PLOT_LIMIT;
use super::*;

/// Root of one generated city, every spawned piece is a child of it.
#[derive(Component)]
pub struct GeneratedCity {
    pub seed: u64,
}

#[derive(Component)]
pub struct CityBuilding;

#[derive(Component)]
pub struct Antenna;

// materials shared by every generated city
#[derive(Resource)]
pub struct CityMaterials {
    pub ground: Handle<StandardMaterial>,
    pub cube: Handle<StandardMaterial>,
    pub cylinder: Handle<StandardMaterial>,
    pub cone: Handle<StandardMaterial>,
    pub antenna: Handle<StandardMaterial>,
}

impl CityMaterials {
    fn for_kind(&self, kind: ShapeKind) -> Handle<StandardMaterial> {
        match kind {
            ShapeKind::Cube => self.cube.clone(),
            ShapeKind::Cylinder => self.cylinder.clone(),
            ShapeKind::Cone => self.cone.clone(),
        }
    }
}

pub fn setup_materials(mut commands: Commands, mut materials: ResMut<Assets<StandardMaterial>>) {
    let mut flat = |r: f32, g: f32, b: f32| {
        materials.add(StandardMaterial {
            base_color: Color::srgb(r, g, b),
            alpha_mode: AlphaMode::Opaque,
            ..default()
        })
    };

    commands.insert_resource(CityMaterials {
        ground: flat(0.25, 0.27, 0.3),
        cube: flat(0.8, 0.8, 0.9),
        cylinder: flat(0.7, 0.78, 0.9),
        cone: flat(0.85, 0.8, 0.75),
        antenna: flat(0.9, 0.3, 0.3),
    });
}

/// Bevy implementation of the scene backend.
pub struct BevySceneBackend<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    meshes: &'a mut Assets<Mesh>,
    materials: &'a CityMaterials,
    seed: u64,
    root: Option<Entity>,
    // city roots this backend knows about, new and pre-existing
    registry: Vec<Entity>,
}

impl<'a, 'w, 's> BevySceneBackend<'a, 'w, 's> {
    pub fn new(
        commands: &'a mut Commands<'w, 's>,
        meshes: &'a mut Assets<Mesh>,
        materials: &'a CityMaterials,
        existing: impl IntoIterator<Item = Entity>,
        seed: u64,
    ) -> Self {
        Self {
            commands,
            meshes,
            materials,
            seed,
            root: None,
            registry: existing.into_iter().collect(),
        }
    }

    fn root(&mut self) -> Entity {
        if let Some(root) = self.root {
            return root;
        }
        let root = self
            .commands
            .spawn((
                GeneratedCity { seed: self.seed },
                Transform::default(),
                Visibility::Visible,
            ))
            .id();
        self.root = Some(root);
        self.registry.push(root);
        root
    }

    fn spawn_child(&mut self, bundle: impl Bundle) {
        let root = self.root();
        let child = self.commands.spawn(bundle).id();
        self.commands.entity(root).add_children(&[child]);
    }
}

impl SceneBackend for BevySceneBackend<'_, '_, '_> {
    fn spawn_ground(&mut self, width_x: f32, depth_z: f32, center: Vec3) {
        let mesh = self.meshes.add(Plane3d::default().mesh().size(width_x, depth_z));
        let material = self.materials.ground.clone();
        self.spawn_child((
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::from_translation(center),
        ));
    }

    fn spawn_body(&mut self, shape: BodyShape, translation: Vec3) {
        let mesh = match shape {
            BodyShape::Box { width, height, depth } => self.meshes.add(Cuboid::new(width, height, depth)),
            BodyShape::Cylinder { radius, height, resolution } => {
                self.meshes.add(Cylinder::new(radius, height).mesh().resolution(resolution))
            }
            BodyShape::Cone { radius, height } => self.meshes.add(Cone { radius, height }),
        };
        let material = self.materials.for_kind(shape.kind());
        self.spawn_child((
            CityBuilding,
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::from_translation(translation),
        ));
    }

    fn spawn_antenna(&mut self, translation: Vec3) {
        let mesh = self.meshes.add(antenna_shape());
        let material = self.materials.antenna.clone();
        self.spawn_child((
            Antenna,
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::from_translation(translation),
        ));
    }

    fn demolish(&mut self) {
        // children are also handled automatically
        for entity in self.registry.drain(..) {
            self.commands.entity(entity).try_despawn();
        }
        self.root = None;
    }
}

pub fn handle_generation(
    mut commands: Commands,
    mut events: EventReader<GenerateEvent>,
    mut meshes: ResMut<Assets<Mesh>>,
    materials: Res<CityMaterials>,
    mut seed: ResMut<Seed>,
    config: Res<CityConfig>,
    mut status: ResMut<CityStatus>,
    query: Query<Entity, With<GeneratedCity>>,
) {
    // only the newest request in a frame matters
    let Some(event) = events.read().last() else {
        return;
    };
    seed.0 = event.seed;

    let engine = CityLayoutEngine::with_plot_limit(PLOT_LIMIT);
    let mut stream = SeededStream::seeded(event.seed);

    match engine.generate(&config, &mut stream) {
        Ok(layout) => {
            let stats = layout.stats();
            let mut backend = BevySceneBackend::new(
                &mut commands,
                &mut meshes,
                &materials,
                query.iter(),
                event.seed,
            );
            // replace whatever city is standing
            backend.demolish();
            materialize(&layout, &mut backend);

            info!(
                "generated city {}x{} with seed {}: {} buildings ({} cubes, {} cylinders, {} cones, {} antennas)",
                layout.width_x,
                layout.depth_z,
                event.seed,
                stats.buildings,
                stats.cubes,
                stats.cylinders,
                stats.cones,
                stats.antennas
            );
            *status = CityStatus::Built { seed: event.seed, stats };
        }
        Err(err) => {
            // the standing city, if any, is left alone
            warn!("city generation rejected: {err}");
            *status = CityStatus::Rejected(err.to_string());
        }
    }
}

pub fn handle_demolish(
    mut commands: Commands,
    mut events: EventReader<DemolishEvent>,
    mut meshes: ResMut<Assets<Mesh>>,
    materials: Res<CityMaterials>,
    seed: Res<Seed>,
    mut status: ResMut<CityStatus>,
    query: Query<(Entity, &GeneratedCity)>,
) {
    if events.read().last().is_none() {
        return;
    }

    for (_, city) in query.iter() {
        debug!("demolishing city generated with seed {}", city.seed);
    }
    let count = query.iter().count();
    let mut backend = BevySceneBackend::new(
        &mut commands,
        &mut meshes,
        &materials,
        query.iter().map(|(entity, _)| entity),
        seed.0,
    );
    backend.demolish();

    info!("demolished {count} cit{}", if count == 1 { "y" } else { "ies" });
    *status = CityStatus::Demolished;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headless_app(config: CityConfig) -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<Mesh>()
            .init_asset::<StandardMaterial>()
            .add_plugins(CityGenerationPlugin { config, seed: 11 });
        // startup builds the first city
        app.update();
        app
    }

    fn count<C: Component>(app: &mut App) -> usize {
        let mut query = app.world_mut().query_filtered::<(), With<C>>();
        query.iter(app.world()).count()
    }

    fn city_seeds(app: &mut App) -> Vec<u64> {
        let mut query = app.world_mut().query::<&GeneratedCity>();
        query.iter(app.world()).map(|city| city.seed).collect()
    }

    fn status(app: &App) -> CityStatus {
        app.world().resource::<CityStatus>().clone()
    }

    fn antenna_city() -> CityConfig {
        CityConfig {
            width_x: 6,
            depth_z: 5,
            shape_weights: ShapeWeights { cube: 1, cylinder: 0, cone: 1 },
            antenna_enabled: true,
            antenna_chance: AntennaChance::new(10, 10),
            ..default()
        }
    }

    #[test]
    fn startup_builds_one_city() {
        let mut app = headless_app(antenna_city());

        assert_eq!(city_seeds(&mut app), vec![11]);
        let CityStatus::Built { seed, stats } = status(&app) else {
            panic!("expected a built city, got {:?}", status(&app));
        };
        assert_eq!(seed, 11);
        assert_eq!(count::<CityBuilding>(&mut app), stats.buildings);
        assert_eq!(count::<Antenna>(&mut app), stats.buildings);
        // ground plane, bodies and antennas
        assert_eq!(count::<Mesh3d>(&mut app), 1 + 2 * stats.buildings);
    }

    #[test]
    fn generating_again_replaces_the_standing_city() {
        let mut app = headless_app(antenna_city());

        app.world_mut().send_event(GenerateEvent { seed: 12 });
        app.update();

        assert_eq!(city_seeds(&mut app), vec![12]);
        assert_eq!(app.world().resource::<Seed>().0, 12);
        let buildings = count::<CityBuilding>(&mut app);
        assert_eq!(count::<Mesh3d>(&mut app), 1 + 2 * buildings);
    }

    #[test]
    fn only_the_newest_request_in_a_frame_is_built() {
        let mut app = headless_app(antenna_city());

        app.world_mut().send_event(GenerateEvent { seed: 20 });
        app.world_mut().send_event(GenerateEvent { seed: 21 });
        app.update();

        assert_eq!(city_seeds(&mut app), vec![21]);
    }

    #[test]
    fn rejected_config_keeps_the_standing_city() {
        let mut app = headless_app(antenna_city());
        let buildings = count::<CityBuilding>(&mut app);

        app.world_mut().resource_mut::<CityConfig>().shape_weights =
            ShapeWeights { cube: 0, cylinder: 0, cone: 0 };
        app.world_mut().send_event(GenerateEvent { seed: 13 });
        app.update();

        assert!(matches!(status(&app), CityStatus::Rejected(_)));
        assert_eq!(city_seeds(&mut app), vec![11]);
        assert_eq!(count::<CityBuilding>(&mut app), buildings);
    }

    #[test]
    fn demolish_removes_every_generated_entity() {
        let mut app = headless_app(antenna_city());
        assert!(count::<Antenna>(&mut app) > 0);

        app.world_mut().send_event(DemolishEvent);
        app.update();

        assert_eq!(status(&app), CityStatus::Demolished);
        assert_eq!(count::<GeneratedCity>(&mut app), 0);
        assert_eq!(count::<CityBuilding>(&mut app), 0);
        assert_eq!(count::<Antenna>(&mut app), 0);
        assert_eq!(count::<Mesh3d>(&mut app), 0);
    }
}
