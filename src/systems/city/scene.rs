// scene backend seam
// the layout is plain data, anything that can build a plane, a body and an
// antenna can turn it into geometry

use bevy::prelude::*;

use crate::config::{ANTENNA_HEIGHT, ANTENNA_RADIUS};
use super::building::{BuildingSpec, ShapeExtra, ShapeKind};
use super::layout::CityLayout;

/// Geometry for a building body, centered on its translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyShape {
    Box { width: f32, height: f32, depth: f32 },
    Cylinder { radius: f32, height: f32, resolution: u32 },
    Cone { radius: f32, height: f32 },
}

impl BodyShape {
    pub fn for_spec(spec: &BuildingSpec) -> Self {
        let width = spec.width as f32;
        let height = spec.height as f32;
        // only cylinders carry a side count
        match spec.extra() {
            ShapeExtra::Cylinder { radial_subdivisions } => BodyShape::Cylinder {
                radius: width / 2.0,
                height,
                resolution: radial_subdivisions,
            },
            ShapeExtra::Boxy { .. } if spec.kind() == ShapeKind::Cone => {
                BodyShape::Cone { radius: width / 2.0, height }
            }
            ShapeExtra::Boxy { .. } => BodyShape::Box { width, height, depth: width },
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            BodyShape::Box { .. } => ShapeKind::Cube,
            BodyShape::Cylinder { .. } => ShapeKind::Cylinder,
            BodyShape::Cone { .. } => ShapeKind::Cone,
        }
    }
}

/// Whatever materializes a city: the Bevy world in the app, a recorder in tests.
pub trait SceneBackend {
    fn spawn_ground(&mut self, width_x: f32, depth_z: f32, center: Vec3);
    fn spawn_body(&mut self, shape: BodyShape, translation: Vec3);
    /// Thin cone of `ANTENNA_RADIUS` by `ANTENNA_HEIGHT`.
    fn spawn_antenna(&mut self, translation: Vec3);
    /// Remove everything this backend has tagged as generated.
    fn demolish(&mut self);
}

/// Feed a whole layout to a backend: ground first, then each building in order.
pub fn materialize(layout: &CityLayout, backend: &mut impl SceneBackend) {
    backend.spawn_ground(layout.width_x as f32, layout.depth_z as f32, layout.ground_center());

    for placement in &layout.placements {
        backend.spawn_body(BodyShape::for_spec(&placement.spec), placement.body_center());
        if let Some(mount) = placement.antenna_mount() {
            backend.spawn_antenna(mount);
        }
    }
}

pub fn antenna_shape() -> Cone {
    Cone {
        radius: ANTENNA_RADIUS,
        height: ANTENNA_HEIGHT,
    }
}
