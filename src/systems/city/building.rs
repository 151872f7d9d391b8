use serde::{Deserialize, Serialize};

/// Building body categories, in selection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Cube,
    Cylinder,
    Cone,
}

impl ShapeKind {
    // stable walk order for weighted selection
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Cube, ShapeKind::Cylinder, ShapeKind::Cone];

    /// Box-bodied shapes can carry a rooftop antenna.
    pub fn is_boxy(self) -> bool {
        matches!(self, ShapeKind::Cube | ShapeKind::Cone)
    }

    pub fn label(self) -> &'static str {
        match self {
            ShapeKind::Cube => "Cube",
            ShapeKind::Cylinder => "Cylinder",
            ShapeKind::Cone => "Cone",
        }
    }
}

// shape specific payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeExtra {
    Cylinder { radial_subdivisions: u32 },
    Boxy { has_antenna: bool },
}

/// One building: shape, square plot width and body height.
///
/// Kind and payload are only set together through the constructors, so a
/// cylinder always carries its side count and nothing else does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildingSpec {
    kind: ShapeKind,
    pub width: u32,
    pub height: u32,
    extra: ShapeExtra,
}

impl BuildingSpec {
    pub fn cube(width: u32, height: u32, has_antenna: bool) -> Self {
        Self {
            kind: ShapeKind::Cube,
            width,
            height,
            extra: ShapeExtra::Boxy { has_antenna },
        }
    }

    pub fn cone(width: u32, height: u32, has_antenna: bool) -> Self {
        Self {
            kind: ShapeKind::Cone,
            width,
            height,
            extra: ShapeExtra::Boxy { has_antenna },
        }
    }

    pub fn cylinder(width: u32, height: u32, radial_subdivisions: u32) -> Self {
        Self {
            kind: ShapeKind::Cylinder,
            width,
            height,
            extra: ShapeExtra::Cylinder { radial_subdivisions },
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn extra(&self) -> ShapeExtra {
        self.extra
    }

    pub fn has_antenna(&self) -> bool {
        matches!(self.extra, ShapeExtra::Boxy { has_antenna: true })
    }

    pub fn radial_subdivisions(&self) -> Option<u32> {
        match self.extra {
            ShapeExtra::Cylinder { radial_subdivisions } => Some(radial_subdivisions),
            ShapeExtra::Boxy { .. } => None,
        }
    }

    // short description for logs
    pub fn info(&self) -> String {
        let mut info = format!("{} {}x{}", self.kind.label(), self.width, self.height);
        if let Some(sides) = self.radial_subdivisions() {
            info.push_str(&format!(" ({sides} sides)"));
        }
        if self.has_antenna() {
            info.push_str(" + antenna");
        }
        info
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_cube_and_cone_are_boxy() {
        assert!(ShapeKind::Cube.is_boxy());
        assert!(ShapeKind::Cone.is_boxy());
        assert!(!ShapeKind::Cylinder.is_boxy());
    }

    #[test]
    fn payload_accessors() {
        let tower = BuildingSpec::cylinder(2, 14, 7);
        assert_eq!(tower.radial_subdivisions(), Some(7));
        assert!(!tower.has_antenna());

        let block = BuildingSpec::cube(1, 5, true);
        assert_eq!(block.radial_subdivisions(), None);
        assert!(block.has_antenna());
        assert_eq!(block.info(), "Cube 1x5 + antenna");
        assert_eq!(tower.info(), "Cylinder 2x14 (7 sides)");
    }

    #[test]
    fn constructors_pair_kind_with_payload() {
        let tower = BuildingSpec::cylinder(1, 3, 4);
        assert_eq!(tower.kind(), ShapeKind::Cylinder);
        assert_eq!(tower.extra(), ShapeExtra::Cylinder { radial_subdivisions: 4 });

        for spec in [BuildingSpec::cube(1, 3, false), BuildingSpec::cone(2, 3, true)] {
            assert!(spec.kind().is_boxy());
            assert!(matches!(spec.extra(), ShapeExtra::Boxy { .. }));
        }
    }
}
