//! # Face Directions
//!
//! The six axis-aligned face directions of a unit cell, and the corner
//! table used by both the box generator and the voxel mesher.

use glam::{DVec2, DVec3, IVec3};
use serde::{Deserialize, Serialize};

/// One of the six axis-aligned directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaceDirection {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl FaceDirection {
    /// All directions in scan order.
    pub const ALL: [FaceDirection; 6] = [
        Self::PosX,
        Self::NegX,
        Self::PosY,
        Self::NegY,
        Self::PosZ,
        Self::NegZ,
    ];

    /// Grid offset towards the neighbor on this side.
    pub fn offset(self) -> IVec3 {
        match self {
            Self::PosX => IVec3::X,
            Self::NegX => IVec3::NEG_X,
            Self::PosY => IVec3::Y,
            Self::NegY => IVec3::NEG_Y,
            Self::PosZ => IVec3::Z,
            Self::NegZ => IVec3::NEG_Z,
        }
    }

    /// Outward unit normal.
    pub fn normal(self) -> DVec3 {
        self.offset().as_dvec3()
    }

    /// The direction pointing the other way.
    pub fn opposite(self) -> Self {
        match self {
            Self::PosX => Self::NegX,
            Self::NegX => Self::PosX,
            Self::PosY => Self::NegY,
            Self::NegY => Self::PosY,
            Self::PosZ => Self::NegZ,
            Self::NegZ => Self::PosZ,
        }
    }

    /// Corners of this face on the unit cube `[0, 1]^3`.
    ///
    /// Counter-clockwise seen from outside, so triangles `(0, 1, 2)` and
    /// `(0, 2, 3)` wind towards [`FaceDirection::normal`].
    pub fn unit_corners(self) -> [DVec3; 4] {
        let c = |x: f64, y: f64, z: f64| DVec3::new(x, y, z);
        match self {
            Self::PosX => [c(1., 0., 0.), c(1., 1., 0.), c(1., 1., 1.), c(1., 0., 1.)],
            Self::NegX => [c(0., 0., 0.), c(0., 0., 1.), c(0., 1., 1.), c(0., 1., 0.)],
            Self::PosY => [c(0., 1., 0.), c(0., 1., 1.), c(1., 1., 1.), c(1., 1., 0.)],
            Self::NegY => [c(0., 0., 0.), c(1., 0., 0.), c(1., 0., 1.), c(0., 0., 1.)],
            Self::PosZ => [c(0., 0., 1.), c(1., 0., 1.), c(1., 1., 1.), c(0., 1., 1.)],
            Self::NegZ => [c(0., 0., 0.), c(0., 1., 0.), c(1., 1., 0.), c(1., 0., 0.)],
        }
    }
}

/// Default per-face UV rectangle, matching the corner order.
pub const UNIT_FACE_UVS: [DVec2; 4] = [
    DVec2::new(0.0, 0.0),
    DVec2::new(1.0, 0.0),
    DVec2::new(1.0, 1.0),
    DVec2::new(0.0, 1.0),
];
