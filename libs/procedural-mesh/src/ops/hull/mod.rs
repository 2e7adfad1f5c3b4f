//! # Convex Hull
//!
//! Turns a point cloud into a closed triangulated shell.
//!
//! The hull itself is computed by a [`HullSolver`]; [`QuickHull`] is the
//! built-in one. [`ConvexHullGenerator`] feeds it position-only
//! [`HullPoint`]s, checks that the returned faces close up, and rebuilds
//! them as a [`MeshBuilder`] with flat or smooth normals.
//!
//! ## Failure Modes
//!
//! Fewer than 4 points, fewer than 4 distinct points, collinear or coplanar
//! input, and a non-closed solver result are all `GenerationFailed`. No
//! partial mesh is returned.

mod quickhull;


pub use quickhull::QuickHull;

use crate::error::MeshError;
use crate::mesh::MeshBuilder;
use config::BuilderConfig;
use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

/// Position-only point handed to a [`HullSolver`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HullPoint {
    pub position: DVec3,
}

impl HullPoint {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: DVec3::new(x, y, z),
        }
    }
}

impl From<DVec3> for HullPoint {
    fn from(position: DVec3) -> Self {
        Self { position }
    }
}

impl From<[f64; 3]> for HullPoint {
    fn from(p: [f64; 3]) -> Self {
        Self {
            position: DVec3::from_array(p),
        }
    }
}

/// Faces returned by a solver, indexing its own (possibly deduplicated)
/// output points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HullOutput {
    pub points: Vec<DVec3>,
    pub faces: Vec<[usize; 3]>,
}

/// Convex hull computation service.
///
/// Implementations return outward-wound triangles (counter-clockwise seen
/// from outside) or an error for degenerate input.
pub trait HullSolver {
    fn solve(&self, points: &[HullPoint]) -> Result<HullOutput, MeshError>;
}

/// Normal generation for hull meshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Shading {
    /// Independent vertices per triangle, normals from winding.
    #[default]
    Flat,
    /// Shared vertices, area-weighted blended normals.
    Smooth,
}

/// Builds hull meshes through a [`HullSolver`].
///
/// # Example
///
/// ```rust
/// use procedural_mesh::{ConvexHullGenerator, HullPoint, Shading};
///
/// let points: Vec<HullPoint> = [
///     [0.0, 0.0, 0.0],
///     [1.0, 0.0, 0.0],
///     [0.0, 1.0, 0.0],
///     [0.0, 0.0, 1.0],
/// ]
/// .into_iter()
/// .map(HullPoint::from)
/// .collect();
///
/// let hull = ConvexHullGenerator::new().generate(&points, Shading::Flat).unwrap();
/// assert_eq!(hull.triangle_count(), 4);
/// assert_eq!(hull.vertex_count(), 12);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConvexHullGenerator<S = QuickHull> {
    solver: S,
}

impl ConvexHullGenerator<QuickHull> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses the built-in solver with a custom merge/outside tolerance.
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self::with_solver(QuickHull::with_tolerance(tolerance))
    }

    pub fn with_config(config: &BuilderConfig) -> Self {
        Self::with_tolerance(config.hull_tolerance)
    }
}

impl<S: HullSolver> ConvexHullGenerator<S> {
    /// Uses a custom solver.
    pub fn with_solver(solver: S) -> Self {
        Self { solver }
    }

    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// Computes the hull of `points` as a closed triangle mesh.
    pub fn generate(
        &self,
        points: &[HullPoint],
        shading: Shading,
    ) -> Result<MeshBuilder, MeshError> {
        if points.len() < 4 {
            return Err(MeshError::generation(format!(
                "Convex hull requires at least 4 points, got {}",
                points.len()
            )));
        }

        let output = self.solver.solve(points)?;
        let indices = map_faces(&output)?;
        if !quickhull::is_closed(&output.faces) {
            return Err(MeshError::generation("Convex hull surface is not closed"));
        }

        let mut shell = MeshBuilder::new();
        let count = output.points.len();
        shell.add_indexed(
            &output.points,
            &vec![DVec3::ZERO; count],
            &vec![DVec2::ZERO; count],
            &indices,
        )?;

        let mesh = match shading {
            Shading::Flat => MeshBuilder::flat_shaded(&shell),
            Shading::Smooth => {
                shell.compute_normals_from_winding();
                shell
            }
        };
        log::debug!(
            "convex hull of {} points: {} hull vertices, {} triangles ({:?})",
            points.len(),
            count,
            output.faces.len(),
            shading
        );
        Ok(mesh)
    }

    /// Computes the hull of every vertex position in `source`.
    pub fn generate_from_mesh(
        &self,
        source: &MeshBuilder,
        shading: Shading,
    ) -> Result<MeshBuilder, MeshError> {
        let points: Vec<HullPoint> = source
            .positions()
            .iter()
            .copied()
            .map(HullPoint::from)
            .collect();
        self.generate(&points, shading)
    }
}

/// Flattens solver faces into a triangle index list, rejecting faces that
/// reference missing output points.
fn map_faces(output: &HullOutput) -> Result<Vec<u32>, MeshError> {
    let count = output.points.len();
    output
        .faces
        .iter()
        .flatten()
        .map(|&i| {
            if i < count {
                Ok(i as u32)
            } else {
                Err(MeshError::generation(format!(
                    "Hull face references point {i} of {count}"
                )))
            }
        })
        .collect()
}
