//! # Procedural Mesh
//!
//! Transform-stack driven geometry builders that accumulate vertices and
//! indices in `f64` and materialize them into a renderable mesh sink.
//!
//! ## Architecture
//!
//! ```text
//! TransformStack ─┐
//!                 ├→ MeshBuilder  (triangles: primitives, quads, merged meshes)
//! GeometryBuffer ─┤
//!                 └→ LineBuilder  (edges: polylines, wireframes)
//!
//! VoxelGrid            → MeshBuilder (one quad per exposed face)
//! ConvexHullGenerator  → MeshBuilder (closed shell, flat or smooth)
//! to_line_mesh / to_point_mesh: RenderMesh → RenderMesh
//!
//! builders ──build_mesh──→ impl MeshSink (RenderMesh, or a renderer's own)
//! ```
//!
//! ## Conventions
//!
//! - Y is up; round solids are built around Y and centered at the origin
//! - Front faces wind counter-clockwise seen from their normal side
//! - Index width is `u16` when the vertex count allows, otherwise `u32`
//!
//! ## Usage
//!
//! ```rust
//! use procedural_mesh::{MeshBuilder, Transformable};
//! use glam::DVec3;
//!
//! let mut builder = MeshBuilder::new();
//! {
//!     let mut scoped = builder.scope().unwrap();
//!     scoped.transform_stack_mut().translate(DVec3::new(0.0, 2.0, 0.0));
//!     scoped.add_sphere(1.0, 16, 8).unwrap();
//! }
//! builder.add_cylinder(0.5, 0.5, 2.0, 16, true).unwrap();
//!
//! let mesh = builder.create_mesh();
//! assert_eq!(mesh.vertex_count(), builder.vertex_count());
//! ```

pub mod buffer;
pub mod error;
pub mod face;
pub mod lines;
pub mod mesh;
pub mod ops;
pub mod primitives;
pub mod shapes;
pub mod sink;
pub mod transform;
pub mod voxel;

pub use buffer::GeometryBuffer;
pub use error::{MeshError, ValidationIssue, ValidationReport};
pub use face::{FaceDirection, UNIT_FACE_UVS};
pub use lines::LineBuilder;
pub use mesh::MeshBuilder;
pub use ops::{
    build_line_mesh, build_point_mesh, to_line_mesh, to_point_mesh, ConvexHullGenerator,
    HullOutput, HullPoint, HullSolver, QuickHull, Shading,
};
pub use primitives::BoxFaces;
pub use sink::{IndexBuffer, IndexFormat, MeshSink, RenderMesh, SubMesh, Topology};
pub use transform::{TransformScope, TransformStack, Transformable};
pub use voxel::{CellClass, PredicateStyle, VoxelGrid, VoxelStyle};
