//! # Mesh Operations
//!
//! Standalone operations on finished geometry: convex hull shells and
//! topology conversion.

pub mod hull;
pub mod topology;

pub use hull::{ConvexHullGenerator, HullOutput, HullPoint, HullSolver, QuickHull, Shading};
pub use topology::{build_line_mesh, build_point_mesh, submesh_edges, to_line_mesh, to_point_mesh};
