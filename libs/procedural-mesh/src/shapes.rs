//! # Shared Shapes
//!
//! Unit-sized lookup shapes built once on first access and read-only
//! afterwards. Merge them into a builder with
//! [`MeshBuilder::add_mesh`] or [`LineBuilder::add_lines`], passing a matrix
//! to place and size them.
//!
//! ```rust
//! use procedural_mesh::{shapes, MeshBuilder};
//! use glam::{DMat4, DVec3};
//!
//! let mut builder = MeshBuilder::new();
//! builder.add_mesh(shapes::unit_cube(), Some(DMat4::from_scale(DVec3::splat(4.0))));
//! assert_eq!(builder.triangle_count(), 12);
//! ```

use crate::error::MeshError;
use crate::lines::LineBuilder;
use crate::mesh::MeshBuilder;
use crate::primitives::BoxFaces;
use config::constants::{DEFAULT_RINGS, DEFAULT_SEGMENTS};
use glam::DVec3;
use std::sync::OnceLock;

/// Runs a generator on a fresh builder. Generators here use fixed valid
/// dimensions, so a failure is logged and leaves the shape empty.
fn generate<B: Default>(name: &str, build: impl FnOnce(&mut B) -> Result<(), MeshError>) -> B {
    let mut builder = B::default();
    if let Err(err) = build(&mut builder) {
        log::error!("failed to build shared shape {name}: {err}");
        return B::default();
    }
    builder
}

/// Box with side length 1 centered at the origin.
pub fn unit_cube() -> &'static MeshBuilder {
    static SHAPE: OnceLock<MeshBuilder> = OnceLock::new();
    SHAPE.get_or_init(|| {
        generate("unit_cube", |b: &mut MeshBuilder| {
            b.add_box(DVec3::ONE, BoxFaces::ALL)
        })
    })
}

/// Sphere with diameter 1 at default resolution.
pub fn unit_sphere() -> &'static MeshBuilder {
    static SHAPE: OnceLock<MeshBuilder> = OnceLock::new();
    SHAPE.get_or_init(|| {
        generate("unit_sphere", |b: &mut MeshBuilder| {
            b.add_sphere(0.5, DEFAULT_SEGMENTS, DEFAULT_RINGS)
        })
    })
}

/// Capped cylinder with diameter 1 and height 1.
pub fn unit_cylinder() -> &'static MeshBuilder {
    static SHAPE: OnceLock<MeshBuilder> = OnceLock::new();
    SHAPE.get_or_init(|| {
        generate("unit_cylinder", |b: &mut MeshBuilder| {
            b.add_cylinder(0.5, 0.5, 1.0, DEFAULT_SEGMENTS, true)
        })
    })
}

/// The 12 edges of [`unit_cube`].
pub fn wire_cube() -> &'static LineBuilder {
    static SHAPE: OnceLock<LineBuilder> = OnceLock::new();
    SHAPE.get_or_init(|| {
        generate("wire_cube", |b: &mut LineBuilder| b.add_wire_box(DVec3::ONE))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_shapes_are_built_once() {
        assert!(std::ptr::eq(unit_cube(), unit_cube()));
        assert!(std::ptr::eq(wire_cube(), wire_cube()));
    }

    #[test]
    fn test_unit_extents() {
        for shape in [unit_cube(), unit_sphere(), unit_cylinder()] {
            assert!(!shape.is_empty());
            assert!(shape.validate().is_ok());
            let (min, max) = shape.bounding_box();
            assert_relative_eq!(max.y - min.y, 1.0, epsilon = 1e-9);
            assert_relative_eq!(max.x, 0.5, epsilon = 1e-9);
        }
        assert_eq!(wire_cube().edge_count(), 12);
    }

    #[test]
    fn test_merge_scaled_copy() {
        let mut lines = LineBuilder::new();
        lines.add_lines(wire_cube(), Some(glam::DMat4::from_scale(DVec3::splat(2.0))));
        let (min, max) = lines.bounding_box();
        assert_eq!(min, DVec3::splat(-1.0));
        assert_eq!(max, DVec3::splat(1.0));
    }
}
