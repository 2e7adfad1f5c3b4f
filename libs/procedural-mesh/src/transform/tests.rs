//! # Transform Stack Tests

use super::*;
use approx::assert_relative_eq;
use std::f64::consts::FRAC_PI_4;

#[test]
fn test_new_stack_is_identity() {
    let stack = TransformStack::new();
    assert_eq!(stack.current(), DMat4::IDENTITY);
    assert_eq!(stack.depth(), 0);
    assert_eq!(stack.limit(), MAX_TRANSFORM_DEPTH);
}

#[test]
fn test_balanced_push_pop_restores_transform() {
    let mut stack = TransformStack::new();
    stack.translate(DVec3::new(3.0, -1.0, 2.0));
    let before = stack.current();

    for i in 0..10 {
        stack.push().unwrap();
        stack.rotate(DQuat::from_rotation_y(0.1 * i as f64));
        stack.scale(DVec3::splat(1.5));
    }
    for _ in 0..10 {
        stack.pop().unwrap();
    }

    assert_eq!(stack.current(), before);
    assert_eq!(stack.depth(), 0);
}

#[test]
fn test_pop_empty_underflows() {
    let mut stack = TransformStack::new();
    assert_eq!(stack.pop(), Err(MeshError::StackUnderflow));
}

#[test]
fn test_push_past_limit_overflows() {
    let mut stack = TransformStack::with_capacity_limit(2);
    stack.push().unwrap();
    stack.push().unwrap();
    assert_eq!(stack.push(), Err(MeshError::StackOverflow { limit: 2 }));
    assert_eq!(stack.depth(), 2);
}

#[test]
fn test_full_default_depth_is_reachable() {
    let mut stack = TransformStack::new();
    for _ in 0..MAX_TRANSFORM_DEPTH {
        stack.push().unwrap();
    }
    assert!(stack.push().is_err());
}

#[test]
fn test_apply_right_multiplies() {
    let mut stack = TransformStack::new();
    stack.translate(DVec3::new(10.0, 0.0, 0.0));
    stack.scale(DVec3::splat(2.0));

    // Scale acts on the local point first, then the translation.
    let p = stack.transform_point(DVec3::new(1.0, 0.0, 0.0));
    assert_relative_eq!(p.x, 12.0);
}

#[test]
fn test_vectors_ignore_translation() {
    let mut stack = TransformStack::new();
    stack.translate(DVec3::new(5.0, 5.0, 5.0));
    assert_eq!(stack.transform_vector(DVec3::Y), DVec3::Y);
    assert_eq!(stack.transform_point(DVec3::ZERO), DVec3::splat(5.0));
}

#[test]
fn test_transform_normal_stays_perpendicular() {
    let mut stack = TransformStack::new();
    stack.scale(DVec3::new(2.0, 1.0, 1.0));
    stack.rotate(DQuat::from_rotation_z(FRAC_PI_4));

    // The diagonal plane x = y: tangent (1, -1, 0), normal (1, 1, 0).
    let tangent = stack.transform_vector(DVec3::new(1.0, -1.0, 0.0));
    let normal = stack.transform_normal(DVec3::new(1.0, 1.0, 0.0));
    assert_relative_eq!(normal.length(), 1.0, epsilon = 1e-12);
    assert_relative_eq!(normal.dot(tangent), 0.0, epsilon = 1e-12);

    // Rotating the +X face normal by 45 degrees, then stretching x.
    let face = stack.transform_normal(DVec3::X);
    let expected = DVec3::new(0.5, 1.0, 0.0).normalize();
    assert_relative_eq!(face.x, expected.x, epsilon = 1e-12);
    assert_relative_eq!(face.y, expected.y, epsilon = 1e-12);
}

#[test]
fn test_transform_normal_degenerate_inputs() {
    let mut stack = TransformStack::new();
    stack.scale(DVec3::new(4.0, 1.0, 1.0));
    assert_eq!(stack.transform_normal(DVec3::ZERO), DVec3::ZERO);

    stack.scale(DVec3::new(1.0, 0.0, 1.0));
    assert_eq!(stack.transform_normal(DVec3::Y), DVec3::ZERO);
}

#[test]
fn test_override_and_reset() {
    let mut stack = TransformStack::new();
    stack.push().unwrap();
    stack.override_with(DMat4::from_translation(DVec3::Z));
    assert_eq!(stack.transform_point(DVec3::ZERO), DVec3::Z);

    stack.reset(false);
    assert_eq!(stack.current(), DMat4::IDENTITY);
    assert_eq!(stack.depth(), 1);

    stack.reset(true);
    assert_eq!(stack.depth(), 0);
}

#[test]
fn test_scope_pops_on_drop() {
    let mut stack = TransformStack::new();
    {
        let mut scoped = stack.scope().unwrap();
        scoped.translate(DVec3::X);
        assert_eq!(scoped.depth(), 1);
    }
    assert_eq!(stack.depth(), 0);
    assert_eq!(stack.current(), DMat4::IDENTITY);
}

#[test]
fn test_scope_pops_on_early_return() {
    fn fails(stack: &mut TransformStack) -> Result<(), MeshError> {
        let mut scoped = stack.scope()?;
        scoped.translate(DVec3::Y);
        Err(MeshError::degenerate("bail out"))
    }

    let mut stack = TransformStack::new();
    assert!(fails(&mut stack).is_err());
    assert_eq!(stack.depth(), 0);
    assert_eq!(stack.current(), DMat4::IDENTITY);
}

#[test]
fn test_scope_pops_on_unwind() {
    let mut stack = TransformStack::new();
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let mut scoped = stack.scope().unwrap();
        scoped.translate(DVec3::Y);
        panic!("generator failure");
    }));
    assert!(result.is_err());
    assert_eq!(stack.depth(), 0);
    assert_eq!(stack.current(), DMat4::IDENTITY);
}

#[test]
fn test_scope_reports_overflow() {
    let mut stack = TransformStack::with_capacity_limit(0);
    assert!(matches!(
        stack.scope(),
        Err(MeshError::StackOverflow { limit: 0 })
    ));
}
