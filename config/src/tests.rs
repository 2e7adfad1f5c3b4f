//! # Tests for Config Constants
//!
//! Unit tests verifying the correctness of configuration constants
//! and helper functions.

use crate::constants::*;

// =============================================================================
// PRECISION TESTS
// =============================================================================

#[test]
fn test_epsilon_is_positive() {
    assert!(EPSILON > 0.0, "EPSILON must be positive");
}

#[test]
fn test_epsilon_is_small() {
    assert!(EPSILON < 1e-6, "EPSILON should be small for precision");
}

#[test]
fn test_hull_epsilon_not_tighter_than_epsilon() {
    assert!(
        HULL_EPSILON >= EPSILON,
        "HULL_EPSILON should be >= EPSILON"
    );
}

#[test]
fn test_normal_tolerance_is_loose_enough() {
    assert!(NORMAL_TOLERANCE > EPSILON);
    assert!(NORMAL_TOLERANCE < 1e-3);
}

// =============================================================================
// RESOLUTION TESTS
// =============================================================================

#[test]
fn test_segment_bounds_are_ordered() {
    assert!(MIN_SEGMENTS >= 3, "a ring needs at least 3 points");
    assert!(MIN_SEGMENTS < MAX_SEGMENTS);
}

#[test]
fn test_ring_bounds_are_ordered() {
    assert!(MIN_RINGS >= 2);
    assert!(MIN_RINGS < MAX_RINGS);
}

#[test]
fn test_defaults_within_bounds() {
    assert_eq!(clamp_segments(DEFAULT_SEGMENTS), DEFAULT_SEGMENTS);
    assert_eq!(clamp_rings(DEFAULT_RINGS), DEFAULT_RINGS);
}

#[test]
fn test_clamp_segments() {
    assert_eq!(clamp_segments(0), MIN_SEGMENTS);
    assert_eq!(clamp_segments(2), MIN_SEGMENTS);
    assert_eq!(clamp_segments(3), 3);
    assert_eq!(clamp_segments(64), 64);
    assert_eq!(clamp_segments(257), MAX_SEGMENTS);
    assert_eq!(clamp_segments(u32::MAX), MAX_SEGMENTS);
}

#[test]
fn test_clamp_rings() {
    assert_eq!(clamp_rings(0), MIN_RINGS);
    assert_eq!(clamp_rings(7), 7);
    assert_eq!(clamp_rings(1000), MAX_RINGS);
}

// =============================================================================
// LIMIT TESTS
// =============================================================================

#[test]
fn test_transform_depth_cap() {
    assert_eq!(MAX_TRANSFORM_DEPTH, 256);
}

#[test]
fn test_u16_index_limit_matches_type() {
    assert_eq!(U16_INDEX_LIMIT - 1, u16::MAX as usize);
}

// =============================================================================
// CONFIG TESTS
// =============================================================================

#[test]
fn test_builder_config_defaults() {
    let config = BuilderConfig::default();
    assert_eq!(config.max_transform_depth, MAX_TRANSFORM_DEPTH);
    assert_eq!(config.hull_tolerance, HULL_EPSILON);
}

#[test]
fn test_default_color_is_opaque() {
    assert_eq!(DEFAULT_COLOR[3], 1.0);
    assert!(DEFAULT_COLOR.iter().all(|c| (0.0..=1.0).contains(c)));
}

// =============================================================================
// HELPER TESTS
// =============================================================================

#[test]
fn test_approx_equal() {
    assert!(approx_equal(1.0, 1.0));
    assert!(approx_equal(1.0, 1.0 + EPSILON / 2.0));
    assert!(!approx_equal(1.0, 1.0 + EPSILON * 2.0));
}

#[test]
fn test_approx_zero() {
    assert!(approx_zero(0.0));
    assert!(approx_zero(EPSILON / 2.0));
    assert!(approx_zero(-EPSILON / 2.0));
    assert!(!approx_zero(EPSILON * 2.0));
}
