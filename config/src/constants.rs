//! # Configuration Constants
//!
//! Centralized constants for the mesh builders. Precision values,
//! tessellation limits and buffer limits are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Resolution**: Segment and ring clamps for round primitives
//! - **Limits**: Transform stack depth, index width thresholds
//! - **Color**: Default vertex color

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// Used for determining if two floating-point values are "equal" within
/// numerical tolerance.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Tolerance used by the convex hull solver.
///
/// Points closer than this are merged, and a point must lie further than
/// this in front of a face plane to count as outside of it.
///
/// # Example
///
/// ```rust
/// use config::constants::{EPSILON, HULL_EPSILON};
///
/// assert!(HULL_EPSILON >= EPSILON);
/// ```
pub const HULL_EPSILON: f64 = 1e-9;

/// Tolerance for comparing unit normals.
///
/// Normals derived from triangle winding are compared against analytic
/// normals within this distance.
pub const NORMAL_TOLERANCE: f64 = 1e-6;

// =============================================================================
// RESOLUTION CONSTANTS
// =============================================================================

/// Minimum number of segments around any round primitive.
///
/// A ring needs at least three points to enclose an area.
///
/// # Example
///
/// ```rust
/// use config::constants::MIN_SEGMENTS;
///
/// let requested = 1u32;
/// assert_eq!(requested.max(MIN_SEGMENTS), 3);
/// ```
pub const MIN_SEGMENTS: u32 = 3;

/// Maximum number of segments around any round primitive.
///
/// Safety limit to keep a single primitive within a predictable budget.
pub const MAX_SEGMENTS: u32 = 256;

/// Minimum number of latitude rings for spheres and hemispheres.
pub const MIN_RINGS: u32 = 2;

/// Maximum number of latitude rings for spheres and hemispheres.
pub const MAX_RINGS: u32 = 256;

/// Default segment count used by the shared unit shapes.
///
/// # Example
///
/// ```rust
/// use config::constants::{DEFAULT_SEGMENTS, MAX_SEGMENTS, MIN_SEGMENTS};
///
/// assert!((MIN_SEGMENTS..=MAX_SEGMENTS).contains(&DEFAULT_SEGMENTS));
/// ```
pub const DEFAULT_SEGMENTS: u32 = 24;

/// Default ring count used by the shared unit shapes.
pub const DEFAULT_RINGS: u32 = 12;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Maximum depth of a builder's transform stack.
///
/// Pushing past this depth is a usage error rather than a silent growth.
///
/// # Example
///
/// ```rust
/// use config::constants::MAX_TRANSFORM_DEPTH;
///
/// let nesting = 16;
/// assert!(nesting < MAX_TRANSFORM_DEPTH);
/// ```
pub const MAX_TRANSFORM_DEPTH: usize = 256;

/// Vertex count at which index buffers switch from 16-bit to 32-bit.
///
/// Every index of a 16-bit buffer must be strictly below this value.
///
/// # Example
///
/// ```rust
/// use config::constants::U16_INDEX_LIMIT;
///
/// assert_eq!(U16_INDEX_LIMIT, u16::MAX as usize + 1);
/// ```
pub const U16_INDEX_LIMIT: usize = 65_536;

// =============================================================================
// COLOR CONSTANTS
// =============================================================================

/// Default vertex color (opaque white).
///
/// Used to back-fill vertices created before a color was first set.
/// RGBA values in range [0.0, 1.0].
pub const DEFAULT_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

// =============================================================================
// RUNTIME CONFIGURATION
// =============================================================================

/// Immutable snapshot of the tunable builder settings.
///
/// # Examples
/// ```
/// use config::constants::BuilderConfig;
///
/// let config = BuilderConfig::default();
/// assert_eq!(config.max_transform_depth, 256);
/// assert!(config.hull_tolerance > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuilderConfig {
    /// Transform stack cap applied to new builders.
    pub max_transform_depth: usize,
    /// Merge/outside tolerance for the hull solver.
    pub hull_tolerance: f64,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            max_transform_depth: MAX_TRANSFORM_DEPTH,
            hull_tolerance: HULL_EPSILON,
        }
    }
}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Clamps a requested segment count to `MIN_SEGMENTS..=MAX_SEGMENTS`.
///
/// # Example
///
/// ```rust
/// use config::constants::clamp_segments;
///
/// assert_eq!(clamp_segments(0), 3);
/// assert_eq!(clamp_segments(32), 32);
/// assert_eq!(clamp_segments(4096), 256);
/// ```
#[inline]
pub fn clamp_segments(segments: u32) -> u32 {
    segments.clamp(MIN_SEGMENTS, MAX_SEGMENTS)
}

/// Clamps a requested ring count to `MIN_RINGS..=MAX_RINGS`.
///
/// # Example
///
/// ```rust
/// use config::constants::clamp_rings;
///
/// assert_eq!(clamp_rings(1), 2);
/// assert_eq!(clamp_rings(12), 12);
/// ```
#[inline]
pub fn clamp_rings(rings: u32) -> u32 {
    rings.clamp(MIN_RINGS, MAX_RINGS)
}

/// Checks if two f64 values are approximately equal within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_equal;
///
/// assert!(approx_equal(1.0, 1.0 + 1e-11));
/// assert!(!approx_equal(1.0, 1.1));
/// ```
#[inline]
pub fn approx_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Checks if a f64 value is approximately zero within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-11));
/// assert!(!approx_zero(0.1));
/// ```
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}
