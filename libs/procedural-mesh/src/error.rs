//! # Mesh Errors
//!
//! Error types for the geometry builders.
//!
//! ## Error Policy
//!
//! - Usage errors (unbalanced transform scopes, mismatched table lengths,
//!   bad indices) fail fast with an `Err`.
//! - Generation errors (hull on too few or degenerate points, invalid
//!   primitive dimensions) leave no partial output behind.
//! - Validation findings are reported through [`ValidationReport`], never
//!   raised.

use crate::sink::Topology;
use thiserror::Error;

/// Errors that can occur while building or converting geometry.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshError {
    /// A push would exceed the transform stack cap.
    #[error("Transform stack overflow: depth limit {limit} reached")]
    StackOverflow { limit: usize },

    /// A pop was requested on an empty transform stack.
    #[error("Transform stack underflow: pop without matching push")]
    StackUnderflow,

    /// Two parallel input tables disagree in length.
    #[error("Length mismatch in {what}: expected {expected}, got {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// An index refers past the end of the vertex array.
    #[error("Index {index} out of range for {count} vertices")]
    IndexOutOfRange { index: u32, count: usize },

    /// Degenerate geometry
    #[error("Degenerate geometry: {message}")]
    DegenerateGeometry { message: String },

    /// Generation could not produce a complete result.
    #[error("Generation failed: {message}")]
    GenerationFailed { message: String },

    /// Unsupported topology for the requested conversion.
    #[error("Unsupported topology: {topology:?}")]
    UnsupportedTopology { topology: Topology },
}

impl MeshError {
    /// Creates a degenerate geometry error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            message: message.into(),
        }
    }

    /// Creates a generation failure.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::GenerationFailed {
            message: message.into(),
        }
    }

    /// Creates a length mismatch error.
    pub fn length_mismatch(what: &'static str, expected: usize, actual: usize) -> Self {
        Self::LengthMismatch {
            what,
            expected,
            actual,
        }
    }

    /// Returns true for caller mistakes rather than geometric failures.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::StackOverflow { .. }
                | Self::StackUnderflow
                | Self::LengthMismatch { .. }
                | Self::IndexOutOfRange { .. }
        )
    }
}

// =============================================================================
// VALIDATION
// =============================================================================

/// One inconsistency found by a builder's `validate()`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// A populated attribute array does not match the vertex count.
    #[error("{attribute} has {actual} entries for {vertices} vertices")]
    AttributeLength {
        attribute: &'static str,
        actual: usize,
        vertices: usize,
    },

    /// The index list length is not a multiple of the primitive size.
    #[error("index list of length {length} is not a multiple of {stride}")]
    IncompletePrimitive { length: usize, stride: usize },

    /// An index points past the vertex array.
    #[error("index {index} at position {position} exceeds {vertices} vertices")]
    IndexOutOfRange {
        index: u32,
        position: usize,
        vertices: usize,
    },
}

/// Result of a `validate()` pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Creates an empty (passing) report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an issue.
    pub fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// Records an attribute length issue when `actual` is populated and differs.
    pub fn check_attribute(&mut self, attribute: &'static str, actual: usize, vertices: usize) {
        if actual != 0 && actual != vertices {
            self.push(ValidationIssue::AttributeLength {
                attribute,
                actual,
                vertices,
            });
        }
    }

    /// Records range and stride issues of an index list.
    pub fn check_indices(&mut self, indices: &[u32], stride: usize, vertices: usize) {
        if indices.len() % stride != 0 {
            self.push(ValidationIssue::IncompletePrimitive {
                length: indices.len(),
                stride,
            });
        }
        for (position, &index) in indices.iter().enumerate() {
            if index as usize >= vertices {
                self.push(ValidationIssue::IndexOutOfRange {
                    index,
                    position,
                    vertices,
                });
            }
        }
    }

    /// Returns true if no issue was recorded.
    #[inline]
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }

    /// Returns the recorded issues.
    #[inline]
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }
}
