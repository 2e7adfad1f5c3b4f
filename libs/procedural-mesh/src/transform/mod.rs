//! # Transform Stack
//!
//! Composable affine transform with nested save/restore scopes. Every
//! builder owns one and routes the geometry it generates through it.
//!
//! ## Scopes
//!
//! ```text
//! scope() ── push ──► [ nested geometry under apply(..) ] ── drop ──► pop
//! ```
//!
//! A [`TransformScope`] pushes on creation and pops when dropped, so the
//! stack stays balanced on `?` early returns and during unwinding.

use crate::error::MeshError;
use config::constants::MAX_TRANSFORM_DEPTH;
use glam::{DMat4, DQuat, DVec3};
use std::ops::{Deref, DerefMut};

#[cfg(test)]
mod tests;

/// Current affine transform plus a bounded stack of saved transforms.
///
/// # Example
///
/// ```rust
/// use procedural_mesh::TransformStack;
/// use glam::DVec3;
///
/// let mut stack = TransformStack::new();
/// stack.push().unwrap();
/// stack.translate(DVec3::new(1.0, 0.0, 0.0));
/// assert_eq!(stack.transform_point(DVec3::ZERO), DVec3::X);
/// stack.pop().unwrap();
/// assert_eq!(stack.transform_point(DVec3::ZERO), DVec3::ZERO);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TransformStack {
    current: DMat4,
    saved: Vec<DMat4>,
    limit: usize,
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformStack {
    /// Creates an identity stack capped at `MAX_TRANSFORM_DEPTH`.
    pub fn new() -> Self {
        Self::with_capacity_limit(MAX_TRANSFORM_DEPTH)
    }

    /// Creates an identity stack with a custom depth cap.
    pub fn with_capacity_limit(limit: usize) -> Self {
        Self {
            current: DMat4::IDENTITY,
            saved: Vec::new(),
            limit,
        }
    }

    /// Saves the current transform.
    pub fn push(&mut self) -> Result<(), MeshError> {
        if self.saved.len() >= self.limit {
            return Err(MeshError::StackOverflow { limit: self.limit });
        }
        self.saved.push(self.current);
        Ok(())
    }

    /// Restores the most recently saved transform.
    pub fn pop(&mut self) -> Result<(), MeshError> {
        self.current = self.saved.pop().ok_or(MeshError::StackUnderflow)?;
        Ok(())
    }

    /// Right-multiplies the current transform: `current = current * matrix`.
    ///
    /// The new matrix acts first on local coordinates, so successive calls
    /// nest like a scene graph.
    pub fn apply(&mut self, matrix: DMat4) {
        self.current *= matrix;
    }

    /// Replaces the current transform.
    pub fn override_with(&mut self, matrix: DMat4) {
        self.current = matrix;
    }

    /// Restores identity, optionally dropping every saved transform.
    pub fn reset(&mut self, clear_stack: bool) {
        self.current = DMat4::IDENTITY;
        if clear_stack {
            self.saved.clear();
        }
    }

    /// Applies a translation.
    pub fn translate(&mut self, offset: DVec3) {
        self.apply(DMat4::from_translation(offset));
    }

    /// Applies a rotation.
    pub fn rotate(&mut self, rotation: DQuat) {
        self.apply(DMat4::from_quat(rotation));
    }

    /// Applies a non-uniform scale.
    pub fn scale(&mut self, factors: DVec3) {
        self.apply(DMat4::from_scale(factors));
    }

    /// Returns the current transform.
    #[inline]
    pub fn current(&self) -> DMat4 {
        self.current
    }

    /// Returns the number of saved transforms.
    #[inline]
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// Returns the depth cap.
    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Transforms a point (translation included).
    #[inline]
    pub fn transform_point(&self, point: DVec3) -> DVec3 {
        self.current.transform_point3(point)
    }

    /// Transforms a direction (translation ignored).
    #[inline]
    pub fn transform_vector(&self, vector: DVec3) -> DVec3 {
        self.current.transform_vector3(vector)
    }

    /// Matrix that maps surface normals: the inverse transpose of the
    /// current transform.
    #[inline]
    pub fn normal_matrix(&self) -> DMat4 {
        self.current.inverse().transpose()
    }

    /// Transforms a surface normal and re-normalizes it.
    ///
    /// Uses [`normal_matrix`](Self::normal_matrix), so normals stay
    /// perpendicular to their surface under non-uniform scale. Zero-length
    /// normals and normals under a singular transform come out zero.
    #[inline]
    pub fn transform_normal(&self, normal: DVec3) -> DVec3 {
        self.normal_matrix()
            .transform_vector3(normal)
            .normalize_or_zero()
    }
}

// =============================================================================
// SCOPES
// =============================================================================

/// Access to a builder's transform stack.
///
/// Implemented by every builder; provides [`Transformable::scope`].
pub trait Transformable {
    /// Returns the builder's transform stack.
    fn transform_stack(&self) -> &TransformStack;

    /// Returns the builder's transform stack mutably.
    fn transform_stack_mut(&mut self) -> &mut TransformStack;

    /// Pushes the current transform and returns a guard that pops it on drop.
    ///
    /// # Example
    ///
    /// ```rust
    /// use procedural_mesh::{MeshBuilder, Transformable};
    /// use glam::DVec3;
    ///
    /// let mut builder = MeshBuilder::new();
    /// {
    ///     let mut scoped = builder.scope().unwrap();
    ///     scoped.transform_stack_mut().translate(DVec3::Y);
    ///     scoped.add_disc(1.0, 8).unwrap();
    /// }
    /// assert_eq!(builder.transform_stack().depth(), 0);
    /// ```
    fn scope(&mut self) -> Result<TransformScope<'_, Self>, MeshError>
    where
        Self: Sized,
    {
        self.transform_stack_mut().push()?;
        Ok(TransformScope { owner: self })
    }
}

impl Transformable for TransformStack {
    fn transform_stack(&self) -> &TransformStack {
        self
    }

    fn transform_stack_mut(&mut self) -> &mut TransformStack {
        self
    }
}

/// Guard returned by [`Transformable::scope`].
///
/// Derefs to the owning builder; pops the pushed transform when dropped.
pub struct TransformScope<'a, T: Transformable> {
    owner: &'a mut T,
}

impl<T: Transformable> Deref for TransformScope<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.owner
    }
}

impl<T: Transformable> DerefMut for TransformScope<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.owner
    }
}

impl<T: Transformable> Drop for TransformScope<'_, T> {
    fn drop(&mut self) {
        // Only fails if the scoped code popped more than it pushed.
        if let Err(err) = self.owner.transform_stack_mut().pop() {
            log::warn!("transform scope could not restore its matrix: {err}");
        }
    }
}
