//! # Geometry Buffer
//!
//! Base accumulator shared by the triangle and line builders: positions,
//! an optional parallel color array and the transform stack.

use crate::transform::TransformStack;
use config::constants::DEFAULT_COLOR;
use glam::DVec3;

/// Growable position array with optional per-vertex colors.
///
/// Once the color array exists its length always equals the position count.
///
/// # Example
///
/// ```rust
/// use procedural_mesh::GeometryBuffer;
/// use glam::DVec3;
///
/// let mut buffer = GeometryBuffer::new();
/// buffer.push_position(DVec3::ZERO);
/// buffer.set_color(Some([1.0, 0.0, 0.0, 1.0]));
/// buffer.push_position(DVec3::X);
///
/// let colors = buffer.colors().unwrap();
/// assert_eq!(colors.len(), 2);
/// assert_eq!(colors[1], [1.0, 0.0, 0.0, 1.0]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GeometryBuffer {
    positions: Vec<DVec3>,
    colors: Option<Vec<[f32; 4]>>,
    current_color: Option<[f32; 4]>,
    transform: TransformStack,
}

impl GeometryBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty buffer with a custom transform stack.
    pub fn with_transform(transform: TransformStack) -> Self {
        Self {
            transform,
            ..Self::default()
        }
    }

    /// Appends an already transformed position and returns its index.
    pub fn push_position(&mut self, position: DVec3) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position);
        if let Some(colors) = &mut self.colors {
            colors.push(self.current_color.unwrap_or(DEFAULT_COLOR));
        }
        index
    }

    /// Sets the color applied to subsequently added vertices.
    ///
    /// The first `Some` activates the color array and back-fills existing
    /// vertices with `DEFAULT_COLOR`.
    pub fn set_color(&mut self, color: Option<[f32; 4]>) {
        if color.is_some() && self.colors.is_none() {
            self.colors = Some(vec![DEFAULT_COLOR; self.positions.len()]);
        }
        self.current_color = color;
    }

    /// Returns the pending vertex color.
    #[inline]
    pub fn current_color(&self) -> Option<[f32; 4]> {
        self.current_color
    }

    /// Reserves space for `additional` vertices.
    pub fn reserve(&mut self, additional: usize) {
        self.positions.reserve(additional);
        if let Some(colors) = &mut self.colors {
            colors.reserve(additional);
        }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if the buffer holds no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Returns the positions.
    #[inline]
    pub fn positions(&self) -> &[DVec3] {
        &self.positions
    }

    /// Returns the vertex colors, if any were set.
    #[inline]
    pub fn colors(&self) -> Option<&[[f32; 4]]> {
        self.colors.as_deref()
    }

    /// Appends positions and colors of another buffer.
    ///
    /// `map` is applied to every position; colors follow the same
    /// back-fill rule as [`GeometryBuffer::set_color`].
    pub(crate) fn extend_from(&mut self, other: &GeometryBuffer, map: impl Fn(DVec3) -> DVec3) {
        let offset = self.positions.len();
        self.positions.extend(other.positions.iter().map(|&p| map(p)));
        let total = self.positions.len();
        let fill = self.current_color.unwrap_or(DEFAULT_COLOR);

        match (self.colors.as_mut(), other.colors.as_ref()) {
            (Some(colors), Some(other_colors)) => colors.extend_from_slice(other_colors),
            (Some(colors), None) => colors.resize(total, fill),
            (None, Some(other_colors)) => {
                let mut colors = vec![DEFAULT_COLOR; offset];
                colors.extend_from_slice(other_colors);
                self.colors = Some(colors);
            }
            (None, None) => {}
        }
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners; both zero for an empty buffer.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        let Some(&first) = self.positions.first() else {
            return (DVec3::ZERO, DVec3::ZERO);
        };
        self.positions[1..]
            .iter()
            .fold((first, first), |(min, max), &p| (min.min(p), max.max(p)))
    }

    /// Returns the transform stack.
    #[inline]
    pub fn transform(&self) -> &TransformStack {
        &self.transform
    }

    /// Returns the transform stack mutably.
    #[inline]
    pub fn transform_mut(&mut self) -> &mut TransformStack {
        &mut self.transform
    }

    /// Empties all data, drops the color array and resets the transform stack.
    pub fn clear(&mut self) {
        self.clear_geometry();
        self.current_color = None;
        self.transform.reset(true);
    }

    /// Drops the vertex data, keeping the transform and current color.
    pub fn clear_geometry(&mut self) {
        self.positions.clear();
        self.colors = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colors_absent_until_set() {
        let mut buffer = GeometryBuffer::new();
        buffer.push_position(DVec3::ZERO);
        assert!(buffer.colors().is_none());
    }

    #[test]
    fn test_set_color_backfills() {
        let mut buffer = GeometryBuffer::new();
        buffer.push_position(DVec3::ZERO);
        buffer.push_position(DVec3::X);
        buffer.set_color(Some([0.0, 0.0, 1.0, 1.0]));
        buffer.push_position(DVec3::Y);

        let colors = buffer.colors().unwrap();
        assert_eq!(colors, &[DEFAULT_COLOR, DEFAULT_COLOR, [0.0, 0.0, 1.0, 1.0]]);
    }

    #[test]
    fn test_unset_color_keeps_array_in_sync() {
        let mut buffer = GeometryBuffer::new();
        buffer.set_color(Some([0.5, 0.5, 0.5, 1.0]));
        buffer.push_position(DVec3::ZERO);
        buffer.set_color(None);
        buffer.push_position(DVec3::X);

        let colors = buffer.colors().unwrap();
        assert_eq!(colors.len(), buffer.len());
        assert_eq!(colors[1], DEFAULT_COLOR);
    }

    #[test]
    fn test_extend_backfills_missing_colors() {
        let mut plain = GeometryBuffer::new();
        plain.push_position(DVec3::ZERO);

        let mut colored = GeometryBuffer::new();
        colored.set_color(Some([1.0, 0.0, 0.0, 1.0]));
        colored.push_position(DVec3::X);

        plain.extend_from(&colored, |p| p + DVec3::Y);
        assert_eq!(plain.positions(), &[DVec3::ZERO, DVec3::new(1.0, 1.0, 0.0)]);
        assert_eq!(plain.colors().unwrap(), &[DEFAULT_COLOR, [1.0, 0.0, 0.0, 1.0]]);
    }

    #[test]
    fn test_bounding_box() {
        let mut buffer = GeometryBuffer::new();
        assert_eq!(buffer.bounding_box(), (DVec3::ZERO, DVec3::ZERO));
        buffer.push_position(DVec3::new(-1.0, -2.0, -3.0));
        buffer.push_position(DVec3::new(4.0, 5.0, 6.0));
        let (min, max) = buffer.bounding_box();
        assert_eq!(min, DVec3::new(-1.0, -2.0, -3.0));
        assert_eq!(max, DVec3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut buffer = GeometryBuffer::new();
        buffer.set_color(Some([1.0; 4]));
        buffer.push_position(DVec3::ZERO);
        buffer.transform_mut().push().unwrap();
        buffer.transform_mut().translate(DVec3::X);

        buffer.clear();
        assert!(buffer.is_empty());
        assert!(buffer.colors().is_none());
        assert_eq!(buffer.current_color(), None);
        assert_eq!(buffer.transform().depth(), 0);
        assert_eq!(buffer.transform().current(), glam::DMat4::IDENTITY);
    }
}
