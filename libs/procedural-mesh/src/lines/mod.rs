//! # Line Geometry Builder
//!
//! Sibling of [`crate::MeshBuilder`] that emits two-point edges instead of
//! triangles. Wireframe generators live in [`wireframe`].

pub mod wireframe;

use crate::buffer::GeometryBuffer;
use crate::error::{MeshError, ValidationReport};
use crate::sink::{vec3_f32, IndexBuffer, MeshSink, RenderMesh, Topology};
use crate::transform::{TransformStack, Transformable};
use config::BuilderConfig;
use glam::{DMat4, DVec3};

/// Stateful edge-list builder.
///
/// # Example
///
/// ```rust
/// use procedural_mesh::LineBuilder;
/// use glam::DVec3;
///
/// let mut lines = LineBuilder::new();
/// lines.add_line(DVec3::ZERO, DVec3::X);
/// lines.add_wire_box(DVec3::ONE).unwrap();
/// assert_eq!(lines.edge_count(), 13);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LineBuilder {
    buffer: GeometryBuffer,
    edges: Vec<u32>,
}

impl LineBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty builder with a custom transform stack.
    pub fn with_transform(transform: TransformStack) -> Self {
        Self {
            buffer: GeometryBuffer::with_transform(transform),
            edges: Vec::new(),
        }
    }

    /// Creates an empty builder honoring the configured stack depth.
    pub fn with_config(config: &BuilderConfig) -> Self {
        Self::with_transform(TransformStack::with_capacity_limit(config.max_transform_depth))
    }

    /// Sets the color applied to subsequently added vertices.
    pub fn set_color(&mut self, color: Option<[f32; 4]>) {
        self.buffer.set_color(color);
    }

    /// Reserves space for additional vertices and edges.
    pub fn reserve(&mut self, vertices: usize, edges: usize) {
        self.buffer.reserve(vertices);
        self.edges.reserve(edges * 2);
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len() / 2
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    #[inline]
    pub fn positions(&self) -> &[DVec3] {
        self.buffer.positions()
    }

    #[inline]
    pub fn colors(&self) -> Option<&[[f32; 4]]> {
        self.buffer.colors()
    }

    /// Returns the flat edge index list (consecutive pairs).
    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.edges
    }

    /// Iterates over the edges as index pairs.
    pub fn edges(&self) -> impl Iterator<Item = [u32; 2]> + '_ {
        self.edges.chunks_exact(2).map(|e| [e[0], e[1]])
    }

    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        self.buffer.bounding_box()
    }

    /// Appends a raw, already transformed vertex.
    pub fn add_vertex(&mut self, position: DVec3) -> u32 {
        self.buffer.push_position(position)
    }

    /// Connects two existing vertices.
    pub fn add_edge(&mut self, a: u32, b: u32) -> Result<(), MeshError> {
        let count = self.vertex_count();
        if let Some(index) = [a, b].into_iter().find(|&i| i as usize >= count) {
            return Err(MeshError::IndexOutOfRange { index, count });
        }
        self.edges.extend_from_slice(&[a, b]);
        Ok(())
    }

    /// Adds a segment between two local-space points.
    pub fn add_line(&mut self, a: DVec3, b: DVec3) -> u32 {
        let i0 = self.emit_point(a);
        let i1 = self.emit_point(b);
        self.emit_edge(i0, i1);
        i0
    }

    /// Adds a connected chain of segments, optionally closing the loop.
    pub fn add_polyline(&mut self, points: &[DVec3], closed: bool) {
        let indices: Vec<u32> = points.iter().map(|&p| self.emit_point(p)).collect();
        for pair in indices.windows(2) {
            self.emit_edge(pair[0], pair[1]);
        }
        if closed && indices.len() > 2 {
            self.emit_edge(indices[indices.len() - 1], indices[0]);
        }
    }

    /// Merges another line builder through the current transform and
    /// `matrix` (applied first).
    pub fn add_lines(&mut self, other: &LineBuilder, matrix: Option<DMat4>) {
        let transform = self.buffer.transform().current() * matrix.unwrap_or(DMat4::IDENTITY);
        let offset = self.vertex_count() as u32;
        self.buffer
            .extend_from(&other.buffer, |p| transform.transform_point3(p));
        self.edges.extend(other.edges.iter().map(|&i| i + offset));
    }

    /// Checks the color array and the edge list against the vertex count.
    pub fn validate(&self) -> ValidationReport {
        let vertices = self.vertex_count();
        let mut report = ValidationReport::new();
        if let Some(colors) = self.colors() {
            report.check_attribute("colors", colors.len(), vertices);
        }
        report.check_indices(&self.edges, 2, vertices);
        report
    }

    /// Writes the accumulated edges into a sink as one line submesh.
    pub fn build_mesh(&self, sink: &mut impl MeshSink) {
        let indices = IndexBuffer::from_indices(&self.edges, self.vertex_count());
        log::debug!(
            "materializing {} vertices, {} edges as {:?} indices",
            self.vertex_count(),
            self.edge_count(),
            indices.format()
        );

        sink.clear();
        sink.set_positions(vec3_f32(self.positions()));
        if let Some(colors) = self.colors() {
            sink.set_colors(colors.to_vec());
        }
        sink.add_submesh(Topology::Lines, indices);
    }

    /// Materializes into a new [`RenderMesh`].
    pub fn create_mesh(&self) -> RenderMesh {
        let mut mesh = RenderMesh::new();
        self.build_mesh(&mut mesh);
        mesh
    }

    /// Empties all data and resets the transform stack.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.edges.clear();
    }

    pub(crate) fn emit_point(&mut self, position: DVec3) -> u32 {
        let position = self.buffer.transform().transform_point(position);
        self.buffer.push_position(position)
    }

    pub(crate) fn emit_edge(&mut self, a: u32, b: u32) {
        self.edges.extend_from_slice(&[a, b]);
    }
}

impl Transformable for LineBuilder {
    fn transform_stack(&self) -> &TransformStack {
        self.buffer.transform()
    }

    fn transform_stack_mut(&mut self) -> &mut TransformStack {
        self.buffer.transform_mut()
    }
}
