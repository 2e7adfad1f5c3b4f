//! # Topology Conversion
//!
//! Derives edge lists and point lists from an indexed mesh. Vertex
//! attributes are copied unchanged; only the index lists are rewritten,
//! one output submesh per converted input submesh.
//!
//! ## Edge Order
//!
//! Triangles `(a, b, c)` yield `a-b, b-c, c-a`; quads `(a, b, c, d)` yield
//! `a-b, b-c, c-d, d-a`. With deduplication an edge is dropped when the
//! same unordered pair was already emitted for the current submesh. The
//! check is a hash lookup per edge, so a submesh converts in expected
//! linear time.

use crate::error::MeshError;
use crate::sink::{IndexBuffer, MeshSink, RenderMesh, SubMesh, Topology};
use std::collections::HashSet;

/// Converts every triangle and quad submesh into a line submesh.
///
/// Line and point submeshes cannot be converted; they are skipped with a
/// warning and the remaining submeshes are still written.
///
/// # Example
///
/// ```rust
/// use procedural_mesh::{to_line_mesh, BoxFaces, MeshBuilder};
/// use glam::DVec3;
///
/// let mut builder = MeshBuilder::new();
/// builder.add_box(DVec3::ONE, BoxFaces::POS_Y).unwrap();
/// let lines = to_line_mesh(&builder.create_mesh(), true);
///
/// // Two triangles share their diagonal.
/// assert_eq!(lines.indices_u32(0).unwrap().len(), 2 * 5);
/// ```
pub fn to_line_mesh(source: &RenderMesh, avoid_duplicates: bool) -> RenderMesh {
    let mut mesh = RenderMesh::new();
    build_line_mesh(source, &mut mesh, avoid_duplicates);
    mesh
}

/// Writes the line conversion of `source` into a sink.
pub fn build_line_mesh(source: &RenderMesh, sink: &mut impl MeshSink, avoid_duplicates: bool) {
    sink.clear();
    source.write_attributes(sink);
    for (index, submesh) in source.submeshes().iter().enumerate() {
        match submesh_edges(submesh, avoid_duplicates) {
            Ok(edges) => {
                let indices = IndexBuffer::from_indices(&edges, source.vertex_count());
                sink.add_submesh(Topology::Lines, indices);
            }
            Err(err) => log::warn!("skipping submesh {index} in line conversion: {err}"),
        }
    }
}

/// Converts every submesh into a point submesh of its distinct vertices.
pub fn to_point_mesh(source: &RenderMesh) -> RenderMesh {
    let mut mesh = RenderMesh::new();
    build_point_mesh(source, &mut mesh);
    mesh
}

/// Writes the point conversion of `source` into a sink.
pub fn build_point_mesh(source: &RenderMesh, sink: &mut impl MeshSink) {
    sink.clear();
    source.write_attributes(sink);
    for submesh in source.submeshes() {
        let points = distinct_indices(&submesh.indices.to_u32());
        let indices = IndexBuffer::from_indices(&points, source.vertex_count());
        sink.add_submesh(Topology::Points, indices);
    }
}

/// Returns the flat edge list of one submesh.
///
/// Trailing indices that do not form a full primitive are ignored.
pub fn submesh_edges(submesh: &SubMesh, avoid_duplicates: bool) -> Result<Vec<u32>, MeshError> {
    match submesh.topology {
        Topology::Triangles | Topology::Quads => {}
        topology => return Err(MeshError::UnsupportedTopology { topology }),
    }

    let stride = submesh.topology.stride();
    let indices = submesh.indices.to_u32();
    let mut edges = Vec::with_capacity(indices.len() * 2);
    let mut seen: HashSet<(u32, u32)> = HashSet::new();

    for primitive in indices.chunks_exact(stride) {
        for (k, &a) in primitive.iter().enumerate() {
            let b = primitive[(k + 1) % stride];
            if avoid_duplicates && !seen.insert((a.min(b), a.max(b))) {
                continue;
            }
            edges.extend_from_slice(&[a, b]);
        }
    }
    Ok(edges)
}

/// Distinct indices in first-occurrence order.
fn distinct_indices(indices: &[u32]) -> Vec<u32> {
    let mut seen = HashSet::with_capacity(indices.len());
    indices.iter().copied().filter(|&i| seen.insert(i)).collect()
}
