//! # Voxel Mesh Builder
//!
//! Meshes a fixed-size 3-D grid of typed cells. Each cell value is
//! classified through a [`VoxelStyle`]; every visible cell emits one quad per
//! face whose neighbor is not solid.
//!
//! ## Algorithm
//!
//! ```text
//! for z, y, x (x fastest):
//!     if !visible(cell): continue
//!     for dir in FaceDirection::ALL:
//!         neighbor = cell + dir
//!         out of bounds → exposed iff generate_boundary && !solid(out_of_bounds)
//!         in bounds     → exposed iff !solid(neighbor)
//!         exposed       → one quad (4 vertices, 2 triangles)
//! ```
//!
//! Coplanar faces are never merged: the vertex and triangle counts are
//! exactly `4 * faces` and `2 * faces`.

use crate::face::{FaceDirection, UNIT_FACE_UVS};
use crate::mesh::MeshBuilder;
use crate::sink::{MeshSink, RenderMesh};
use crate::transform::{TransformStack, Transformable};
use glam::{DVec2, DVec3, IVec3, UVec3};


/// Classification hooks for a voxel cell type.
///
/// Only `is_visible` and `is_solid` are required; the face attribute hooks
/// default to no color and the unit UV rectangle.
pub trait VoxelStyle<T> {
    /// Whether the cell emits faces at all.
    fn is_visible(&self, cell: &T) -> bool;

    /// Whether the cell hides the faces of its neighbors.
    fn is_solid(&self, cell: &T) -> bool;

    /// Vertex color of one face, if any.
    fn face_color(&self, _cell: &T, _direction: FaceDirection) -> Option<[f32; 4]> {
        None
    }

    /// UV corners of one face, in [`FaceDirection::unit_corners`] order.
    fn face_uv(&self, _cell: &T, _direction: FaceDirection) -> [DVec2; 4] {
        UNIT_FACE_UVS
    }
}

/// [`VoxelStyle`] built from two predicates.
///
/// # Example
///
/// ```rust
/// use procedural_mesh::{PredicateStyle, VoxelGrid};
/// use glam::UVec3;
///
/// let style = PredicateStyle::new(|c: &u8| *c != 0, |c: &u8| *c != 0);
/// let mut grid = VoxelGrid::new(UVec3::splat(2), style);
/// grid.set(0, 0, 0, 1);
/// let mesh = grid.create_mesh();
/// assert_eq!(mesh.vertex_count(), 24);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PredicateStyle<V, S> {
    visible: V,
    solid: S,
}

impl<V, S> PredicateStyle<V, S> {
    pub fn new(visible: V, solid: S) -> Self {
        Self { visible, solid }
    }
}

impl<T, V, S> VoxelStyle<T> for PredicateStyle<V, S>
where
    V: Fn(&T) -> bool,
    S: Fn(&T) -> bool,
{
    fn is_visible(&self, cell: &T) -> bool {
        (self.visible)(cell)
    }

    fn is_solid(&self, cell: &T) -> bool {
        (self.solid)(cell)
    }
}

/// Implicit classification of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellClass {
    /// Not visible; emits nothing.
    Empty,
    /// Visible but every face is covered.
    Hidden,
    /// Visible with at least one exposed face.
    Exposed,
}

/// Fixed-size voxel grid with its own triangle builder.
#[derive(Debug, Clone)]
pub struct VoxelGrid<T, S> {
    dimensions: UVec3,
    cells: Vec<T>,
    style: S,
    out_of_bounds: T,
    generate_boundary: bool,
    cell_size: DVec3,
    builder: MeshBuilder,
}

impl<T, S> VoxelGrid<T, S>
where
    T: Clone + Default,
    S: VoxelStyle<T>,
{
    /// Creates a grid filled with `T::default()`.
    ///
    /// Boundary faces are generated and out-of-bounds cells read as
    /// `T::default()`.
    pub fn new(dimensions: UVec3, style: S) -> Self {
        let len = dimensions.x as usize * dimensions.y as usize * dimensions.z as usize;
        Self {
            dimensions,
            cells: vec![T::default(); len],
            style,
            out_of_bounds: T::default(),
            generate_boundary: true,
            cell_size: DVec3::ONE,
            builder: MeshBuilder::new(),
        }
    }

    // =========================================================================
    // CONFIGURATION
    // =========================================================================

    #[inline]
    pub fn dimensions(&self) -> UVec3 {
        self.dimensions
    }

    #[inline]
    pub fn style(&self) -> &S {
        &self.style
    }

    #[inline]
    pub fn out_of_bounds(&self) -> &T {
        &self.out_of_bounds
    }

    /// Sets the value neighbors outside the grid are read as.
    pub fn set_out_of_bounds(&mut self, value: T) {
        self.out_of_bounds = value;
    }

    #[inline]
    pub fn generate_boundary(&self) -> bool {
        self.generate_boundary
    }

    /// Enables or disables faces towards the outside of the grid.
    pub fn set_generate_boundary(&mut self, generate: bool) {
        self.generate_boundary = generate;
    }

    #[inline]
    pub fn cell_size(&self) -> DVec3 {
        self.cell_size
    }

    pub fn set_cell_size(&mut self, size: DVec3) {
        self.cell_size = size;
    }

    /// Reserves builder capacity for `faces` quads.
    pub fn reserve_faces(&mut self, faces: usize) {
        self.builder.reserve(faces * 4, faces * 6);
    }

    // =========================================================================
    // CELLS
    // =========================================================================

    fn index(&self, x: u32, y: u32, z: u32) -> Option<usize> {
        let d = self.dimensions;
        (x < d.x && y < d.y && z < d.z)
            .then(|| x as usize + d.x as usize * (y as usize + d.y as usize * z as usize))
    }

    fn index_signed(&self, position: IVec3) -> Option<usize> {
        if position.min_element() < 0 {
            return None;
        }
        let p = position.as_uvec3();
        self.index(p.x, p.y, p.z)
    }

    /// Returns the cell at `(x, y, z)`, or `None` outside the grid.
    pub fn get(&self, x: u32, y: u32, z: u32) -> Option<&T> {
        self.index(x, y, z).map(|i| &self.cells[i])
    }

    /// Stores a cell value; returns false outside the grid.
    pub fn set(&mut self, x: u32, y: u32, z: u32, value: T) -> bool {
        match self.index(x, y, z) {
            Some(i) => {
                self.cells[i] = value;
                true
            }
            None => false,
        }
    }

    /// Fills every cell with `value`.
    pub fn fill(&mut self, value: T) {
        self.cells.fill(value);
    }

    // =========================================================================
    // CLASSIFICATION
    // =========================================================================

    /// Returns true if the face of cell `(x, y, z)` towards `direction` is
    /// exposed. The cell's own visibility is not consulted.
    pub fn check_face(&self, x: u32, y: u32, z: u32, direction: FaceDirection) -> bool {
        let neighbor = IVec3::new(x as i32, y as i32, z as i32) + direction.offset();
        match self.index_signed(neighbor) {
            Some(i) => !self.style.is_solid(&self.cells[i]),
            None => self.generate_boundary && !self.style.is_solid(&self.out_of_bounds),
        }
    }

    /// Classifies a cell from its visibility and its six neighbors.
    ///
    /// Cells outside the grid are [`CellClass::Empty`].
    pub fn classify(&self, x: u32, y: u32, z: u32) -> CellClass {
        match self.get(x, y, z) {
            Some(cell) if self.style.is_visible(cell) => {
                if FaceDirection::ALL
                    .into_iter()
                    .any(|dir| self.check_face(x, y, z, dir))
                {
                    CellClass::Exposed
                } else {
                    CellClass::Hidden
                }
            }
            _ => CellClass::Empty,
        }
    }

    // =========================================================================
    // MESHING
    // =========================================================================

    /// Regenerates the triangle data from the current cells.
    ///
    /// Returns the number of emitted faces.
    pub fn generate(&mut self) -> usize {
        self.builder.clear_geometry();
        let d = self.dimensions;
        let mut faces = 0;

        for z in 0..d.z {
            for y in 0..d.y {
                for x in 0..d.x {
                    let Some(i) = self.index(x, y, z) else { continue };
                    if !self.style.is_visible(&self.cells[i]) {
                        continue;
                    }
                    for dir in FaceDirection::ALL {
                        if self.check_face(x, y, z, dir) {
                            self.emit_face(i, UVec3::new(x, y, z), dir);
                            faces += 1;
                        }
                    }
                }
            }
        }

        log::debug!(
            "voxel grid {:?}: {} faces, {} vertices",
            d,
            faces,
            self.builder.vertex_count()
        );
        faces
    }

    fn emit_face(&mut self, index: usize, cell: UVec3, direction: FaceDirection) {
        let value = &self.cells[index];
        let color = self.style.face_color(value, direction);
        let uvs = self.style.face_uv(value, direction);
        let origin = cell.as_dvec3() * self.cell_size;
        let size = self.cell_size;
        let corners = direction.unit_corners().map(|c| origin + c * size);

        self.builder.set_color(color);
        self.builder.add_quad(corners, direction.normal(), uvs);
    }

    /// Regenerates and writes the mesh into a sink.
    pub fn build_mesh(&mut self, sink: &mut impl MeshSink) -> usize {
        let faces = self.generate();
        self.builder.build_mesh(sink);
        faces
    }

    /// Regenerates and materializes into a new [`RenderMesh`].
    pub fn create_mesh(&mut self) -> RenderMesh {
        let mut mesh = RenderMesh::new();
        self.build_mesh(&mut mesh);
        mesh
    }

    /// Returns the triangle builder holding the last generated mesh.
    #[inline]
    pub fn builder(&self) -> &MeshBuilder {
        &self.builder
    }

    /// Resets every cell to `T::default()` and empties the buffers.
    pub fn clear(&mut self) {
        self.cells.fill(T::default());
        self.builder.clear();
    }
}

impl<T, S> Transformable for VoxelGrid<T, S> {
    fn transform_stack(&self) -> &TransformStack {
        self.builder.transform_stack()
    }

    fn transform_stack_mut(&mut self) -> &mut TransformStack {
        self.builder.transform_stack_mut()
    }
}
