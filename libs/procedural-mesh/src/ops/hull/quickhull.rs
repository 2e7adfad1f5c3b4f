//! # QuickHull Algorithm
//!
//! 3D convex hull computation using the QuickHull algorithm.
//! Based on the original algorithm by Barber, Dobkin, and Huhdanpaa.
//!
//! ## Algorithm Steps
//!
//! 1. Merge points closer than the tolerance
//! 2. Find 6 extreme points (min/max on each axis)
//! 3. Build initial tetrahedron from 4 non-coplanar points
//! 4. Assign remaining points to faces they're outside of
//! 5. For each face with outside points:
//!    a. Find farthest point
//!    b. Find horizon edges (boundary of visible faces)
//!    c. Create new faces from horizon to farthest point
//!    d. Reassign outside points to new faces
//! 6. Repeat until no faces have outside points
//!
//! New faces are oriented against the centroid of the initial tetrahedron,
//! which stays strictly inside the hull while it grows.

use super::{HullOutput, HullPoint, HullSolver};
use crate::error::MeshError;
use config::constants::HULL_EPSILON;
use glam::DVec3;
use std::collections::HashMap;

/// Default [`HullSolver`].
///
/// `tolerance` is used both for merging near-duplicate input points and
/// as the minimum plane distance for a point to count as outside a face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuickHull {
    tolerance: f64,
}

impl Default for QuickHull {
    fn default() -> Self {
        Self {
            tolerance: HULL_EPSILON,
        }
    }
}

impl QuickHull {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerance(tolerance: f64) -> Self {
        Self { tolerance }
    }

    #[inline]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

impl HullSolver for QuickHull {
    fn solve(&self, points: &[HullPoint]) -> Result<HullOutput, MeshError> {
        if points.len() < 4 {
            return Err(MeshError::generation(format!(
                "Convex hull requires at least 4 points, got {}",
                points.len()
            )));
        }

        let unique = remove_duplicates(points, self.tolerance);
        if unique.len() < 4 {
            return Err(MeshError::generation(format!(
                "Convex hull requires at least 4 unique points, got {}",
                unique.len()
            )));
        }

        let (faces, interior) = build_initial_simplex(&unique, self.tolerance)?;
        let faces = quickhull_iterate(faces, interior, &unique, self.tolerance)?;
        Ok(compact(&faces, &unique))
    }
}

/// A face of the convex hull (triangle).
#[derive(Debug, Clone)]
struct HullFace {
    /// Indices of the three vertices
    vertices: [usize; 3],
    /// Outward-pointing normal
    normal: DVec3,
    /// Distance from origin along normal
    distance: f64,
    /// Points outside this face (indices into points array)
    outside_points: Vec<usize>,
}

impl HullFace {
    fn new(v0: usize, v1: usize, v2: usize, points: &[DVec3]) -> Self {
        let p0 = points[v0];
        let normal = (points[v1] - p0).cross(points[v2] - p0).normalize_or_zero();
        Self {
            vertices: [v0, v1, v2],
            normal,
            distance: normal.dot(p0),
            outside_points: Vec::new(),
        }
    }

    /// Creates a face whose normal points away from `interior`.
    fn outward(v0: usize, v1: usize, v2: usize, interior: DVec3, points: &[DVec3]) -> Self {
        let face = Self::new(v0, v1, v2, points);
        if face.signed_distance(interior) > 0.0 {
            Self::new(v0, v2, v1, points)
        } else {
            face
        }
    }

    fn signed_distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) - self.distance
    }

    fn is_outside(&self, point: DVec3, tolerance: f64) -> bool {
        self.signed_distance(point) > tolerance
    }

    fn farthest_point(&self, points: &[DVec3]) -> Option<usize> {
        self.outside_points
            .iter()
            .copied()
            .max_by(|&a, &b| {
                let da = self.signed_distance(points[a]);
                let db = self.signed_distance(points[b]);
                da.total_cmp(&db)
            })
    }

    fn edges(&self) -> [(usize, usize); 3] {
        let [a, b, c] = self.vertices;
        [(a, b), (b, c), (c, a)]
    }
}

/// Merges points closer than `tolerance`, keeping the first occurrence.
fn remove_duplicates(points: &[HullPoint], tolerance: f64) -> Vec<DVec3> {
    let mut unique: Vec<DVec3> = Vec::with_capacity(points.len());
    for p in points {
        let is_duplicate = unique
            .iter()
            .any(|u| u.distance(p.position) <= tolerance);
        if !is_duplicate {
            unique.push(p.position);
        }
    }
    unique
}

/// Builds the initial tetrahedron from extreme points.
///
/// Returns the four faces with their outside sets and the interior
/// reference point used to orient all later faces.
fn build_initial_simplex(
    points: &[DVec3],
    tolerance: f64,
) -> Result<(Vec<HullFace>, DVec3), MeshError> {
    let mut extremes = [0usize; 6];
    for (i, p) in points.iter().enumerate() {
        for axis in 0..3 {
            if p[axis] < points[extremes[2 * axis]][axis] {
                extremes[2 * axis] = i;
            }
            if p[axis] > points[extremes[2 * axis + 1]][axis] {
                extremes[2 * axis + 1] = i;
            }
        }
    }

    let (p0, p1) = find_farthest_pair(&extremes, points);
    let p2 = find_farthest_from_line(p0, p1, points, tolerance)?;
    let p3 = find_farthest_from_plane(p0, p1, p2, points, tolerance)?;

    let interior = (points[p0] + points[p1] + points[p2] + points[p3]) / 4.0;
    let mut faces = vec![
        HullFace::outward(p0, p1, p2, interior, points),
        HullFace::outward(p0, p2, p3, interior, points),
        HullFace::outward(p0, p3, p1, interior, points),
        HullFace::outward(p1, p3, p2, interior, points),
    ];

    let used = [p0, p1, p2, p3];
    let remaining: Vec<usize> = (0..points.len()).filter(|i| !used.contains(i)).collect();
    assign_outside(&mut faces, &remaining, points, tolerance);

    Ok((faces, interior))
}

/// Finds the pair of points with maximum distance.
fn find_farthest_pair(indices: &[usize], points: &[DVec3]) -> (usize, usize) {
    let mut max_dist = -1.0;
    let mut best = (indices[0], indices[1]);

    for (i, &a) in indices.iter().enumerate() {
        for &b in &indices[i + 1..] {
            let dist = points[a].distance_squared(points[b]);
            if dist > max_dist {
                max_dist = dist;
                best = (a, b);
            }
        }
    }
    best
}

fn find_farthest_from_line(
    p0: usize,
    p1: usize,
    points: &[DVec3],
    tolerance: f64,
) -> Result<usize, MeshError> {
    let line_dir = (points[p1] - points[p0]).normalize_or_zero();
    let mut max_dist = tolerance;
    let mut best = None;

    for (i, p) in points.iter().enumerate() {
        if i == p0 || i == p1 {
            continue;
        }
        let v = *p - points[p0];
        let dist = (v - v.dot(line_dir) * line_dir).length();
        if dist > max_dist {
            max_dist = dist;
            best = Some(i);
        }
    }

    best.ok_or_else(|| MeshError::generation("All points are collinear"))
}

fn find_farthest_from_plane(
    p0: usize,
    p1: usize,
    p2: usize,
    points: &[DVec3],
    tolerance: f64,
) -> Result<usize, MeshError> {
    let normal = (points[p1] - points[p0])
        .cross(points[p2] - points[p0])
        .normalize_or_zero();
    let mut max_dist = tolerance;
    let mut best = None;

    for (i, p) in points.iter().enumerate() {
        if i == p0 || i == p1 || i == p2 {
            continue;
        }
        let dist = normal.dot(*p - points[p0]).abs();
        if dist > max_dist {
            max_dist = dist;
            best = Some(i);
        }
    }

    best.ok_or_else(|| MeshError::generation("All points are coplanar"))
}

/// Hands each point to the first face it lies outside of. Points outside
/// no face are inside the current hull and dropped.
fn assign_outside(faces: &mut [HullFace], candidates: &[usize], points: &[DVec3], tolerance: f64) {
    for &idx in candidates {
        let point = points[idx];
        if let Some(face) = faces.iter_mut().find(|f| f.is_outside(point, tolerance)) {
            face.outside_points.push(idx);
        }
    }
}

/// Main QuickHull iteration.
///
/// Every round consumes at least one outside point, so more rounds than
/// input points means the face structure has become inconsistent.
fn quickhull_iterate(
    mut faces: Vec<HullFace>,
    interior: DVec3,
    points: &[DVec3],
    tolerance: f64,
) -> Result<Vec<HullFace>, MeshError> {
    let max_iterations = points.len();
    let mut iteration = 0;

    while let Some(face_idx) = faces.iter().position(|f| !f.outside_points.is_empty()) {
        iteration += 1;
        if iteration > max_iterations {
            return Err(MeshError::generation(format!(
                "Convex hull did not converge after {max_iterations} iterations"
            )));
        }

        let Some(farthest) = faces[face_idx].farthest_point(points) else {
            break;
        };
        let apex = points[farthest];

        let visible: Vec<usize> = faces
            .iter()
            .enumerate()
            .filter(|(_, f)| f.is_outside(apex, tolerance))
            .map(|(i, _)| i)
            .collect();

        let horizon = find_horizon_edges(&faces, &visible);

        let mut reassign: Vec<usize> = visible
            .iter()
            .flat_map(|&idx| faces[idx].outside_points.iter().copied())
            .collect();
        reassign.retain(|&p| p != farthest);

        // Descending order keeps the remaining indices valid.
        let mut visible_sorted = visible;
        visible_sorted.sort_unstable_by(|a, b| b.cmp(a));
        for idx in visible_sorted {
            faces.swap_remove(idx);
        }

        let first_new = faces.len();
        faces.extend(
            horizon
                .into_iter()
                .map(|(e0, e1)| HullFace::outward(e0, e1, farthest, interior, points)),
        );
        // New faces first, then the untouched ones.
        let (old, new) = faces.split_at_mut(first_new);
        for &idx in &reassign {
            let point = points[idx];
            if let Some(face) = new
                .iter_mut()
                .chain(old.iter_mut())
                .find(|f| f.is_outside(point, tolerance))
            {
                face.outside_points.push(idx);
            }
        }
    }

    Ok(faces)
}

/// Edges of the visible region that border a non-visible face, in the
/// winding of their visible face.
fn find_horizon_edges(faces: &[HullFace], visible: &[usize]) -> Vec<(usize, usize)> {
    let mut edge_count: HashMap<(usize, usize), usize> = HashMap::new();
    for &idx in visible {
        for (a, b) in faces[idx].edges() {
            *edge_count.entry((a.min(b), a.max(b))).or_insert(0) += 1;
        }
    }

    visible
        .iter()
        .flat_map(|&idx| faces[idx].edges())
        .filter(|&(a, b)| edge_count[&(a.min(b), a.max(b))] == 1)
        .collect()
}

/// Drops unused points and renumbers faces in first-use order.
fn compact(faces: &[HullFace], points: &[DVec3]) -> HullOutput {
    let mut remap: HashMap<usize, usize> = HashMap::new();
    let mut output = HullOutput {
        points: Vec::new(),
        faces: Vec::with_capacity(faces.len()),
    };

    for face in faces {
        let triangle = face.vertices.map(|v| {
            *remap.entry(v).or_insert_with(|| {
                output.points.push(points[v]);
                output.points.len() - 1
            })
        });
        output.faces.push(triangle);
    }
    output
}

/// Returns true if every undirected edge is shared by exactly two faces.
pub(crate) fn is_closed(faces: &[[usize; 3]]) -> bool {
    let mut edge_count: HashMap<(usize, usize), usize> = HashMap::new();
    for &[a, b, c] in faces {
        for (u, v) in [(a, b), (b, c), (c, a)] {
            *edge_count.entry((u.min(v), u.max(v))).or_insert(0) += 1;
        }
    }
    !faces.is_empty() && edge_count.values().all(|&n| n == 2)
}

/// Returns the number of distinct vertices referenced by `faces`.
#[cfg(test)]
pub(crate) fn referenced_vertices(faces: &[[usize; 3]]) -> usize {
    use std::collections::HashSet;
    faces.iter().flatten().collect::<HashSet<_>>().len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solve(points: &[DVec3]) -> Result<HullOutput, MeshError> {
        let points: Vec<HullPoint> = points.iter().copied().map(HullPoint::from).collect();
        QuickHull::new().solve(&points)
    }

    fn cube_corners() -> Vec<DVec3> {
        (0..8)
            .map(|i| {
                DVec3::new(
                    f64::from(i & 1),
                    f64::from((i >> 1) & 1),
                    f64::from((i >> 2) & 1),
                )
            })
            .collect()
    }

    #[test]
    fn test_convex_hull_tetrahedron() {
        let output = solve(&[
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.5, 1.0, 0.0),
            DVec3::new(0.5, 0.5, 1.0),
        ])
        .unwrap();

        assert_eq!(output.points.len(), 4);
        assert_eq!(output.faces.len(), 4);
        assert!(is_closed(&output.faces));
    }

    #[test]
    fn test_convex_hull_cube_vertices() {
        let output = solve(&cube_corners()).unwrap();
        assert_eq!(output.points.len(), 8);
        assert_eq!(output.faces.len(), 12);
        assert!(is_closed(&output.faces));
        assert_eq!(referenced_vertices(&output.faces), 8);
    }

    #[test]
    fn test_convex_hull_with_interior_points() {
        let mut points = cube_corners();
        points.push(DVec3::splat(0.5));
        points.push(DVec3::new(0.25, 0.75, 0.5));

        let output = solve(&points).unwrap();
        assert_eq!(output.points.len(), 8);
        assert_eq!(output.faces.len(), 12);
    }

    #[test]
    fn test_faces_wind_outward() {
        let output = solve(&cube_corners()).unwrap();
        let center = DVec3::splat(0.5);
        for [a, b, c] in &output.faces {
            let (pa, pb, pc) = (output.points[*a], output.points[*b], output.points[*c]);
            let normal = (pb - pa).cross(pc - pa);
            assert!(normal.dot(pa - center) > 0.0);
        }
    }

    #[test]
    fn test_duplicates_are_merged() {
        let mut points = cube_corners();
        points.extend(cube_corners());
        points.push(DVec3::new(1.0, 1.0, 1.0 + 1e-12));

        let output = solve(&points).unwrap();
        assert_eq!(output.points.len(), 8);
    }

    #[test]
    fn test_convex_hull_too_few_points() {
        let result = solve(&[DVec3::ZERO, DVec3::X, DVec3::Y]);
        assert!(matches!(result, Err(MeshError::GenerationFailed { .. })));

        let result = solve(&[DVec3::ZERO, DVec3::ZERO, DVec3::X, DVec3::Y]);
        assert!(matches!(result, Err(MeshError::GenerationFailed { .. })));
    }

    #[test]
    fn test_convex_hull_degenerate_input() {
        let collinear: Vec<DVec3> = (0..6).map(|i| DVec3::X * f64::from(i)).collect();
        assert!(solve(&collinear).is_err());

        let coplanar = [DVec3::ZERO, DVec3::X, DVec3::Z, DVec3::new(1.0, 0.0, 1.0)];
        assert!(solve(&coplanar).is_err());
    }

    #[test]
    fn test_is_closed_detects_open_surface() {
        assert!(is_closed(&[[0, 1, 2], [0, 2, 3], [0, 3, 1], [1, 3, 2]]));
        assert!(!is_closed(&[[0, 1, 2], [0, 2, 3]]));
        assert!(!is_closed(&[]));
    }
}
