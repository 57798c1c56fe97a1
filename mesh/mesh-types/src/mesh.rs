//! Indexed triangle mesh.

use nalgebra::{Point3, Vector3};

use crate::{Aabb, MeshError, MeshResult, Triangle};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An indexed triangle mesh in physical units (millimetres).
///
/// Vertices and triangles are stored separately, with triangles referencing
/// vertices by index. Per-vertex normals are optional; when present their
/// count matches the vertex count (checked by [`TriangleMesh::validate`]).
///
/// # Example
///
/// ```
/// use mesh_types::TriangleMesh;
/// use nalgebra::Point3;
///
/// let mut mesh = TriangleMesh::new();
/// mesh.vertices.push(Point3::new(0.0, 0.0, 0.0));
/// mesh.vertices.push(Point3::new(1.0, 0.0, 0.0));
/// mesh.vertices.push(Point3::new(0.0, 1.0, 0.0));
/// mesh.triangles.push([0, 1, 2]);
///
/// assert!((mesh.surface_area() - 0.5).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TriangleMesh {
    /// Vertex positions in millimetres.
    pub vertices: Vec<Point3<f64>>,

    /// Triangles as indices into the vertex list, CCW winding seen from
    /// outside.
    pub triangles: Vec<[u32; 3]>,

    /// Optional per-vertex unit normals, same length as `vertices`.
    pub normals: Option<Vec<Vector3<f64>>>,
}

impl TriangleMesh {
    /// Creates a new empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            triangles: Vec::new(),
            normals: None,
        }
    }

    /// Creates a mesh with pre-allocated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
            normals: None,
        }
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns true if the mesh has no triangles.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Returns the concrete triangle at an index, if in range.
    #[must_use]
    pub fn triangle(&self, index: usize) -> Option<Triangle> {
        self.triangles.get(index).map(|&[i0, i1, i2]| {
            Triangle::new(
                self.vertices[i0 as usize],
                self.vertices[i1 as usize],
                self.vertices[i2 as usize],
            )
        })
    }

    /// Iterates over all triangles with concrete positions.
    pub fn iter_triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.triangles.iter().map(|&[i0, i1, i2]| {
            Triangle::new(
                self.vertices[i0 as usize],
                self.vertices[i1 as usize],
                self.vertices[i2 as usize],
            )
        })
    }

    /// Checks the mesh invariants.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::IndexOutOfRange`] if a triangle references a
    /// missing vertex, or [`MeshError::NormalCountMismatch`] if normals are
    /// present with the wrong length.
    pub fn validate(&self) -> MeshResult<()> {
        let vertex_count = self.vertices.len();
        for (t, tri) in self.triangles.iter().enumerate() {
            for &index in tri {
                if index as usize >= vertex_count {
                    return Err(MeshError::IndexOutOfRange {
                        triangle: t,
                        index,
                        vertex_count,
                    });
                }
            }
        }

        if let Some(normals) = &self.normals {
            if normals.len() != vertex_count {
                return Err(MeshError::NormalCountMismatch {
                    normals: normals.len(),
                    vertices: vertex_count,
                });
            }
        }

        Ok(())
    }

    /// Computes the signed volume of the mesh.
    ///
    /// Uses the divergence theorem: the sum of signed tetrahedra volumes
    /// formed by each triangle and the origin. Positive for a closed mesh
    /// with outward (CCW) winding; not meaningful for open meshes.
    #[must_use]
    pub fn signed_volume(&self) -> f64 {
        let mut volume = 0.0;
        for &[i0, i1, i2] in &self.triangles {
            let v0 = &self.vertices[i0 as usize].coords;
            let v1 = &self.vertices[i1 as usize].coords;
            let v2 = &self.vertices[i2 as usize].coords;
            volume += v0.dot(&v1.cross(v2));
        }
        volume / 6.0
    }

    /// Computes the absolute enclosed volume.
    #[inline]
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.signed_volume().abs()
    }

    /// Computes the total surface area.
    #[must_use]
    pub fn surface_area(&self) -> f64 {
        self.iter_triangles().map(|t| t.area()).sum()
    }

    /// Flips winding of every triangle (and any stored normals).
    pub fn flip_winding(&mut self) {
        for tri in &mut self.triangles {
            tri.swap(1, 2);
        }
        if let Some(normals) = &mut self.normals {
            for n in normals.iter_mut() {
                *n = -*n;
            }
        }
    }

    /// Translates every vertex by an offset.
    pub fn translate(&mut self, offset: Vector3<f64>) {
        for v in &mut self.vertices {
            *v += offset;
        }
    }

    /// Axis-aligned bounding box of the vertices.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Unit cube from (0,0,0) to (1,1,1), CCW winding seen from outside.
    pub(crate) fn unit_cube() -> TriangleMesh {
        let mut mesh = TriangleMesh::with_capacity(8, 12);
        for &(x, y, z) in &[
            (0.0, 0.0, 0.0),
            (1.0, 0.0, 0.0),
            (1.0, 1.0, 0.0),
            (0.0, 1.0, 0.0),
            (0.0, 0.0, 1.0),
            (1.0, 0.0, 1.0),
            (1.0, 1.0, 1.0),
            (0.0, 1.0, 1.0),
        ] {
            mesh.vertices.push(Point3::new(x, y, z));
        }

        mesh.triangles.extend_from_slice(&[
            [0, 2, 1],
            [0, 3, 2], // bottom (z=0)
            [4, 5, 6],
            [4, 6, 7], // top (z=1)
            [0, 1, 5],
            [0, 5, 4], // front (y=0)
            [3, 7, 6],
            [3, 6, 2], // back (y=1)
            [0, 4, 7],
            [0, 7, 3], // left (x=0)
            [1, 2, 6],
            [1, 6, 5], // right (x=1)
        ]);
        mesh
    }

    #[test]
    fn empty_mesh() {
        let mesh = TriangleMesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn cube_volume_and_area() {
        let cube = unit_cube();
        assert_relative_eq!(cube.signed_volume(), 1.0, epsilon = 1e-10);
        assert_relative_eq!(cube.surface_area(), 6.0, epsilon = 1e-10);
    }

    #[test]
    fn flipped_cube_has_negative_volume() {
        let mut cube = unit_cube();
        cube.flip_winding();
        assert_relative_eq!(cube.signed_volume(), -1.0, epsilon = 1e-10);
    }

    #[test]
    fn validate_catches_bad_index() {
        let mut mesh = TriangleMesh::new();
        mesh.vertices.push(Point3::origin());
        mesh.triangles.push([0, 1, 2]);
        assert!(matches!(
            mesh.validate(),
            Err(MeshError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn validate_catches_normal_mismatch() {
        let mut mesh = TriangleMesh::new();
        mesh.vertices.push(Point3::origin());
        mesh.normals = Some(vec![Vector3::z(), Vector3::z()]);
        assert!(matches!(
            mesh.validate(),
            Err(MeshError::NormalCountMismatch { .. })
        ));
    }

    #[test]
    fn translate_moves_bounds() {
        let mut cube = unit_cube();
        cube.translate(Vector3::new(10.0, 0.0, 0.0));
        let bounds = cube.bounds();
        assert_relative_eq!(bounds.min.x, 10.0);
        assert_relative_eq!(bounds.max.x, 11.0);
    }

    #[test]
    fn bounds_of_empty_mesh_is_empty() {
        assert!(TriangleMesh::new().bounds().is_empty());
    }
}
