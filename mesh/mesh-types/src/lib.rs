//! Indexed triangle mesh types for surface reconstruction.
//!
//! This crate provides the mesh data model produced by isosurface
//! extraction and consumed by quantitative analysis:
//!
//! - [`TriangleMesh`] - Indexed triangle mesh with positions in physical
//!   millimetres and optional per-vertex normals
//! - [`Triangle`] - Concrete-position triangle for geometric calculations
//! - [`Aabb`] - Axis-aligned bounding box
//!
//! # Winding Order
//!
//! Triangles use **counter-clockwise (CCW) winding** when viewed from
//! outside, so normals point outward by the right-hand rule. A closed
//! mesh with that winding has positive [`TriangleMesh::signed_volume`].
//!
//! # Example
//!
//! ```
//! use mesh_types::TriangleMesh;
//! use nalgebra::Point3;
//!
//! let mut mesh = TriangleMesh::new();
//! mesh.vertices.push(Point3::new(0.0, 0.0, 0.0));
//! mesh.vertices.push(Point3::new(1.0, 0.0, 0.0));
//! mesh.vertices.push(Point3::new(0.0, 1.0, 0.0));
//! mesh.triangles.push([0, 1, 2]);
//!
//! assert_eq!(mesh.vertex_count(), 3);
//! assert_eq!(mesh.triangle_count(), 1);
//! assert!(mesh.validate().is_ok());
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod bounds;
mod error;
mod mesh;
mod triangle;

pub use bounds::Aabb;
pub use error::{MeshError, MeshResult};
pub use mesh::TriangleMesh;
pub use triangle::Triangle;

// Re-export the nalgebra types used in the public API.
pub use nalgebra::{Point3, Vector3};
