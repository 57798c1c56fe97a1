//! Error types for mesh validation.

use thiserror::Error;

/// Result type for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// Errors reported by mesh invariant checks.
#[derive(Debug, Error)]
pub enum MeshError {
    /// A triangle references a vertex index past the end of the vertex list.
    #[error("triangle {triangle} references vertex {index} but only {vertex_count} vertices exist")]
    IndexOutOfRange {
        /// Offending triangle position.
        triangle: usize,
        /// Out-of-range vertex index.
        index: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },

    /// Per-vertex normals are present but their count differs from the
    /// vertex count.
    #[error("normal count mismatch: {normals} normals for {vertices} vertices")]
    NormalCountMismatch {
        /// Number of normals.
        normals: usize,
        /// Number of vertices.
        vertices: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_out_of_range_message() {
        let err = MeshError::IndexOutOfRange {
            triangle: 7,
            index: 42,
            vertex_count: 10,
        };
        let msg = format!("{err}");
        assert!(msg.contains('7'));
        assert!(msg.contains("42"));
        assert!(msg.contains("10"));
    }
}
