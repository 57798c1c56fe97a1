//! Error types for volumetric grids.

use thiserror::Error;

/// Result type for volumetric grid operations.
pub type VolumeResult<T> = Result<T, VolumeError>;

/// Errors that can occur when constructing volumetric grids.
#[derive(Debug, Error)]
pub enum VolumeError {
    /// Grid shape has a zero-length axis.
    #[error("invalid grid shape ({nz}, {ny}, {nx}): every axis must be at least 1")]
    InvalidShape {
        /// Longitudinal (slice) axis length.
        nz: usize,
        /// Anteroposterior axis length.
        ny: usize,
        /// Lateral axis length.
        nx: usize,
    },

    /// Value buffer length does not match the grid shape.
    #[error("value count mismatch: shape implies {expected} voxels, got {actual}")]
    ValueCountMismatch {
        /// Voxel count implied by the shape.
        expected: usize,
        /// Actual length of the provided buffer.
        actual: usize,
    },

    /// Voxel spacing is not strictly positive and finite.
    #[error("invalid spacing ({dz}, {dy}, {dx}) mm: all components must be positive and finite")]
    InvalidSpacing {
        /// Slice spacing in mm.
        dz: f64,
        /// Row spacing in mm.
        dy: f64,
        /// Column spacing in mm.
        dx: f64,
    },

    /// Two grids that must share a shape do not.
    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        /// Shape of the reference grid.
        expected: (usize, usize, usize),
        /// Shape of the offending grid.
        actual: (usize, usize, usize),
    },
}
