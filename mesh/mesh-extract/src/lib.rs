//! Isosurface extraction from scan volumes.
//!
//! This crate turns a bone mask or scalar volume into a triangle mesh:
//!
//! 1. **Marching cubes** at a configurable iso level, with an optional
//!    subsampling step that trades fidelity for speed
//! 2. **Decimation** when the raw surface exceeds a triangle budget
//! 3. **Consistent normals**, auto-oriented outward
//! 4. **Laplacian smoothing** with a small relaxation factor
//!
//! An iso level that intersects nothing, or a surface with fewer than 10
//! vertices, is an expected outcome and yields `None` rather than an error.
//! Post-processing steps are individually fault-tolerant: a step that
//! cannot improve the mesh logs a warning and passes the mesh through
//! unchanged.
//!
//! # Example
//!
//! ```
//! use mesh_extract::{extract_from_mask, ExtractParams};
//! use volume_types::{BoneMask, Spacing};
//!
//! // A 2x2x2 solid block inside an 8^3 grid.
//! let mut mask = BoneMask::new((8, 8, 8)).unwrap();
//! for z in 3..5 {
//!     for y in 3..5 {
//!         for x in 3..5 {
//!             mask.set(z, y, x, true);
//!         }
//!     }
//! }
//!
//! let params = ExtractParams::default().with_step_size(1);
//! let mesh = extract_from_mask(&mask, Spacing::UNIT, &params);
//! assert!(mesh.is_some());
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod extract;
mod field;
mod marching_cubes;
mod params;
mod postprocess;
mod tables;

pub use extract::{extract, extract_from_mask};
pub use field::ScalarField;
pub use marching_cubes::marching_cubes;
pub use params::ExtractParams;
pub use postprocess::{compute_normals, decimate, smooth_laplacian};
