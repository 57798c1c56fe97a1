//! Core volumetric grid types.
//!
//! This crate provides the data model shared by the reconstruction pipeline:
//!
//! - [`ScalarVolume`] - A 3D scalar intensity grid in calibrated density units
//! - [`Spacing`] - Physical voxel spacing in millimetres
//! - [`BoneMask`] - A boolean grid marking voxels classified as bone
//!
//! All grids are indexed `(z, y, x)` with `x` varying fastest, matching the
//! slice-stack layout of cross-sectional scan data: `z` is the longitudinal
//! (slice) axis, `y` the anteroposterior axis, `x` the lateral axis.
//!
//! # Example
//!
//! ```
//! use volume_types::{ScalarVolume, Spacing};
//!
//! let volume = ScalarVolume::filled((4, 8, 8), -1024.0).unwrap();
//! let spacing = Spacing::new(2.0, 0.5, 0.5).unwrap();
//!
//! assert_eq!(volume.shape(), (4, 8, 8));
//! assert_eq!(spacing.voxel_volume_mm3(), 0.5);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod error;
mod mask;
mod spacing;
mod volume;
mod window;

pub use error::{VolumeError, VolumeResult};
pub use mask::BoneMask;
pub use spacing::Spacing;
pub use volume::ScalarVolume;
pub use window::{DensityWindow, ValueUnits};
