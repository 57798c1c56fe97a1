//! Scan volume preparation for surface reconstruction.
//!
//! This crate turns a raw intensity volume into the inputs the rest of the
//! pipeline consumes:
//!
//! 1. Min-max normalization to `[0, 1]` (degenerate constant volumes
//!    normalize to all zeros rather than dividing by a near-zero span)
//! 2. A coarse bone mask computed from a density window on the original,
//!    un-normalized values
//! 3. Optional isotropic Gaussian smoothing of the normalized volume,
//!    never of the mask
//!
//! # Example
//!
//! ```
//! use volume_prep::{prepare, PrepareParams};
//! use volume_types::{ScalarVolume, Spacing};
//!
//! let mut volume = ScalarVolume::filled((8, 8, 8), -400.0).unwrap();
//! volume.set(4, 4, 4, 900.0);
//!
//! let prepared = prepare(&volume, Spacing::UNIT, true, &PrepareParams::default());
//!
//! let (min, max) = prepared.normalized.value_range();
//! assert!(min >= 0.0 && max <= 1.0);
//! assert_eq!(prepared.coarse_mask.count(), 1);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod gaussian;
mod prepare;

pub use gaussian::smooth_gaussian;
pub use prepare::{normalize, prepare, window_normalize, PrepareParams, Prepared};
