//! Vertebra segmentation from the longitudinal bone-density profile.
//!
//! No trained model is involved; segmentation is pure signal analysis:
//!
//! 1. Count bone voxels per axial slice (the 1D density profile)
//! 2. Normalize and smooth the profile with a 1D Gaussian
//! 3. Find local minima of the smoothed profile - the intervertebral disc
//!    spaces - by peak detection on the inverted signal, with a minimum
//!    prominence and a minimum physical separation
//! 4. Cut the axial range at the minima; each segment above a minimum
//!    slice count is one vertebra
//! 5. Compute per-vertebra biometrics and a rule-based clinical status
//!
//! # Example
//!
//! ```
//! use spine_detect::{detect, DetectParams};
//! use volume_types::{BoneMask, ScalarVolume, Spacing};
//!
//! // A mask with no bone yields no vertebrae, as an empty list.
//! let volume = ScalarVolume::filled((30, 10, 10), -1024.0).unwrap();
//! let mask = BoneMask::new((30, 10, 10)).unwrap();
//!
//! let vertebrae = detect(&mask, &volume, Spacing::UNIT, &DetectParams::default());
//! assert!(vertebrae.is_empty());
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod detect;
mod params;
mod profile;

pub use detect::detect;
pub use params::DetectParams;
pub use profile::{bone_profile, find_peaks, smooth_profile};
