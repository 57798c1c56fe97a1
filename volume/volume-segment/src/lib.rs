//! Density-window bone segmentation.
//!
//! Thresholds a scan volume into a bone mask using calibrated density
//! windows, with optional cleanup:
//!
//! - **Presets** - Named anatomical windows (spine, cortical, ...)
//! - **Dual-mode thresholding** - Works on calibrated density units or
//!   volumes already normalized to `[0, 1]`
//! - **Cleanup** - Per-slice hole filling plus removal of small
//!   disconnected components, preserving every component above a size
//!   threshold (disjoint vertebral bodies survive)
//!
//! # Example
//!
//! ```
//! use volume_segment::{segment, segment_with_cleanup, SegmentParams, SegmentPreset};
//! use volume_types::ScalarVolume;
//!
//! let mut volume = ScalarVolume::filled((6, 6, 6), -400.0).unwrap();
//! for z in 1..5 {
//!     for y in 1..5 {
//!         for x in 1..5 {
//!             volume.set(z, y, x, 700.0);
//!         }
//!     }
//! }
//!
//! let params = SegmentParams::from_preset(SegmentPreset::Spine);
//! let mask = segment(&volume, &params);
//! assert_eq!(mask.count(), 64);
//!
//! let cleaned = segment_with_cleanup(&volume, &params, 10);
//! assert_eq!(cleaned.count(), 64);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod components;
mod error;
mod presets;
mod segment;

pub use components::{fill_slice_holes, label_components, CleanupOutcome, ComponentLabels};
pub use error::{SegmentError, SegmentResult};
pub use presets::SegmentPreset;
pub use segment::{
    cleanup_mask, segment, segment_with_cleanup, volume_fraction, SegmentParams,
    DEFAULT_MIN_COMPONENT_SIZE,
};
