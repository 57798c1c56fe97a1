//! Aggregate quantitative analysis of a reconstruction.
//!
//! Collects mesh, mask, and vertebra data into a flat map of named scalar
//! metrics - bone volume, intensity statistics, per-status counts, a
//! curvature estimate - plus a clinical summary with plain-language
//! recommendations. Everything is recomputed from scratch on each call;
//! there is no incremental state.
//!
//! # Example
//!
//! ```
//! use spine_analysis::{analyze, AnalysisInputs};
//! use volume_types::{ScalarVolume, Spacing};
//!
//! let volume = ScalarVolume::filled((10, 10, 10), -1024.0).unwrap();
//! let metrics = analyze(&AnalysisInputs {
//!     mesh: None,
//!     anomalies: &[],
//!     vertebrae: &[],
//!     volume: &volume,
//!     mask: None,
//!     spacing: Spacing::UNIT,
//! });
//!
//! assert_eq!(metrics.get("vertebra_count"), Some(0.0));
//! assert_eq!(metrics.get("estimated_cobb_angle_deg"), Some(0.0));
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod analyze;
mod curvature;
mod metrics;
mod summary;

pub use analyze::{analyze, AnalysisInputs};
pub use curvature::estimate_cobb_angle;
pub use metrics::QuantitativeMetrics;
pub use summary::{generate_summary, ClinicalSummary};
