//! Shared types for vertebra analysis pipelines.
//!
//! This crate carries the data records and interface traits that connect
//! the pipeline stages:
//!
//! - [`Vertebra`] - Per-vertebra segmentation record with biometrics
//! - [`VertebraStatus`] - Clinical status taxonomy with display colors
//! - [`assign_labels`] - Anatomical label assignment (caudal to cranial)
//! - [`AnomalyRecord`] / [`AnomalyDetector`] - Optional black-box anomaly
//!   detection with a no-op fallback
//! - [`ProgressSink`] / [`CancelToken`] - Progress reporting and
//!   cooperative cancellation primitives

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod anomaly;
mod labels;
mod progress;
mod status;
mod vertebra;

pub use anomaly::{AnomalyDetector, AnomalyRecord, DetectorError, NoopDetector};
pub use labels::{assign_labels, LabelOrigin, LABEL_POOL};
pub use progress::{CancelToken, FnProgressSink, ProgressSink};
pub use status::VertebraStatus;
pub use vertebra::Vertebra;
