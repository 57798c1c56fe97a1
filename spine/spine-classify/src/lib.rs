//! Vertebra status classification.
//!
//! A small statistical classifier assigns each vertebra one of four
//! statuses (normal, osteopenic, suspect, compressed) from five metrics:
//! mean intensity, intensity spread, height, compression ratio, and bone
//! fraction. The model is a bagged ensemble of depth-limited decision
//! trees over standardized features, trained deterministically at
//! construction time on a small built-in reference set - training takes
//! milliseconds and touches no external data.
//!
//! No deep-learning stack is involved, by design: the reference set is 16
//! rows and the pipeline must keep working when the classifier cannot be
//! built. Classification never fails; without a usable model each
//! vertebra keeps its rule-based status at a fixed moderate confidence.
//!
//! # Example
//!
//! ```
//! use spine_classify::{classify, ReferenceSet, TrainedClassifier};
//! use spine_types::Vertebra;
//!
//! let classifier = TrainedClassifier::train(&ReferenceSet::builtin()).unwrap();
//!
//! let mut v = Vertebra::new("L3", 10, 40);
//! v.hu_mean = 620.0;
//! v.hu_std = 75.0;
//! v.height_mm = 29.0;
//! v.compression_ratio = 0.99;
//! v.bone_fraction_pct = 5.5;
//!
//! let mut vertebrae = vec![v];
//! classify(&mut vertebrae, Some(&classifier));
//!
//! assert!(vertebrae[0].ml_status.is_some());
//! assert!(vertebrae[0].confidence > 0.0);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod classifier;
mod classify;
mod error;
mod forest;
mod reference;

pub use classifier::{ForestParams, TrainedClassifier};
pub use classify::{classify, FALLBACK_CONFIDENCE};
pub use error::{TrainError, TrainResult};
pub use reference::{ReferenceSet, FEATURE_COUNT};
