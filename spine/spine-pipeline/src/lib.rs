//! The reconstruction pipeline orchestrator.
//!
//! Sequences the full analysis of one scan volume:
//!
//! 1. **Prepare** - normalize the intensity volume (optional smoothing)
//! 2. **Segment** - threshold a density window into a bone mask, clean it
//! 3. **Mesh** - extract and post-process the bone surface
//! 4. **Detect** - split the mask into vertebrae along the spine axis
//! 5. **Classify** - refine each vertebra's status with the injected
//!    classifier (rule-based fallback otherwise)
//! 6. **Anomalies** - consult the optional black-box detector
//! 7. **Aggregate** - compute quantitative metrics and the summary
//!
//! The pipeline is synchronous and owns no threads; run it from whatever
//! worker the host application provides. Progress is reported through an
//! optional [`spine_types::ProgressSink`]; cancellation is cooperative
//! via [`spine_types::CancelToken`], checked between stages only.
//!
//! Expected-empty outcomes (no mesh, no vertebrae) still end in a
//! completed result bundle; only configuration errors fail a run, and
//! they fail it before any stage executes.
//!
//! # Example
//!
//! ```
//! use spine_pipeline::{PipelineParams, ReconstructionPipeline};
//! use volume_types::{ScalarVolume, Spacing};
//!
//! let volume = ScalarVolume::filled((20, 20, 20), -1024.0).unwrap();
//! let pipeline = ReconstructionPipeline::new(PipelineParams::default());
//!
//! let result = pipeline.run(&volume, Spacing::UNIT).unwrap().unwrap();
//! assert!(result.mesh.is_none());
//! assert!(result.vertebrae.is_empty());
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod error;
mod params;
mod pipeline;
mod result;
mod stage;

pub use error::{PipelineError, PipelineResult};
pub use params::PipelineParams;
pub use pipeline::ReconstructionPipeline;
pub use result::ReconstructionResult;
pub use stage::Stage;
