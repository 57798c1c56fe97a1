//! Error types for pipeline runs.

use thiserror::Error;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Errors that fail a pipeline run.
///
/// All variants are configuration errors surfaced before any stage runs;
/// stage-internal shortfalls (no surface, no vertebrae, no classifier)
/// are soft outcomes carried in the result bundle instead.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A parameter value is unusable.
    #[error("invalid pipeline configuration: {reason}")]
    InvalidConfig {
        /// What is wrong with the configuration.
        reason: String,
    },

    /// A segmentation preset name failed to resolve.
    #[error(transparent)]
    Preset(#[from] volume_segment::SegmentError),

    /// Grid or spacing construction failed.
    #[error(transparent)]
    Volume(#[from] volume_types::VolumeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_message() {
        let err = PipelineError::InvalidConfig {
            reason: "iso level must be finite".to_string(),
        };
        assert!(format!("{err}").contains("iso level"));
    }

    #[test]
    fn preset_error_is_transparent() {
        let err: PipelineError = volume_segment::SegmentPreset::from_name("nope")
            .unwrap_err()
            .into();
        assert!(format!("{err}").contains("nope"));
    }
}
