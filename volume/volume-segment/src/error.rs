//! Error types for bone segmentation.

use thiserror::Error;

/// Result type for segmentation operations.
pub type SegmentResult<T> = Result<T, SegmentError>;

/// Errors that can occur during segmentation configuration.
#[derive(Debug, Error)]
pub enum SegmentError {
    /// A preset name did not match any known density window.
    #[error("unknown segmentation preset '{name}', valid presets: {valid}")]
    UnknownPreset {
        /// The name that failed to resolve.
        name: String,
        /// Comma-separated list of valid preset names.
        valid: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_preset_message() {
        let err = SegmentError::UnknownPreset {
            name: "femur".to_string(),
            valid: "spine, bone_all".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("femur"));
        assert!(msg.contains("spine"));
    }
}
