//! Pipeline configuration.

use mesh_extract::ExtractParams;
use spine_detect::DetectParams;
use volume_prep::PrepareParams;
use volume_segment::{SegmentParams, SegmentPreset, DEFAULT_MIN_COMPONENT_SIZE};
use volume_types::ValueUnits;

use crate::error::{PipelineError, PipelineResult};

/// Configuration for one reconstruction pipeline.
#[derive(Debug, Clone)]
pub struct PipelineParams {
    /// Density-window preset for bone segmentation. Default: spine.
    pub preset: SegmentPreset,

    /// Interpretation of the input volume's values. Default: auto-detect.
    pub units: ValueUnits,

    /// Whether to Gaussian-smooth the normalized volume. Default: true.
    pub smooth: bool,

    /// Minimum voxel count for a mask component to survive cleanup.
    pub min_component_size: usize,

    /// Volume preparation parameters.
    pub prepare: PrepareParams,

    /// Surface extraction parameters.
    pub extract: ExtractParams,

    /// Vertebra detection parameters.
    pub detect: DetectParams,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            preset: SegmentPreset::Spine,
            units: ValueUnits::Auto,
            smooth: true,
            min_component_size: DEFAULT_MIN_COMPONENT_SIZE,
            prepare: PrepareParams::default(),
            extract: ExtractParams::default(),
            detect: DetectParams::default(),
        }
    }
}

impl PipelineParams {
    /// Creates parameters with a preset resolved from its configuration
    /// name.
    ///
    /// # Errors
    ///
    /// Returns the preset-resolution error for unknown names; surface
    /// this before starting any pipeline work.
    pub fn with_preset_name(name: &str) -> PipelineResult<Self> {
        Ok(Self {
            preset: SegmentPreset::from_name(name)?,
            ..Default::default()
        })
    }

    /// Sets the segmentation preset.
    #[must_use]
    pub const fn with_preset(mut self, preset: SegmentPreset) -> Self {
        self.preset = preset;
        self
    }

    /// Pins the input unit interpretation.
    #[must_use]
    pub const fn with_units(mut self, units: ValueUnits) -> Self {
        self.units = units;
        self
    }

    /// Enables or disables volume smoothing.
    #[must_use]
    pub const fn with_smooth(mut self, smooth: bool) -> Self {
        self.smooth = smooth;
        self
    }

    /// Sets the surface extraction parameters.
    #[must_use]
    pub fn with_extract(mut self, extract: ExtractParams) -> Self {
        self.extract = extract;
        self
    }

    /// Derives the segmentation parameters for the configured preset.
    #[must_use]
    pub fn segment_params(&self) -> SegmentParams {
        SegmentParams::from_preset(self.preset).with_units(self.units)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidConfig`] for non-finite or
    /// out-of-range numeric parameters.
    pub fn validate(&self) -> PipelineResult<()> {
        if !self.extract.iso_level.is_finite() {
            return Err(PipelineError::InvalidConfig {
                reason: format!("iso level must be finite, got {}", self.extract.iso_level),
            });
        }
        if !(0.0..1.0).contains(&self.extract.decimate_ratio) {
            return Err(PipelineError::InvalidConfig {
                reason: format!(
                    "decimation ratio must be in [0, 1), got {}",
                    self.extract.decimate_ratio
                ),
            });
        }
        if !self.prepare.gaussian_sigma.is_finite() || self.prepare.gaussian_sigma < 0.0 {
            return Err(PipelineError::InvalidConfig {
                reason: format!(
                    "smoothing sigma must be non-negative, got {}",
                    self.prepare.gaussian_sigma
                ),
            });
        }
        if self.detect.min_vertebra_slices == 0 {
            return Err(PipelineError::InvalidConfig {
                reason: "minimum vertebra thickness must be at least 1 slice".to_string(),
            });
        }
        Ok(())
    }
}
