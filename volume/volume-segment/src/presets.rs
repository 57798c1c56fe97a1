//! Named density-window presets.

use std::fmt;

use volume_types::DensityWindow;

use crate::error::{SegmentError, SegmentResult};

/// Reference density ranges (calibrated units):
/// fat -190..-30, soft tissue -30..200, trabecular bone 200..700,
/// cortical bone 700..1900, metal/implants above 1900.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SegmentPreset {
    /// Spine-adapted window `[200, 1600]`; the reduced upper bound avoids
    /// picking up implants.
    #[default]
    Spine,
    /// All bone, trabecular through cortical: `[200, 1900]`.
    BoneAll,
    /// Dense cortical bone only: `[700, 1900]`.
    BoneCortical,
    /// Trabecular (spongy) bone only: `[200, 700]`.
    BoneSoft,
}

impl SegmentPreset {
    /// All presets, in declaration order.
    pub const ALL: [Self; 4] = [Self::Spine, Self::BoneAll, Self::BoneCortical, Self::BoneSoft];

    /// Returns the density window for this preset.
    #[must_use]
    pub const fn window(self) -> DensityWindow {
        match self {
            Self::Spine => DensityWindow::new(200.0, 1600.0),
            Self::BoneAll => DensityWindow::new(200.0, 1900.0),
            Self::BoneCortical => DensityWindow::new(700.0, 1900.0),
            Self::BoneSoft => DensityWindow::new(200.0, 700.0),
        }
    }

    /// Returns the preset's configuration name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Spine => "spine",
            Self::BoneAll => "bone_all",
            Self::BoneCortical => "bone_cortical",
            Self::BoneSoft => "bone_soft",
        }
    }

    /// Resolves a preset from its configuration name.
    ///
    /// # Errors
    ///
    /// Returns [`SegmentError::UnknownPreset`] for any name not in
    /// [`SegmentPreset::ALL`]. This is a configuration error and should be
    /// surfaced before any pipeline stage runs.
    ///
    /// # Example
    ///
    /// ```
    /// use volume_segment::SegmentPreset;
    ///
    /// assert_eq!(
    ///     SegmentPreset::from_name("spine").unwrap(),
    ///     SegmentPreset::Spine
    /// );
    /// assert!(SegmentPreset::from_name("femur").is_err());
    /// ```
    pub fn from_name(name: &str) -> SegmentResult<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.name() == name)
            .ok_or_else(|| SegmentError::UnknownPreset {
                name: name.to_string(),
                valid: Self::ALL
                    .iter()
                    .map(|p| p.name())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

impl fmt::Display for SegmentPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_windows() {
        assert_eq!(SegmentPreset::Spine.window(), DensityWindow::new(200.0, 1600.0));
        assert_eq!(
            SegmentPreset::BoneCortical.window(),
            DensityWindow::new(700.0, 1900.0)
        );
    }

    #[test]
    fn round_trip_names() {
        for preset in SegmentPreset::ALL {
            assert_eq!(SegmentPreset::from_name(preset.name()).unwrap(), preset);
        }
    }

    #[test]
    fn unknown_name_is_error() {
        let err = SegmentPreset::from_name("skull");
        assert!(matches!(err, Err(SegmentError::UnknownPreset { .. })));
    }

    #[test]
    fn display_matches_name() {
        assert_eq!(format!("{}", SegmentPreset::Spine), "spine");
    }
}
