//! Per-vertebra segmentation record.

use serde::{Deserialize, Serialize};

use crate::status::VertebraStatus;

/// A segmented vertebra with its biometric measurements.
///
/// Created by vertebra segmentation and enriched in place by the
/// classifier (`ml_status`, `confidence`, `color_tag`). The axial range
/// `[z_start, z_end)` is half-open; across an ordered sequence of
/// vertebrae the ranges never overlap.
///
/// # Example
///
/// ```
/// use spine_types::{Vertebra, VertebraStatus};
///
/// let v = Vertebra::new("L3", 10, 20);
/// assert_eq!(v.slice_count(), 10);
/// assert_eq!(v.status, VertebraStatus::Normal);
/// assert!(v.ml_status.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertebra {
    /// Anatomical code (`L3`) or synthetic label (`V7`). Unique within one
    /// reconstruction.
    pub label: String,

    /// First slice of the axial range (inclusive).
    pub z_start: usize,

    /// End of the axial range (exclusive). Always greater than `z_start`.
    pub z_end: usize,

    /// Physical height of the range in millimetres.
    pub height_mm: f64,

    /// Centroid of the masked voxels in voxel units, `(z, y, x)`.
    pub centroid: (f64, f64, f64),

    /// Mean intensity over masked voxels in the range (0 when no voxels).
    pub hu_mean: f64,

    /// Intensity standard deviation over masked voxels.
    pub hu_std: f64,

    /// Percentage of mask-true voxels within the range.
    pub bone_fraction_pct: f64,

    /// Anterior-to-posterior bone density ratio; values well below 1
    /// indicate anterior collapse.
    pub compression_ratio: f64,

    /// Rule-based status from fixed clinical thresholds.
    pub status: VertebraStatus,

    /// Classifier-assigned status, when a trained classifier ran.
    pub ml_status: Option<VertebraStatus>,

    /// Confidence of the reported status, `[0, 1]`.
    pub confidence: f64,

    /// Display color for the effective status.
    pub color_tag: String,
}

impl Vertebra {
    /// Creates a vertebra record with neutral metrics.
    ///
    /// Used as the starting point before metric computation fills the
    /// biometric fields.
    #[must_use]
    pub fn new(label: impl Into<String>, z_start: usize, z_end: usize) -> Self {
        Self {
            label: label.into(),
            z_start,
            z_end,
            height_mm: 0.0,
            centroid: (0.0, 0.0, 0.0),
            hu_mean: 0.0,
            hu_std: 0.0,
            bone_fraction_pct: 0.0,
            compression_ratio: 1.0,
            status: VertebraStatus::Normal,
            ml_status: None,
            confidence: 0.0,
            color_tag: VertebraStatus::Normal.color().to_string(),
        }
    }

    /// Number of slices in the axial range.
    #[must_use]
    pub const fn slice_count(&self) -> usize {
        self.z_end - self.z_start
    }

    /// The status to report: classifier result when present, rule-based
    /// otherwise.
    #[must_use]
    pub fn effective_status(&self) -> VertebraStatus {
        self.ml_status.unwrap_or(self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_vertebra_defaults() {
        let v = Vertebra::new("T12", 4, 12);
        assert_eq!(v.label, "T12");
        assert_eq!(v.slice_count(), 8);
        assert_eq!(v.effective_status(), VertebraStatus::Normal);
    }

    #[test]
    fn effective_status_prefers_classifier() {
        let mut v = Vertebra::new("L1", 0, 5);
        v.status = VertebraStatus::Suspect;
        assert_eq!(v.effective_status(), VertebraStatus::Suspect);

        v.ml_status = Some(VertebraStatus::Compressed);
        assert_eq!(v.effective_status(), VertebraStatus::Compressed);
    }

    #[test]
    fn serde_round_trip() {
        let mut v = Vertebra::new("L4", 3, 9);
        v.hu_mean = 512.5;
        v.ml_status = Some(VertebraStatus::Osteopenic);
        v.confidence = 0.82;

        let json = serde_json::to_string(&v).unwrap();
        let back: Vertebra = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }
}
