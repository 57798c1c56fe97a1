//! The result bundle of a completed run.

use mesh_types::TriangleMesh;
use spine_analysis::{ClinicalSummary, QuantitativeMetrics};
use spine_types::{AnomalyRecord, Vertebra};
use volume_types::{BoneMask, ScalarVolume, Spacing};

/// Everything a completed reconstruction produced.
///
/// The caller receives exclusive ownership; the pipeline retains nothing.
/// `mesh` is `None` and `vertebrae` empty for volumes with no detectable
/// bone - a completed-but-partially-empty bundle, not a failure.
#[derive(Debug, Clone)]
pub struct ReconstructionResult {
    /// The input volume normalized to `[0, 1]` (smoothed if configured).
    pub normalized_volume: ScalarVolume,

    /// Cleaned bone mask.
    pub bone_mask: BoneMask,

    /// Extracted bone surface, when one exists.
    pub mesh: Option<TriangleMesh>,

    /// Ordered, classified vertebrae.
    pub vertebrae: Vec<Vertebra>,

    /// Aggregate quantitative metrics.
    pub metrics: QuantitativeMetrics,

    /// Plain-language summary and recommendations.
    pub summary: ClinicalSummary,

    /// Records from the optional anomaly detector (empty when absent).
    pub anomalies: Vec<AnomalyRecord>,

    /// The physical spacing the run used.
    pub spacing: Spacing,
}

impl ReconstructionResult {
    /// Whether the run produced any bone at all.
    #[must_use]
    pub fn has_bone(&self) -> bool {
        self.bone_mask.count() > 0
    }
}
