//! Optional anomaly-detection interface.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use volume_types::{BoneMask, ScalarVolume};

/// A single anomaly reported by an external detector.
///
/// The pipeline treats these records as opaque: they are counted and
/// carried through to the result bundle verbatim, never interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyRecord {
    /// Axial slice the anomaly was found on.
    pub slice_index: usize,

    /// Detector-defined anomaly type.
    pub kind: String,

    /// Detector confidence, `[0, 1]`.
    pub confidence: f64,

    /// In-plane bounding box `[x0, y0, x1, y1]` in voxel units.
    pub bounding_box: [f64; 4],

    /// Human-readable description.
    pub description: String,
}

/// Error reported by a failing anomaly detector.
///
/// Detector failure is a soft degradation: the pipeline logs it and
/// continues with an empty anomaly list.
#[derive(Debug, Error)]
#[error("anomaly detection failed: {reason}")]
pub struct DetectorError {
    /// Why the detector could not run.
    pub reason: String,
}

/// A black-box anomaly detector.
///
/// Typically backed by an external model; the pipeline only requires that
/// absence or failure degrades to an empty list, never an abort.
pub trait AnomalyDetector {
    /// Whether a real detector backend is loaded.
    fn is_available(&self) -> bool;

    /// Scans a volume (and its bone mask) for anomalies.
    ///
    /// # Errors
    ///
    /// Returns [`DetectorError`] when the backend fails; callers treat
    /// this as an empty result.
    fn detect(
        &self,
        volume: &ScalarVolume,
        mask: &BoneMask,
    ) -> Result<Vec<AnomalyRecord>, DetectorError>;
}

/// The always-available detector that finds nothing.
///
/// Used when no detector backend is configured, so downstream stages can
/// rely on a detector existing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDetector;

impl AnomalyDetector for NoopDetector {
    fn is_available(&self) -> bool {
        false
    }

    fn detect(
        &self,
        _volume: &ScalarVolume,
        _mask: &BoneMask,
    ) -> Result<Vec<AnomalyRecord>, DetectorError> {
        Ok(Vec::new())
    }
}
