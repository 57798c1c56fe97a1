//! Density windows and unit interpretation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Assumed offset of the calibrated scale below zero (air ≈ -1024).
const CALIBRATED_OFFSET: f32 = 1024.0;

/// Assumed full span of the calibrated scale (-1024 to 3000).
const CALIBRATED_SPAN: f32 = 4024.0;

/// Observed-maximum threshold separating calibrated from normalized input.
const AUTO_RAW_THRESHOLD: f32 = 10.0;

/// How to interpret the scalar values of a volume.
///
/// Calibrated scans carry density units directly (air ≈ -1024, cortical
/// bone ≈ 1900); volumes that went through min-max normalization lie in
/// `[0, 1]`. `Auto` detects the mode from the observed value range, which
/// is a best-effort heuristic: callers that know their units should pass
/// `Calibrated` or `Normalized` explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ValueUnits {
    /// Detect from the observed value range: a maximum above 10 is treated
    /// as calibrated density units, anything else as normalized `[0, 1]`.
    #[default]
    Auto,
    /// Values are calibrated density units.
    Calibrated,
    /// Values are normalized to `[0, 1]`.
    Normalized,
}

impl ValueUnits {
    /// Resolves `Auto` against an observed maximum value.
    #[must_use]
    pub fn resolve(self, observed_max: f32) -> Self {
        match self {
            Self::Auto => {
                if observed_max > AUTO_RAW_THRESHOLD {
                    Self::Calibrated
                } else {
                    Self::Normalized
                }
            }
            other => other,
        }
    }
}

/// An inclusive `[low, high]` window in calibrated density units.
///
/// # Example
///
/// ```
/// use volume_types::{DensityWindow, ValueUnits};
///
/// let spine = DensityWindow::new(200.0, 1600.0);
///
/// // Applied to calibrated values the window is used as-is.
/// let (lo, hi) = spine.bounds_for(ValueUnits::Calibrated, 3000.0);
/// assert_eq!((lo, hi), (200.0, 1600.0));
///
/// // Applied to a normalized volume it is rescaled proportionally.
/// let (lo, hi) = spine.bounds_for(ValueUnits::Normalized, 1.0);
/// assert!(lo > 0.3 && hi < 0.7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DensityWindow {
    /// Lower inclusive bound (calibrated units).
    pub low: f32,
    /// Upper inclusive bound (calibrated units).
    pub high: f32,
}

impl DensityWindow {
    /// Creates a new window.
    #[must_use]
    pub const fn new(low: f32, high: f32) -> Self {
        Self { low, high }
    }

    /// Returns the threshold bounds to apply to a volume with the given
    /// units and observed maximum.
    ///
    /// For calibrated input the window applies directly. For normalized
    /// input the window is mapped into `[0, 1]` assuming the standard
    /// calibration span of 4024 units starting at -1024, with the upper
    /// bound clamped to 1.0.
    #[must_use]
    pub fn bounds_for(&self, units: ValueUnits, observed_max: f32) -> (f32, f32) {
        match units.resolve(observed_max) {
            ValueUnits::Calibrated => (self.low, self.high),
            _ => (
                (self.low + CALIBRATED_OFFSET) / CALIBRATED_SPAN,
                ((self.high + CALIBRATED_OFFSET) / CALIBRATED_SPAN).min(1.0),
            ),
        }
    }
}
