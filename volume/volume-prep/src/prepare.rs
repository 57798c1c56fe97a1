//! Normalization, windowing, and the preparation entry point.

use tracing::{debug, info};
use volume_types::{BoneMask, DensityWindow, ScalarVolume, Spacing, ValueUnits};

use crate::gaussian::smooth_gaussian;

/// Value span below which a volume is considered constant and normalizes
/// to all zeros instead of dividing by a vanishing range.
const DEGENERATE_SPAN: f32 = 1e-6;

/// Parameters for volume preparation.
#[derive(Debug, Clone)]
pub struct PrepareParams {
    /// Density window for the coarse bone mask. Default: `[200, 1900]`
    /// (trabecular through dense cortical bone).
    pub window: DensityWindow,

    /// Interpretation of the input values. Default: [`ValueUnits::Auto`].
    pub units: ValueUnits,

    /// Standard deviation of the optional Gaussian blur, in voxels.
    /// Default: 1.0.
    pub gaussian_sigma: f32,
}

impl Default for PrepareParams {
    fn default() -> Self {
        Self {
            window: DensityWindow::new(200.0, 1900.0),
            units: ValueUnits::Auto,
            gaussian_sigma: 1.0,
        }
    }
}

impl PrepareParams {
    /// Sets the density window for the coarse mask.
    #[must_use]
    pub const fn with_window(mut self, window: DensityWindow) -> Self {
        self.window = window;
        self
    }

    /// Pins the interpretation of the input values.
    #[must_use]
    pub const fn with_units(mut self, units: ValueUnits) -> Self {
        self.units = units;
        self
    }

    /// Sets the smoothing strength.
    #[must_use]
    pub const fn with_gaussian_sigma(mut self, sigma: f32) -> Self {
        self.gaussian_sigma = sigma;
        self
    }
}

/// Output of [`prepare`].
#[derive(Debug, Clone)]
pub struct Prepared {
    /// The volume normalized to `[0, 1]` (and smoothed, if requested).
    pub normalized: ScalarVolume,

    /// Coarse bone mask computed from the original values.
    pub coarse_mask: BoneMask,
}

/// Prepares a raw intensity volume for reconstruction.
///
/// Returns the min-max normalized (and optionally smoothed) volume together
/// with a coarse bone mask. The mask is always computed from the original,
/// un-normalized values; smoothing is applied to the normalized volume only.
/// The input volume is never mutated.
///
/// # Arguments
///
/// * `volume` - Raw intensity volume
/// * `spacing` - Physical voxel spacing (reported in logs; geometric
///   calibration happens at mesh extraction)
/// * `smooth` - Whether to blur the normalized volume
/// * `params` - Window, units, and smoothing configuration
#[must_use]
pub fn prepare(
    volume: &ScalarVolume,
    spacing: Spacing,
    smooth: bool,
    params: &PrepareParams,
) -> Prepared {
    let (min, max) = volume.value_range();
    info!(
        shape = ?volume.shape(),
        spacing = ?(spacing.dz, spacing.dy, spacing.dx),
        range = ?(min, max),
        "preparing volume"
    );

    let coarse_mask = compute_coarse_mask(volume, params.window, params.units);

    let mut normalized = normalize(volume);
    if smooth {
        normalized = smooth_gaussian(&normalized, params.gaussian_sigma);
    }

    debug!(
        bone_voxels = coarse_mask.count(),
        total_voxels = coarse_mask.len(),
        smoothed = smooth,
        "preparation finished"
    );

    Prepared {
        normalized,
        coarse_mask,
    }
}

/// Min-max normalizes a volume to `[0, 1]`.
///
/// A volume whose value span is below `1e-6` (constant or empty signal)
/// returns all zeros.
///
/// # Example
///
/// ```
/// use volume_prep::normalize;
/// use volume_types::ScalarVolume;
///
/// let v = ScalarVolume::from_values((1, 1, 3), vec![-1024.0, 0.0, 3000.0]).unwrap();
/// let n = normalize(&v);
///
/// let (min, max) = n.value_range();
/// assert_eq!((min, max), (0.0, 1.0));
/// ```
#[must_use]
pub fn normalize(volume: &ScalarVolume) -> ScalarVolume {
    let (min, max) = volume.value_range();
    let span = max - min;

    if span < DEGENERATE_SPAN {
        volume.map(|_| 0.0)
    } else {
        volume.map(|v| (v - min) / span)
    }
}

/// Clips values to a density window and rescales the window to `[0, 1]`.
///
/// Useful when the volume carries calibrated density values and a fixed
/// anatomical window is wanted instead of data-driven min-max scaling.
#[must_use]
pub fn window_normalize(volume: &ScalarVolume, window: DensityWindow) -> ScalarVolume {
    let span = (window.high - window.low).max(DEGENERATE_SPAN);
    volume.map(|v| (v.clamp(window.low, window.high) - window.low) / span)
}

/// Thresholds the original values into a coarse bone mask.
///
/// Window bounds are mapped according to the unit interpretation, so the
/// same anatomical window works for calibrated and normalized input.
fn compute_coarse_mask(
    volume: &ScalarVolume,
    window: DensityWindow,
    units: ValueUnits,
) -> BoneMask {
    let (_, max) = volume.value_range();
    let (low, high) = window.bounds_for(units, max);

    BoneMask::from_predicate(volume, |v| v >= low && v <= high)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sphere_volume(n: usize, radius: f64, inside: f32, outside: f32) -> ScalarVolume {
        let mut v = ScalarVolume::filled((n, n, n), outside).unwrap();
        let c = n as f64 / 2.0;
        for z in 0..n {
            for y in 0..n {
                for x in 0..n {
                    let dz = z as f64 + 0.5 - c;
                    let dy = y as f64 + 0.5 - c;
                    let dx = x as f64 + 0.5 - c;
                    if (dz * dz + dy * dy + dx * dx).sqrt() <= radius {
                        v.set(z, y, x, inside);
                    }
                }
            }
        }
        v
    }

    #[test]
    fn normalize_non_constant() {
        let v = ScalarVolume::from_values((1, 2, 2), vec![-500.0, 0.0, 250.0, 1500.0]).unwrap();
        let n = normalize(&v);
        let (min, max) = n.value_range();
        assert_relative_eq!(min, 0.0);
        assert_relative_eq!(max, 1.0);
    }

    #[test]
    fn normalize_constant_is_zero() {
        let v = ScalarVolume::filled((3, 3, 3), 123.0).unwrap();
        let n = normalize(&v);
        let (min, max) = n.value_range();
        assert_relative_eq!(min, 0.0);
        assert_relative_eq!(max, 0.0);
    }

    #[test]
    fn window_normalize_clips_and_scales() {
        let v = ScalarVolume::from_values((1, 1, 4), vec![-100.0, 200.0, 900.0, 2500.0]).unwrap();
        let n = window_normalize(&v, DensityWindow::new(200.0, 1600.0));

        assert_relative_eq!(n.get(0, 0, 0), 0.0);
        assert_relative_eq!(n.get(0, 0, 1), 0.0);
        assert_relative_eq!(n.get(0, 0, 2), 0.5);
        assert_relative_eq!(n.get(0, 0, 3), 1.0);
    }

    #[test]
    fn dual_mode_masks_agree() {
        // The same anatomy expressed in calibrated units and pre-normalized
        // to [0, 1] must segment to nearly identical bone fractions.
        let raw = sphere_volume(20, 6.0, 700.0, -1024.0);
        let scaled_values: Vec<f32> = raw
            .values()
            .iter()
            .map(|&v| (v + 1024.0) / 4024.0)
            .collect();
        let scaled = ScalarVolume::from_values(raw.shape(), scaled_values).unwrap();

        let params = PrepareParams::default();
        let mask_raw = compute_coarse_mask(&raw, params.window, params.units);
        let mask_scaled = compute_coarse_mask(&scaled, params.window, params.units);

        let diff = (mask_raw.fraction_pct() - mask_scaled.fraction_pct()).abs();
        assert!(diff < 0.5, "fractions differ by {diff}");
    }

    #[test]
    fn prepare_returns_mask_from_original_values() {
        let v = sphere_volume(16, 5.0, 900.0, -400.0);
        let prepared = prepare(&v, Spacing::UNIT, false, &PrepareParams::default());

        assert!(prepared.coarse_mask.count() > 0);
        let (min, max) = prepared.normalized.value_range();
        assert_relative_eq!(min, 0.0);
        assert_relative_eq!(max, 1.0);
    }

    #[test]
    fn prepare_smoothing_keeps_range() {
        let v = sphere_volume(16, 5.0, 900.0, -400.0);
        let prepared = prepare(&v, Spacing::UNIT, true, &PrepareParams::default());

        let (min, max) = prepared.normalized.value_range();
        assert!(min >= 0.0);
        assert!(max <= 1.0 + 1e-5);
    }

    #[test]
    fn prepare_does_not_mutate_input() {
        let v = sphere_volume(10, 3.0, 700.0, -400.0);
        let before = v.clone();
        let _ = prepare(&v, Spacing::UNIT, true, &PrepareParams::default());
        assert_eq!(v, before);
    }
}
