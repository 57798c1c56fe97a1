//! Thresholding and the cleanup entry points.

use rayon::prelude::*;
use tracing::{debug, info};
use volume_types::{BoneMask, DensityWindow, ScalarVolume, ValueUnits};

use crate::components::{fill_slice_holes, filter_components, label_components, CleanupOutcome};
use crate::presets::SegmentPreset;

/// Default minimum voxel count for a component to survive cleanup.
pub const DEFAULT_MIN_COMPONENT_SIZE: usize = 500;

/// Parameters for bone segmentation.
#[derive(Debug, Clone)]
pub struct SegmentParams {
    /// Density window to threshold with.
    pub window: DensityWindow,

    /// Interpretation of the volume's values. Default: [`ValueUnits::Auto`].
    pub units: ValueUnits,
}

impl Default for SegmentParams {
    fn default() -> Self {
        Self::from_preset(SegmentPreset::default())
    }
}

impl SegmentParams {
    /// Creates parameters from a named preset.
    #[must_use]
    pub const fn from_preset(preset: SegmentPreset) -> Self {
        Self {
            window: preset.window(),
            units: ValueUnits::Auto,
        }
    }

    /// Sets a custom density window.
    #[must_use]
    pub const fn with_window(mut self, window: DensityWindow) -> Self {
        self.window = window;
        self
    }

    /// Pins the interpretation of the volume's values.
    #[must_use]
    pub const fn with_units(mut self, units: ValueUnits) -> Self {
        self.units = units;
        self
    }
}

/// Thresholds a volume into a bone mask.
///
/// The density window is mapped according to the unit interpretation
/// (calibrated units applied directly, normalized input rescaled), so the
/// function works standalone on either kind of volume.
///
/// Slices are thresholded in parallel; the result is identical to the
/// sequential evaluation.
#[must_use]
pub fn segment(volume: &ScalarVolume, params: &SegmentParams) -> BoneMask {
    let (_, max) = volume.value_range();
    let (low, high) = params.window.bounds_for(params.units, max);

    info!(
        window = ?(params.window.low, params.window.high),
        bounds = ?(low, high),
        "segmenting bone"
    );

    let mut mask = BoneMask::from_predicate(volume, |_| false);
    let slice_len = volume.slice_len();

    mask.values_mut()
        .par_chunks_mut(slice_len)
        .zip(volume.values().par_chunks(slice_len))
        .for_each(|(out, values)| {
            for (flag, &v) in out.iter_mut().zip(values.iter()) {
                *flag = v >= low && v <= high;
            }
        });

    debug!(
        bone_voxels = mask.count(),
        fraction_pct = mask.fraction_pct(),
        "segmentation finished"
    );
    mask
}

/// Thresholds a volume and cleans the resulting mask.
///
/// Cleanup fills per-slice topological holes and then drops every
/// connected component (6-connectivity) smaller than `min_component_size`
/// voxels. All sufficiently large components are kept, so multiple
/// disjoint bone bodies survive.
#[must_use]
pub fn segment_with_cleanup(
    volume: &ScalarVolume,
    params: &SegmentParams,
    min_component_size: usize,
) -> BoneMask {
    let mask = segment(volume, params);
    let outcome = cleanup_mask(&mask, min_component_size);
    info!("{outcome}");
    outcome.mask
}

/// Cleans an existing mask: per-slice hole fill, then small-component
/// removal.
///
/// With `min_component_size == 0` the component filter is a no-op and the
/// result is exactly the hole-filled mask.
#[must_use]
pub fn cleanup_mask(mask: &BoneMask, min_component_size: usize) -> CleanupOutcome {
    let (filled, holes_filled) = fill_slice_holes(mask);

    let labeling = label_components(&filled);
    let components_found = labeling.component_count();
    let cleaned = filter_components(&filled, &labeling, min_component_size);
    let components_removed = labeling
        .sizes
        .iter()
        .filter(|&&s| s < min_component_size)
        .count();

    CleanupOutcome {
        mask: cleaned,
        holes_filled,
        components_found,
        components_removed,
    }
}

/// Percentage of mask-true voxels.
#[must_use]
pub fn volume_fraction(mask: &BoneMask) -> f64 {
    mask.fraction_pct()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn two_body_volume() -> ScalarVolume {
        // Two solid 3x3x3 bone blocks and one single-voxel speck.
        let mut v = ScalarVolume::filled((10, 10, 10), -400.0).unwrap();
        for z in 1..4 {
            for y in 1..4 {
                for x in 1..4 {
                    v.set(z, y, x, 800.0);
                }
            }
        }
        for z in 6..9 {
            for y in 6..9 {
                for x in 6..9 {
                    v.set(z, y, x, 800.0);
                }
            }
        }
        v.set(0, 9, 9, 800.0);
        v
    }

    #[test]
    fn segment_thresholds_window() {
        let v = two_body_volume();
        let mask = segment(&v, &SegmentParams::default());
        assert_eq!(mask.count(), 27 + 27 + 1);
    }

    #[test]
    fn segment_normalized_volume_agrees_with_raw() {
        let raw = two_body_volume();
        let scaled = raw.map(|v| (v + 1024.0) / 4024.0);

        let params = SegmentParams::default();
        let from_raw = segment(&raw, &params);
        let from_scaled = segment(&scaled, &params);

        let diff = (volume_fraction(&from_raw) - volume_fraction(&from_scaled)).abs();
        assert!(diff < 0.5, "fractions differ by {diff}");
    }

    #[test]
    fn cleanup_drops_speck_keeps_both_bodies() {
        let v = two_body_volume();
        let mask = segment_with_cleanup(&v, &SegmentParams::default(), 10);

        assert_eq!(mask.count(), 54);
        assert!(mask.get(2, 2, 2));
        assert!(mask.get(7, 7, 7));
        assert!(!mask.get(0, 9, 9));
    }

    #[test]
    fn cleanup_never_increases_beyond_fill() {
        let v = two_body_volume();
        let raw = segment(&v, &SegmentParams::default());
        let cleaned = segment_with_cleanup(&v, &SegmentParams::default(), 10);
        // Solid fixtures have no holes, so cleanup can only remove.
        assert!(cleaned.count() <= raw.count());
    }

    #[test]
    fn cleanup_zero_min_size_is_identity_on_hole_free_mask() {
        let v = two_body_volume();
        let raw = segment(&v, &SegmentParams::default());
        let outcome = cleanup_mask(&raw, 0);
        assert_eq!(outcome.holes_filled, 0);
        assert_eq!(outcome.mask, raw);
    }

    #[test]
    fn volume_fraction_percentage() {
        let mut mask = BoneMask::new((1, 2, 2)).unwrap();
        mask.set(0, 0, 0, true);
        assert_relative_eq!(volume_fraction(&mask), 25.0);
    }

    #[test]
    fn empty_background_volume_has_empty_mask() {
        let v = ScalarVolume::filled((8, 8, 8), -1024.0).unwrap();
        let mask = segment(&v, &SegmentParams::default());
        assert_eq!(mask.count(), 0);
    }
}
