//! Vertebra detection and per-vertebra metrics.

use spine_types::{assign_labels, Vertebra, VertebraStatus};
use tracing::{debug, info, warn};
use volume_types::{BoneMask, ScalarVolume, Spacing};

use crate::params::DetectParams;
use crate::profile::{bone_profile, find_peaks, smooth_profile};

/// Profiles whose maximum slice count is below this carry no detectable
/// bone.
const NOISE_FLOOR_VOXELS: f64 = 10.0;

/// Floor for the posterior density when computing the compression ratio.
const POSTERIOR_FLOOR: f64 = 1e-3;

/// Detects vertebrae in a bone mask.
///
/// Returns the ordered (caudal to cranial) list of vertebrae with their
/// biometrics and rule-based status. An empty list is the expected result
/// when the mask carries no detectable bone or the profile has no usable
/// structure; it is not an error.
///
/// The mask and volume must share a shape; mismatched inputs yield an
/// empty list with a warning (the orchestrator validates shapes up
/// front).
#[must_use]
pub fn detect(
    mask: &BoneMask,
    volume: &ScalarVolume,
    spacing: Spacing,
    params: &DetectParams,
) -> Vec<Vertebra> {
    if mask.check_matches(volume).is_err() {
        warn!(
            mask_shape = ?mask.shape(),
            volume_shape = ?volume.shape(),
            "mask and volume shapes differ, no vertebrae detected"
        );
        return Vec::new();
    }

    let nz = mask.nz();

    // 1. Longitudinal density profile.
    let profile = bone_profile(mask);
    let max = profile.iter().fold(0.0_f64, |a, &b| a.max(b));
    if max < NOISE_FLOOR_VOXELS {
        info!(max_slice_voxels = max, "bone profile below noise floor");
        return Vec::new();
    }

    // 2. Normalize and smooth.
    let normalized: Vec<f64> = profile.iter().map(|&v| v / max).collect();
    let smoothed = smooth_profile(&normalized, params.gaussian_sigma);

    // 3. Disc spaces are minima: find peaks of the inverted signal.
    let peak = smoothed.iter().fold(0.0_f64, |a, &b| a.max(b));
    let inverted: Vec<f64> = smoothed.iter().map(|&v| peak - v).collect();
    let min_distance = ((params.min_separation_mm / spacing.dz).round() as usize).max(3);
    let minima = find_peaks(&inverted, params.min_prominence, min_distance);

    // 4. Cut at the minima; short segments are artifacts.
    let mut boundaries = Vec::with_capacity(minima.len() + 2);
    boundaries.push(0);
    boundaries.extend(minima);
    boundaries.push(nz - 1);
    boundaries.sort_unstable();
    boundaries.dedup();

    let segments: Vec<(usize, usize)> = boundaries
        .windows(2)
        .map(|w| (w[0], w[1]))
        .filter(|(z0, z1)| z1 - z0 >= params.min_vertebra_slices)
        .collect();

    if segments.is_empty() {
        info!("profile has no segmentable structure");
        return Vec::new();
    }

    // 5. Label and measure.
    let labels = assign_labels(segments.len(), params.label_origin);
    let vertebrae: Vec<Vertebra> = segments
        .iter()
        .zip(labels)
        .map(|(&(z0, z1), label)| {
            let v = compute_metrics(label, z0, z1, mask, volume, spacing);
            debug!(
                label = %v.label,
                z_range = ?(v.z_start, v.z_end),
                height_mm = v.height_mm,
                hu_mean = v.hu_mean,
                status = %v.status,
                "vertebra"
            );
            v
        })
        .collect();

    info!(count = vertebrae.len(), "vertebra detection finished");
    vertebrae
}

/// Fills in the biometric fields for one axial segment.
fn compute_metrics(
    label: String,
    z0: usize,
    z1: usize,
    mask: &BoneMask,
    volume: &ScalarVolume,
    spacing: Spacing,
) -> Vertebra {
    let (_, ny, nx) = mask.shape();
    let mut v = Vertebra::new(label, z0, z1);

    // Intensity statistics over masked voxels.
    let mut sum = 0.0_f64;
    let mut sum_sq = 0.0_f64;
    let mut bone_count = 0_usize;
    let mut centroid = (0.0_f64, 0.0_f64, 0.0_f64);

    // Anterior/posterior split of the secondary axis at its midpoint.
    let ny_half = ny / 2;
    let mut anterior = 0_usize;
    let mut posterior = 0_usize;

    for z in z0..z1 {
        for y in 0..ny {
            for x in 0..nx {
                if !mask.get(z, y, x) {
                    continue;
                }
                let value = f64::from(volume.get(z, y, x));
                sum += value;
                sum_sq += value * value;
                bone_count += 1;
                centroid.0 += z as f64;
                centroid.1 += y as f64;
                centroid.2 += x as f64;
                if y < ny_half {
                    anterior += 1;
                } else {
                    posterior += 1;
                }
            }
        }
    }

    let region_voxels = (z1 - z0) * ny * nx;
    v.height_mm = (z1 - z0) as f64 * spacing.dz;
    v.bone_fraction_pct = bone_count as f64 / region_voxels as f64 * 100.0;

    if bone_count > 0 {
        let n = bone_count as f64;
        v.hu_mean = sum / n;
        v.hu_std = (sum_sq / n - v.hu_mean * v.hu_mean).max(0.0).sqrt();
        v.centroid = (centroid.0 / n, centroid.1 / n, centroid.2 / n);
    } else {
        // No bone in range: fall back to the geometric slab center.
        v.centroid = ((z0 + z1) as f64 / 2.0, ny as f64 / 2.0, nx as f64 / 2.0);
    }

    // Compression ratio: per-column bone density of the anterior half
    // against the posterior half.
    let column_norm = ((z1 - z0) * nx).max(1) as f64;
    let density_anterior = anterior as f64 / column_norm;
    let density_posterior = posterior as f64 / column_norm;
    v.compression_ratio = density_anterior / density_posterior.max(POSTERIOR_FLOOR);

    v.status = rule_status(v.hu_mean, v.compression_ratio);
    v.color_tag = v.status.color().to_string();
    v
}

/// Fixed clinical thresholds; these are heuristics, not learned values.
fn rule_status(hu_mean: f64, compression_ratio: f64) -> VertebraStatus {
    if compression_ratio < 0.7 {
        VertebraStatus::Compressed
    } else if hu_mean < 150.0 {
        VertebraStatus::Osteopenic
    } else if (compression_ratio - 1.0).abs() > 0.25 {
        VertebraStatus::Suspect
    } else {
        VertebraStatus::Normal
    }
}
