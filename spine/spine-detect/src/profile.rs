//! 1D bone-density profile analysis.

use volume_types::BoneMask;

/// Computes the longitudinal bone-density profile of a mask.
///
/// Entry `z` is the number of mask-true voxels in slice `z`. Disc spaces
/// show up as local minima of this signal.
#[must_use]
pub fn bone_profile(mask: &BoneMask) -> Vec<f64> {
    (0..mask.nz()).map(|z| mask.slice_count(z) as f64).collect()
}

/// Smooths a 1D signal with a Gaussian kernel.
///
/// Kernel radius is `ceil(3 * sigma)`; near the signal ends the kernel is
/// renormalized over the in-range taps. A non-positive `sigma` returns
/// the input unchanged.
#[must_use]
pub fn smooth_profile(signal: &[f64], sigma: f64) -> Vec<f64> {
    if !(sigma.is_finite() && sigma > 0.0) || signal.is_empty() {
        return signal.to_vec();
    }

    let radius = (3.0 * sigma).ceil() as usize;
    let two_sigma_sq = 2.0 * sigma * sigma;
    let kernel: Vec<f64> = (0..=2 * radius)
        .map(|i| {
            let d = i as f64 - radius as f64;
            (-d * d / two_sigma_sq).exp()
        })
        .collect();

    let n = signal.len();
    let mut out = vec![0.0; n];
    for (i, slot) in out.iter_mut().enumerate() {
        let mut sum = 0.0;
        let mut weight = 0.0;
        for (k, &kval) in kernel.iter().enumerate() {
            let j = i as isize + k as isize - radius as isize;
            if j >= 0 && (j as usize) < n {
                sum += signal[j as usize] * kval;
                weight += kval;
            }
        }
        *slot = sum / weight;
    }
    out
}

/// Finds local maxima with a minimum prominence and separation.
///
/// A peak is a sample (or a plateau of equal samples, reported at its
/// middle) with strictly smaller neighbors on both sides. Prominence is
/// the peak height above the higher of the two lowest points separating
/// it from higher ground (or the signal edge). When peaks crowd closer
/// than `min_distance` samples, the higher peak wins.
///
/// Indices are returned in ascending order.
#[must_use]
pub fn find_peaks(signal: &[f64], min_prominence: f64, min_distance: usize) -> Vec<usize> {
    let n = signal.len();
    if n < 3 {
        return Vec::new();
    }

    // Rising edges start a candidate; a plateau counts as one peak at its
    // midpoint, which keeps symmetric signals from hiding their minima.
    let mut candidates: Vec<usize> = Vec::new();
    let mut i = 1;
    while i < n - 1 {
        if signal[i] > signal[i - 1] {
            let mut j = i;
            while j + 1 < n && signal[j + 1] == signal[i] {
                j += 1;
            }
            if j < n - 1 && signal[j + 1] < signal[i] {
                candidates.push(i + (j - i) / 2);
            }
            i = j + 1;
        } else {
            i += 1;
        }
    }

    // Prominence filter.
    candidates.retain(|&peak| prominence(signal, peak) >= min_prominence);

    // Distance filter: higher peaks take priority.
    let mut by_height = candidates.clone();
    by_height.sort_by(|&a, &b| {
        signal[b]
            .partial_cmp(&signal[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut kept: Vec<usize> = Vec::new();
    for peak in by_height {
        if kept
            .iter()
            .all(|&k| peak.abs_diff(k) >= min_distance.max(1))
        {
            kept.push(peak);
        }
    }

    kept.sort_unstable();
    kept
}

/// Prominence of a peak: its height above the higher of the two base
/// minima, where each base is the lowest point between the peak and the
/// nearest strictly higher sample (or the signal edge).
fn prominence(signal: &[f64], peak: usize) -> f64 {
    let height = signal[peak];

    let mut left_base = height;
    for i in (0..peak).rev() {
        if signal[i] > height {
            break;
        }
        left_base = left_base.min(signal[i]);
    }

    let mut right_base = height;
    for &value in &signal[peak + 1..] {
        if value > height {
            break;
        }
        right_base = right_base.min(value);
    }

    height - left_base.max(right_base)
}
