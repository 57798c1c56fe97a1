//! Spinal curvature estimation from vertebral centroids.

use spine_types::Vertebra;
use tracing::debug;

/// Longitudinal centroid spans below this yield a 0 angle rather than a
/// numerically meaningless fit.
const MIN_AXIAL_SPAN: f64 = 1e-6;

/// Estimates a Cobb-like curvature angle in degrees.
///
/// Fits a least-squares line through the vertebral centroids, modelling
/// the secondary-axis (anteroposterior) coordinate as a function of the
/// longitudinal coordinate, and derives the angle from how far the
/// centroids bow away from that line:
/// `atan(residual span / longitudinal span)`.
///
/// Centroids on a perfectly straight line - even a slanted one - give
/// 0 degrees. Fewer than 3 vertebrae, or a degenerate longitudinal span,
/// also give 0 degrees; curvature is simply not estimable there and that
/// is not an error.
#[must_use]
pub fn estimate_cobb_angle(vertebrae: &[Vertebra]) -> f64 {
    if vertebrae.len() < 3 {
        return 0.0;
    }

    let z: Vec<f64> = vertebrae.iter().map(|v| v.centroid.0).collect();
    let y: Vec<f64> = vertebrae.iter().map(|v| v.centroid.1).collect();

    let z_min = z.iter().fold(f64::INFINITY, |a, &b| a.min(b));
    let z_max = z.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
    let z_span = z_max - z_min;
    if !(z_span.is_finite()) || z_span < MIN_AXIAL_SPAN {
        return 0.0;
    }

    // Closed-form least squares for y = a*z + b.
    let n = z.len() as f64;
    let z_mean = z.iter().sum::<f64>() / n;
    let y_mean = y.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var = 0.0;
    for (&zi, &yi) in z.iter().zip(y.iter()) {
        cov += (zi - z_mean) * (yi - y_mean);
        var += (zi - z_mean) * (zi - z_mean);
    }
    if var < MIN_AXIAL_SPAN {
        return 0.0;
    }
    let slope = cov / var;
    let intercept = y_mean - slope * z_mean;

    // Residual span: how far the chain of centroids bows off the line.
    let mut residual_min = f64::INFINITY;
    let mut residual_max = f64::NEG_INFINITY;
    for (&zi, &yi) in z.iter().zip(y.iter()) {
        let residual = yi - (slope * zi + intercept);
        residual_min = residual_min.min(residual);
        residual_max = residual_max.max(residual);
    }
    let residual_span = residual_max - residual_min;

    if !residual_span.is_finite() {
        return 0.0;
    }

    let angle = (residual_span / z_span).atan().to_degrees();
    debug!(angle_deg = angle, residual_span, z_span, "curvature estimate");
    angle
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn vertebra_at(z: f64, y: f64) -> Vertebra {
        let mut v = Vertebra::new("V", z as usize, z as usize + 1);
        v.centroid = (z, y, 8.0);
        v
    }

    #[test]
    fn too_few_vertebrae_is_zero() {
        assert_relative_eq!(estimate_cobb_angle(&[]), 0.0);
        let two = vec![vertebra_at(0.0, 0.0), vertebra_at(10.0, 5.0)];
        assert_relative_eq!(estimate_cobb_angle(&two), 0.0);
    }

    #[test]
    fn straight_line_is_zero() {
        let vertebrae: Vec<Vertebra> =
            (0..5).map(|i| vertebra_at(i as f64 * 10.0, 8.0)).collect();
        assert_relative_eq!(estimate_cobb_angle(&vertebrae), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn slanted_straight_line_is_zero() {
        // A tilted but straight spine has no curvature.
        let vertebrae: Vec<Vertebra> = (0..5)
            .map(|i| vertebra_at(i as f64 * 10.0, 8.0 + i as f64 * 2.0))
            .collect();
        assert_relative_eq!(estimate_cobb_angle(&vertebrae), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn bowed_centroids_give_positive_angle() {
        // A parabolic bow: ends on the line, middle off it.
        let vertebrae = vec![
            vertebra_at(0.0, 0.0),
            vertebra_at(10.0, 4.0),
            vertebra_at(20.0, 0.0),
        ];
        let angle = estimate_cobb_angle(&vertebrae);
        assert!(angle > 1.0, "angle {angle}");
        assert!(angle < 90.0);
    }

    #[test]
    fn degenerate_axial_span_is_zero() {
        let vertebrae = vec![
            vertebra_at(5.0, 0.0),
            vertebra_at(5.0, 4.0),
            vertebra_at(5.0, 9.0),
        ];
        assert_relative_eq!(estimate_cobb_angle(&vertebrae), 0.0);
    }

    #[test]
    fn larger_bow_gives_larger_angle() {
        let small = vec![
            vertebra_at(0.0, 0.0),
            vertebra_at(10.0, 1.0),
            vertebra_at(20.0, 0.0),
        ];
        let large = vec![
            vertebra_at(0.0, 0.0),
            vertebra_at(10.0, 6.0),
            vertebra_at(20.0, 0.0),
        ];
        assert!(estimate_cobb_angle(&large) > estimate_cobb_angle(&small));
    }
}
