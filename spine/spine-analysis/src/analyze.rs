//! The analysis entry point.

use mesh_types::TriangleMesh;
use spine_types::{AnomalyRecord, Vertebra, VertebraStatus};
use tracing::info;
use volume_types::{BoneMask, ScalarVolume, Spacing};

use crate::curvature::estimate_cobb_angle;
use crate::metrics::QuantitativeMetrics;

/// Everything the analyzer consumes. All references; nothing is mutated.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisInputs<'a> {
    /// Reconstructed surface, when extraction produced one.
    pub mesh: Option<&'a TriangleMesh>,
    /// Anomaly records from the optional detector; only counted here.
    pub anomalies: &'a [AnomalyRecord],
    /// Classified vertebrae.
    pub vertebrae: &'a [Vertebra],
    /// The original intensity volume.
    pub volume: &'a ScalarVolume,
    /// Bone mask, when segmentation ran.
    pub mask: Option<&'a BoneMask>,
    /// Physical voxel spacing.
    pub spacing: Spacing,
}

/// Computes the full quantitative metrics map.
///
/// Absent inputs simply leave their metrics out (or zero where a count is
/// more useful than an absence): a missing mask falls back to the mesh's
/// enclosed volume for `bone_volume_cm3`, a missing mesh omits the mesh
/// statistics, an empty vertebra list reports `vertebra_count = 0` and a
/// 0 curvature.
#[must_use]
pub fn analyze(inputs: &AnalysisInputs<'_>) -> QuantitativeMetrics {
    let mut metrics = QuantitativeMetrics::new();

    bone_metrics(&mut metrics, inputs);
    vertebra_metrics(&mut metrics, inputs.vertebrae);
    metrics.set(
        "estimated_cobb_angle_deg",
        estimate_cobb_angle(inputs.vertebrae),
    );

    if let Some(mesh) = inputs.mesh {
        metrics.set("mesh_vertices", mesh.vertex_count() as f64);
        metrics.set("mesh_triangles", mesh.triangle_count() as f64);
        metrics.set("mesh_surface_area_mm2", mesh.surface_area());
    }

    metrics.set("anomaly_count", inputs.anomalies.len() as f64);

    info!(metric_count = metrics.len(), "quantitative analysis finished");
    metrics
}

/// Bone volume and intensity statistics over masked voxels.
fn bone_metrics(metrics: &mut QuantitativeMetrics, inputs: &AnalysisInputs<'_>) {
    match inputs.mask {
        Some(mask) => {
            let bone_voxels = mask.count();
            metrics.set("bone_voxels", bone_voxels as f64);
            metrics.set(
                "bone_volume_cm3",
                bone_voxels as f64 * inputs.spacing.voxel_volume_mm3() / 1000.0,
            );

            if bone_voxels > 0 {
                let mut sum = 0.0_f64;
                let mut sum_sq = 0.0_f64;
                let mut min = f64::INFINITY;
                let mut max = f64::NEG_INFINITY;
                for (&flag, &value) in mask.values().iter().zip(inputs.volume.values().iter()) {
                    if !flag {
                        continue;
                    }
                    let v = f64::from(value);
                    sum += v;
                    sum_sq += v * v;
                    min = min.min(v);
                    max = max.max(v);
                }
                let n = bone_voxels as f64;
                let mean = sum / n;
                metrics.set("hu_mean", mean);
                metrics.set("hu_std", (sum_sq / n - mean * mean).max(0.0).sqrt());
                metrics.set("hu_min", min);
                metrics.set("hu_max", max);
                // Linear map of the mean from the 200..1600 window to [0, 1].
                metrics.set(
                    "bone_density_index",
                    ((mean - 200.0) / 1400.0).clamp(0.0, 1.0),
                );
            }
        }
        None => {
            if let Some(mesh) = inputs.mesh {
                metrics.set("bone_volume_cm3", mesh.volume() / 1000.0);
            }
        }
    }
}

/// Vertebra aggregates: counts, heights, compression, worst case.
fn vertebra_metrics(metrics: &mut QuantitativeMetrics, vertebrae: &[Vertebra]) {
    metrics.set("vertebra_count", vertebrae.len() as f64);

    for status in VertebraStatus::ALL {
        let count = vertebrae
            .iter()
            .filter(|v| v.effective_status() == status)
            .count();
        metrics.set(format!("count_{}", status.name()), count as f64);
    }

    if vertebrae.is_empty() {
        return;
    }

    let n = vertebrae.len() as f64;
    let heights: Vec<f64> = vertebrae.iter().map(|v| v.height_mm).collect();
    let ratios: Vec<f64> = vertebrae.iter().map(|v| v.compression_ratio).collect();

    metrics.set("mean_vertebra_height_mm", heights.iter().sum::<f64>() / n);
    metrics.set(
        "min_vertebra_height_mm",
        heights.iter().fold(f64::INFINITY, |a, &b| a.min(b)),
    );
    metrics.set("mean_compression_ratio", ratios.iter().sum::<f64>() / n);
    metrics.set(
        "min_compression_ratio",
        ratios.iter().fold(f64::INFINITY, |a, &b| a.min(b)),
    );

    // The single most compressed vertebra (arg-min of the ratio).
    if let Some(worst) = vertebrae.iter().min_by(|a, b| {
        a.compression_ratio
            .partial_cmp(&b.compression_ratio)
            .unwrap_or(std::cmp::Ordering::Equal)
    }) {
        metrics.set("most_compressed_ratio", worst.compression_ratio);
        metrics.set("most_compressed_index", worst.z_start as f64);
        info!(
            label = %worst.label,
            ratio = worst.compression_ratio,
            "most compressed vertebra"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn vertebra(label: &str, height: f64, ratio: f64, status: VertebraStatus) -> Vertebra {
        let mut v = Vertebra::new(label, 0, 10);
        v.height_mm = height;
        v.compression_ratio = ratio;
        v.status = status;
        v.centroid = (5.0, 8.0, 8.0);
        v
    }

    fn bone_block() -> (ScalarVolume, BoneMask) {
        let mut volume = ScalarVolume::filled((6, 6, 6), -400.0).unwrap();
        let mut mask = BoneMask::new((6, 6, 6)).unwrap();
        for z in 1..5 {
            for y in 1..5 {
                for x in 1..5 {
                    volume.set(z, y, x, 900.0);
                    mask.set(z, y, x, true);
                }
            }
        }
        (volume, mask)
    }

    #[test]
    fn bone_volume_from_mask() {
        let (volume, mask) = bone_block();
        let metrics = analyze(&AnalysisInputs {
            mesh: None,
            anomalies: &[],
            vertebrae: &[],
            volume: &volume,
            mask: Some(&mask),
            spacing: Spacing::new(2.0, 1.0, 1.0).unwrap(),
        });

        assert_relative_eq!(metrics.get("bone_voxels").unwrap(), 64.0);
        // 64 voxels x 2 mm^3 / 1000.
        assert_relative_eq!(metrics.get("bone_volume_cm3").unwrap(), 0.128);
        assert_relative_eq!(metrics.get("hu_mean").unwrap(), 900.0);
        assert_relative_eq!(metrics.get("hu_std").unwrap(), 0.0);
        assert_relative_eq!(metrics.get("hu_min").unwrap(), 900.0);
        assert_relative_eq!(metrics.get("hu_max").unwrap(), 900.0);
        // (900 - 200) / 1400 = 0.5.
        assert_relative_eq!(metrics.get("bone_density_index").unwrap(), 0.5);
    }

    #[test]
    fn density_index_clipped() {
        let mut volume = ScalarVolume::filled((2, 2, 2), 3000.0).unwrap();
        volume.set(0, 0, 0, 3000.0);
        let mask = BoneMask::from_predicate(&volume, |_| true);

        let metrics = analyze(&AnalysisInputs {
            mesh: None,
            anomalies: &[],
            vertebrae: &[],
            volume: &volume,
            mask: Some(&mask),
            spacing: Spacing::UNIT,
        });
        assert_relative_eq!(metrics.get("bone_density_index").unwrap(), 1.0);
    }

    #[test]
    fn vertebra_aggregates() {
        let (volume, _) = bone_block();
        let vertebrae = vec![
            vertebra("L3", 30.0, 1.00, VertebraStatus::Normal),
            vertebra("L2", 28.0, 0.95, VertebraStatus::Normal),
            vertebra("L1", 18.0, 0.55, VertebraStatus::Compressed),
        ];

        let metrics = analyze(&AnalysisInputs {
            mesh: None,
            anomalies: &[],
            vertebrae: &vertebrae,
            volume: &volume,
            mask: None,
            spacing: Spacing::UNIT,
        });

        assert_relative_eq!(metrics.get("vertebra_count").unwrap(), 3.0);
        assert_relative_eq!(metrics.get("count_normal").unwrap(), 2.0);
        assert_relative_eq!(metrics.get("count_compressed").unwrap(), 1.0);
        assert_relative_eq!(metrics.get("min_vertebra_height_mm").unwrap(), 18.0);
        assert_relative_eq!(metrics.get("min_compression_ratio").unwrap(), 0.55);
        assert_relative_eq!(metrics.get("most_compressed_ratio").unwrap(), 0.55);
    }

    #[test]
    fn empty_inputs_give_zero_counts() {
        let volume = ScalarVolume::filled((4, 4, 4), -1024.0).unwrap();
        let metrics = analyze(&AnalysisInputs {
            mesh: None,
            anomalies: &[],
            vertebrae: &[],
            volume: &volume,
            mask: None,
            spacing: Spacing::UNIT,
        });

        assert_eq!(metrics.get("vertebra_count"), Some(0.0));
        assert_eq!(metrics.get("anomaly_count"), Some(0.0));
        assert_eq!(metrics.get("estimated_cobb_angle_deg"), Some(0.0));
        assert!(metrics.get("bone_volume_cm3").is_none());
        assert!(metrics.get("hu_mean").is_none());
    }

    #[test]
    fn empty_mask_reports_zero_volume() {
        let volume = ScalarVolume::filled((4, 4, 4), -1024.0).unwrap();
        let mask = BoneMask::new((4, 4, 4)).unwrap();
        let metrics = analyze(&AnalysisInputs {
            mesh: None,
            anomalies: &[],
            vertebrae: &[],
            volume: &volume,
            mask: Some(&mask),
            spacing: Spacing::UNIT,
        });

        assert_eq!(metrics.get("bone_volume_cm3"), Some(0.0));
        assert!(metrics.get("hu_mean").is_none());
    }

    #[test]
    fn anomalies_counted_verbatim() {
        let volume = ScalarVolume::filled((4, 4, 4), 0.0).unwrap();
        let anomalies = vec![
            AnomalyRecord {
                slice_index: 1,
                kind: "fracture".into(),
                confidence: 0.9,
                bounding_box: [0.0, 0.0, 1.0, 1.0],
                description: String::new(),
            };
            3
        ];

        let metrics = analyze(&AnalysisInputs {
            mesh: None,
            anomalies: &anomalies,
            vertebrae: &[],
            volume: &volume,
            mask: None,
            spacing: Spacing::UNIT,
        });
        assert_relative_eq!(metrics.get("anomaly_count").unwrap(), 3.0);
    }
}
