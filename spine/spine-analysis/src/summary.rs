//! Clinical summary and recommendations.

use serde::{Deserialize, Serialize};
use spine_types::{AnomalyRecord, Vertebra, VertebraStatus};

use crate::metrics::QuantitativeMetrics;

/// A plain-language roll-up of the analysis.
///
/// Recommendations are derived from the classified vertebrae and the
/// curvature estimate with fixed clinical tiers; they are advisory text,
/// not a diagnosis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicalSummary {
    /// Number of vertebrae analyzed.
    pub vertebra_count: usize,
    /// Number of anomalies reported by the detector.
    pub anomaly_count: usize,
    /// Ordered recommendation lines.
    pub recommendations: Vec<String>,
}

/// Builds the clinical summary from analysis results.
#[must_use]
pub fn generate_summary(
    vertebrae: &[Vertebra],
    metrics: &QuantitativeMetrics,
    anomalies: &[AnomalyRecord],
) -> ClinicalSummary {
    let mut recommendations = Vec::new();

    let labels_with = |status: VertebraStatus| -> Vec<&str> {
        vertebrae
            .iter()
            .filter(|v| v.effective_status() == status)
            .map(|v| v.label.as_str())
            .collect()
    };

    let compressed = labels_with(VertebraStatus::Compressed);
    if !compressed.is_empty() {
        recommendations.push(format!(
            "Suspected compression fracture: {} - MRI follow-up recommended",
            compressed.join(", ")
        ));
    }

    let suspect = labels_with(VertebraStatus::Suspect);
    if !suspect.is_empty() {
        recommendations.push(format!(
            "Suspect vertebrae: {} - close monitoring advised",
            suspect.join(", ")
        ));
    }

    if !labels_with(VertebraStatus::Osteopenic).is_empty() {
        recommendations
            .push("Low bone density - osteoporosis work-up (densitometry) advised".to_string());
    }

    let angle = metrics.get("estimated_cobb_angle_deg").unwrap_or(0.0);
    if angle > 10.0 {
        recommendations.push(format!(
            "Estimated axial deformity {angle:.1} degrees - spine surgery consult recommended"
        ));
    } else if angle > 5.0 {
        recommendations.push(format!(
            "Mild axial deformity ({angle:.1} degrees) - semi-annual follow-up"
        ));
    }

    if recommendations.is_empty() {
        recommendations
            .push("No significant findings - standard follow-up recommended".to_string());
    }

    ClinicalSummary {
        vertebra_count: vertebrae.len(),
        anomaly_count: anomalies.len(),
        recommendations,
    }
}
