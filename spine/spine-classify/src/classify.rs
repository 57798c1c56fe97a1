//! In-place enrichment of vertebra records.

use spine_types::Vertebra;
use tracing::debug;

use crate::classifier::TrainedClassifier;

/// Confidence reported when no trained classifier is available and the
/// rule-based status is used as-is.
pub const FALLBACK_CONFIDENCE: f64 = 0.7;

/// Classifies vertebrae in place.
///
/// With a trained classifier, each vertebra receives `ml_status`, a
/// `confidence` (winning vote share, rounded to two decimals), and the
/// matching `color_tag`. Without one, the rule-based `status` is promoted
/// to `ml_status` at [`FALLBACK_CONFIDENCE`] - classification always
/// produces a valid status and never fails.
pub fn classify(vertebrae: &mut [Vertebra], classifier: Option<&TrainedClassifier>) {
    for v in vertebrae.iter_mut() {
        let (status, confidence) = match classifier {
            Some(model) => model.predict([
                v.hu_mean,
                v.hu_std,
                v.height_mm,
                v.compression_ratio,
                v.bone_fraction_pct,
            ]),
            None => (v.status, FALLBACK_CONFIDENCE),
        };

        v.ml_status = Some(status);
        v.confidence = (confidence * 100.0).round() / 100.0;
        v.color_tag = status.color().to_string();

        debug!(
            label = %v.label,
            status = %status,
            confidence = v.confidence,
            "classified vertebra"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::ReferenceSet;
    use spine_types::VertebraStatus;

    fn sample_vertebra(hu_mean: f64, compression: f64) -> Vertebra {
        let mut v = Vertebra::new("L2", 0, 30);
        v.hu_mean = hu_mean;
        v.hu_std = 80.0;
        v.height_mm = 30.0;
        v.compression_ratio = compression;
        v.bone_fraction_pct = 5.0;
        v.status = VertebraStatus::Normal;
        v
    }

    #[test]
    fn enriches_with_trained_model() {
        let classifier = TrainedClassifier::train(&ReferenceSet::builtin()).unwrap();

        let mut collapsed = Vertebra::new("T12", 0, 15);
        collapsed.hu_mean = 620.0;
        collapsed.hu_std = 75.0;
        collapsed.height_mm = 15.0;
        collapsed.compression_ratio = 0.45;
        collapsed.bone_fraction_pct = 5.5;

        let mut vertebrae = vec![sample_vertebra(600.0, 1.0), collapsed];
        classify(&mut vertebrae, Some(&classifier));

        assert_eq!(vertebrae[0].ml_status, Some(VertebraStatus::Normal));
        assert_eq!(vertebrae[1].ml_status, Some(VertebraStatus::Compressed));
        for v in &vertebrae {
            assert!(v.confidence > 0.0 && v.confidence <= 1.0);
            assert_eq!(v.color_tag, v.effective_status().color());
        }
    }

    #[test]
    fn fallback_promotes_rule_status() {
        let mut v = sample_vertebra(600.0, 1.0);
        v.status = VertebraStatus::Suspect;
        let mut vertebrae = vec![v];

        classify(&mut vertebrae, None);

        assert_eq!(vertebrae[0].ml_status, Some(VertebraStatus::Suspect));
        assert!((vertebrae[0].confidence - FALLBACK_CONFIDENCE).abs() < 1e-12);
        assert_eq!(vertebrae[0].color_tag, VertebraStatus::Suspect.color());
    }

    #[test]
    fn empty_list_is_fine() {
        let mut vertebrae: Vec<Vertebra> = Vec::new();
        classify(&mut vertebrae, None);
        assert!(vertebrae.is_empty());
    }

    #[test]
    fn confidence_rounded_to_two_decimals() {
        let classifier = TrainedClassifier::train(&ReferenceSet::builtin()).unwrap();
        let mut vertebrae = vec![sample_vertebra(480.0, 0.85)];
        classify(&mut vertebrae, Some(&classifier));

        let confidence = vertebrae[0].confidence;
        assert!((confidence * 100.0 - (confidence * 100.0).round()).abs() < 1e-9);
    }
}
