//! The orchestrator.

use mesh_extract::extract_from_mask;
use spine_analysis::{analyze, generate_summary, AnalysisInputs};
use spine_classify::{classify, TrainedClassifier};
use spine_detect::detect;
use spine_types::{AnomalyDetector, CancelToken, NoopDetector, ProgressSink};
use tracing::{info, warn};
use volume_prep::prepare;
use volume_segment::segment_with_cleanup;
use volume_types::{ScalarVolume, Spacing};

use crate::error::PipelineResult;
use crate::params::PipelineParams;
use crate::result::ReconstructionResult;
use crate::stage::Stage;

/// The reconstruction pipeline.
///
/// Holds the configuration, the optionally injected classifier, and the
/// anomaly detector. One instance serves one run at a time; instantiate
/// per session for concurrent work. The classifier is constructed by the
/// caller's composition root and moved in - the pipeline never trains
/// models or keeps global state.
pub struct ReconstructionPipeline {
    params: PipelineParams,
    classifier: Option<TrainedClassifier>,
    detector: Box<dyn AnomalyDetector>,
}

impl ReconstructionPipeline {
    /// Creates a pipeline with no classifier and no anomaly detector.
    #[must_use]
    pub fn new(params: PipelineParams) -> Self {
        Self {
            params,
            classifier: None,
            detector: Box::new(NoopDetector),
        }
    }

    /// Injects a trained status classifier.
    #[must_use]
    pub fn with_classifier(mut self, classifier: TrainedClassifier) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Injects an anomaly detector.
    #[must_use]
    pub fn with_detector(mut self, detector: Box<dyn AnomalyDetector>) -> Self {
        self.detector = detector;
        self
    }

    /// Runs the pipeline without progress reporting or cancellation.
    ///
    /// # Errors
    ///
    /// Fails only on invalid configuration, before any stage runs.
    pub fn run(
        &self,
        volume: &ScalarVolume,
        spacing: Spacing,
    ) -> PipelineResult<Option<ReconstructionResult>> {
        self.run_with(volume, spacing, None, &CancelToken::new())
    }

    /// Runs the pipeline with a progress sink and cancellation token.
    ///
    /// Progress percentages increase monotonically from 0 to 100. The
    /// token is checked between stages; a cancelled run stops reporting
    /// and returns `Ok(None)` without a result bundle - in-flight stage
    /// work completes rather than being aborted.
    ///
    /// # Errors
    ///
    /// Fails only on invalid configuration, before any stage runs.
    pub fn run_with(
        &self,
        volume: &ScalarVolume,
        spacing: Spacing,
        progress: Option<&dyn ProgressSink>,
        cancel: &CancelToken,
    ) -> PipelineResult<Option<ReconstructionResult>> {
        self.params.validate()?;

        let report = |percent: u8, message: &str| {
            if let Some(sink) = progress {
                sink.report(percent, message);
            }
        };
        let stage = |s: Stage| report(s.percent(), s.message());

        if cancel.is_cancelled() {
            info!("run cancelled before start");
            return Ok(None);
        }

        // Prepare: normalized volume for the bundle, authoritative mask
        // from the segmenter below.
        stage(Stage::Preparing);
        let prepared = prepare(volume, spacing, self.params.smooth, &self.params.prepare);

        if cancel.is_cancelled() {
            info!("run cancelled after preparation");
            return Ok(None);
        }

        stage(Stage::Segmenting);
        let bone_mask = segment_with_cleanup(
            volume,
            &self.params.segment_params(),
            self.params.min_component_size,
        );

        if cancel.is_cancelled() {
            info!("run cancelled after segmentation");
            return Ok(None);
        }

        stage(Stage::Meshing);
        let mesh = extract_from_mask(&bone_mask, spacing, &self.params.extract);
        report(35, "3D reconstruction complete");

        if cancel.is_cancelled() {
            info!("run cancelled after meshing");
            return Ok(None);
        }

        stage(Stage::DetectingVertebrae);
        let mut vertebrae = detect(&bone_mask, volume, spacing, &self.params.detect);

        stage(Stage::Classifying);
        classify(&mut vertebrae, self.classifier.as_ref());
        report(
            60,
            &format!("{} vertebrae detected and classified", vertebrae.len()),
        );

        if cancel.is_cancelled() {
            info!("run cancelled after vertebra analysis");
            return Ok(None);
        }

        stage(Stage::DetectingAnomalies);
        let anomalies = match self.detector.detect(volume, &bone_mask) {
            Ok(found) => found,
            Err(err) => {
                // Detector failure is a soft degradation.
                warn!(error = %err, "anomaly detector failed, continuing without anomalies");
                Vec::new()
            }
        };
        report(75, &format!("{} anomalies found", anomalies.len()));

        if cancel.is_cancelled() {
            info!("run cancelled after anomaly detection");
            return Ok(None);
        }

        stage(Stage::Aggregating);
        let metrics = analyze(&AnalysisInputs {
            mesh: mesh.as_ref(),
            anomalies: &anomalies,
            vertebrae: &vertebrae,
            volume,
            mask: Some(&bone_mask),
            spacing,
        });
        let summary = generate_summary(&vertebrae, &metrics, &anomalies);
        report(90, "Metrics computed");

        report(100, "Analysis complete");
        info!(
            bone_voxels = bone_mask.count(),
            vertebrae = vertebrae.len(),
            has_mesh = mesh.is_some(),
            "pipeline run finished"
        );

        Ok(Some(ReconstructionResult {
            normalized_volume: prepared.normalized,
            bone_mask,
            mesh,
            vertebrae,
            metrics,
            summary,
            anomalies,
            spacing,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spine_classify::ReferenceSet;
    use spine_types::{AnomalyRecord, DetectorError};
    use volume_types::BoneMask;

    struct FailingDetector;

    impl AnomalyDetector for FailingDetector {
        fn is_available(&self) -> bool {
            true
        }

        fn detect(
            &self,
            _volume: &ScalarVolume,
            _mask: &BoneMask,
        ) -> Result<Vec<AnomalyRecord>, DetectorError> {
            Err(DetectorError {
                reason: "backend not loaded".to_string(),
            })
        }
    }

    fn sphere_volume(n: usize, radius: f64) -> ScalarVolume {
        let mut v = ScalarVolume::filled((n, n, n), -400.0).unwrap();
        let c = n as f64 / 2.0;
        for z in 0..n {
            for y in 0..n {
                for x in 0..n {
                    let dz = z as f64 - c;
                    let dy = y as f64 - c;
                    let dx = x as f64 - c;
                    if (dz * dz + dy * dy + dx * dx).sqrt() <= radius {
                        v.set(z, y, x, 700.0);
                    }
                }
            }
        }
        v
    }

    #[test]
    fn invalid_config_fails_before_stages() {
        let mut params = PipelineParams::default();
        params.extract.iso_level = f64::INFINITY;
        let pipeline = ReconstructionPipeline::new(params);

        let volume = sphere_volume(16, 5.0);
        assert!(pipeline.run(&volume, Spacing::UNIT).is_err());
    }

    #[test]
    fn cancelled_token_returns_no_result() {
        let pipeline = ReconstructionPipeline::new(PipelineParams::default());
        let volume = sphere_volume(16, 5.0);

        let cancel = CancelToken::new();
        cancel.cancel();
        let result = pipeline
            .run_with(&volume, Spacing::UNIT, None, &cancel)
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn failing_detector_degrades_to_empty() {
        let pipeline = ReconstructionPipeline::new(PipelineParams::default())
            .with_detector(Box::new(FailingDetector));
        let volume = sphere_volume(24, 8.0);

        let result = pipeline.run(&volume, Spacing::UNIT).unwrap().unwrap();
        assert!(result.anomalies.is_empty());
        assert_eq!(result.metrics.get("anomaly_count"), Some(0.0));
    }

    #[test]
    fn classifier_injection_sets_ml_status() {
        let classifier = TrainedClassifier::train(&ReferenceSet::builtin()).unwrap();
        let pipeline =
            ReconstructionPipeline::new(PipelineParams::default()).with_classifier(classifier);
        let volume = sphere_volume(32, 12.0);

        let result = pipeline.run(&volume, Spacing::UNIT).unwrap().unwrap();
        assert!(!result.vertebrae.is_empty());
        for v in &result.vertebrae {
            assert!(v.ml_status.is_some());
        }
    }
}
