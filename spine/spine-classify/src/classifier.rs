//! The trained ensemble classifier.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spine_types::VertebraStatus;
use tracing::info;

use crate::error::{TrainError, TrainResult};
use crate::forest::{TreeNode, TreeParams, CLASS_COUNT};
use crate::reference::{ReferenceSet, FEATURE_COUNT};

/// Hyperparameters for the bagged ensemble.
#[derive(Debug, Clone, Copy)]
pub struct ForestParams {
    /// Number of trees. Default: 100.
    pub trees: usize,

    /// Maximum depth per tree. Default: 5.
    pub max_depth: usize,

    /// RNG seed for bootstrap sampling and feature subsets; training is
    /// fully deterministic for a given seed. Default: 42.
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            trees: 100,
            max_depth: 5,
            seed: 42,
        }
    }
}

/// A trained vertebra status classifier.
///
/// Immutable once trained. Construct one at the composition root and pass
/// it to the pipeline; there is no global instance.
///
/// # Example
///
/// ```
/// use spine_classify::{ReferenceSet, TrainedClassifier};
/// use spine_types::VertebraStatus;
///
/// let classifier = TrainedClassifier::train(&ReferenceSet::builtin()).unwrap();
///
/// // A clearly healthy metric vector.
/// let (status, confidence) = classifier.predict([620.0, 75.0, 29.0, 1.0, 5.5]);
/// assert_eq!(status, VertebraStatus::Normal);
/// assert!(confidence > 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct TrainedClassifier {
    trees: Vec<TreeNode>,
    means: [f64; FEATURE_COUNT],
    stds: [f64; FEATURE_COUNT],
}

impl TrainedClassifier {
    /// Trains on a reference set with default hyperparameters.
    ///
    /// # Errors
    ///
    /// Returns a [`TrainError`] when the reference set is empty, covers
    /// fewer than two classes, or has a constant feature column.
    pub fn train(reference: &ReferenceSet) -> TrainResult<Self> {
        Self::train_with(reference, ForestParams::default())
    }

    /// Trains with explicit hyperparameters.
    ///
    /// # Errors
    ///
    /// Same conditions as [`TrainedClassifier::train`].
    pub fn train_with(reference: &ReferenceSet, params: ForestParams) -> TrainResult<Self> {
        if reference.is_empty() {
            return Err(TrainError::EmptyReferenceSet);
        }
        if reference.class_count() < 2 {
            return Err(TrainError::TooFewClasses {
                classes: reference.class_count(),
            });
        }

        let (means, stds) = standardization(&reference.features)?;
        let features: Vec<[f64; FEATURE_COUNT]> = reference
            .features
            .iter()
            .map(|row| standardize(row, &means, &stds))
            .collect();
        let labels: Vec<usize> = reference
            .labels
            .iter()
            .map(|l| l.class_index())
            .collect();

        // sqrt(features) per split, the usual bagged-forest choice.
        let tree_params = TreeParams {
            max_depth: params.max_depth,
            features_per_split: (FEATURE_COUNT as f64).sqrt().round() as usize,
        };

        let mut rng = StdRng::seed_from_u64(params.seed);
        let n = features.len();
        let trees = (0..params.trees.max(1))
            .map(|_| {
                // Bootstrap sample with replacement.
                let sample: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
                TreeNode::grow(&features, &labels, &sample, 0, tree_params, &mut rng)
            })
            .collect();

        info!(
            examples = n,
            trees = params.trees.max(1),
            "classifier trained"
        );

        Ok(Self { trees, means, stds })
    }

    /// Predicts a status and its confidence for one metric vector.
    ///
    /// Features are `[hu_mean, hu_std, height_mm, compression_ratio,
    /// bone_fraction_pct]`. Confidence is the winning class's share of
    /// tree votes.
    #[must_use]
    pub fn predict(&self, features: [f64; FEATURE_COUNT]) -> (VertebraStatus, f64) {
        let x = standardize(&features, &self.means, &self.stds);

        let mut votes = [0_usize; CLASS_COUNT];
        for tree in &self.trees {
            votes[tree.predict(&x)] += 1;
        }

        let mut winner = 0;
        for (class, &count) in votes.iter().enumerate() {
            if count > votes[winner] {
                winner = class;
            }
        }

        let confidence = votes[winner] as f64 / self.trees.len() as f64;
        let status = VertebraStatus::from_class_index(winner).unwrap_or_default();
        (status, confidence)
    }

    /// Number of trees in the ensemble.
    #[must_use]
    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }
}

/// Per-column mean and standard deviation for z-score scaling.
fn standardization(
    features: &[[f64; FEATURE_COUNT]],
) -> TrainResult<([f64; FEATURE_COUNT], [f64; FEATURE_COUNT])> {
    let n = features.len() as f64;
    let mut means = [0.0; FEATURE_COUNT];
    let mut stds = [0.0; FEATURE_COUNT];

    for row in features {
        for (m, &v) in means.iter_mut().zip(row.iter()) {
            *m += v;
        }
    }
    for m in &mut means {
        *m /= n;
    }

    for row in features {
        for c in 0..FEATURE_COUNT {
            let d = row[c] - means[c];
            stds[c] += d * d;
        }
    }
    for (column, s) in stds.iter_mut().enumerate() {
        *s = (*s / n).sqrt();
        if *s < 1e-12 {
            return Err(TrainError::ConstantFeature { column });
        }
    }

    Ok((means, stds))
}

fn standardize(
    row: &[f64; FEATURE_COUNT],
    means: &[f64; FEATURE_COUNT],
    stds: &[f64; FEATURE_COUNT],
) -> [f64; FEATURE_COUNT] {
    let mut out = [0.0; FEATURE_COUNT];
    for c in 0..FEATURE_COUNT {
        out[c] = (row[c] - means[c]) / stds[c];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trains_on_builtin_set() {
        let classifier = TrainedClassifier::train(&ReferenceSet::builtin()).unwrap();
        assert_eq!(classifier.tree_count(), 100);
    }

    #[test]
    fn predicts_reference_classes() {
        let set = ReferenceSet::builtin();
        let classifier = TrainedClassifier::train(&set).unwrap();

        // The ensemble should at least reproduce the training labels on
        // this tiny, well-separated set.
        let mut correct = 0;
        for (row, &label) in set.features.iter().zip(set.labels.iter()) {
            let (status, _) = classifier.predict(*row);
            if status == label {
                correct += 1;
            }
        }
        assert!(correct >= 14, "only {correct}/16 reference rows correct");
    }

    #[test]
    fn prediction_is_deterministic() {
        let a = TrainedClassifier::train(&ReferenceSet::builtin()).unwrap();
        let b = TrainedClassifier::train(&ReferenceSet::builtin()).unwrap();

        let sample = [480.0, 95.0, 26.0, 0.8, 3.8];
        assert_eq!(a.predict(sample), b.predict(sample));
    }

    #[test]
    fn confidence_is_a_vote_share() {
        let classifier = TrainedClassifier::train(&ReferenceSet::builtin()).unwrap();
        let (_, confidence) = classifier.predict([600.0, 80.0, 30.0, 1.0, 5.0]);
        assert!(confidence > 0.0 && confidence <= 1.0);
    }

    #[test]
    fn rejects_empty_set() {
        let set = ReferenceSet {
            features: Vec::new(),
            labels: Vec::new(),
        };
        assert!(matches!(
            TrainedClassifier::train(&set),
            Err(TrainError::EmptyReferenceSet)
        ));
    }

    #[test]
    fn rejects_single_class() {
        let set = ReferenceSet {
            features: vec![[1.0, 2.0, 3.0, 4.0, 5.0], [2.0, 3.0, 4.0, 5.0, 6.0]],
            labels: vec![VertebraStatus::Normal, VertebraStatus::Normal],
        };
        assert!(matches!(
            TrainedClassifier::train(&set),
            Err(TrainError::TooFewClasses { classes: 1 })
        ));
    }

    #[test]
    fn rejects_constant_feature() {
        let set = ReferenceSet {
            features: vec![[1.0, 2.0, 3.0, 7.0, 5.0], [2.0, 3.0, 4.0, 7.0, 6.0]],
            labels: vec![VertebraStatus::Normal, VertebraStatus::Compressed],
        };
        assert!(matches!(
            TrainedClassifier::train(&set),
            Err(TrainError::ConstantFeature { column: 3 })
        ));
    }

    #[test]
    fn custom_params_respected() {
        let params = ForestParams {
            trees: 10,
            max_depth: 3,
            seed: 7,
        };
        let classifier =
            TrainedClassifier::train_with(&ReferenceSet::builtin(), params).unwrap();
        assert_eq!(classifier.tree_count(), 10);
    }
}
