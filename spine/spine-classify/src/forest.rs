//! Decision trees for the bagged ensemble.

use rand::rngs::StdRng;
use rand::Rng;

use crate::reference::FEATURE_COUNT;

/// Number of statuses the trees discriminate between.
pub(crate) const CLASS_COUNT: usize = 4;

/// Limits for growing one tree.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TreeParams {
    /// Maximum tree depth.
    pub max_depth: usize,
    /// Number of features considered at each split.
    pub features_per_split: usize,
}

/// One node of a CART decision tree.
#[derive(Debug, Clone)]
pub(crate) enum TreeNode {
    /// Terminal node voting for a class.
    Leaf {
        /// Majority class of the training samples that reached this node.
        class: usize,
    },
    /// Binary split on one feature.
    Split {
        /// Feature column to test.
        feature: usize,
        /// Samples with `value <= threshold` go left.
        threshold: f64,
        /// Subtree for values at or below the threshold.
        left: Box<TreeNode>,
        /// Subtree for values above the threshold.
        right: Box<TreeNode>,
    },
}

impl TreeNode {
    /// Grows a tree on the given sample indices.
    ///
    /// Splits greedily on the Gini criterion, drawing a random feature
    /// subset per node (the source of ensemble diversity besides
    /// bootstrap sampling). Recursion stops at purity, the depth limit,
    /// or when no split reduces impurity.
    pub(crate) fn grow(
        features: &[[f64; FEATURE_COUNT]],
        labels: &[usize],
        indices: &[usize],
        depth: usize,
        params: TreeParams,
        rng: &mut StdRng,
    ) -> Self {
        let counts = class_counts(labels, indices);
        let majority = majority_class(&counts);

        if depth >= params.max_depth || counts.iter().filter(|&&c| c > 0).count() <= 1 {
            return Self::Leaf { class: majority };
        }

        let Some((feature, threshold)) =
            best_split(features, labels, indices, params.features_per_split, rng)
        else {
            return Self::Leaf { class: majority };
        };

        let (left_indices, right_indices): (Vec<usize>, Vec<usize>) = indices
            .iter()
            .copied()
            .partition(|&i| features[i][feature] <= threshold);

        if left_indices.is_empty() || right_indices.is_empty() {
            return Self::Leaf { class: majority };
        }

        Self::Split {
            feature,
            threshold,
            left: Box::new(Self::grow(
                features,
                labels,
                &left_indices,
                depth + 1,
                params,
                rng,
            )),
            right: Box::new(Self::grow(
                features,
                labels,
                &right_indices,
                depth + 1,
                params,
                rng,
            )),
        }
    }

    /// Classifies one feature vector.
    pub(crate) fn predict(&self, x: &[f64; FEATURE_COUNT]) -> usize {
        match self {
            Self::Leaf { class } => *class,
            Self::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if x[*feature] <= *threshold {
                    left.predict(x)
                } else {
                    right.predict(x)
                }
            }
        }
    }
}

/// Picks the impurity-minimizing split over a random feature subset.
///
/// Candidate thresholds are midpoints between consecutive distinct values
/// of the feature within the node. Returns `None` when nothing beats the
/// parent impurity.
fn best_split(
    features: &[[f64; FEATURE_COUNT]],
    labels: &[usize],
    indices: &[usize],
    features_per_split: usize,
    rng: &mut StdRng,
) -> Option<(usize, f64)> {
    let parent_counts = class_counts(labels, indices);
    let parent_gini = gini(&parent_counts, indices.len());

    let candidates = sample_features(features_per_split, rng);

    let mut best: Option<(usize, f64, f64)> = None;
    for feature in candidates {
        let mut values: Vec<f64> = indices.iter().map(|&i| features[i][feature]).collect();
        values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        values.dedup();

        for pair in values.windows(2) {
            let threshold = (pair[0] + pair[1]) / 2.0;

            let mut left = [0_usize; CLASS_COUNT];
            let mut right = [0_usize; CLASS_COUNT];
            let mut left_n = 0_usize;
            for &i in indices {
                if features[i][feature] <= threshold {
                    left[labels[i]] += 1;
                    left_n += 1;
                } else {
                    right[labels[i]] += 1;
                }
            }
            let right_n = indices.len() - left_n;
            if left_n == 0 || right_n == 0 {
                continue;
            }

            let weighted = (left_n as f64 * gini(&left, left_n)
                + right_n as f64 * gini(&right, right_n))
                / indices.len() as f64;

            if weighted < parent_gini
                && best.map_or(true, |(_, _, current)| weighted < current)
            {
                best = Some((feature, threshold, weighted));
            }
        }
    }

    best.map(|(feature, threshold, _)| (feature, threshold))
}

/// Draws a random subset of feature columns without replacement.
fn sample_features(count: usize, rng: &mut StdRng) -> Vec<usize> {
    let count = count.clamp(1, FEATURE_COUNT);
    let mut pool: Vec<usize> = (0..FEATURE_COUNT).collect();
    for i in 0..count {
        let j = rng.gen_range(i..pool.len());
        pool.swap(i, j);
    }
    pool.truncate(count);
    pool
}

fn class_counts(labels: &[usize], indices: &[usize]) -> [usize; CLASS_COUNT] {
    let mut counts = [0_usize; CLASS_COUNT];
    for &i in indices {
        counts[labels[i]] += 1;
    }
    counts
}

/// Lowest class index wins ties, keeping training deterministic.
fn majority_class(counts: &[usize; CLASS_COUNT]) -> usize {
    let mut best = 0;
    for (class, &count) in counts.iter().enumerate() {
        if count > counts[best] {
            best = class;
        }
    }
    best
}

fn gini(counts: &[usize; CLASS_COUNT], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    1.0 - counts
        .iter()
        .map(|&c| {
            let p = c as f64 / total;
            p * p
        })
        .sum::<f64>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn toy_data() -> (Vec<[f64; FEATURE_COUNT]>, Vec<usize>) {
        // Class 0 clusters low on feature 0, class 1 high.
        let features = vec![
            [0.0, 0.0, 0.0, 0.0, 0.0],
            [0.1, 1.0, 0.0, 0.0, 0.0],
            [0.2, 0.0, 1.0, 0.0, 0.0],
            [1.0, 0.0, 0.0, 1.0, 0.0],
            [1.1, 1.0, 0.0, 0.0, 1.0],
            [1.2, 0.0, 1.0, 0.0, 0.0],
        ];
        let labels = vec![0, 0, 0, 1, 1, 1];
        (features, labels)
    }

    #[test]
    fn gini_pure_is_zero() {
        assert!(gini(&[4, 0, 0, 0], 4).abs() < 1e-12);
    }

    #[test]
    fn gini_uniform_is_max() {
        let g = gini(&[1, 1, 1, 1], 4);
        assert!((g - 0.75).abs() < 1e-12);
    }

    #[test]
    fn tree_separates_toy_data() {
        let (features, labels) = toy_data();
        let indices: Vec<usize> = (0..features.len()).collect();
        let mut rng = StdRng::seed_from_u64(42);
        let params = TreeParams {
            max_depth: 5,
            features_per_split: FEATURE_COUNT,
        };

        let tree = TreeNode::grow(&features, &labels, &indices, 0, params, &mut rng);

        for (x, &label) in features.iter().zip(labels.iter()) {
            assert_eq!(tree.predict(x), label);
        }
    }

    #[test]
    fn depth_zero_gives_majority_leaf() {
        let (features, labels) = toy_data();
        let indices: Vec<usize> = (0..features.len()).collect();
        let mut rng = StdRng::seed_from_u64(1);
        let params = TreeParams {
            max_depth: 0,
            features_per_split: FEATURE_COUNT,
        };

        let tree = TreeNode::grow(&features, &labels, &indices, 0, params, &mut rng);
        assert!(matches!(tree, TreeNode::Leaf { class: 0 }));
    }

    #[test]
    fn sample_features_in_range_and_unique() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let sampled = sample_features(2, &mut rng);
            assert_eq!(sampled.len(), 2);
            assert!(sampled.iter().all(|&f| f < FEATURE_COUNT));
            assert_ne!(sampled[0], sampled[1]);
        }
    }
}
