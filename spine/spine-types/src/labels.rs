//! Anatomical label assignment.

use serde::{Deserialize, Serialize};

/// Vertebra labels ordered caudal to cranial, matching ascending slice
/// order in a standard scan: sacral, then lumbar, then thoracic.
pub const LABEL_POOL: [&str; 18] = [
    "S1", "L5", "L4", "L3", "L2", "L1", "T12", "T11", "T10", "T9", "T8", "T7", "T6", "T5", "T4",
    "T3", "T2", "T1",
];

/// Where in the label pool assignment starts.
///
/// Short scans are usually framed on the lumbar spine, so few detected
/// segments default to lumbar labels rather than starting at the sacrum.
/// This is a framing assumption, not a geometric fact, which is why it is
/// configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LabelOrigin {
    /// Six or fewer segments start at L5 instead of S1.
    #[default]
    LumbarBiased,
    /// Always start at the caudal end of the pool (S1).
    Caudal,
}

/// Assigns labels to `count` vertebra segments, caudal to cranial.
///
/// Counts beyond the anatomical pool fall back to synthetic labels
/// `V1`, `V2`, ... for the entire sequence, so labels are never reused.
///
/// # Example
///
/// ```
/// use spine_types::{assign_labels, LabelOrigin};
///
/// // A short lumbar scan starts at L5, not the sacrum.
/// let labels = assign_labels(3, LabelOrigin::LumbarBiased);
/// assert_eq!(labels, vec!["L5", "L4", "L3"]);
///
/// let labels = assign_labels(3, LabelOrigin::Caudal);
/// assert_eq!(labels, vec!["S1", "L5", "L4"]);
/// ```
#[must_use]
pub fn assign_labels(count: usize, origin: LabelOrigin) -> Vec<String> {
    if count > LABEL_POOL.len() {
        return (1..=count).map(|i| format!("V{i}")).collect();
    }

    let start = match origin {
        LabelOrigin::LumbarBiased if count <= 6 => 1,
        _ => 0,
    };

    LABEL_POOL
        .iter()
        .skip(start)
        .take(count)
        .map(|&l| l.to_string())
        .collect()
}
