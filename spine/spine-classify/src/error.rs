//! Error types for classifier training.

use thiserror::Error;

/// Result type for classifier training.
pub type TrainResult<T> = Result<T, TrainError>;

/// Errors that can occur while training the classifier.
///
/// Training errors are soft: the pipeline falls back to rule-based
/// statuses when no classifier is available.
#[derive(Debug, Error)]
pub enum TrainError {
    /// The reference set is empty.
    #[error("reference set is empty")]
    EmptyReferenceSet,

    /// The reference set covers fewer than two classes, so no decision
    /// boundary exists to learn.
    #[error("reference set covers only {classes} class(es), need at least 2")]
    TooFewClasses {
        /// Number of distinct classes present.
        classes: usize,
    },

    /// A feature column is constant across the reference set and cannot
    /// be standardized.
    #[error("feature column {column} is constant, cannot standardize")]
    ConstantFeature {
        /// Index of the degenerate feature column.
        column: usize,
    },
}
