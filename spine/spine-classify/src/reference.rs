//! Built-in synthetic reference set.

use spine_types::VertebraStatus;

/// Number of features per example:
/// `[hu_mean, hu_std, height_mm, compression_ratio, bone_fraction_pct]`.
pub const FEATURE_COUNT: usize = 5;

/// A labeled set of feature vectors for training.
#[derive(Debug, Clone)]
pub struct ReferenceSet {
    /// Feature rows.
    pub features: Vec<[f64; FEATURE_COUNT]>,
    /// Status label per row.
    pub labels: Vec<VertebraStatus>,
}

impl ReferenceSet {
    /// The built-in synthetic reference set: 16 examples spanning the four
    /// statuses with clinically plausible metric combinations.
    #[must_use]
    pub fn builtin() -> Self {
        use VertebraStatus::{Compressed, Normal, Osteopenic, Suspect};

        let rows: [([f64; FEATURE_COUNT], VertebraStatus); 16] = [
            // hu_mean, hu_std, height, compression, bone %
            ([600.0, 80.0, 30.0, 1.00, 5.0], Normal),
            ([650.0, 70.0, 28.0, 0.98, 6.0], Normal),
            ([550.0, 90.0, 32.0, 1.02, 4.5], Normal),
            ([700.0, 60.0, 27.0, 0.95, 7.0], Normal),
            ([580.0, 85.0, 31.0, 1.05, 5.5], Normal),
            ([200.0, 60.0, 30.0, 0.99, 2.0], Osteopenic),
            ([180.0, 50.0, 29.0, 1.00, 1.5], Osteopenic),
            ([220.0, 70.0, 28.0, 0.98, 2.5], Osteopenic),
            ([150.0, 45.0, 31.0, 1.02, 1.2], Osteopenic),
            ([600.0, 80.0, 18.0, 0.55, 5.0], Compressed),
            ([620.0, 75.0, 15.0, 0.45, 5.5], Compressed),
            ([580.0, 90.0, 20.0, 0.60, 4.5], Compressed),
            ([500.0, 110.0, 25.0, 1.30, 4.0], Suspect),
            ([480.0, 120.0, 26.0, 1.35, 3.5], Suspect),
            ([520.0, 100.0, 24.0, 1.28, 4.2], Suspect),
            ([400.0, 95.0, 29.0, 0.72, 3.0], Suspect),
        ];

        let features = rows.iter().map(|(f, _)| *f).collect();
        let labels = rows.iter().map(|(_, l)| *l).collect();
        Self { features, labels }
    }

    /// Number of examples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the set has no examples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Number of distinct classes present.
    #[must_use]
    pub fn class_count(&self) -> usize {
        let mut seen = [false; 4];
        for label in &self.labels {
            seen[label.class_index()] = true;
        }
        seen.iter().filter(|&&s| s).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_set_shape() {
        let set = ReferenceSet::builtin();
        assert_eq!(set.len(), 16);
        assert_eq!(set.labels.len(), 16);
        assert_eq!(set.class_count(), 4);
    }

    #[test]
    fn builtin_class_balance() {
        let set = ReferenceSet::builtin();
        let count = |status| set.labels.iter().filter(|&&l| l == status).count();
        assert_eq!(count(VertebraStatus::Normal), 5);
        assert_eq!(count(VertebraStatus::Osteopenic), 4);
        assert_eq!(count(VertebraStatus::Suspect), 4);
        assert_eq!(count(VertebraStatus::Compressed), 3);
    }
}
