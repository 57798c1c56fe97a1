//! Clinical vertebra status taxonomy.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Clinical status of a vertebra.
///
/// Assigned first by fixed rule thresholds during segmentation, then
/// refined by the trained classifier. Each status maps to a fixed display
/// color for rendering layers.
///
/// # Example
///
/// ```
/// use spine_types::VertebraStatus;
///
/// let status = VertebraStatus::Compressed;
/// assert_eq!(status.name(), "compressed");
/// assert_eq!(status.color(), "#9C27B0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VertebraStatus {
    /// No abnormality indicated by the metrics.
    #[default]
    Normal,
    /// Low bone density (mean intensity below the clinical floor).
    Osteopenic,
    /// Metrics outside the normal band without a clear compression.
    Suspect,
    /// Anterior collapse indicating a compression fracture.
    Compressed,
}

impl VertebraStatus {
    /// All statuses, in increasing order of severity.
    pub const ALL: [Self; 4] = [Self::Normal, Self::Osteopenic, Self::Suspect, Self::Compressed];

    /// Returns the status name used in reports and serialized output.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Osteopenic => "osteopenic",
            Self::Suspect => "suspect",
            Self::Compressed => "compressed",
        }
    }

    /// Returns the fixed display color (hex RGB) for this status.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Normal => "#4CAF50",
            Self::Osteopenic => "#FF9800",
            Self::Suspect => "#F44336",
            Self::Compressed => "#9C27B0",
        }
    }

    /// Returns the class index used by the trained classifier.
    #[must_use]
    pub const fn class_index(self) -> usize {
        match self {
            Self::Normal => 0,
            Self::Osteopenic => 1,
            Self::Suspect => 2,
            Self::Compressed => 3,
        }
    }

    /// Resolves a class index back to a status.
    #[must_use]
    pub const fn from_class_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Normal),
            1 => Some(Self::Osteopenic),
            2 => Some(Self::Suspect),
            3 => Some(Self::Compressed),
            _ => None,
        }
    }
}

impl fmt::Display for VertebraStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_and_colors() {
        assert_eq!(VertebraStatus::Normal.color(), "#4CAF50");
        assert_eq!(VertebraStatus::Osteopenic.name(), "osteopenic");
    }

    #[test]
    fn class_index_round_trip() {
        for status in VertebraStatus::ALL {
            assert_eq!(
                VertebraStatus::from_class_index(status.class_index()),
                Some(status)
            );
        }
        assert_eq!(VertebraStatus::from_class_index(7), None);
    }

    #[test]
    fn serde_snake_case() {
        let json = serde_json::to_string(&VertebraStatus::Compressed).unwrap();
        assert_eq!(json, "\"compressed\"");

        let back: VertebraStatus = serde_json::from_str("\"suspect\"").unwrap();
        assert_eq!(back, VertebraStatus::Suspect);
    }
}
