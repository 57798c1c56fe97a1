//! Named scalar metrics map.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A flat mapping of named scalar results.
///
/// Keys are stable metric names (`bone_volume_cm3`, `vertebra_count`,
/// ...); the ordered map keeps serialization and display deterministic.
/// The map carries no identity beyond its contents and is recomputed
/// fully by every analysis call.
///
/// # Example
///
/// ```
/// use spine_analysis::QuantitativeMetrics;
///
/// let mut metrics = QuantitativeMetrics::new();
/// metrics.set("bone_volume_cm3", 42.5);
///
/// assert_eq!(metrics.get("bone_volume_cm3"), Some(42.5));
/// assert_eq!(metrics.get("missing"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuantitativeMetrics(BTreeMap<String, f64>);

impl QuantitativeMetrics {
    /// Creates an empty metrics map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a metric value.
    pub fn set(&mut self, name: impl Into<String>, value: f64) {
        self.0.insert(name.into(), value);
    }

    /// Reads a metric value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    /// Whether a metric is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Number of metrics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, &v)| (k.as_str(), v))
    }
}

impl fmt::Display for QuantitativeMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{name}: {value:.3}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_round_trip() {
        let mut m = QuantitativeMetrics::new();
        m.set("hu_mean", 512.25);
        assert_eq!(m.get("hu_mean"), Some(512.25));
        assert!(m.contains("hu_mean"));
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn iteration_is_name_ordered() {
        let mut m = QuantitativeMetrics::new();
        m.set("b", 2.0);
        m.set("a", 1.0);
        let names: Vec<&str> = m.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn serde_round_trip() {
        let mut m = QuantitativeMetrics::new();
        m.set("vertebra_count", 5.0);
        m.set("bone_volume_cm3", 120.75);

        let json = serde_json::to_string(&m).unwrap();
        let back: QuantitativeMetrics = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn display_lists_metrics() {
        let mut m = QuantitativeMetrics::new();
        m.set("count", 3.0);
        assert_eq!(format!("{m}"), "count: 3.000");
    }
}
