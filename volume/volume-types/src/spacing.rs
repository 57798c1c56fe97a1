//! Physical voxel spacing.

use crate::error::{VolumeError, VolumeResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Physical spacing of a voxel grid in millimetres.
///
/// The components follow the `(z, y, x)` axis order of the grids: `dz` is
/// the distance between consecutive slices, `dy` and `dx` the in-plane
/// pixel spacing.
///
/// # Invariants
///
/// All components are strictly positive and finite, enforced at
/// construction.
///
/// # Example
///
/// ```
/// use volume_types::Spacing;
///
/// let spacing = Spacing::new(1.5, 0.7, 0.7).unwrap();
/// assert!((spacing.voxel_volume_mm3() - 0.735).abs() < 1e-12);
///
/// assert!(Spacing::new(0.0, 1.0, 1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Spacing {
    /// Distance between consecutive slices (mm).
    pub dz: f64,
    /// Row spacing within a slice (mm).
    pub dy: f64,
    /// Column spacing within a slice (mm).
    pub dx: f64,
}

impl Spacing {
    /// Creates a new spacing after validating all components.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::InvalidSpacing`] if any component is zero,
    /// negative, or non-finite.
    pub fn new(dz: f64, dy: f64, dx: f64) -> VolumeResult<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if valid(dz) && valid(dy) && valid(dx) {
            Ok(Self { dz, dy, dx })
        } else {
            Err(VolumeError::InvalidSpacing { dz, dy, dx })
        }
    }

    /// Creates an isotropic spacing with the same distance on every axis.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::InvalidSpacing`] if the distance is zero,
    /// negative, or non-finite.
    pub fn isotropic(mm: f64) -> VolumeResult<Self> {
        Self::new(mm, mm, mm)
    }

    /// Unit spacing (1 mm on every axis).
    pub const UNIT: Self = Self {
        dz: 1.0,
        dy: 1.0,
        dx: 1.0,
    };

    /// Returns the physical volume of a single voxel in mm^3.
    #[must_use]
    pub fn voxel_volume_mm3(&self) -> f64 {
        self.dz * self.dy * self.dx
    }
}

impl Default for Spacing {
    fn default() -> Self {
        Self::UNIT
    }
}
