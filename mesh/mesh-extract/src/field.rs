//! Scalar field abstraction over volumes and masks.

use volume_types::{BoneMask, ScalarVolume};

/// A 3D scalar field that marching cubes can sample.
///
/// Implemented for [`ScalarVolume`] (values as stored) and [`BoneMask`]
/// (true maps to 1.0, false to 0.0, so the 0.5 iso level sits on the mask
/// boundary).
pub trait ScalarField {
    /// Grid shape as `(nz, ny, nx)`.
    fn shape(&self) -> (usize, usize, usize);

    /// Field value at grid coordinates.
    fn value(&self, z: usize, y: usize, x: usize) -> f64;
}

impl ScalarField for ScalarVolume {
    fn shape(&self) -> (usize, usize, usize) {
        Self::shape(self)
    }

    fn value(&self, z: usize, y: usize, x: usize) -> f64 {
        f64::from(self.get(z, y, x))
    }
}

impl ScalarField for BoneMask {
    fn shape(&self) -> (usize, usize, usize) {
        Self::shape(self)
    }

    fn value(&self, z: usize, y: usize, x: usize) -> f64 {
        if self.get(z, y, x) {
            1.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_field_passes_values() {
        let mut v = ScalarVolume::filled((2, 2, 2), 0.0).unwrap();
        v.set(1, 1, 1, 3.5);
        assert!((ScalarField::value(&v, 1, 1, 1) - 3.5).abs() < 1e-12);
    }

    #[test]
    fn mask_field_is_binary() {
        let mut m = BoneMask::new((2, 2, 2)).unwrap();
        m.set(0, 0, 0, true);
        assert!((ScalarField::value(&m, 0, 0, 0) - 1.0).abs() < 1e-12);
        assert!(ScalarField::value(&m, 1, 1, 1).abs() < 1e-12);
    }
}
