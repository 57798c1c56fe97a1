//! 3D scalar intensity grid.

use crate::error::{VolumeError, VolumeResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A 3D scalar grid of calibrated intensity values.
///
/// Values are stored in a flat buffer indexed `(z, y, x)` with `x` varying
/// fastest. Intensities are calibrated density units (Hounsfield-like) or,
/// after normalization, the `[0, 1]` range; the grid itself is agnostic.
///
/// The grid is never empty: construction rejects any zero-length axis.
///
/// # Example
///
/// ```
/// use volume_types::ScalarVolume;
///
/// let mut volume = ScalarVolume::filled((2, 3, 4), 0.0).unwrap();
/// volume.set(1, 2, 3, 700.0);
///
/// assert_eq!(volume.get(1, 2, 3), 700.0);
/// assert_eq!(volume.len(), 24);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScalarVolume {
    values: Vec<f32>,
    shape: (usize, usize, usize),
}

impl ScalarVolume {
    /// Creates a volume filled with a constant value.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::InvalidShape`] if any axis is zero.
    pub fn filled(shape: (usize, usize, usize), value: f32) -> VolumeResult<Self> {
        let (nz, ny, nx) = shape;
        if nz == 0 || ny == 0 || nx == 0 {
            return Err(VolumeError::InvalidShape { nz, ny, nx });
        }
        Ok(Self {
            values: vec![value; nz * ny * nx],
            shape,
        })
    }

    /// Creates a volume from an existing value buffer.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::InvalidShape`] if any axis is zero, or
    /// [`VolumeError::ValueCountMismatch`] if the buffer length does not
    /// equal `nz * ny * nx`.
    pub fn from_values(shape: (usize, usize, usize), values: Vec<f32>) -> VolumeResult<Self> {
        let (nz, ny, nx) = shape;
        if nz == 0 || ny == 0 || nx == 0 {
            return Err(VolumeError::InvalidShape { nz, ny, nx });
        }
        let expected = nz * ny * nx;
        if values.len() != expected {
            return Err(VolumeError::ValueCountMismatch {
                expected,
                actual: values.len(),
            });
        }
        Ok(Self { values, shape })
    }

    /// Returns the grid shape as `(nz, ny, nx)`.
    #[inline]
    #[must_use]
    pub const fn shape(&self) -> (usize, usize, usize) {
        self.shape
    }

    /// Number of slices along the longitudinal axis.
    #[inline]
    #[must_use]
    pub const fn nz(&self) -> usize {
        self.shape.0
    }

    /// Axis length along the anteroposterior axis.
    #[inline]
    #[must_use]
    pub const fn ny(&self) -> usize {
        self.shape.1
    }

    /// Axis length along the lateral axis.
    #[inline]
    #[must_use]
    pub const fn nx(&self) -> usize {
        self.shape.2
    }

    /// Total number of voxels.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false: construction rejects empty shapes.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of voxels in one axial slice (`ny * nx`).
    #[inline]
    #[must_use]
    pub const fn slice_len(&self) -> usize {
        self.shape.1 * self.shape.2
    }

    /// Gets the value at grid coordinates.
    ///
    /// Returns 0.0 if coordinates are out of bounds.
    #[must_use]
    pub fn get(&self, z: usize, y: usize, x: usize) -> f32 {
        if z < self.shape.0 && y < self.shape.1 && x < self.shape.2 {
            self.values[self.index(z, y, x)]
        } else {
            0.0
        }
    }

    /// Sets the value at grid coordinates.
    ///
    /// Does nothing if coordinates are out of bounds.
    pub fn set(&mut self, z: usize, y: usize, x: usize, value: f32) {
        if z < self.shape.0 && y < self.shape.1 && x < self.shape.2 {
            let idx = self.index(z, y, x);
            self.values[idx] = value;
        }
    }

    /// Returns the raw value buffer, `(z, y, x)` order with `x` fastest.
    #[inline]
    #[must_use]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Returns a mutable view of the raw value buffer.
    #[inline]
    pub fn values_mut(&mut self) -> &mut [f32] {
        &mut self.values
    }

    /// Returns the values of one axial slice.
    #[must_use]
    pub fn slice(&self, z: usize) -> &[f32] {
        let len = self.slice_len();
        let start = z * len;
        &self.values[start..start + len]
    }

    /// Creates a new volume by applying a function to every value.
    ///
    /// The result shares this volume's (already validated) shape, so this
    /// cannot fail.
    #[must_use]
    pub fn map(&self, f: impl Fn(f32) -> f32) -> Self {
        Self {
            values: self.values.iter().map(|&v| f(v)).collect(),
            shape: self.shape,
        }
    }

    /// Returns the minimum and maximum value in the grid.
    #[must_use]
    pub fn value_range(&self) -> (f32, f32) {
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        for &v in &self.values {
            min = min.min(v);
            max = max.max(v);
        }
        (min, max)
    }

    /// Converts 3D coordinates to a linear index.
    #[inline]
    fn index(&self, z: usize, y: usize, x: usize) -> usize {
        x + y * self.shape.2 + z * self.shape.1 * self.shape.2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn filled_volume() {
        let v = ScalarVolume::filled((2, 3, 4), -1024.0).unwrap();
        assert_eq!(v.len(), 24);
        assert_relative_eq!(v.get(1, 2, 3), -1024.0);
    }

    #[test]
    fn rejects_zero_axis() {
        assert!(ScalarVolume::filled((0, 3, 4), 0.0).is_err());
        assert!(ScalarVolume::filled((2, 0, 4), 0.0).is_err());
        assert!(ScalarVolume::filled((2, 3, 0), 0.0).is_err());
    }

    #[test]
    fn from_values_checks_length() {
        let ok = ScalarVolume::from_values((1, 2, 2), vec![0.0; 4]);
        assert!(ok.is_ok());

        let err = ScalarVolume::from_values((1, 2, 2), vec![0.0; 5]);
        assert!(matches!(
            err,
            Err(VolumeError::ValueCountMismatch {
                expected: 4,
                actual: 5
            })
        ));
    }

    #[test]
    fn get_set_roundtrip() {
        let mut v = ScalarVolume::filled((3, 3, 3), 0.0).unwrap();
        v.set(2, 1, 0, 42.5);
        assert_relative_eq!(v.get(2, 1, 0), 42.5);
    }

    #[test]
    fn get_out_of_bounds_is_zero() {
        let v = ScalarVolume::filled((2, 2, 2), 7.0).unwrap();
        assert_relative_eq!(v.get(5, 5, 5), 0.0);
    }

    #[test]
    fn index_order_x_fastest() {
        let values: Vec<f32> = (0..8).map(|i| i as f32).collect();
        let v = ScalarVolume::from_values((2, 2, 2), values).unwrap();
        assert_relative_eq!(v.get(0, 0, 1), 1.0);
        assert_relative_eq!(v.get(0, 1, 0), 2.0);
        assert_relative_eq!(v.get(1, 0, 0), 4.0);
    }

    #[test]
    fn slice_view() {
        let values: Vec<f32> = (0..12).map(|i| i as f32).collect();
        let v = ScalarVolume::from_values((3, 2, 2), values).unwrap();
        assert_eq!(v.slice(1), &[4.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn value_range() {
        let v = ScalarVolume::from_values((1, 1, 4), vec![-10.0, 3.0, 7.5, 0.0]).unwrap();
        let (min, max) = v.value_range();
        assert_relative_eq!(min, -10.0);
        assert_relative_eq!(max, 7.5);
    }
}
