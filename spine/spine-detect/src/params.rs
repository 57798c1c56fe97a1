//! Parameters for vertebra detection.

use spine_types::LabelOrigin;

/// Parameters for vertebra detection.
#[derive(Debug, Clone)]
pub struct DetectParams {
    /// Minimum number of slices for a segment to count as a vertebra;
    /// shorter segments are segmentation artifacts. Default: 3.
    pub min_vertebra_slices: usize,

    /// Standard deviation of the 1D Gaussian applied to the density
    /// profile, in slices. Default: 2.0.
    pub gaussian_sigma: f64,

    /// Minimum prominence for a disc-space minimum, on the `[0, 1]`
    /// normalized profile. Default: 0.1.
    pub min_prominence: f64,

    /// Minimum physical separation between detected minima in
    /// millimetres; converted to slices with a floor of 3. Default: 5.0.
    pub min_separation_mm: f64,

    /// Label assignment policy. Default: lumbar-biased.
    pub label_origin: LabelOrigin,
}

impl Default for DetectParams {
    fn default() -> Self {
        Self {
            min_vertebra_slices: 3,
            gaussian_sigma: 2.0,
            min_prominence: 0.1,
            min_separation_mm: 5.0,
            label_origin: LabelOrigin::LumbarBiased,
        }
    }
}

impl DetectParams {
    /// Sets the minimum vertebra thickness in slices.
    #[must_use]
    pub const fn with_min_vertebra_slices(mut self, slices: usize) -> Self {
        self.min_vertebra_slices = slices;
        self
    }

    /// Sets the profile smoothing strength.
    #[must_use]
    pub const fn with_gaussian_sigma(mut self, sigma: f64) -> Self {
        self.gaussian_sigma = sigma;
        self
    }

    /// Sets the minimum prominence for disc minima.
    #[must_use]
    pub const fn with_min_prominence(mut self, prominence: f64) -> Self {
        self.min_prominence = prominence;
        self
    }

    /// Sets the label assignment policy.
    #[must_use]
    pub const fn with_label_origin(mut self, origin: LabelOrigin) -> Self {
        self.label_origin = origin;
        self
    }
}
