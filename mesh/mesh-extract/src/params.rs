//! Parameters for isosurface extraction.

/// Parameters for isosurface extraction and post-processing.
#[derive(Debug, Clone)]
pub struct ExtractParams {
    /// Iso level to extract the surface at. For a `{0, 1}` mask the
    /// default of 0.5 sits on the bone boundary.
    pub iso_level: f64,

    /// Subsampling step in voxels. 1 visits every voxel; the default of 2
    /// samples one voxel in eight, trading fidelity for speed.
    pub step_size: usize,

    /// Fraction of triangles to remove during decimation (0 disables).
    /// Default: 0.3.
    pub decimate_ratio: f64,

    /// Decimation only runs when the raw surface has more triangles than
    /// this. Default: 5000.
    pub decimate_threshold: usize,

    /// Laplacian smoothing iterations (0 disables). Default: 20.
    pub smooth_iterations: u32,

    /// Relaxation factor per smoothing iteration; small values avoid
    /// shrinkage. Default: 0.1.
    pub smooth_relaxation: f64,
}

impl Default for ExtractParams {
    fn default() -> Self {
        Self {
            iso_level: 0.5,
            step_size: 2,
            decimate_ratio: 0.3,
            decimate_threshold: 5000,
            smooth_iterations: 20,
            smooth_relaxation: 0.1,
        }
    }
}

impl ExtractParams {
    /// Creates parameters for a full-detail extraction (no subsampling).
    #[must_use]
    pub fn detailed() -> Self {
        Self {
            step_size: 1,
            ..Default::default()
        }
    }

    /// Sets the iso level.
    #[must_use]
    pub const fn with_iso_level(mut self, level: f64) -> Self {
        self.iso_level = level;
        self
    }

    /// Sets the subsampling step. A step of 0 is treated as 1.
    #[must_use]
    pub const fn with_step_size(mut self, step: usize) -> Self {
        self.step_size = step;
        self
    }

    /// Sets the decimation ratio, clamped to `[0, 1)`.
    #[must_use]
    pub fn with_decimate_ratio(mut self, ratio: f64) -> Self {
        self.decimate_ratio = ratio.clamp(0.0, 0.99);
        self
    }

    /// Sets the smoothing iteration count.
    #[must_use]
    pub const fn with_smooth_iterations(mut self, iterations: u32) -> Self {
        self.smooth_iterations = iterations;
        self
    }

    /// Returns the effective subsampling step (at least 1).
    #[must_use]
    pub fn effective_step(&self) -> usize {
        self.step_size.max(1)
    }
}
