//! Top-level extraction entry points.

use mesh_types::TriangleMesh;
use tracing::{debug, info, warn};
use volume_types::{BoneMask, Spacing};

use crate::field::ScalarField;
use crate::marching_cubes::marching_cubes;
use crate::params::ExtractParams;
use crate::postprocess::{compute_normals, decimate, smooth_laplacian};

/// Surfaces with fewer vertices than this are reported as absent.
const MIN_VERTICES: usize = 10;

/// Extracts and post-processes the iso surface of a scalar field.
///
/// Returns `None` when the iso level does not intersect the field or the
/// raw surface carries fewer than 10 vertices; both are expected outcomes
/// for empty or degenerate inputs, not errors. Post-processing steps run
/// in order (decimation, normal computation, Laplacian smoothing) and are
/// individually fault-tolerant: a step that cannot improve the mesh logs
/// a warning and the unmodified mesh moves on.
#[must_use]
pub fn extract<F: ScalarField>(
    field: &F,
    spacing: Spacing,
    params: &ExtractParams,
) -> Option<TriangleMesh> {
    let step = params.effective_step();
    info!(
        shape = ?field.shape(),
        iso_level = params.iso_level,
        step,
        "extracting isosurface"
    );

    let mut mesh = marching_cubes(field, spacing, params.iso_level, step);
    let raw_vertices = mesh.vertex_count();
    let raw_triangles = mesh.triangle_count();
    debug!(raw_vertices, raw_triangles, "raw surface extracted");

    if raw_vertices < MIN_VERTICES {
        info!(
            raw_vertices,
            "surface too small, reporting no mesh (check the density window)"
        );
        return None;
    }

    if params.decimate_ratio > 0.0 && mesh.triangle_count() > params.decimate_threshold {
        mesh = decimate(&mesh, params.decimate_ratio);
    }

    compute_normals(&mut mesh);

    if params.smooth_iterations > 0 {
        mesh = smooth_laplacian(&mesh, params.smooth_iterations, params.smooth_relaxation);
    }

    if mesh.validate().is_err() {
        // Post-processing never rewires indices out of range; treat any
        // violation as a failed step and fall back to the raw surface.
        warn!("post-processed mesh failed validation, re-extracting raw surface");
        mesh = marching_cubes(field, spacing, params.iso_level, step);
        compute_normals(&mut mesh);
    }

    info!(
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "final mesh ready"
    );
    Some(mesh)
}

/// Extracts the surface of a bone mask.
///
/// The mask samples as a `{0, 1}` field, so the configured iso level
/// (default 0.5) sits on the bone boundary.
#[must_use]
pub fn extract_from_mask(
    mask: &BoneMask,
    spacing: Spacing,
    params: &ExtractParams,
) -> Option<TriangleMesh> {
    extract(mask, spacing, params)
}
