//! Marching cubes isosurface extraction.

use std::collections::HashMap;

use mesh_types::{Point3, Triangle, TriangleMesh};
use volume_types::Spacing;

use crate::field::ScalarField;
use crate::tables::{CORNER_OFFSETS, EDGE_CORNERS, TRI_TABLE};

/// Area below which a candidate triangle is rejected as degenerate (mm^2).
const DEGENERATE_AREA: f64 = 1e-12;

/// Extracts the iso surface of a scalar field as a triangle mesh.
///
/// Walks the grid in cells of `step` voxels per side, classifies each cell
/// against the iso level, and joins the interpolated edge crossings into
/// triangles using the standard case tables. Vertices on shared cell edges
/// are emitted once and reused, so the surface is watertight wherever the
/// field is. Degenerate triangles (repeated vertex or near-zero area) are
/// dropped.
///
/// Positions are in physical millimetres: grid index `(z, y, x)` maps to
/// `(x * dx, y * dy, z * dz)`.
///
/// An iso level that intersects nothing simply yields an empty mesh.
#[must_use]
pub fn marching_cubes<F: ScalarField>(
    field: &F,
    spacing: Spacing,
    iso_level: f64,
    step: usize,
) -> TriangleMesh {
    let step = step.max(1);
    let (nz, ny, nx) = field.shape();

    let mut mesh = TriangleMesh::new();
    // Shared vertices keyed by the lattice points of the crossed edge.
    let mut edge_vertices: HashMap<(u64, u64), u32> = HashMap::new();

    let mut corner_values = [0.0_f64; 8];

    for z in (0..nz.saturating_sub(step)).step_by(step) {
        for y in (0..ny.saturating_sub(step)).step_by(step) {
            for x in (0..nx.saturating_sub(step)).step_by(step) {
                let mut case = 0_usize;
                for (i, &(dx, dy, dz)) in CORNER_OFFSETS.iter().enumerate() {
                    let v = field.value(z + dz * step, y + dy * step, x + dx * step);
                    corner_values[i] = v;
                    if v < iso_level {
                        case |= 1 << i;
                    }
                }

                let triangles = TRI_TABLE[case];
                if triangles.is_empty() {
                    continue;
                }

                for tri in triangles.chunks_exact(3) {
                    let i0 = edge_vertex(
                        tri[0], (z, y, x), step, iso_level, &corner_values, spacing,
                        &mut mesh, &mut edge_vertices,
                    );
                    let i1 = edge_vertex(
                        tri[1], (z, y, x), step, iso_level, &corner_values, spacing,
                        &mut mesh, &mut edge_vertices,
                    );
                    let i2 = edge_vertex(
                        tri[2], (z, y, x), step, iso_level, &corner_values, spacing,
                        &mut mesh, &mut edge_vertices,
                    );

                    if i0 == i1 || i1 == i2 || i0 == i2 {
                        continue;
                    }

                    let candidate = Triangle::new(
                        mesh.vertices[i0 as usize],
                        mesh.vertices[i1 as usize],
                        mesh.vertices[i2 as usize],
                    );
                    if candidate.is_degenerate(DEGENERATE_AREA) {
                        continue;
                    }

                    mesh.triangles.push([i0, i1, i2]);
                }
            }
        }
    }

    mesh
}

/// Returns the mesh vertex for an edge crossing, creating it on first use.
#[allow(clippy::too_many_arguments)]
fn edge_vertex(
    edge: u8,
    cell: (usize, usize, usize),
    step: usize,
    iso_level: f64,
    corner_values: &[f64; 8],
    spacing: Spacing,
    mesh: &mut TriangleMesh,
    edge_vertices: &mut HashMap<(u64, u64), u32>,
) -> u32 {
    let (ca, cb) = EDGE_CORNERS[edge as usize];
    let (z, y, x) = cell;

    let lattice = |corner: usize| {
        let (dx, dy, dz) = CORNER_OFFSETS[corner];
        (z + dz * step, y + dy * step, x + dx * step)
    };
    let pa = lattice(ca);
    let pb = lattice(cb);

    let key_a = pack(pa);
    let key_b = pack(pb);
    let key = if key_a < key_b {
        (key_a, key_b)
    } else {
        (key_b, key_a)
    };

    if let Some(&index) = edge_vertices.get(&key) {
        return index;
    }

    let va = corner_values[ca];
    let vb = corner_values[cb];
    let t = if (vb - va).abs() < f64::EPSILON {
        0.5
    } else {
        ((iso_level - va) / (vb - va)).clamp(0.0, 1.0)
    };

    let zi = pa.0 as f64 + t * (pb.0 as f64 - pa.0 as f64);
    let yi = pa.1 as f64 + t * (pb.1 as f64 - pa.1 as f64);
    let xi = pa.2 as f64 + t * (pb.2 as f64 - pa.2 as f64);

    let position = Point3::new(xi * spacing.dx, yi * spacing.dy, zi * spacing.dz);

    let index = mesh.vertices.len() as u32;
    mesh.vertices.push(position);
    edge_vertices.insert(key, index);
    index
}

/// Packs a lattice point into a single key (21 bits per axis).
fn pack((z, y, x): (usize, usize, usize)) -> u64 {
    ((z as u64) << 42) | ((y as u64) << 21) | (x as u64)
}
