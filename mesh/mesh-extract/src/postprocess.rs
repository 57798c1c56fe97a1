//! Mesh post-processing: decimation, normals, smoothing.

use std::collections::{HashMap, HashSet};

use mesh_types::{Point3, TriangleMesh, Vector3};
use tracing::{debug, warn};

/// Decimates a mesh by clustering vertices on a uniform grid.
///
/// `ratio` is the fraction of triangles to remove; the cluster cell size
/// is derived from the surface area so the result lands near the target
/// count. Clustering is approximate but robust: if the clustered mesh
/// collapses (fewer than 4 distinct vertices or no triangles), the
/// original mesh is returned unchanged.
#[must_use]
pub fn decimate(mesh: &TriangleMesh, ratio: f64) -> TriangleMesh {
    let ratio = ratio.clamp(0.0, 0.99);
    if ratio <= 0.0 || mesh.triangle_count() == 0 {
        return mesh.clone();
    }

    let target_triangles = ((mesh.triangle_count() as f64) * (1.0 - ratio)).max(4.0);
    let area = mesh.surface_area();
    if area <= 0.0 {
        warn!("decimation skipped: mesh has no surface area");
        return mesh.clone();
    }

    // A surface of area A triangulated into T triangles has cells of about
    // A / (T / 2) each; solve for the cell edge length.
    let cell_size = (2.0 * area / target_triangles).sqrt();

    let bounds = mesh.bounds();
    let origin = bounds.min;

    // Map each vertex to its cluster cell.
    let cell_of = |p: &Point3<f64>| -> (i64, i64, i64) {
        (
            ((p.x - origin.x) / cell_size).floor() as i64,
            ((p.y - origin.y) / cell_size).floor() as i64,
            ((p.z - origin.z) / cell_size).floor() as i64,
        )
    };

    let mut cell_indices: HashMap<(i64, i64, i64), u32> = HashMap::new();
    let mut cluster_sums: Vec<(Vector3<f64>, usize)> = Vec::new();
    let mut vertex_cluster = Vec::with_capacity(mesh.vertices.len());

    for v in &mesh.vertices {
        let cell = cell_of(v);
        let cluster = *cell_indices.entry(cell).or_insert_with(|| {
            cluster_sums.push((Vector3::zeros(), 0));
            (cluster_sums.len() - 1) as u32
        });
        let entry = &mut cluster_sums[cluster as usize];
        entry.0 += v.coords;
        entry.1 += 1;
        vertex_cluster.push(cluster);
    }

    let mut out = TriangleMesh::with_capacity(cluster_sums.len(), target_triangles as usize);
    for (sum, count) in &cluster_sums {
        out.vertices.push(Point3::from(sum / *count as f64));
    }

    let mut seen: HashSet<[u32; 3]> = HashSet::new();
    for &[a, b, c] in &mesh.triangles {
        let ca = vertex_cluster[a as usize];
        let cb = vertex_cluster[b as usize];
        let cc = vertex_cluster[c as usize];
        if ca == cb || cb == cc || ca == cc {
            continue;
        }
        // Deduplicate triangles that collapse onto the same cluster triple,
        // keeping the first (and its winding).
        let mut key = [ca, cb, cc];
        key.sort_unstable();
        if seen.insert(key) {
            out.triangles.push([ca, cb, cc]);
        }
    }

    if out.vertex_count() < 4 || out.triangle_count() == 0 {
        warn!(
            vertices = out.vertex_count(),
            triangles = out.triangle_count(),
            "decimation collapsed the mesh, keeping original"
        );
        return mesh.clone();
    }

    debug!(
        before = mesh.triangle_count(),
        after = out.triangle_count(),
        "decimated mesh"
    );
    out
}

/// Recomputes consistent per-vertex normals, auto-oriented outward.
///
/// If the mesh's signed volume is negative (inside-out winding), every
/// triangle is flipped first so normals face outward. Vertex normals are
/// the normalized sum of adjacent face normals weighted by face area;
/// non-manifold connectivity needs no special handling because only
/// triangle-to-vertex incidence is traversed.
pub fn compute_normals(mesh: &mut TriangleMesh) {
    if mesh.is_empty() {
        mesh.normals = None;
        return;
    }

    if mesh.signed_volume() < 0.0 {
        debug!("mesh is inside out, flipping winding");
        mesh.flip_winding();
    }

    let mut normals = vec![Vector3::zeros(); mesh.vertices.len()];
    for &[a, b, c] in &mesh.triangles {
        let v0 = mesh.vertices[a as usize];
        let v1 = mesh.vertices[b as usize];
        let v2 = mesh.vertices[c as usize];
        // Cross product magnitude doubles as the area weight.
        let scaled = (v1 - v0).cross(&(v2 - v0));
        normals[a as usize] += scaled;
        normals[b as usize] += scaled;
        normals[c as usize] += scaled;
    }

    for n in &mut normals {
        let len = n.norm();
        if len > 0.0 {
            *n /= len;
        }
    }

    mesh.normals = Some(normals);
}

/// Applies Laplacian smoothing with a relaxation factor.
///
/// Each iteration moves every vertex toward the centroid of its edge
/// neighbors by `relaxation` of the distance. Small factors (the default
/// pipeline uses 0.1) limit the shrinkage this family of filters causes.
#[must_use]
pub fn smooth_laplacian(mesh: &TriangleMesh, iterations: u32, relaxation: f64) -> TriangleMesh {
    if mesh.vertices.is_empty() || mesh.triangles.is_empty() || iterations == 0 {
        return mesh.clone();
    }

    let neighbors = build_vertex_neighbors(mesh);
    let mut current = mesh.clone();

    for _ in 0..iterations {
        let displacements: Vec<Vector3<f64>> = current
            .vertices
            .iter()
            .enumerate()
            .map(|(i, vertex)| {
                let Some(adjacent) = neighbors.get(&(i as u32)) else {
                    return Vector3::zeros();
                };
                if adjacent.is_empty() {
                    return Vector3::zeros();
                }

                let sum: Vector3<f64> = adjacent
                    .iter()
                    .map(|&n| current.vertices[n as usize].coords)
                    .sum();
                let centroid = sum / adjacent.len() as f64;
                (centroid - vertex.coords) * relaxation
            })
            .collect();

        for (vertex, displacement) in current.vertices.iter_mut().zip(displacements.iter()) {
            *vertex += *displacement;
        }
    }

    current
}

/// Builds a map from vertex index to its edge-adjacent vertex indices.
fn build_vertex_neighbors(mesh: &TriangleMesh) -> HashMap<u32, Vec<u32>> {
    let mut neighbors: HashMap<u32, HashSet<u32>> = HashMap::new();

    for tri in &mesh.triangles {
        for i in 0..3 {
            let v = tri[i];
            let next = tri[(i + 1) % 3];
            let prev = tri[(i + 2) % 3];
            neighbors.entry(v).or_default().insert(next);
            neighbors.entry(v).or_default().insert(prev);
        }
    }

    neighbors
        .into_iter()
        .map(|(k, v)| (k, v.into_iter().collect()))
        .collect()
}
