//! Per-vertex scale attribute: the target edge length around a vertex.

use super::Patch;
use crate::geometry::vector::distance;
use crate::mesh::{HalfedgeMesh, VertexId};
use hashbrown::HashMap;

/// Scale of every vertex of the patch.
///
/// The scale is the mean length of the incident edges that are not interior
/// to the patch. A vertex whose every edge is interior falls back to the mean
/// of all its incident edges.
pub(crate) fn vertex_scales(mesh: &HalfedgeMesh, patch: &Patch) -> HashMap<VertexId, f64> {
    patch
        .vertices(mesh)
        .into_iter()
        .map(|v| (v, vertex_scale(mesh, patch, v)))
        .collect()
}

fn vertex_scale(mesh: &HalfedgeMesh, patch: &Patch, v: VertexId) -> f64 {
    let Some(start) = mesh.vertex_halfedge(v) else {
        return 0.0;
    };
    let p = mesh.point(v);
    let (mut outer_sum, mut outer_n) = (0.0, 0usize);
    let (mut all_sum, mut all_n) = (0.0, 0usize);
    for h in mesh.halfedges_around_target(start) {
        let len = distance(p, mesh.point(mesh.source(h)));
        all_sum += len;
        all_n += 1;
        if !patch.is_interior_edge(mesh, h) {
            outer_sum += len;
            outer_n += 1;
        }
    }
    if outer_n > 0 {
        outer_sum / outer_n as f64
    } else if all_n > 0 {
        all_sum / all_n as f64
    } else {
        0.0
    }
}
