//! Delaunay relaxation by edge flips inside the patch.

use super::Patch;
use crate::geometry::predicates::{BoundedSide, side_of_bounded_sphere};
use crate::mesh::{HalfedgeId, HalfedgeMesh};
use crate::mesh_error::MeshKineticError;

/// Flip the edge of `h` if it is interior to the patch and one apex lies in
/// or on the bounded sphere of the opposite triangle.
///
/// Returns whether a flip happened.
pub(crate) fn relax_edge(
    mesh: &mut HalfedgeMesh,
    patch: &Patch,
    h: HalfedgeId,
) -> Result<bool, MeshKineticError> {
    if !patch.is_interior_edge(mesh, h) {
        return Ok(false);
    }
    let p = mesh.point(mesh.target(h));
    let q = mesh.point(mesh.source(h));
    let r = mesh.point(mesh.target(mesh.next(h)));
    let s = mesh.point(mesh.target(mesh.next(h.opposite())));
    let encroached = side_of_bounded_sphere(p, q, r, s) != BoundedSide::OnUnboundedSide
        || side_of_bounded_sphere(p, q, s, r) != BoundedSide::OnUnboundedSide;
    if !encroached || !mesh.is_flippable(h) {
        return Ok(false);
    }
    mesh.flip_edge(h)?;
    Ok(true)
}

/// One relaxation sweep over every edge interior to the patch.
///
/// Returns the number of flips.
pub(crate) fn relax_patch(
    mesh: &mut HalfedgeMesh,
    patch: &Patch,
) -> Result<usize, MeshKineticError> {
    let edges: Vec<HalfedgeId> = mesh
        .edges()
        .filter(|&h| patch.is_interior_edge(mesh, h))
        .collect();
    let mut flips = 0;
    for h in edges {
        if relax_edge(mesh, patch, h)? {
            flips += 1;
        }
    }
    Ok(flips)
}
