//! Connectivity invariants of [`HalfedgeMesh`].

use super::halfedge_mesh::HalfedgeMesh;
use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::MeshKineticError;

fn broken(msg: String) -> MeshKineticError {
    MeshKineticError::BrokenTopology(msg)
}

impl DebugInvariants for HalfedgeMesh {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "HalfedgeMesh");
    }

    fn validate_invariants(&self) -> Result<(), MeshKineticError> {
        if self.halfedges.len() % 2 != 0 {
            return Err(broken(format!(
                "odd number of halfedges: {}",
                self.halfedges.len()
            )));
        }

        // 1) halfedge links
        for h in self.halfedges() {
            let rec = &self.halfedges[h.index()];
            if !self.contains_vertex(rec.target)
                || !self.contains_halfedge(rec.next)
                || !self.contains_halfedge(rec.prev)
            {
                return Err(broken(format!("halfedge {h} points outside the mesh")));
            }
            if rec.face.is_some_and(|f| !self.contains_face(f)) {
                return Err(broken(format!("halfedge {h} has an unknown face")));
            }
            if self.prev(rec.next) != h || self.next(rec.prev) != h {
                return Err(broken(format!("next/prev of halfedge {h} disagree")));
            }
            if self.face(rec.next) != rec.face {
                return Err(broken(format!("halfedge {h} and its next lie in different faces")));
            }
            if self.source(rec.next) != rec.target {
                return Err(broken(format!("next of halfedge {h} does not leave its target")));
            }
            if self.source(h) == rec.target {
                return Err(broken(format!("halfedge {h} is a loop")));
            }
        }

        // 2) faces
        for f in self.faces() {
            let h = self.halfedge(f);
            if self.face(h) != Some(f) {
                return Err(broken(format!("face {f} does not own its halfedge {h}")));
            }
            let degree = self.face_degree(f);
            if degree < 3 {
                return Err(broken(format!("face {f} has degree {degree}")));
            }
        }

        // 3) vertices: incoming halfedge, border one preferred
        for v in self.vertices() {
            let Some(h) = self.vertex_halfedge(v) else {
                continue;
            };
            if self.target(h) != v {
                return Err(broken(format!("vertex {v} stores halfedge {h} not targeting it")));
            }
            if !self.is_border(h) && self.halfedges_around_target(h).any(|g| self.is_border(g)) {
                return Err(broken(format!("border vertex {v} stores an interior halfedge")));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::handle::{HalfedgeId, VertexId};

    fn triangle() -> HalfedgeMesh {
        let points = [[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        HalfedgeMesh::from_polygons(&points, &[vec![0, 1, 2]]).unwrap()
    }

    #[test]
    fn built_mesh_is_valid() {
        triangle().validate_invariants().unwrap();
        HalfedgeMesh::new().validate_invariants().unwrap();
    }

    #[test]
    fn detects_broken_next() {
        let mut mesh = triangle();
        let h = HalfedgeId::new(0);
        let n = mesh.next(h);
        mesh.halfedges[h.index()].next = h;
        let err = mesh.validate_invariants().unwrap_err();
        assert!(matches!(err, MeshKineticError::BrokenTopology(_)));
        mesh.halfedges[h.index()].next = n;
        mesh.validate_invariants().unwrap();
    }

    #[test]
    fn detects_wrong_vertex_halfedge() {
        let mut mesh = triangle();
        let v = VertexId::new(0);
        let wrong = mesh.halfedges().find(|&h| mesh.target(h) != v).unwrap();
        mesh.vertices[v.index()].halfedge = Some(wrong);
        assert!(mesh.validate_invariants().is_err());
    }
}
