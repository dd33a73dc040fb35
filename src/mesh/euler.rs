//! Mutation primitives: center-vertex insertion and edge flips.
//!
//! Both operations keep every existing halfedge and face handle valid; they
//! only append new elements and rewire pointers.

use super::halfedge_mesh::{FaceRecord, HalfedgeMesh, VertexRecord};
use super::handle::{FaceId, HalfedgeId, VertexId};
use crate::geometry::Point3;
use crate::mesh_error::MeshKineticError;

impl HalfedgeMesh {
    /// Insert a vertex at `point` inside face `f` and connect it to every
    /// corner, turning a degree-`n` face into `n` triangles.
    ///
    /// `f` keeps the triangle on its original boundary halfedge; the returned
    /// faces are the `n - 1` new ones in boundary order.
    pub fn add_center_vertex(
        &mut self,
        f: FaceId,
        point: Point3,
    ) -> Result<(VertexId, Vec<FaceId>), MeshKineticError> {
        if !self.contains_face(f) {
            return Err(MeshKineticError::UnknownFace(f));
        }
        let cycle: Vec<HalfedgeId> = self.halfedges_around_face(self.halfedge(f)).collect();
        let center = VertexId::new(self.vertices.len() as u32);
        self.vertices.push(VertexRecord {
            point,
            halfedge: None,
        });

        // spokes[i] runs from target(cycle[i]) to the center
        let spokes: Vec<HalfedgeId> = cycle
            .iter()
            .map(|&h| {
                let t = self.target(h);
                self.new_edge(t, center)
            })
            .collect();

        let n = cycle.len();
        let mut new_faces = Vec::with_capacity(n.saturating_sub(1));
        for i in 0..n {
            let face = if i == 0 {
                f
            } else {
                let id = FaceId::new(self.faces.len() as u32);
                self.faces.push(FaceRecord { halfedge: cycle[i] });
                new_faces.push(id);
                id
            };
            let back = spokes[(i + n - 1) % n].opposite();
            self.link(cycle[i], spokes[i]);
            self.link(spokes[i], back);
            self.link(back, cycle[i]);
            for h in [cycle[i], spokes[i], back] {
                self.halfedges[h.index()].face = Some(face);
            }
            self.faces[face.index()].halfedge = cycle[i];
        }
        self.vertices[center.index()].halfedge = spokes.first().copied();

        #[cfg(any(debug_assertions, feature = "check-invariants"))]
        crate::debug_invariants::DebugInvariants::debug_assert_invariants(self);
        Ok((center, new_faces))
    }

    /// Whether the edge of `h` can be flipped: it joins two triangles whose
    /// apexes are distinct and not already connected.
    pub fn is_flippable(&self, h: HalfedgeId) -> bool {
        self.flip_check(h).is_ok()
    }

    fn flip_check(&self, h: HalfedgeId) -> Result<(), MeshKineticError> {
        if !self.contains_halfedge(h) {
            return Err(MeshKineticError::UnknownHalfedge(h));
        }
        let o = h.opposite();
        let (Some(f1), Some(f2)) = (self.face(h), self.face(o)) else {
            return Err(MeshKineticError::BorderEdge(h));
        };
        for f in [f1, f2] {
            let degree = self.face_degree(f);
            if degree != 3 {
                return Err(MeshKineticError::NotATriangle { face: f, degree });
            }
        }
        let c = self.target(self.next(h));
        let d = self.target(self.next(o));
        if c == d || self.find_halfedge(c, d).is_some() {
            return Err(MeshKineticError::EdgeNotFlippable(h));
        }
        Ok(())
    }

    /// Replace the diagonal of the quadrilateral formed by the two triangles
    /// incident to `h`.
    ///
    /// With `h: a -> b` in triangle `(a, b, c)` and its opposite in
    /// `(b, a, d)`, afterwards `h` runs `d -> c` and its opposite `c -> d`;
    /// face handles are kept, one per side of the new diagonal.
    pub fn flip_edge(&mut self, h: HalfedgeId) -> Result<(), MeshKineticError> {
        self.flip_check(h)?;
        let o = h.opposite();
        let (hn, on) = (self.next(h), self.next(o));
        let (hp, op) = (self.next(hn), self.next(on));
        let (a, b) = (self.source(h), self.target(h));
        let (c, d) = (self.target(hn), self.target(on));
        let (Some(f1), Some(f2)) = (self.face(h), self.face(o)) else {
            return Err(MeshKineticError::BorderEdge(h));
        };

        self.halfedges[h.index()].target = c;
        self.halfedges[o.index()].target = d;

        self.link(on, h);
        self.link(h, hp);
        self.link(hp, on);
        self.link(op, hn);
        self.link(hn, o);
        self.link(o, op);

        self.halfedges[on.index()].face = Some(f1);
        self.halfedges[hn.index()].face = Some(f2);
        self.faces[f1.index()].halfedge = h;
        self.faces[f2.index()].halfedge = o;

        if self.vertex_halfedge(a) == Some(o) {
            self.vertices[a.index()].halfedge = Some(hp);
        }
        if self.vertex_halfedge(b) == Some(h) {
            self.vertices[b.index()].halfedge = Some(op);
        }

        #[cfg(any(debug_assertions, feature = "check-invariants"))]
        crate::debug_invariants::DebugInvariants::debug_assert_invariants(self);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debug_invariants::DebugInvariants;

    fn square() -> HalfedgeMesh {
        let points = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ];
        HalfedgeMesh::from_polygons(&points, &[vec![0, 1, 2], vec![0, 2, 3]]).unwrap()
    }

    #[test]
    fn flip_swaps_the_diagonal() {
        let mut mesh = square();
        let (v0, v1, v2, v3) = (
            VertexId::new(0),
            VertexId::new(1),
            VertexId::new(2),
            VertexId::new(3),
        );
        let diag = mesh.find_halfedge(v0, v2).unwrap();
        assert!(mesh.is_flippable(diag));
        mesh.flip_edge(diag).unwrap();
        mesh.validate_invariants().unwrap();

        assert!(mesh.find_halfedge(v0, v2).is_none());
        assert!(mesh.find_halfedge(v2, v0).is_none());
        let new_diag = mesh.find_halfedge(v1, v3).unwrap();
        assert_eq!(new_diag, diag);
        assert_eq!(mesh.face_count(), 2);
        for f in mesh.faces() {
            assert_eq!(mesh.face_degree(f), 3);
        }
    }

    #[test]
    fn flipping_twice_restores_connectivity() {
        let mut mesh = square();
        let diag = mesh
            .find_halfedge(VertexId::new(0), VertexId::new(2))
            .unwrap();
        mesh.flip_edge(diag).unwrap();
        mesh.flip_edge(diag).unwrap();
        mesh.validate_invariants().unwrap();
        let restored = mesh
            .find_halfedge(VertexId::new(0), VertexId::new(2))
            .or_else(|| mesh.find_halfedge(VertexId::new(2), VertexId::new(0)));
        assert!(restored.is_some());
    }

    #[test]
    fn border_edges_do_not_flip() {
        let mut mesh = square();
        let border = mesh
            .find_halfedge(VertexId::new(0), VertexId::new(1))
            .unwrap();
        assert!(!mesh.is_flippable(border));
        assert_eq!(
            mesh.flip_edge(border).unwrap_err(),
            MeshKineticError::BorderEdge(border)
        );
    }

    #[test]
    fn flip_refuses_to_duplicate_an_edge() {
        // tetrahedron: every apex pair is already connected
        let points = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ];
        let mut mesh = HalfedgeMesh::from_polygons(
            &points,
            &[vec![0, 2, 1], vec![0, 1, 3], vec![1, 2, 3], vec![0, 3, 2]],
        )
        .unwrap();
        mesh.validate_invariants().unwrap();
        let h = mesh
            .find_halfedge(VertexId::new(0), VertexId::new(1))
            .unwrap();
        assert_eq!(
            mesh.flip_edge(h).unwrap_err(),
            MeshKineticError::EdgeNotFlippable(h)
        );
    }

    #[test]
    fn center_vertex_splits_a_triangle_in_three() {
        let mut mesh = square();
        let f = FaceId::new(0);
        let (c, new_faces) = mesh.add_center_vertex(f, [0.7, 0.3, 0.0]).unwrap();
        mesh.validate_invariants().unwrap();

        assert_eq!(c, VertexId::new(4));
        assert_eq!(new_faces, vec![FaceId::new(2), FaceId::new(3)]);
        assert_eq!(mesh.face_count(), 4);
        assert_eq!(mesh.edge_count(), 8);
        assert!(!mesh.is_border_vertex(c));
        let degree = mesh
            .halfedges_around_target(mesh.vertex_halfedge(c).unwrap())
            .count();
        assert_eq!(degree, 3);
        for face in std::iter::once(f).chain(new_faces) {
            assert_eq!(mesh.face_degree(face), 3);
            assert!(mesh.face_vertices(face).any(|v| v == c));
        }
    }

    #[test]
    fn center_vertex_on_a_quad_makes_four_triangles() {
        let points = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ];
        let mut mesh = HalfedgeMesh::from_polygons(&points, &[vec![0, 1, 2, 3]]).unwrap();
        let (_, new_faces) = mesh
            .add_center_vertex(FaceId::new(0), [0.5, 0.5, 0.0])
            .unwrap();
        assert_eq!(new_faces.len(), 3);
        mesh.validate_invariants().unwrap();
    }

    #[test]
    fn unknown_face_is_rejected() {
        let mut mesh = square();
        assert_eq!(
            mesh.add_center_vertex(FaceId::new(9), [0.0; 3]).unwrap_err(),
            MeshKineticError::UnknownFace(FaceId::new(9))
        );
    }
}
