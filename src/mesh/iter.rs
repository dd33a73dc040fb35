//! Circulators over halfedge cycles.
//!
//! Both iterators stop after as many steps as the mesh has halfedges, so a
//! corrupted `next` chain cannot make them loop forever.

use super::halfedge_mesh::HalfedgeMesh;
use super::handle::HalfedgeId;

/// Walks `next` pointers from a start halfedge until it comes back around.
#[derive(Clone)]
pub struct HalfedgesAroundFace<'a> {
    mesh: &'a HalfedgeMesh,
    start: HalfedgeId,
    current: Option<HalfedgeId>,
    budget: usize,
}

impl<'a> HalfedgesAroundFace<'a> {
    pub(crate) fn new(mesh: &'a HalfedgeMesh, start: HalfedgeId) -> Self {
        Self {
            mesh,
            start,
            current: Some(start),
            budget: mesh.halfedge_count(),
        }
    }
}

impl Iterator for HalfedgesAroundFace<'_> {
    type Item = HalfedgeId;

    fn next(&mut self) -> Option<HalfedgeId> {
        let h = self.current?;
        if self.budget == 0 {
            self.current = None;
            return None;
        }
        self.budget -= 1;
        let n = self.mesh.next(h);
        self.current = (n != self.start).then_some(n);
        Some(h)
    }
}

/// Walks the halfedges that share a target vertex, via `opposite(next(h))`.
#[derive(Clone)]
pub struct HalfedgesAroundTarget<'a> {
    mesh: &'a HalfedgeMesh,
    start: HalfedgeId,
    current: Option<HalfedgeId>,
    budget: usize,
}

impl<'a> HalfedgesAroundTarget<'a> {
    pub(crate) fn new(mesh: &'a HalfedgeMesh, start: HalfedgeId) -> Self {
        Self {
            mesh,
            start,
            current: Some(start),
            budget: mesh.halfedge_count(),
        }
    }
}

impl Iterator for HalfedgesAroundTarget<'_> {
    type Item = HalfedgeId;

    fn next(&mut self) -> Option<HalfedgeId> {
        let h = self.current?;
        if self.budget == 0 {
            self.current = None;
            return None;
        }
        self.budget -= 1;
        let n = self.mesh.next(h).opposite();
        self.current = (n != self.start).then_some(n);
        Some(h)
    }
}

#[cfg(test)]
mod tests {
    use crate::mesh::HalfedgeMesh;
    use crate::mesh::handle::VertexId;

    fn fan() -> HalfedgeMesh {
        // hub 0 surrounded by 1..=4, closed fan
        let points = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [-1.0, 0.0, 0.0],
            [0.0, -1.0, 0.0],
        ];
        HalfedgeMesh::from_polygons(
            &points,
            &[vec![0, 1, 2], vec![0, 2, 3], vec![0, 3, 4], vec![0, 4, 1]],
        )
        .unwrap()
    }

    #[test]
    fn around_target_visits_every_incoming_halfedge() {
        let mesh = fan();
        let hub = VertexId::new(0);
        let start = mesh.vertex_halfedge(hub).unwrap();
        let incoming: Vec<_> = mesh.halfedges_around_target(start).collect();
        assert_eq!(incoming.len(), 4);
        assert!(incoming.iter().all(|&h| mesh.target(h) == hub));
        let mut sources: Vec<u32> = incoming.iter().map(|&h| mesh.source(h).get()).collect();
        sources.sort_unstable();
        assert_eq!(sources, vec![1, 2, 3, 4]);
        assert!(!mesh.is_border_vertex(hub));
    }

    #[test]
    fn border_vertex_fan_includes_border_halfedge() {
        let mesh = fan();
        let v = VertexId::new(2);
        let start = mesh.vertex_halfedge(v).unwrap();
        assert!(mesh.is_border(start));
        let incoming: Vec<_> = mesh.halfedges_around_target(start).collect();
        // from 3 (border), from 1, from 0
        assert_eq!(incoming.len(), 3);
    }

    #[test]
    fn around_face_is_a_triangle() {
        let mesh = fan();
        for f in mesh.faces() {
            let cycle: Vec<_> = mesh.halfedges_around_face(mesh.halfedge(f)).collect();
            assert_eq!(cycle.len(), 3);
            assert!(cycle.iter().all(|&h| mesh.face(h) == Some(f)));
        }
    }
}
