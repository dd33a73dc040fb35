//! Halfedge mesh storage, construction and traversal.
//!
//! # Conventions
//! - Halfedges come in opposite pairs (`h`, `h ^ 1`); a halfedge without a
//!   face is a *border* halfedge, and border halfedges are linked into cycles
//!   with `next`/`prev` like face boundaries.
//! - Every non-isolated vertex stores one *incoming* halfedge. For a vertex on
//!   the border it is a border halfedge, so `is_border_vertex` is O(1).
//! - Faces store one halfedge of their boundary cycle, oriented
//!   counter-clockwise when seen from the front.
//!
//! Accessors index storage directly and panic on handles that do not belong
//! to this mesh; use the `contains_*` helpers to check foreign handles.

use super::handle::{FaceId, HalfedgeId, VertexId};
use super::iter::{HalfedgesAroundFace, HalfedgesAroundTarget};
use crate::geometry::Point3;
use crate::mesh_error::MeshKineticError;
use hashbrown::HashMap;
use itertools::Itertools;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub(crate) struct HalfedgeRecord {
    pub(crate) target: VertexId,
    pub(crate) next: HalfedgeId,
    pub(crate) prev: HalfedgeId,
    pub(crate) face: Option<FaceId>,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub(crate) struct VertexRecord {
    pub(crate) point: Point3,
    pub(crate) halfedge: Option<HalfedgeId>,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub(crate) struct FaceRecord {
    pub(crate) halfedge: HalfedgeId,
}

/// Polygon mesh in halfedge representation with a vertex point map.
///
/// ```rust
/// use mesh_kinetic::mesh::HalfedgeMesh;
///
/// let points = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]];
/// let mesh = HalfedgeMesh::from_polygons(&points, &[vec![0, 1, 2], vec![0, 2, 3]])?;
/// assert_eq!(mesh.face_count(), 2);
/// assert_eq!(mesh.edge_count(), 5);
/// # Ok::<(), mesh_kinetic::mesh_error::MeshKineticError>(())
/// ```
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct HalfedgeMesh {
    pub(crate) vertices: Vec<VertexRecord>,
    pub(crate) halfedges: Vec<HalfedgeRecord>,
    pub(crate) faces: Vec<FaceRecord>,
}

impl HalfedgeMesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mesh from a point list and polygons given as indices into it.
    ///
    /// Polygons must be consistently oriented. Shared edges are glued, every
    /// other edge becomes part of a border cycle.
    pub fn from_polygons<P>(
        points: &[Point3],
        polygons: impl IntoIterator<Item = P>,
    ) -> Result<Self, MeshKineticError>
    where
        P: AsRef<[usize]>,
    {
        let mut mesh = Self::default();
        for p in points {
            mesh.add_vertex(*p);
        }

        let mut directed: HashMap<(VertexId, VertexId), HalfedgeId> = HashMap::new();
        for (pi, polygon) in polygons.into_iter().enumerate() {
            let polygon = polygon.as_ref();
            if polygon.len() < 3 || !polygon.iter().all_unique() {
                return Err(MeshKineticError::DegeneratePolygon(pi));
            }
            if let Some(&index) = polygon.iter().find(|&&i| i >= points.len()) {
                return Err(MeshKineticError::VertexIndexOutOfRange {
                    polygon: pi,
                    index,
                    count: points.len(),
                });
            }

            let face = FaceId::new(mesh.faces.len() as u32);
            let mut cycle = Vec::with_capacity(polygon.len());
            for (&a, &b) in polygon.iter().circular_tuple_windows() {
                let (u, v) = (VertexId::new(a as u32), VertexId::new(b as u32));
                if directed.contains_key(&(u, v)) {
                    return Err(MeshKineticError::NonManifoldEdge { from: u, to: v });
                }
                let h = match directed.get(&(v, u)) {
                    Some(&twin) => twin.opposite(),
                    None => mesh.new_edge(u, v),
                };
                directed.insert((u, v), h);
                mesh.halfedges[h.index()].face = Some(face);
                cycle.push(h);
            }
            mesh.link_cycle(&cycle);
            mesh.faces.push(FaceRecord { halfedge: cycle[0] });
        }

        mesh.link_border_cycles()?;
        mesh.assign_vertex_halfedges();
        Ok(mesh)
    }

    /// Create an edge `u -> v`, returning the halfedge targeting `v`.
    ///
    /// Both halves start faceless and self-linked; callers wire them up.
    pub(crate) fn new_edge(&mut self, u: VertexId, v: VertexId) -> HalfedgeId {
        let h = HalfedgeId::new(self.halfedges.len() as u32);
        let o = h.opposite();
        self.halfedges.push(HalfedgeRecord {
            target: v,
            next: h,
            prev: h,
            face: None,
        });
        self.halfedges.push(HalfedgeRecord {
            target: u,
            next: o,
            prev: o,
            face: None,
        });
        h
    }

    pub(crate) fn link(&mut self, h: HalfedgeId, next: HalfedgeId) {
        self.halfedges[h.index()].next = next;
        self.halfedges[next.index()].prev = h;
    }

    fn link_cycle(&mut self, cycle: &[HalfedgeId]) {
        for (&h, &n) in cycle.iter().circular_tuple_windows() {
            self.link(h, n);
        }
    }

    fn link_border_cycles(&mut self) -> Result<(), MeshKineticError> {
        let mut outgoing: HashMap<VertexId, HalfedgeId> = HashMap::new();
        for h in self.halfedges().filter(|&h| self.is_border(h)) {
            let s = self.source(h);
            if outgoing.insert(s, h).is_some() {
                return Err(MeshKineticError::NonManifoldVertex(s));
            }
        }
        let border: Vec<HalfedgeId> = self.halfedges().filter(|&h| self.is_border(h)).collect();
        for h in border {
            let t = self.target(h);
            let n = outgoing.get(&t).copied().ok_or_else(|| {
                MeshKineticError::BrokenTopology(format!("no border halfedge leaves vertex {t}"))
            })?;
            self.link(h, n);
        }
        Ok(())
    }

    fn assign_vertex_halfedges(&mut self) {
        for i in 0..self.halfedges.len() {
            let h = HalfedgeId::new(i as u32);
            let rec = self.halfedges[i];
            let slot = &mut self.vertices[rec.target.index()].halfedge;
            if slot.is_none() || rec.face.is_none() {
                *slot = Some(h);
            }
        }
    }

    /// Add an isolated vertex.
    pub fn add_vertex(&mut self, point: Point3) -> VertexId {
        let v = VertexId::new(self.vertices.len() as u32);
        self.vertices.push(VertexRecord {
            point,
            halfedge: None,
        });
        v
    }

    // === Sizes and ranges ===

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn halfedge_count(&self) -> usize {
        self.halfedges.len()
    }

    pub fn edge_count(&self) -> usize {
        self.halfedges.len() / 2
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + use<> {
        (0..self.vertices.len() as u32).map(VertexId::new)
    }

    pub fn halfedges(&self) -> impl Iterator<Item = HalfedgeId> + use<> {
        (0..self.halfedges.len() as u32).map(HalfedgeId::new)
    }

    /// One halfedge per edge (the even member of each pair).
    pub fn edges(&self) -> impl Iterator<Item = HalfedgeId> + use<> {
        (0..self.halfedges.len() as u32)
            .step_by(2)
            .map(HalfedgeId::new)
    }

    pub fn faces(&self) -> impl Iterator<Item = FaceId> + use<> {
        (0..self.faces.len() as u32).map(FaceId::new)
    }

    pub fn contains_vertex(&self, v: VertexId) -> bool {
        v.index() < self.vertices.len()
    }

    pub fn contains_halfedge(&self, h: HalfedgeId) -> bool {
        h.index() < self.halfedges.len()
    }

    pub fn contains_face(&self, f: FaceId) -> bool {
        f.index() < self.faces.len()
    }

    // === Vertex point map ===

    #[inline]
    pub fn point(&self, v: VertexId) -> Point3 {
        self.vertices[v.index()].point
    }

    #[inline]
    pub fn set_point(&mut self, v: VertexId, point: Point3) {
        self.vertices[v.index()].point = point;
    }

    // === Halfedge traversal ===

    #[inline]
    pub fn target(&self, h: HalfedgeId) -> VertexId {
        self.halfedges[h.index()].target
    }

    #[inline]
    pub fn source(&self, h: HalfedgeId) -> VertexId {
        self.target(h.opposite())
    }

    #[inline]
    pub fn next(&self, h: HalfedgeId) -> HalfedgeId {
        self.halfedges[h.index()].next
    }

    #[inline]
    pub fn prev(&self, h: HalfedgeId) -> HalfedgeId {
        self.halfedges[h.index()].prev
    }

    #[inline]
    pub fn opposite(&self, h: HalfedgeId) -> HalfedgeId {
        h.opposite()
    }

    /// Incident face, `None` for a border halfedge.
    #[inline]
    pub fn face(&self, h: HalfedgeId) -> Option<FaceId> {
        self.halfedges[h.index()].face
    }

    /// One halfedge of the boundary cycle of `f`.
    #[inline]
    pub fn halfedge(&self, f: FaceId) -> HalfedgeId {
        self.faces[f.index()].halfedge
    }

    /// One halfedge targeting `v`, or `None` for an isolated vertex.
    #[inline]
    pub fn vertex_halfedge(&self, v: VertexId) -> Option<HalfedgeId> {
        self.vertices[v.index()].halfedge
    }

    #[inline]
    pub fn is_border(&self, h: HalfedgeId) -> bool {
        self.face(h).is_none()
    }

    /// True if either half of the edge is a border halfedge.
    pub fn is_border_edge(&self, h: HalfedgeId) -> bool {
        self.is_border(h) || self.is_border(h.opposite())
    }

    pub fn is_border_vertex(&self, v: VertexId) -> bool {
        self.vertex_halfedge(v).is_some_and(|h| self.is_border(h))
    }

    /// Halfedges of the cycle containing `h`, starting at `h`.
    pub fn halfedges_around_face(&self, h: HalfedgeId) -> HalfedgesAroundFace<'_> {
        HalfedgesAroundFace::new(self, h)
    }

    /// Halfedges targeting `target(h)`, starting at `h`.
    pub fn halfedges_around_target(&self, h: HalfedgeId) -> HalfedgesAroundTarget<'_> {
        HalfedgesAroundTarget::new(self, h)
    }

    /// Number of halfedges on the boundary of `f`.
    pub fn face_degree(&self, f: FaceId) -> usize {
        self.halfedges_around_face(self.halfedge(f)).count()
    }

    /// Vertices of `f` in boundary order.
    pub fn face_vertices(&self, f: FaceId) -> impl Iterator<Item = VertexId> + '_ {
        self.halfedges_around_face(self.halfedge(f))
            .map(|h| self.target(h))
    }

    /// Halfedge `u -> v`, if the edge exists.
    pub fn find_halfedge(&self, u: VertexId, v: VertexId) -> Option<HalfedgeId> {
        let start = self.vertex_halfedge(v)?;
        self.halfedges_around_target(start)
            .find(|&h| self.source(h) == u)
    }

    /// Corner points of a triangular face.
    pub fn triangle(&self, f: FaceId) -> Result<[Point3; 3], MeshKineticError> {
        if !self.contains_face(f) {
            return Err(MeshKineticError::UnknownFace(f));
        }
        let h = self.halfedge(f);
        let degree = self.face_degree(f);
        if degree != 3 {
            return Err(MeshKineticError::NotATriangle { face: f, degree });
        }
        let n = self.next(h);
        Ok([
            self.point(self.source(h)),
            self.point(self.target(h)),
            self.point(self.target(n)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> HalfedgeMesh {
        let points = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ];
        HalfedgeMesh::from_polygons(&points, &[vec![0, 1, 2], vec![0, 2, 3]]).unwrap()
    }

    #[test]
    fn two_triangles_share_a_diagonal() {
        let mesh = unit_square();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.edge_count(), 5);
        let v0 = VertexId::new(0);
        let v2 = VertexId::new(2);
        let diag = mesh.find_halfedge(v0, v2).unwrap();
        assert!(!mesh.is_border_edge(diag));
        assert_eq!(mesh.source(diag), v0);
        assert_eq!(mesh.target(diag), v2);
        assert_eq!(mesh.border_halfedges_count(), 4);
    }

    #[test]
    fn border_cycle_is_closed() {
        let mesh = unit_square();
        let h = mesh.halfedges().find(|&h| mesh.is_border(h)).unwrap();
        let cycle: Vec<_> = mesh.halfedges_around_face(h).collect();
        assert_eq!(cycle.len(), 4);
        assert!(cycle.iter().all(|&b| mesh.is_border(b)));
    }

    #[test]
    fn every_vertex_of_an_open_patch_is_on_the_border() {
        let mesh = unit_square();
        assert!(mesh.vertices().all(|v| mesh.is_border_vertex(v)));
    }

    #[test]
    fn face_vertices_follow_the_polygon() {
        let mesh = unit_square();
        let f = FaceId::new(1);
        let mut vs: Vec<u32> = mesh.face_vertices(f).map(VertexId::get).collect();
        vs.sort_unstable();
        assert_eq!(vs, vec![0, 2, 3]);
        assert_eq!(mesh.face_degree(f), 3);
    }

    #[test]
    fn rejects_bad_polygons() {
        let points = [[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        assert_eq!(
            HalfedgeMesh::from_polygons(&points, &[vec![0, 1]]).unwrap_err(),
            MeshKineticError::DegeneratePolygon(0)
        );
        assert_eq!(
            HalfedgeMesh::from_polygons(&points, &[vec![0, 1, 1]]).unwrap_err(),
            MeshKineticError::DegeneratePolygon(0)
        );
        assert!(matches!(
            HalfedgeMesh::from_polygons(&points, &[vec![0, 1, 7]]).unwrap_err(),
            MeshKineticError::VertexIndexOutOfRange { index: 7, .. }
        ));
    }

    #[test]
    fn rejects_inconsistent_orientation() {
        let points = [[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0]];
        let err = HalfedgeMesh::from_polygons(&points, &[vec![0, 1, 2], vec![0, 1, 3]]).unwrap_err();
        assert!(matches!(err, MeshKineticError::NonManifoldEdge { .. }));
    }

    #[test]
    fn rejects_bowtie_vertex() {
        let points = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [-1.0, 0.0, 0.0],
            [0.0, -1.0, 0.0],
        ];
        let err =
            HalfedgeMesh::from_polygons(&points, &[vec![0, 1, 2], vec![0, 3, 4]]).unwrap_err();
        assert_eq!(err, MeshKineticError::NonManifoldVertex(VertexId::new(0)));
    }

    #[test]
    fn triangle_requires_three_corners() {
        let points = [[0.0; 3], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]];
        let mesh = HalfedgeMesh::from_polygons(&points, &[vec![0, 1, 2, 3]]).unwrap();
        let err = mesh.triangle(FaceId::new(0)).unwrap_err();
        assert_eq!(
            err,
            MeshKineticError::NotATriangle {
                face: FaceId::new(0),
                degree: 4
            }
        );
        assert_eq!(
            mesh.triangle(FaceId::new(3)).unwrap_err(),
            MeshKineticError::UnknownFace(FaceId::new(3))
        );
    }

    impl HalfedgeMesh {
        fn border_halfedges_count(&self) -> usize {
            self.halfedges().filter(|&h| self.is_border(h)).count()
        }
    }
}
