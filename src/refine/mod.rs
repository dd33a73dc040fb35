//! Adaptive refinement of a patch of a triangle mesh.
//!
//! Each pass splits every patch face that is too coarse for the local scale
//! by inserting its centroid, then restores a Delaunay-like triangulation by
//! flipping edges interior to the patch. Passes repeat until nothing splits
//! or the iteration cap is reached.
//!
//! # Expected invariants
//! - Every patch face is a triangle.
//! - Edges with at most one incident patch face are never flipped, and
//!   centroid insertion never touches an existing edge, so the boundary
//!   polyline of the patch comes out unchanged.
//! - A patch where no face exceeds the density target is returned untouched
//!   with empty outputs.
//!
//! ```rust
//! use mesh_kinetic::mesh::{FaceId, HalfedgeMesh};
//! use mesh_kinetic::refine::{RefineOptions, RefineStatus, refine};
//!
//! let h = 3f64.sqrt() / 2.0;
//! let points = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.5, h, 0.0]];
//! let mut mesh = HalfedgeMesh::from_polygons(&points, &[vec![0, 1, 2]])?;
//!
//! let options = RefineOptions { density_control_factor: 2.0, ..Default::default() };
//! let outcome = refine(&mut mesh, [FaceId::new(0)], &options)?;
//! assert_eq!(outcome.new_vertices.len(), 1);
//! assert_eq!(outcome.new_faces.len(), 2);
//! assert_eq!(outcome.status, RefineStatus::Converged);
//! # Ok::<(), mesh_kinetic::mesh_error::MeshKineticError>(())
//! ```

mod relax;
mod scale;

use crate::geometry::Point3;
use crate::geometry::quality::validate_triangle;
use crate::geometry::vector::{centroid, distance};
use crate::mesh::{FaceId, HalfedgeId, HalfedgeMesh, VertexId};
use crate::mesh_error::MeshKineticError;
use hashbrown::{HashMap, HashSet};

/// Settings for [`refine`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RefineOptions {
    /// Target ratio of refined to original vertex density; larger values
    /// produce finer output. Must be finite and positive.
    pub density_control_factor: f64,
    /// Maximum number of split passes.
    pub max_iterations: usize,
    /// When enabled, reject degenerate patch triangles before refining and
    /// after it. A rejected run leaves the mesh as it was.
    pub check_geometry: bool,
}

impl Default for RefineOptions {
    fn default() -> Self {
        Self {
            density_control_factor: std::f64::consts::SQRT_2,
            max_iterations: 10,
            check_geometry: false,
        }
    }
}

/// How a refinement run ended.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RefineStatus {
    /// No face of the patch exceeds the density target any more.
    #[default]
    Converged,
    /// The pass limit was hit while some faces were still too coarse.
    IterationCapReached,
}

/// Result of [`refine`]: new elements in creation order.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RefineOutcome {
    /// Faces created by the run. Split faces keep their handle and are not
    /// listed.
    pub new_faces: Vec<FaceId>,
    pub new_vertices: Vec<VertexId>,
    /// Number of split passes performed, including a final pass that split
    /// nothing.
    pub iterations: usize,
    pub status: RefineStatus,
}

impl RefineOutcome {
    pub fn is_converged(&self) -> bool {
        self.status == RefineStatus::Converged
    }
}

/// Working set of faces being refined.
pub(crate) struct Patch {
    faces: Vec<FaceId>,
    members: HashSet<FaceId>,
}

impl Patch {
    pub(crate) fn new(faces: impl IntoIterator<Item = FaceId>) -> Self {
        let mut patch = Patch {
            faces: Vec::new(),
            members: HashSet::new(),
        };
        for f in faces {
            patch.insert(f);
        }
        patch
    }

    pub(crate) fn insert(&mut self, f: FaceId) {
        if self.members.insert(f) {
            self.faces.push(f);
        }
    }

    pub(crate) fn contains(&self, f: FaceId) -> bool {
        self.members.contains(&f)
    }

    pub(crate) fn faces(&self) -> &[FaceId] {
        &self.faces
    }

    /// Both faces of the edge of `h` belong to the patch.
    pub(crate) fn is_interior_edge(&self, mesh: &HalfedgeMesh, h: HalfedgeId) -> bool {
        matches!(
            (mesh.face(h), mesh.face(h.opposite())),
            (Some(a), Some(b)) if self.contains(a) && self.contains(b)
        )
    }

    /// Vertices of the patch faces, in first-seen order.
    pub(crate) fn vertices(&self, mesh: &HalfedgeMesh) -> Vec<VertexId> {
        let mut seen = HashSet::new();
        self.faces
            .iter()
            .flat_map(|&f| mesh.face_vertices(f))
            .filter(|&v| seen.insert(v))
            .collect()
    }
}

/// Refines a patch with a fixed set of [`RefineOptions`].
#[derive(Clone, Copy, Debug, Default)]
pub struct PatchRefiner {
    options: RefineOptions,
}

impl PatchRefiner {
    pub fn new(options: RefineOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RefineOptions {
        &self.options
    }

    /// Refine the patch `faces` of `mesh` in place.
    ///
    /// Reaching the iteration cap is reported through
    /// [`RefineOutcome::status`], never as an error. Input errors are reported
    /// before the mesh is touched; with `check_geometry` set, a degenerate
    /// result restores the input mesh before the error is returned.
    pub fn refine<I>(
        &self,
        mesh: &mut HalfedgeMesh,
        faces: I,
    ) -> Result<RefineOutcome, MeshKineticError>
    where
        I: IntoIterator<Item = FaceId>,
    {
        let alpha = self.options.density_control_factor;
        if !alpha.is_finite() || alpha <= 0.0 {
            return Err(MeshKineticError::InvalidDensityFactor(alpha));
        }
        let mut patch = Patch::new(faces);
        for &f in patch.faces() {
            if !mesh.contains_face(f) {
                return Err(MeshKineticError::UnknownFace(f));
            }
            let degree = mesh.face_degree(f);
            if degree != 3 {
                return Err(MeshKineticError::NotATriangle { face: f, degree });
            }
        }
        if self.options.check_geometry {
            for &f in patch.faces() {
                let [a, b, c] = mesh.triangle(f)?;
                validate_triangle(a, b, c)?;
            }
        }
        let input_faces = patch.faces().len();

        let backup = self.options.check_geometry.then(|| mesh.clone());
        let outcome = match self.run(mesh, &mut patch) {
            Ok(outcome) => outcome,
            Err(e) => {
                if let Some(original) = backup {
                    log::debug!("refine failed, restoring the input mesh: {e}");
                    *mesh = original;
                }
                return Err(e);
            }
        };

        log::debug!(
            "refined {input_faces} faces: {} new vertices, {} new faces, {} passes, {:?}",
            outcome.new_vertices.len(),
            outcome.new_faces.len(),
            outcome.iterations,
            outcome.status
        );
        Ok(outcome)
    }

    /// Split and relax passes over a validated patch.
    fn run(
        &self,
        mesh: &mut HalfedgeMesh,
        patch: &mut Patch,
    ) -> Result<RefineOutcome, MeshKineticError> {
        let alpha = self.options.density_control_factor;
        let mut scales = scale::vertex_scales(mesh, patch);
        let mut outcome = RefineOutcome::default();
        let mut exhausted = true;
        for pass in 1..=self.options.max_iterations {
            outcome.iterations = pass;
            let split = self.split_pass(mesh, patch, &mut scales, &mut outcome)?;
            if split == 0 {
                log::trace!("refine pass {pass}: nothing to split");
                exhausted = false;
                break;
            }
            let flips = relax::relax_patch(mesh, patch)?;
            log::trace!("refine pass {pass}: {split} faces split, {flips} edges flipped");
        }

        if exhausted {
            let pending = patch
                .faces()
                .iter()
                .filter(|&&f| split_point(mesh, &scales, f, alpha).is_some())
                .count();
            if pending > 0 {
                log::debug!(
                    "refine stopped after {} passes with {pending} faces above the density target",
                    self.options.max_iterations
                );
                outcome.status = RefineStatus::IterationCapReached;
            }
        }

        // split faces keep their handle, so check the whole patch
        if self.options.check_geometry && !outcome.new_faces.is_empty() {
            for &f in patch.faces() {
                let [a, b, c] = mesh.triangle(f)?;
                validate_triangle(a, b, c)?;
            }
        }
        Ok(outcome)
    }

    /// Split every face of the patch, as it stands at the start of the pass,
    /// that is too coarse. Returns the number of faces split.
    fn split_pass(
        &self,
        mesh: &mut HalfedgeMesh,
        patch: &mut Patch,
        scales: &mut HashMap<VertexId, f64>,
        outcome: &mut RefineOutcome,
    ) -> Result<usize, MeshKineticError> {
        let alpha = self.options.density_control_factor;
        let snapshot = patch.faces().to_vec();
        let mut split = 0;
        for f in snapshot {
            let Some((center, sigma)) = split_point(mesh, scales, f, alpha) else {
                continue;
            };
            let rim: Vec<HalfedgeId> = mesh.halfedges_around_face(mesh.halfedge(f)).collect();
            let (v, new_faces) = mesh.add_center_vertex(f, center)?;
            scales.insert(v, sigma);
            for &nf in &new_faces {
                patch.insert(nf);
            }
            outcome.new_faces.extend(new_faces);
            outcome.new_vertices.push(v);
            for h in rim {
                relax::relax_edge(mesh, patch, h)?;
            }
            split += 1;
        }
        Ok(split)
    }
}

/// Refine the patch `faces` of `mesh` in place with `options`.
///
/// See [`PatchRefiner::refine`].
pub fn refine<I>(
    mesh: &mut HalfedgeMesh,
    faces: I,
    options: &RefineOptions,
) -> Result<RefineOutcome, MeshKineticError>
where
    I: IntoIterator<Item = FaceId>,
{
    PatchRefiner::new(*options).refine(mesh, faces)
}

/// Centroid and its interpolated scale if face `f` should be split.
///
/// A face is split when `alpha` times the distance from its centroid to each
/// corner exceeds both the centroid scale and that corner's scale.
fn split_point(
    mesh: &HalfedgeMesh,
    scales: &HashMap<VertexId, f64>,
    f: FaceId,
    alpha: f64,
) -> Option<(Point3, f64)> {
    let corners: Vec<VertexId> = mesh.face_vertices(f).collect();
    if corners.is_empty() {
        return None;
    }
    let points: Vec<Point3> = corners.iter().map(|&v| mesh.point(v)).collect();
    let center = centroid(&points);
    let scale_of = |v: &VertexId| scales.get(v).copied().unwrap_or_default();
    let sigma = corners.iter().map(scale_of).sum::<f64>() / corners.len() as f64;
    let coarse = corners.iter().zip(&points).all(|(v, &p)| {
        let reach = alpha * distance(center, p);
        reach > sigma && reach > scale_of(v)
    });
    coarse.then_some((center, sigma))
}
