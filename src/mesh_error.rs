//! MeshKineticError: Unified error type for mesh-kinetic public APIs
//!
//! This error type is used throughout the mesh-kinetic library to provide
//! non-panicking error handling for mesh construction, Euler operations,
//! measurement, refinement and root-stack preconditions.

use crate::mesh::handle::{FaceId, HalfedgeId, VertexId};
use thiserror::Error;

/// Unified error type for mesh-kinetic operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshKineticError {
    /// A face handle does not refer to a face of the mesh.
    #[error("unknown face `{0}`")]
    UnknownFace(FaceId),
    /// A halfedge handle does not refer to a halfedge of the mesh.
    #[error("unknown halfedge `{0}`")]
    UnknownHalfedge(HalfedgeId),
    /// An operation that requires a triangle was given a face of another degree.
    #[error("face `{face}` is not a triangle (degree {degree})")]
    NotATriangle { face: FaceId, degree: usize },
    /// `border_length` was called on a halfedge that has an incident face.
    #[error("halfedge `{0}` is not a border halfedge")]
    NotABorderHalfedge(HalfedgeId),
    /// Flip requested on an edge lying on the mesh border.
    #[error("cannot flip border edge `{0}`")]
    BorderEdge(HalfedgeId),
    /// Flipping the edge would duplicate an existing edge.
    #[error("edge `{0}` cannot be flipped without creating a duplicate edge")]
    EdgeNotFlippable(HalfedgeId),
    /// A polygon references a vertex index past the point list.
    #[error("polygon {polygon} references vertex {index}, but only {count} points exist")]
    VertexIndexOutOfRange {
        polygon: usize,
        index: usize,
        count: usize,
    },
    /// A polygon has fewer than three vertices or repeats a vertex.
    #[error("polygon {0} is degenerate")]
    DegeneratePolygon(usize),
    /// The same directed edge is used by two faces.
    #[error("non-manifold edge `{from}` -> `{to}`")]
    NonManifoldEdge { from: VertexId, to: VertexId },
    /// Two border fans meet at one vertex.
    #[error("non-manifold vertex `{0}`")]
    NonManifoldVertex(VertexId),
    /// The density control factor is not a positive finite number.
    #[error("density control factor must be positive and finite, got {0}")]
    InvalidDensityFactor(f64),
    /// Geometry is degenerate or otherwise unusable.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    /// The wrapped root stack's top root does not lie above the lower bound.
    #[error("root stack top `{top}` is not above the lower bound `{lower_bound}`")]
    RootNotAboveLowerBound { top: String, lower_bound: String },
    /// Halfedge connectivity is inconsistent.
    #[error("broken topology: {0}")]
    BrokenTopology(String),
    /// Root-stack state flags are inconsistent.
    #[error("inconsistent root stack state: {0}")]
    InconsistentRootStack(&'static str),
}
