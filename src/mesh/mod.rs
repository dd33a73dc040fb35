//! Halfedge polygon mesh.
//!
//! [`HalfedgeMesh`] stores connectivity in halfedge form together with a
//! point per vertex, and offers the traversal and mutation primitives the
//! refinement driver needs.

pub mod euler;
pub mod halfedge_mesh;
pub mod handle;
pub mod iter;
pub mod validation;

pub use halfedge_mesh::HalfedgeMesh;
pub use handle::{FaceId, HalfedgeId, VertexId};
pub use iter::{HalfedgesAroundFace, HalfedgesAroundTarget};
