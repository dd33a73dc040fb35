//! # mesh-kinetic
//!
//! mesh-kinetic collects two pieces of computational-geometry machinery that
//! share a mesh and numerics layer:
//!
//! - **Kinetic root handling**: [`kinetic::DegenerateRootStack`] wraps the
//!   root stack of a certificate function and repairs the degeneracies of
//!   root isolation (a spurious root at the lower bound of the time window,
//!   roots of even multiplicity that must be reported twice).
//!   [`kinetic::HandleDegeneracyKernel`] installs it on any
//!   [`kinetic::FunctionKernel`].
//! - **Patch refinement**: [`refine::refine`] subdivides a selected patch of
//!   a triangle mesh until it reaches a target vertex density, keeping the
//!   patch boundary intact.
//!
//! Supporting modules provide a halfedge mesh ([`mesh::HalfedgeMesh`]),
//! length and area measurement ([`measure`]), geometric predicates
//! ([`geometry`]) and polynomials with Sturm sequences ([`polynomial`]).
//!
//! ## Invariant checking
//! Expensive consistency checks run in debug builds, or in release builds
//! with the `check-invariants` (or `strict-invariants`) feature. See
//! [`DebugInvariants`].
//!
//! ## Logging
//! The crate logs through the [`log`](https://docs.rs/log) facade and never
//! installs a logger.

pub mod debug_invariants;
pub mod geometry;
pub mod kinetic;
pub mod measure;
pub mod mesh;
pub mod mesh_error;
pub mod polynomial;
pub mod refine;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::kinetic::{
        DegenerateRootStack, ExplicitRootStack, FunctionKernel, HandleDegeneracyKernel,
        RootStack, RootStackExt,
    };
    pub use crate::measure::{area, border_length, edge_length, face_area, surface_area};
    pub use crate::mesh::{FaceId, HalfedgeId, HalfedgeMesh, VertexId};
    pub use crate::mesh_error::MeshKineticError;
    pub use crate::polynomial::{MonicSturmSequence, Polynomial, Sign};
    pub use crate::refine::{PatchRefiner, RefineOptions, RefineOutcome, RefineStatus, refine};
}
