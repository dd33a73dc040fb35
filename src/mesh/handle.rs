//! Typed handles for halfedge mesh entities.
//!
//! Vertices, halfedges and faces are addressed by dense `u32` indices into the
//! mesh's storage. Each kind gets its own newtype so a face index can never be
//! passed where a vertex is expected.
//!
//! Halfedges are allocated in opposite pairs: `h` and `h ^ 1` are the two
//! halves of one edge, so [`HalfedgeId::opposite`] needs no storage.

use std::fmt;

macro_rules! define_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
        )]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Wrap a raw storage index.
            #[inline]
            pub const fn new(raw: u32) -> Self {
                $name(raw)
            }

            /// Raw storage index.
            #[inline]
            pub const fn get(self) -> u32 {
                self.0
            }

            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        /// Displays as `Name(raw)`.
        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.0).finish()
            }
        }

        /// Prints only the raw index.
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_handle!(
    /// Handle of a mesh vertex.
    VertexId
);
define_handle!(
    /// Handle of a directed halfedge.
    HalfedgeId
);
define_handle!(
    /// Handle of a mesh face.
    FaceId
);

impl HalfedgeId {
    /// The other half of the same edge.
    #[inline]
    pub const fn opposite(self) -> Self {
        HalfedgeId(self.0 ^ 1)
    }

    /// Index of the undirected edge this halfedge belongs to.
    #[inline]
    pub const fn edge_index(self) -> usize {
        (self.0 >> 1) as usize
    }
}
