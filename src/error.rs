use thiserror::Error;

/// Errors returned by [`crate::build_tree`] when a primitive set cannot be
/// turned into a valid tree.
///
/// These are the only two ways construction can fail; traversal itself is infallible
/// (it either finds a hit or it doesn't).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KdTreeError {
    /// A primitive reported `can_intersect() == false`. The accelerator requires every
    /// primitive handed to it to already be intersectable; callers must refine
    /// (tessellate, flatten, etc.) primitives before construction.
    #[error("primitive at index {index} is not intersectable (can_intersect() == false)")]
    UnrefinedPrimitive {
        /// Index of the offending primitive in the input sequence.
        index: usize,
    },

    /// The build would require more nodes than fit in the 30-bit node/payload index space.
    #[error("kd-tree would require {node_count} nodes, which exceeds the 2^30 node limit")]
    TreeTooLarge {
        /// The number of nodes the build had already allocated when the limit was hit.
        node_count: usize,
    },
}
