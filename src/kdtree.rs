//! A kd-tree spatial acceleration structure for ray/primitive intersection queries,
//! built with the Surface Area Heuristic and traversed without recursion.

pub(crate) mod build;
pub(crate) mod edges;
pub(crate) mod node;
mod traverse;
mod tree;

pub use tree::{build as build_tree, KdTree, KdTreeConfig};
