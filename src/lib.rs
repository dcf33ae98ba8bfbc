//! `kdaccel` is a kd-tree spatial acceleration structure for ray tracing.
//!
//! Build a tree once from any collection of [`Primitive`]s with [`build_tree`], then
//! query it with [`KdTree::intersect`] (closest hit) or [`KdTree::intersect_p`]
//! (any hit, for shadow rays). Construction uses the Surface Area Heuristic to
//! choose split planes; traversal is stackless, using a small fixed-size work list
//! instead of recursion.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use aabb::{Aabb, Axis};
pub use error::KdTreeError;
pub use kdtree::{build_tree, KdTree, KdTreeConfig};
pub use primitive::Primitive;
pub use ray::{Hit, Ray};
pub use shape::{AxisAlignedBox, Sphere, Triangle};

mod aabb;
mod error;
mod kdtree;
mod primitive;
mod ray;
mod shape;
