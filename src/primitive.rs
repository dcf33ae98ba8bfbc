use crate::aabb::Aabb;
use crate::ray::{Hit, Ray};

/// The external contract the accelerator holds its geometry through.
///
/// The accelerator never inspects a primitive beyond these four operations, and it
/// identifies each primitive solely by its index in the sequence passed to
/// [`crate::build_tree`] (a primitive never needs to know its own index), so
/// moving or cloning a `KdTree` is harmless regardless of how primitives are stored.
///
/// A primitive that would otherwise need to refine itself into sub-primitives
/// (e.g. a subdivision surface, or a CSG node) must be pre-refined by the caller:
/// `build` requires `can_intersect() == true` for everything it's handed.
pub trait Primitive {
    /// The primitive's bounding box, in the same space rays are given in.
    fn world_bound(&self) -> Aabb;

    /// Whether this primitive can be intersected directly. The default
    /// implementation returns `true`, which covers ordinary geometric primitives;
    /// override it only for a primitive that must be refined by the caller before
    /// it's handed to `build`.
    fn can_intersect(&self) -> bool {
        true
    }

    /// Tests the ray for an intersection closer than `hit.t`, updating `hit` and
    /// returning `true` if one is found.
    fn intersect(&self, ray: &Ray, hit: &mut Hit) -> bool;

    /// Tests whether the ray intersects this primitive at all, within `[ray.t_min,
    /// ray.t_max]`, without computing hit details. Must agree with `intersect`:
    /// one returns true/`Some` iff the other would.
    fn intersect_p(&self, ray: &Ray) -> bool;
}
