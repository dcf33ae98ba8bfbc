use crate::aabb::Aabb;
use crate::error::KdTreeError;
use crate::kdtree::build::{self, BuildScratch};
use crate::kdtree::node::KdNode;
use crate::kdtree::traverse::{self, TODO_BUFFER_CAPACITY};
use crate::primitive::Primitive;
use crate::ray::{Hit, Ray};

/// Tuning knobs for [`build`]. The defaults match pbrt's, which this accelerator's
/// construction algorithm is adapted from.
#[derive(Copy, Clone, Debug)]
pub struct KdTreeConfig {
    /// Estimated cost of a single primitive intersection test, in the SAH cost
    /// model.
    pub intersect_cost: u32,
    /// Estimated cost of descending through one interior node.
    pub traversal_cost: u32,
    /// Fractional discount (0..1) applied to a split that leaves one child empty.
    pub empty_bonus: f32,
    /// A node with this many primitives or fewer is always a leaf.
    pub max_prims_per_leaf: u32,
    /// Hard recursion depth cap. `None` auto-computes `8 + 1.3 * log2(n)`.
    pub max_depth: Option<u32>,
}

impl Default for KdTreeConfig {
    fn default() -> Self {
        KdTreeConfig {
            intersect_cost: 80,
            traversal_cost: 1,
            empty_bonus: 0.5,
            max_prims_per_leaf: 1,
            max_depth: None,
        }
    }
}

/// A kd-tree spatial acceleration structure over a fixed collection of primitives.
///
/// Built once via [`build`], then immutable: traversal (`intersect`/`intersect_p`)
/// takes `&self` and is safe to call concurrently from multiple threads, each with
/// its own `Ray` and `Hit`.
pub struct KdTree<P> {
    nodes: Vec<KdNode>,
    pool: Vec<u32>,
    primitives: Vec<P>,
    bounds: Aabb,
}

/// Builds a kd-tree over `primitives` according to `cfg`.
///
/// Fails if any primitive reports `can_intersect() == false`
/// ([`KdTreeError::UnrefinedPrimitive`]), or if the tree would need more nodes
/// than fit in the accelerator's 30-bit node index space
/// ([`KdTreeError::TreeTooLarge`]). An empty `primitives` list is not an error: it
/// produces a tree with a single empty leaf, against which every query misses.
pub fn build<P: Primitive>(
    primitives: Vec<P>,
    cfg: KdTreeConfig,
) -> Result<KdTree<P>, KdTreeError> {
    for (index, p) in primitives.iter().enumerate() {
        if !p.can_intersect() {
            return Err(KdTreeError::UnrefinedPrimitive { index });
        }
    }

    let prim_bounds: Vec<Aabb> = primitives.iter().map(Primitive::world_bound).collect();
    let bounds = prim_bounds
        .iter()
        .fold(Aabb::default(), |acc, b| acc.union(b));

    let mut nodes = Vec::new();
    let mut pool = Vec::new();

    if primitives.is_empty() {
        nodes.push(KdNode::leaf_empty());
        return Ok(KdTree {
            nodes,
            pool,
            primitives,
            bounds,
        });
    }

    let n = primitives.len();
    let max_depth = cfg
        .max_depth
        .unwrap_or_else(|| (8.0 + 1.3 * (n as f32).log2()).round() as u32)
        .min(TODO_BUFFER_CAPACITY as u32 - 1);

    let prim_nums: Vec<u32> = (0..n as u32).collect();
    let mut scratch = BuildScratch::with_capacity(n);
    build::build_node(
        &mut nodes,
        &mut pool,
        &prim_bounds,
        prim_nums,
        bounds,
        max_depth,
        0,
        &cfg,
        &mut scratch,
    )?;

    Ok(KdTree {
        nodes,
        pool,
        primitives,
        bounds,
    })
}

impl<P: Primitive> KdTree<P> {
    /// The union of the bounding boxes of every primitive in the tree.
    pub fn world_bound(&self) -> Aabb {
        self.bounds
    }

    /// The primitives the tree was built over, in their original order.
    pub fn primitives(&self) -> &[P] {
        &self.primitives
    }

    /// Finds the closest primitive, if any, that `ray` intersects within `[ray.t_min,
    /// ray.t_max]`. On a hit, fills in `hit` and returns `true`; `hit.t` may be
    /// improved even on an eventual `false` return only if a hit is found (a
    /// fresh `Hit::default()` is otherwise left untouched).
    pub fn intersect(&self, ray: &Ray, hit: &mut Hit) -> bool {
        match self.bounds.intersect(ray) {
            Some((seg_min, seg_max)) => traverse::intersect(
                &self.nodes,
                &self.pool,
                &self.primitives,
                ray,
                seg_min,
                seg_max,
                hit,
            ),
            None => false,
        }
    }

    /// Reports whether `ray` intersects any primitive within `[ray.t_min,
    /// ray.t_max]`, without computing which one or where.
    pub fn intersect_p(&self, ray: &Ray) -> bool {
        match self.bounds.intersect(ray) {
            Some((seg_min, seg_max)) => {
                traverse::intersect_p(&self.nodes, &self.pool, &self.primitives, ray, seg_min, seg_max)
            }
            None => false,
        }
    }

    /// Number of nodes in the flat node array (interior + leaf).
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
