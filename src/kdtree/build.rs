use crate::aabb::{Aabb, Axis};
use crate::error::KdTreeError;
use crate::kdtree::edges::{cmp_edges, BoundEdge, EdgeKind};
use crate::kdtree::node::{KdNode, MAX_PAYLOAD};
use crate::kdtree::tree::KdTreeConfig;

/// After this many consecutive splits that fail to improve on the leaf cost, the
/// builder gives up refining the current branch and forces a leaf, regardless of
/// what the SAH sweep found. Kept at pbrt's original value for behavioral parity;
/// it has no deeper justification than "works well in practice".
const MAX_BAD_REFINES: u32 = 3;

/// Scratch memory reused across the whole recursive build: one sorted-edge buffer
/// per axis, cleared and refilled at every node rather than reallocated. Safe to
/// thread through the recursion as a single `&mut` because recursive calls never
/// run concurrently with each other (each call finishes with the buffer before
/// its caller touches it again).
pub(crate) struct BuildScratch {
    edges: [Vec<BoundEdge>; 3],
}

impl BuildScratch {
    pub(crate) fn with_capacity(n_primitives: usize) -> Self {
        let cap = 2 * n_primitives;
        BuildScratch {
            edges: [
                Vec::with_capacity(cap),
                Vec::with_capacity(cap),
                Vec::with_capacity(cap),
            ],
        }
    }
}

fn next_axis(axis: Axis) -> Axis {
    match axis {
        Axis::X => Axis::Y,
        Axis::Y => Axis::Z,
        Axis::Z => Axis::X,
    }
}

fn push_node(nodes: &mut Vec<KdNode>, node: KdNode) -> Result<u32, KdTreeError> {
    let index = nodes.len() as u32;
    if index > MAX_PAYLOAD {
        return Err(KdTreeError::TreeTooLarge {
            node_count: nodes.len(),
        });
    }
    nodes.push(node);
    Ok(index)
}

fn emit_leaf(
    nodes: &mut Vec<KdNode>,
    pool: &mut Vec<u32>,
    prim_nums: &[u32],
) -> Result<u32, KdTreeError> {
    let node = match prim_nums.len() {
        0 => KdNode::leaf_empty(),
        1 => KdNode::leaf_one(prim_nums[0]),
        n => {
            let offset = pool.len() as u32;
            if offset > MAX_PAYLOAD {
                return Err(KdTreeError::TreeTooLarge {
                    node_count: nodes.len(),
                });
            }
            pool.extend_from_slice(prim_nums);
            KdNode::leaf_many(offset, n as u32)
        }
    };
    push_node(nodes, node)
}

/// Evaluates the SAH sweep along a single axis, returning the best `(position,
/// cost)` found among edges strictly inside the region, or `None` if no edge
/// qualifies.
fn best_split_on_axis(
    axis: Axis,
    bounds: &Aabb,
    total_sa: f32,
    prim_bounds: &[Aabb],
    prim_nums: &[u32],
    cfg: &KdTreeConfig,
    edges: &mut Vec<BoundEdge>,
) -> Option<(f32, f32)> {
    let axis_idx = axis.index();
    edges.clear();
    for &pn in prim_nums {
        let b = &prim_bounds[pn as usize];
        edges.push(BoundEdge::start(b.min[axis_idx], pn));
        edges.push(BoundEdge::end(b.max[axis_idx], pn));
    }
    edges.sort_by(cmp_edges);

    let region_min = bounds.min[axis_idx];
    let region_max = bounds.max[axis_idx];
    let inv_total_sa = 1.0 / total_sa;

    let mut n_below = 0u32;
    let mut n_above = prim_nums.len() as u32;
    let mut best_cost = f32::INFINITY;
    let mut best_pos = 0.0f32;

    for edge in edges.iter() {
        if edge.kind == EdgeKind::End {
            n_above -= 1;
        }
        if edge.t > region_min && edge.t < region_max {
            let mut below = *bounds;
            below.max[axis_idx] = edge.t;
            let mut above = *bounds;
            above.min[axis_idx] = edge.t;

            let p_below = below.surface_area() * inv_total_sa;
            let p_above = above.surface_area() * inv_total_sa;
            let empty_bonus = if n_below == 0 || n_above == 0 {
                cfg.empty_bonus
            } else {
                0.0
            };
            let cost = cfg.traversal_cost as f32
                + cfg.intersect_cost as f32
                    * (1.0 - empty_bonus)
                    * (p_below * n_below as f32 + p_above * n_above as f32);
            if cost < best_cost {
                best_cost = cost;
                best_pos = edge.t;
            }
        }
        if edge.kind == EdgeKind::Start {
            n_below += 1;
        }
    }

    if best_cost.is_finite() {
        Some((best_pos, best_cost))
    } else {
        None
    }
}

/// Recursively builds the node array for the region `bounds`, which contains the
/// primitives named by `prim_nums`.
///
/// `nodes` and `pool` are the tree's output arrays, grown monotonically. `scratch`
/// holds the per-axis edge buffers reused across the whole build.
#[allow(clippy::too_many_arguments)]
pub(crate) fn build_node(
    nodes: &mut Vec<KdNode>,
    pool: &mut Vec<u32>,
    prim_bounds: &[Aabb],
    prim_nums: Vec<u32>,
    bounds: Aabb,
    depth: u32,
    bad_refines: u32,
    cfg: &KdTreeConfig,
    scratch: &mut BuildScratch,
) -> Result<(), KdTreeError> {
    let n_primitives = prim_nums.len();

    if n_primitives <= cfg.max_prims_per_leaf as usize || depth == 0 {
        emit_leaf(nodes, pool, &prim_nums)?;
        return Ok(());
    }

    let old_cost = cfg.intersect_cost as f32 * n_primitives as f32;
    let total_sa = bounds.surface_area();

    let mut axis = bounds.longest_axis();
    let mut found = None;
    for _ in 0..3 {
        if let Some((pos, cost)) = best_split_on_axis(
            axis,
            &bounds,
            total_sa,
            prim_bounds,
            &prim_nums,
            cfg,
            &mut scratch.edges[axis.index()],
        ) {
            found = Some((axis, pos, cost));
            break;
        }
        axis = next_axis(axis);
    }

    let (split_axis, split_pos, best_cost) = match found {
        Some(f) => f,
        None => {
            emit_leaf(nodes, pool, &prim_nums)?;
            return Ok(());
        }
    };

    let mut bad_refines = bad_refines;
    if best_cost > old_cost {
        bad_refines += 1;
    }
    if (best_cost > 4.0 * old_cost && n_primitives < 16) || bad_refines >= MAX_BAD_REFINES {
        emit_leaf(nodes, pool, &prim_nums)?;
        return Ok(());
    }

    let axis_idx = split_axis.index();
    let mut below = Vec::new();
    let mut above = Vec::new();
    for &pn in &prim_nums {
        let b = &prim_bounds[pn as usize];
        if b.min[axis_idx] <= split_pos {
            below.push(pn);
        }
        if b.max[axis_idx] >= split_pos {
            above.push(pn);
        }
    }

    let self_index = push_node(nodes, KdNode::leaf_empty())?;

    let mut bounds_below = bounds;
    bounds_below.max[axis_idx] = split_pos;
    build_node(
        nodes,
        pool,
        prim_bounds,
        below,
        bounds_below,
        depth - 1,
        bad_refines,
        cfg,
        scratch,
    )?;

    let right_child = nodes.len() as u32;
    if right_child > MAX_PAYLOAD {
        return Err(KdTreeError::TreeTooLarge {
            node_count: nodes.len(),
        });
    }

    let mut bounds_above = bounds;
    bounds_above.min[axis_idx] = split_pos;
    build_node(
        nodes,
        pool,
        prim_bounds,
        above,
        bounds_above,
        depth - 1,
        bad_refines,
        cfg,
        scratch,
    )?;

    nodes[self_index as usize] = KdNode::interior(split_axis, split_pos, right_child);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> KdTreeConfig {
        KdTreeConfig::default()
    }

    fn unit_box_at(c: f32) -> Aabb {
        Aabb::new(glm::vec3(c - 0.5, -0.5, -0.5), glm::vec3(c + 0.5, 0.5, 0.5))
    }

    #[test]
    fn small_primitive_count_is_a_single_leaf() {
        let bounds = vec![unit_box_at(0.0)];
        let world = bounds[0];
        let mut nodes = Vec::new();
        let mut pool = Vec::new();
        let mut scratch = BuildScratch::with_capacity(1);
        build_node(
            &mut nodes,
            &mut pool,
            &bounds,
            vec![0],
            world,
            8,
            0,
            &cfg(),
            &mut scratch,
        )
        .unwrap();
        assert_eq!(nodes.len(), 1);
        assert!(nodes[0].is_leaf());
        assert_eq!(nodes[0].leaf_count(), 1);
    }

    #[test]
    fn well_separated_primitives_get_split() {
        // Ten boxes spread far apart along x: SAH should find it profitable to split.
        let bounds: Vec<Aabb> = (0..10).map(|i| unit_box_at(i as f32 * 10.0)).collect();
        let world = bounds
            .iter()
            .fold(Aabb::default(), |acc, b| acc.union(b));
        let prim_nums: Vec<u32> = (0..bounds.len() as u32).collect();
        let mut nodes = Vec::new();
        let mut pool = Vec::new();
        let mut scratch = BuildScratch::with_capacity(bounds.len());
        build_node(
            &mut nodes,
            &mut pool,
            &bounds,
            prim_nums,
            world,
            16,
            0,
            &cfg(),
            &mut scratch,
        )
        .unwrap();
        assert!(nodes.len() > 1, "expected at least one split");
        assert!(!nodes[0].is_leaf());
    }

    #[test]
    fn node_count_respects_leaf_count_bound() {
        // Node count <= 2 * leaves - 1 for a binary tree of interior + leaf nodes.
        let bounds: Vec<Aabb> = (0..20).map(|i| unit_box_at(i as f32 * 3.0)).collect();
        let world = bounds
            .iter()
            .fold(Aabb::default(), |acc, b| acc.union(b));
        let prim_nums: Vec<u32> = (0..bounds.len() as u32).collect();
        let mut nodes = Vec::new();
        let mut pool = Vec::new();
        let mut scratch = BuildScratch::with_capacity(bounds.len());
        build_node(
            &mut nodes,
            &mut pool,
            &bounds,
            prim_nums,
            world,
            16,
            0,
            &cfg(),
            &mut scratch,
        )
        .unwrap();
        let leaves = nodes.iter().filter(|n| n.is_leaf()).count();
        assert!(nodes.len() <= 2 * leaves - 1);
    }
}
