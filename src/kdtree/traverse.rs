use crate::kdtree::node::KdNode;
use crate::primitive::Primitive;
use crate::ray::{Hit, Ray};

/// Capacity of the stackless traversal's explicit to-do buffer. Bounds the tree
/// depth traversal can handle; the builder caps `max_depth` below this so a
/// well-formed tree can never overflow it (see [`crate::kdtree::tree::build`]).
pub(crate) const TODO_BUFFER_CAPACITY: usize = 64;

#[derive(Copy, Clone)]
struct ToDo {
    node: u32,
    t_min: f32,
    t_max: f32,
}

const EMPTY_TODO: ToDo = ToDo {
    node: 0,
    t_min: 0.0,
    t_max: 0.0,
};

/// For an interior node, computes the ray/plane parameter and which child is
/// nearer to the ray's origin.
///
/// Ties are broken deterministically: a ray exactly on the split plane descends
/// toward the side its direction points to, or toward the near (lower-index)
/// child if the direction is exactly zero on this axis too.
fn classify(node: &KdNode, node_index: u32, ray: &Ray) -> (f32, u32, u32) {
    let axis_idx = node.split_axis().index();
    let split = node.split_pos();
    let t_plane = (split - ray.origin[axis_idx]) * ray.inv_dir[axis_idx];
    let below_is_near =
        ray.origin[axis_idx] < split || (ray.origin[axis_idx] == split && ray.dir[axis_idx] <= 0.0);
    if below_is_near {
        (t_plane, node_index + 1, node.right_child())
    } else {
        (t_plane, node.right_child(), node_index + 1)
    }
}

/// Closest-hit traversal: finds the nearest primitive the ray intersects, if any.
///
/// `seg_min`/`seg_max` is the ray's parametric range already clipped to the tree's
/// world bounding box by the caller.
pub(crate) fn intersect<P: Primitive>(
    nodes: &[KdNode],
    pool: &[u32],
    primitives: &[P],
    ray: &Ray,
    mut seg_min: f32,
    mut seg_max: f32,
    hit: &mut Hit,
) -> bool {
    let mut todo = [EMPTY_TODO; TODO_BUFFER_CAPACITY];
    let mut todo_len = 0usize;
    let mut node_index = 0u32;
    let mut found_hit = false;

    loop {
        if hit.t < seg_min {
            if todo_len == 0 {
                break;
            }
            todo_len -= 1;
            let frame = todo[todo_len];
            node_index = frame.node;
            seg_min = frame.t_min;
            seg_max = frame.t_max;
            continue;
        }

        let node = &nodes[node_index as usize];
        if !node.is_leaf() {
            let (t_plane, first, second) = classify(node, node_index, ray);
            if t_plane > seg_max || t_plane <= 0.0 {
                node_index = first;
            } else if t_plane < seg_min {
                node_index = second;
            } else {
                assert!(
                    todo_len < TODO_BUFFER_CAPACITY,
                    "kd-tree traversal exceeded the stackless to-do buffer; \
                     the builder's max_depth did not respect the buffer capacity"
                );
                todo[todo_len] = ToDo {
                    node: second,
                    t_min: t_plane,
                    t_max: seg_max,
                };
                todo_len += 1;
                node_index = first;
                seg_max = t_plane;
            }
            continue;
        }

        match node.leaf_count() {
            0 => {}
            1 => {
                if primitives[node.leaf_payload() as usize].intersect(ray, hit) {
                    found_hit = true;
                }
            }
            count => {
                let offset = node.leaf_payload() as usize;
                for &prim_index in &pool[offset..offset + count as usize] {
                    if primitives[prim_index as usize].intersect(ray, hit) {
                        found_hit = true;
                    }
                }
            }
        }

        if todo_len == 0 {
            break;
        }
        todo_len -= 1;
        let frame = todo[todo_len];
        node_index = frame.node;
        seg_min = frame.t_min;
        seg_max = frame.t_max;
    }

    found_hit
}

/// Any-hit traversal: returns as soon as any primitive reports an intersection,
/// without tracking which one or shrinking the ray's range.
pub(crate) fn intersect_p<P: Primitive>(
    nodes: &[KdNode],
    pool: &[u32],
    primitives: &[P],
    ray: &Ray,
    mut seg_min: f32,
    mut seg_max: f32,
) -> bool {
    let mut todo = [EMPTY_TODO; TODO_BUFFER_CAPACITY];
    let mut todo_len = 0usize;
    let mut node_index = 0u32;

    loop {
        if ray.t_max < seg_min {
            if todo_len == 0 {
                return false;
            }
            todo_len -= 1;
            let frame = todo[todo_len];
            node_index = frame.node;
            seg_min = frame.t_min;
            seg_max = frame.t_max;
            continue;
        }

        let node = &nodes[node_index as usize];
        if !node.is_leaf() {
            let (t_plane, first, second) = classify(node, node_index, ray);
            if t_plane > seg_max || t_plane <= 0.0 {
                node_index = first;
            } else if t_plane < seg_min {
                node_index = second;
            } else {
                assert!(
                    todo_len < TODO_BUFFER_CAPACITY,
                    "kd-tree traversal exceeded the stackless to-do buffer; \
                     the builder's max_depth did not respect the buffer capacity"
                );
                todo[todo_len] = ToDo {
                    node: second,
                    t_min: t_plane,
                    t_max: seg_max,
                };
                todo_len += 1;
                node_index = first;
                seg_max = t_plane;
            }
            continue;
        }

        match node.leaf_count() {
            0 => {}
            1 => {
                if primitives[node.leaf_payload() as usize].intersect_p(ray) {
                    return true;
                }
            }
            count => {
                let offset = node.leaf_payload() as usize;
                for &prim_index in &pool[offset..offset + count as usize] {
                    if primitives[prim_index as usize].intersect_p(ray) {
                        return true;
                    }
                }
            }
        }

        if todo_len == 0 {
            return false;
        }
        todo_len -= 1;
        let frame = todo[todo_len];
        node_index = frame.node;
        seg_min = frame.t_min;
        seg_max = frame.t_max;
    }
}
