use crate::ray::Ray;

/// One of the three coordinate axes, used to tag split planes and bound edges.
///
/// The discriminants match the 2-bit tag the kd-tree node encoding stores
/// (`X_AXIS = 0, Y_AXIS = 1, Z_AXIS = 2`; the fourth value, `3`, is reserved by
/// [`crate::kdtree::node::KdNode`] to mean "leaf").
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Axis {
    /// The x axis.
    X = 0,
    /// The y axis.
    Y = 1,
    /// The z axis.
    Z = 2,
}

impl Axis {
    /// Recovers an axis from its 2-bit tag. Panics if `tag` is 3 (the leaf tag).
    pub(crate) fn from_tag(tag: u32) -> Self {
        match tag {
            0 => Axis::X,
            1 => Axis::Y,
            2 => Axis::Z,
            _ => unreachable!("tag 3 is reserved for leaves"),
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// An axis-aligned bounding box, given by its minimum and maximum corners.
///
/// A box is empty iff `min[i] > max[i]` for any axis `i`; [`Aabb::default`] produces
/// such an empty box, so folding [`Aabb::union`] over a sequence starting from the
/// default always produces the correct bound.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    /// The corner with the smallest coordinate on every axis.
    pub min: glm::Vec3,
    /// The corner with the largest coordinate on every axis.
    pub max: glm::Vec3,
}

impl Default for Aabb {
    fn default() -> Self {
        Aabb {
            min: glm::vec3(f32::INFINITY, f32::INFINITY, f32::INFINITY),
            max: glm::vec3(-f32::INFINITY, -f32::INFINITY, -f32::INFINITY),
        }
    }
}

impl Aabb {
    /// Constructs a box from two corners, without assuming they're already ordered.
    pub fn new(a: glm::Vec3, b: glm::Vec3) -> Self {
        Aabb {
            min: glm::min2(&a, &b),
            max: glm::max2(&a, &b),
        }
    }

    /// The union of two bounding boxes: the smallest box containing both.
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: glm::min2(&self.min, &other.min),
            max: glm::max2(&self.max, &other.max),
        }
    }

    /// The union of a bounding box with a point.
    pub fn union_point(&self, p: &glm::Vec3) -> Aabb {
        Aabb {
            min: glm::min2(&self.min, p),
            max: glm::max2(&self.max, p),
        }
    }

    /// The diagonal vector from `min` to `max`. Negative components indicate an empty box.
    pub fn diagonal(&self) -> glm::Vec3 {
        self.max - self.min
    }

    /// The surface area of the box, used directly by the SAH cost model.
    pub fn surface_area(&self) -> f32 {
        let d = self.diagonal();
        2.0 * (d.x * d.y + d.y * d.z + d.z * d.x)
    }

    /// The axis along which the box has the greatest extent.
    pub fn longest_axis(&self) -> Axis {
        let d = self.diagonal();
        if d.x > d.y && d.x > d.z {
            Axis::X
        } else if d.y > d.z {
            Axis::Y
        } else {
            Axis::Z
        }
    }

    /// Intersects the box with a ray's slab, clipped to the ray's `[t_min, t_max]`.
    ///
    /// Returns the clipped `[t0, t1]` entry/exit interval, or `None` on a miss. Uses
    /// the ray's precomputed inverse direction so that axis-aligned rays (where a
    /// component of `inv_dir` is `±infinity`) degenerate correctly as long as the
    /// ray's origin lies within that axis's slab.
    pub fn intersect(&self, ray: &Ray) -> Option<(f32, f32)> {
        let mut t0 = ray.t_min;
        let mut t1 = ray.t_max;
        for axis in 0..3 {
            let inv_dir = ray.inv_dir[axis];
            let mut t_near = (self.min[axis] - ray.origin[axis]) * inv_dir;
            let mut t_far = (self.max[axis] - ray.origin[axis]) * inv_dir;
            if inv_dir < 0.0 {
                std::mem::swap(&mut t_near, &mut t_far);
            }
            t0 = t0.max(t_near);
            t1 = t1.min(t_far);
            if t0 > t1 {
                return None;
            }
        }
        Some((t0, t1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ray::Ray;

    #[test]
    fn union_grows_to_contain_both_boxes() {
        let a = Aabb::new(glm::vec3(-1.0, 0.0, 0.0), glm::vec3(1.0, 1.0, 1.0));
        let b = Aabb::new(glm::vec3(0.0, -2.0, 0.0), glm::vec3(0.5, 0.5, 3.0));
        let u = a.union(&b);
        assert_eq!(u.min, glm::vec3(-1.0, -2.0, 0.0));
        assert_eq!(u.max, glm::vec3(1.0, 1.0, 3.0));
    }

    #[test]
    fn default_is_empty_and_absorbed_by_union() {
        let empty = Aabb::default();
        let b = Aabb::new(glm::vec3(0.0, 0.0, 0.0), glm::vec3(1.0, 1.0, 1.0));
        assert_eq!(empty.union(&b), b);
    }

    #[test]
    fn surface_area_of_unit_cube_is_six() {
        let b = Aabb::new(glm::vec3(0.0, 0.0, 0.0), glm::vec3(1.0, 1.0, 1.0));
        assert!((b.surface_area() - 6.0).abs() < 1e-6);
    }

    #[test]
    fn longest_axis_picks_biggest_extent() {
        let b = Aabb::new(glm::vec3(0.0, 0.0, 0.0), glm::vec3(1.0, 5.0, 2.0));
        assert_eq!(b.longest_axis(), Axis::Y);
    }

    #[test]
    fn ray_box_hit_and_miss() {
        let b = Aabb::new(glm::vec3(-1.0, -1.0, -1.0), glm::vec3(1.0, 1.0, 1.0));
        let hit_ray = Ray::new(glm::vec3(-5.0, 0.0, 0.0), glm::vec3(1.0, 0.0, 0.0));
        let (t0, t1) = b.intersect(&hit_ray).expect("should hit the box");
        assert!((t0 - 4.0).abs() < 1e-5);
        assert!((t1 - 6.0).abs() < 1e-5);

        let miss_ray = Ray::new(glm::vec3(-5.0, 10.0, 0.0), glm::vec3(1.0, 0.0, 0.0));
        assert!(b.intersect(&miss_ray).is_none());
    }

    #[test]
    fn axis_aligned_ray_degenerates_correctly() {
        // Direction has a zero component, so inv_dir is +/- infinity on that axis.
        let b = Aabb::new(glm::vec3(-1.0, -1.0, -1.0), glm::vec3(1.0, 1.0, 1.0));
        let ray = Ray::new(glm::vec3(0.0, 0.0, -5.0), glm::vec3(0.0, 0.0, 1.0));
        let (t0, _t1) = b.intersect(&ray).expect("axis-aligned ray should still hit");
        assert!((t0 - 4.0).abs() < 1e-5);
    }
}
