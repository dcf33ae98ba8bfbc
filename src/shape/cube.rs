use crate::aabb::Aabb;
use crate::primitive::Primitive;
use crate::ray::{Hit, Ray};

/// A box primitive, given by its minimum and maximum corners.
pub struct AxisAlignedBox {
    bounds: Aabb,
}

impl AxisAlignedBox {
    /// Constructs a box from two corners, without assuming they're already ordered.
    pub fn new(min: glm::Vec3, max: glm::Vec3) -> Self {
        AxisAlignedBox {
            bounds: Aabb::new(min, max),
        }
    }

    /// A unit box centered at the origin.
    pub fn unit() -> Self {
        Self::new(glm::vec3(-0.5, -0.5, -0.5), glm::vec3(0.5, 0.5, 0.5))
    }
}

impl Primitive for AxisAlignedBox {
    fn world_bound(&self) -> Aabb {
        self.bounds
    }

    fn intersect(&self, ray: &Ray, hit: &mut Hit) -> bool {
        let (t0, t1) = match self.bounds.intersect(ray) {
            Some(interval) => interval,
            None => return false,
        };
        let t = if t0 >= ray.t_min { t0 } else { t1 };
        if t < ray.t_min || t > ray.t_max || t >= hit.t {
            return false;
        }
        let p = ray.at(t);
        let mut normal = glm::vec3(0.0, 0.0, 0.0);
        let mut best = f32::INFINITY;
        for axis in 0..3 {
            let d_min = (p[axis] - self.bounds.min[axis]).abs();
            let d_max = (p[axis] - self.bounds.max[axis]).abs();
            if d_min < best {
                best = d_min;
                normal = glm::vec3(0.0, 0.0, 0.0);
                normal[axis] = -1.0;
            }
            if d_max < best {
                best = d_max;
                normal = glm::vec3(0.0, 0.0, 0.0);
                normal[axis] = 1.0;
            }
        }
        hit.t = t;
        hit.normal = normal;
        true
    }

    fn intersect_p(&self, ray: &Ray) -> bool {
        match self.bounds.intersect(ray) {
            Some((t0, t1)) => {
                let t = if t0 >= ray.t_min { t0 } else { t1 };
                t >= ray.t_min && t <= ray.t_max
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_through_center_hits_near_face() {
        let cube = AxisAlignedBox::unit();
        let ray = Ray::new(glm::vec3(-5.0, 0.0, 0.0), glm::vec3(1.0, 0.0, 0.0));
        let mut hit = Hit::new();
        assert!(cube.intersect(&ray, &mut hit));
        assert!((hit.t - 4.5).abs() < 1e-5);
        assert_eq!(hit.normal, glm::vec3(-1.0, 0.0, 0.0));
    }

    #[test]
    fn ray_missing_box_reports_no_hit() {
        let cube = AxisAlignedBox::unit();
        let ray = Ray::new(glm::vec3(-5.0, 5.0, 0.0), glm::vec3(1.0, 0.0, 0.0));
        let mut hit = Hit::new();
        assert!(!cube.intersect(&ray, &mut hit));
    }
}
