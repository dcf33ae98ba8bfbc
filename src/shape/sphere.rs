use crate::aabb::Aabb;
use crate::primitive::Primitive;
use crate::ray::{Hit, Ray};

/// A unit sphere centered at the origin.
pub struct Sphere;

impl Sphere {
    fn roots(&self, ray: &Ray) -> Option<(f32, f32)> {
        // Translated directly from the GLOO source code, assuming radius = 1.
        let a = glm::length2(&ray.dir);
        let b = 2.0 * glm::dot(&ray.dir, &ray.origin);
        let c = glm::length2(&ray.origin) - 1.0;
        let d = b * b - 4.0 * a * c;
        if d.is_sign_negative() {
            return None;
        }
        let d = d.sqrt();
        let t_minus = (-b - d) / (2.0 * a);
        let t_plus = (-b + d) / (2.0 * a);
        Some((t_minus, t_plus))
    }
}

impl Primitive for Sphere {
    fn world_bound(&self) -> Aabb {
        Aabb::new(glm::vec3(-1.0, -1.0, -1.0), glm::vec3(1.0, 1.0, 1.0))
    }

    fn intersect(&self, ray: &Ray, hit: &mut Hit) -> bool {
        let (t_minus, t_plus) = match self.roots(ray) {
            Some(roots) => roots,
            None => return false,
        };
        let t = if t_minus >= ray.t_min {
            t_minus
        } else if t_plus >= ray.t_min {
            t_plus
        } else {
            return false;
        };
        if t <= ray.t_max && t < hit.t {
            hit.t = t;
            hit.normal = ray.at(t).normalize();
            true
        } else {
            false
        }
    }

    fn intersect_p(&self, ray: &Ray) -> bool {
        let (t_minus, t_plus) = match self.roots(ray) {
            Some(roots) => roots,
            None => return false,
        };
        let t = if t_minus >= ray.t_min { t_minus } else { t_plus };
        t >= ray.t_min && t <= ray.t_max
    }
}
