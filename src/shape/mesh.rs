use crate::aabb::Aabb;
use crate::primitive::Primitive;
use crate::ray::{Hit, Ray};

/// A triangle with three vertices and three normals, interpolated across the face.
pub struct Triangle {
    /// The first vertex.
    pub v1: glm::Vec3,
    /// The second vertex.
    pub v2: glm::Vec3,
    /// The third vertex.
    pub v3: glm::Vec3,

    /// The normal at the first vertex.
    pub n1: glm::Vec3,
    /// The normal at the second vertex.
    pub n2: glm::Vec3,
    /// The normal at the third vertex.
    pub n3: glm::Vec3,
}

impl Triangle {
    /// Constructs a triangle from three vertices, using the face normal at all three.
    pub fn from_vertices(v1: glm::Vec3, v2: glm::Vec3, v3: glm::Vec3) -> Self {
        let n = (v2 - v1).cross(&(v3 - v1)).normalize();
        Triangle {
            v1,
            v2,
            v3,
            n1: n,
            n2: n,
            n3: n,
        }
    }
}

impl Primitive for Triangle {
    fn world_bound(&self) -> Aabb {
        Aabb::new(self.v1, self.v1)
            .union_point(&self.v2)
            .union_point(&self.v3)
    }

    fn intersect(&self, ray: &Ray, hit: &mut Hit) -> bool {
        let (d0, d1) = (self.v2 - self.v1, self.v3 - self.v1);
        let plane_normal = d0.cross(&d1).normalize();
        let cosine = plane_normal.dot(&ray.dir);
        if cosine.abs() < 1e-8 {
            return false;
        }
        let t = plane_normal.dot(&(self.v1 - ray.origin)) / cosine;
        if t < ray.t_min || t > ray.t_max || t >= hit.t {
            return false;
        }

        // Barycentric coordinates: https://gamedev.stackexchange.com/a/23745
        let d2 = ray.at(t) - self.v1;
        let d00 = d0.dot(&d0);
        let d01 = d0.dot(&d1);
        let d11 = d1.dot(&d1);
        let d20 = d2.dot(&d0);
        let d21 = d2.dot(&d1);
        let denom = d00 * d11 - d01 * d01;
        let v = (d11 * d20 - d01 * d21) / denom;
        let w = (d00 * d21 - d01 * d20) / denom;
        let u = 1.0 - v - w;

        if u >= 0.0 && v >= 0.0 && w >= 0.0 {
            hit.t = t;
            hit.normal = (u * self.n1 + v * self.n2 + w * self.n3).normalize();
            true
        } else {
            false
        }
    }

    fn intersect_p(&self, ray: &Ray) -> bool {
        let mut hit = Hit {
            t: ray.t_max,
            ..Hit::default()
        };
        self.intersect(ray, &mut hit)
    }
}
