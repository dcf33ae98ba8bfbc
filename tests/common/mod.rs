use kdaccel::{Aabb, Hit, Primitive, Ray};

/// Wraps a primitive and rigidly translates it by `offset`, for tests that need
/// several copies of a primitive (like [`kdaccel::Sphere`]) placed around a scene.
pub struct Translated<P> {
    pub inner: P,
    pub offset: glm::Vec3,
}

impl<P> Translated<P> {
    pub fn new(inner: P, offset: glm::Vec3) -> Self {
        Translated { inner, offset }
    }
}

impl<P: Primitive> Primitive for Translated<P> {
    fn world_bound(&self) -> Aabb {
        let b = self.inner.world_bound();
        Aabb::new(b.min + self.offset, b.max + self.offset)
    }

    fn intersect(&self, ray: &Ray, hit: &mut Hit) -> bool {
        let local = Ray {
            origin: ray.origin - self.offset,
            ..*ray
        };
        self.inner.intersect(&local, hit)
    }

    fn intersect_p(&self, ray: &Ray) -> bool {
        let local = Ray {
            origin: ray.origin - self.offset,
            ..*ray
        };
        self.inner.intersect_p(&local)
    }
}
