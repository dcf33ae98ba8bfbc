/// A ray, with a parametric range `[t_min, t_max]` and a time used for motion blur.
///
/// The direction need not be unit length. Traversal and box tests only rely on its
/// sign per axis and on the precomputed reciprocal `inv_dir`; a primitive's own
/// intersection routine is free to use the direction's magnitude (e.g. to recover a
/// world-space distance).
#[derive(Copy, Clone, Debug)]
pub struct Ray {
    /// Where the ray starts.
    pub origin: glm::Vec3,
    /// The direction the ray travels in.
    pub dir: glm::Vec3,
    /// Component-wise reciprocal of `dir`, precomputed once so that repeated
    /// slab tests (one per node walked) don't each redo the division.
    pub inv_dir: glm::Vec3,
    /// Inclusive lower bound of the ray's parametric range.
    pub t_min: f32,
    /// Exclusive upper bound of the ray's parametric range. Shrinks as [`Hit::t`]
    /// improves during a closest-hit traversal, since a farther intersection can
    /// no longer be the answer.
    pub t_max: f32,
    /// The instant this ray samples the scene at, used by primitives that move.
    pub time: f32,
}

impl Ray {
    /// Constructs a ray with the default range `[0, infinity)` and `time = 0`.
    pub fn new(origin: glm::Vec3, dir: glm::Vec3) -> Self {
        Ray {
            origin,
            dir,
            inv_dir: glm::vec3(1.0 / dir.x, 1.0 / dir.y, 1.0 / dir.z),
            t_min: 0.0,
            t_max: f32::INFINITY,
            time: 0.0,
        }
    }

    /// Builder method to set the ray's time value (for motion blur).
    pub fn with_time(mut self, time: f32) -> Self {
        self.time = time;
        self
    }

    /// Builder method to set the ray's parametric range.
    pub fn with_range(mut self, t_min: f32, t_max: f32) -> Self {
        self.t_min = t_min;
        self.t_max = t_max;
        self
    }

    /// Evaluates the ray's position at parameter `t`.
    pub fn at(&self, t: f32) -> glm::Vec3 {
        self.origin + t * self.dir
    }
}

/// The result of a closest-hit query: the nearest intersection found so far.
///
/// `Hit::default()` represents "no hit yet", with `t` at infinity so that any real
/// intersection improves on it; traversal and primitives alike use `hit.t` as the
/// current effective upper bound of the ray's range.
#[derive(Copy, Clone, Debug)]
pub struct Hit {
    /// The ray parameter at which the hit occurs.
    pub t: f32,
    /// The surface normal at the hit point.
    pub normal: glm::Vec3,
    /// Index, into the primitive sequence passed to [`crate::build_tree`], of
    /// the primitive that was hit.
    pub prim_index: usize,
}

impl Default for Hit {
    fn default() -> Self {
        Hit {
            t: f32::INFINITY,
            normal: glm::vec3(0.0, 0.0, 0.0),
            prim_index: usize::MAX,
        }
    }
}

impl Hit {
    /// Constructs a fresh "no hit yet" record.
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_follows_the_parametric_line() {
        let r = Ray::new(glm::vec3(1.0, 2.0, 3.0), glm::vec3(0.0, 0.0, 1.0));
        assert_eq!(r.at(5.0), glm::vec3(1.0, 2.0, 8.0));
    }

    #[test]
    fn default_hit_is_at_infinity() {
        let h = Hit::default();
        assert_eq!(h.t, f32::INFINITY);
        assert_eq!(h.prim_index, usize::MAX);
    }
}
