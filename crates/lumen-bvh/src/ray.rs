//! Ray representation and the ray-box slab test.

use lumen_math::{Dir3, Point3, Vec3};

use crate::Aabb3;

/// Half-line `origin + t * direction`, `t >= 0`.
///
/// Carries the per-axis reciprocal of the direction and which axes run
/// negative, so box tests need no division.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Where the ray starts.
    pub origin: Point3,
    /// Unit direction.
    pub direction: Dir3,
    inv_dir: Vec3,
    negative: [bool; 3],
}

impl Ray {
    /// Ray from `origin` along `direction`, normalized here.
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        let direction = Dir3::new_normalize(direction);
        let inv_dir = direction.map(|c| 1.0 / c);
        Self {
            origin,
            direction,
            inv_dir,
            negative: [inv_dir.x < 0.0, inv_dir.y < 0.0, inv_dir.z < 0.0],
        }
    }

    /// Split a finite span into a unit ray and its length.
    ///
    /// The magnitude of `span` is the length; the ray points along it.
    /// Returns `None` for a zero-length or non-finite span.
    pub fn segment(origin: Point3, span: Vec3) -> Option<(Self, f64)> {
        let length = span.norm();
        if length > 0.0 && length.is_finite() {
            Some((Self::new(origin, span), length))
        } else {
            None
        }
    }

    /// Point at distance `t` along the ray.
    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + self.direction.into_inner() * t
    }

    /// Entry and exit distances through `aabb`, or `None` on a miss.
    ///
    /// Per axis, the slab the ray meets first is picked from the direction's
    /// sign. The entry distance is left unclamped: it is negative when the
    /// origin is inside. A box wholly behind the origin is a miss.
    #[inline]
    pub fn intersect_aabb(&self, aabb: &Aabb3) -> Option<(f64, f64)> {
        let mut t_near = f64::NEG_INFINITY;
        let mut t_far = f64::INFINITY;

        for i in 0..3 {
            let (enter, exit) = if self.negative[i] {
                (aabb.max[i], aabb.min[i])
            } else {
                (aabb.min[i], aabb.max[i])
            };
            t_near = t_near.max((enter - self.origin[i]) * self.inv_dir[i]);
            t_far = t_far.min((exit - self.origin[i]) * self.inv_dir[i]);
        }

        (t_far >= t_near && t_far >= 0.0).then_some((t_near, t_far))
    }
}

/// Result of a nearest-hit query.
#[derive(Debug)]
pub struct Hit<'a, P: ?Sized> {
    /// The closest object along the ray.
    pub object: &'a P,
    /// Distance along the ray to the hit.
    pub t: f64,
    /// World-space hit point.
    pub point: Point3,
}

impl<P: ?Sized> Clone for Hit<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: ?Sized> Copy for Hit<'_, P> {}
