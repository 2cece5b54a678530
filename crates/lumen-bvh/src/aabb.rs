//! Axis-aligned bounding boxes.

use lumen_math::{Axis, Point3, Vec3};

use crate::Ray;

/// Axis-aligned bounding box in 3D.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb3 {
    /// Minimum corner.
    pub min: Point3,
    /// Maximum corner.
    pub max: Point3,
}

impl Aabb3 {
    /// Create an AABB from min and max corners.
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// The inverted box with `min = +inf` and `max = -inf`; any union with
    /// it yields the other operand.
    pub fn empty() -> Self {
        Self {
            min: Point3::from(Vec3::repeat(f64::INFINITY)),
            max: Point3::from(Vec3::repeat(f64::NEG_INFINITY)),
        }
    }

    /// Smallest box enclosing every box in `boxes`.
    ///
    /// Returns an empty box when the iterator yields nothing.
    pub fn union_of<I>(boxes: I) -> Self
    where
        I: IntoIterator<Item = Aabb3>,
    {
        boxes.into_iter().fold(Self::empty(), |mut acc, b| {
            acc.extend(&b);
            acc
        })
    }

    /// True if `min > max` on some axis.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Grow to enclose `other`. An empty `other` leaves the box unchanged.
    pub fn extend(&mut self, other: &Aabb3) {
        if other.is_empty() {
            return;
        }
        self.min = self.min.inf(&other.min);
        self.max = self.max.sup(&other.max);
    }

    /// Push every face outwards by `pad`.
    pub fn expand(&mut self, pad: f64) {
        let pad = Vec3::repeat(pad);
        self.min -= pad;
        self.max += pad;
    }

    /// Size of the box along each axis.
    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    /// Center point of the box.
    pub fn center(&self) -> Point3 {
        Point3::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
            (self.min.z + self.max.z) / 2.0,
        )
    }

    /// Axis of largest extent.
    pub fn longest_axis(&self) -> Axis {
        Axis::longest(&self.extent())
    }

    /// Midpoint of the box along `axis`.
    pub fn mid(&self, axis: Axis) -> f64 {
        let i = axis.index();
        (self.min[i] + self.max[i]) * 0.5
    }

    /// True if `p` lies inside the box or on its boundary.
    pub fn contains_point(&self, p: &Point3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    /// True if `other` lies entirely within this box.
    ///
    /// An empty box is contained in everything.
    pub fn contains(&self, other: &Aabb3) -> bool {
        other.is_empty() || (self.contains_point(&other.min) && self.contains_point(&other.max))
    }

    /// Slab test against a ray, returning the near distance on a hit.
    ///
    /// The near distance is negative when the ray starts inside the box.
    #[inline]
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f64> {
        ray.intersect_aabb(self).map(|(t_near, _)| t_near)
    }
}

impl Default for Aabb3 {
    fn default() -> Self {
        Self::empty()
    }
}
