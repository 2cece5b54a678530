//! Reference primitives: spheres and axis-aligned boxes.
//!
//! These are the shapes used by the CLI, the benches and the tests. Real
//! renderers bring their own types and implement [`Primitive`] for them.

use lumen_math::{Point3, Tolerance, Vec3};

use crate::{Aabb3, Primitive, Ray};

/// A sphere given by center and radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    /// Center point.
    pub center: Point3,
    /// Radius.
    pub radius: f64,
}

impl Sphere {
    /// Create a sphere.
    pub fn new(center: Point3, radius: f64) -> Self {
        Self { center, radius }
    }
}

impl Primitive for Sphere {
    fn bounding_box(&self) -> Aabb3 {
        let r = Vec3::repeat(self.radius);
        Aabb3::new(self.center - r, self.center + r)
    }

    fn centroid(&self) -> Point3 {
        self.center
    }

    /// Quadratic `|oc + t*d|^2 = r^2` with a unit direction, so `a = 1`.
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        let oc = ray.origin - self.center;
        let d = ray.direction.as_ref();

        let half_b = oc.dot(d);
        let c = oc.dot(&oc) - self.radius * self.radius;

        let discriminant = half_b * half_b - c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_disc = discriminant.sqrt();
        let eps = Tolerance::DEFAULT.linear;

        [-half_b - sqrt_disc, -half_b + sqrt_disc]
            .into_iter()
            .find(|&t| t > eps)
    }
}

/// A solid axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBox {
    /// Minimum corner.
    pub min: Point3,
    /// Maximum corner.
    pub max: Point3,
}

impl AxisBox {
    /// Create a box from its corners.
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// Cube of edge length `size` centered at `center`.
    pub fn cube(center: Point3, size: f64) -> Self {
        let h = Vec3::repeat(size / 2.0);
        Self::new(center - h, center + h)
    }
}

impl Primitive for AxisBox {
    fn bounding_box(&self) -> Aabb3 {
        Aabb3::new(self.min, self.max)
    }

    /// Entry distance, or the exit distance when the ray starts inside.
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        let (t_near, t_far) = ray.intersect_aabb(&self.bounding_box())?;
        let eps = Tolerance::DEFAULT.linear;
        if t_near > eps {
            Some(t_near)
        } else if t_far > eps {
            Some(t_far)
        } else {
            None
        }
    }
}

/// Any of the reference shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// A sphere.
    Sphere(Sphere),
    /// An axis-aligned box.
    Box(AxisBox),
}

impl Primitive for Shape {
    fn bounding_box(&self) -> Aabb3 {
        match self {
            Shape::Sphere(s) => s.bounding_box(),
            Shape::Box(b) => b.bounding_box(),
        }
    }

    fn centroid(&self) -> Point3 {
        match self {
            Shape::Sphere(s) => s.centroid(),
            Shape::Box(b) => b.centroid(),
        }
    }

    fn intersect(&self, ray: &Ray) -> Option<f64> {
        match self {
            Shape::Sphere(s) => s.intersect(ray),
            Shape::Box(b) => b.intersect(ray),
        }
    }
}

impl From<Sphere> for Shape {
    fn from(s: Sphere) -> Self {
        Shape::Sphere(s)
    }
}

impl From<AxisBox> for Shape {
    fn from(b: AxisBox) -> Self {
        Shape::Box(b)
    }
}
