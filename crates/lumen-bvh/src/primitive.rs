//! The object contract the hierarchy is built over.

use std::rc::Rc;
use std::sync::Arc;

use lumen_math::Point3;

use crate::{Aabb3, Ray};

/// A renderable object the hierarchy can partition and query.
///
/// The hierarchy never looks inside an object; it only needs its bounds,
/// a representative point for sorting, and a ray test.
pub trait Primitive {
    /// Bounding box enclosing the whole object.
    fn bounding_box(&self) -> Aabb3;

    /// Point used to order objects along a split axis.
    fn centroid(&self) -> Point3 {
        self.bounding_box().center()
    }

    /// Distance along `ray` to the nearest intersection in front of its
    /// origin, if any.
    fn intersect(&self, ray: &Ray) -> Option<f64>;
}

impl<P: Primitive + ?Sized> Primitive for &P {
    fn bounding_box(&self) -> Aabb3 {
        (**self).bounding_box()
    }

    fn centroid(&self) -> Point3 {
        (**self).centroid()
    }

    fn intersect(&self, ray: &Ray) -> Option<f64> {
        (**self).intersect(ray)
    }
}

macro_rules! forward_primitive {
    ($($ptr:ident),*) => {
        $(
            impl<P: Primitive + ?Sized> Primitive for $ptr<P> {
                fn bounding_box(&self) -> Aabb3 {
                    (**self).bounding_box()
                }

                fn centroid(&self) -> Point3 {
                    (**self).centroid()
                }

                fn intersect(&self, ray: &Ray) -> Option<f64> {
                    (**self).intersect(ray)
                }
            }
        )*
    };
}

forward_primitive!(Box, Rc, Arc);
