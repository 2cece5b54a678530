#![warn(missing_docs)]

//! Math types for the lumen ray tracer.
//!
//! Thin wrappers around nalgebra providing the types shared by the
//! acceleration structure and its callers: points, vectors, directions,
//! coordinate axes, and tolerance constants.

use nalgebra::{Unit, Vector3};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// One of the three coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The X axis.
    X,
    /// The Y axis.
    Y,
    /// The Z axis.
    Z,
}

impl Axis {
    /// Component index of this axis (0, 1 or 2).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// The axis along which `extent` is largest.
    ///
    /// Ties go to the first axis, in X, Y, Z order, whose extent is at least
    /// as large as both others.
    pub fn longest(extent: &Vec3) -> Self {
        if extent.x >= extent.y && extent.x >= extent.z {
            Axis::X
        } else if extent.y >= extent.x && extent.y >= extent.z {
            Axis::Y
        } else {
            Axis::Z
        }
    }
}

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance in scene units.
    pub linear: f64,
}

impl Tolerance {
    /// Default rendering tolerance (1e-4 scene units).
    ///
    /// Also used to pad the world box and to reject self-intersections
    /// at a ray's origin.
    pub const DEFAULT: Self = Self { linear: 1e-4 };
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}
