#![warn(missing_docs)]

//! Bounding volume hierarchy for the lumen ray tracer.
//!
//! The hierarchy is built once from a static set of scene objects and then
//! answers two kinds of ray queries: the nearest intersected object, and
//! whether anything blocks a segment of finite length (shadow rays).
//!
//! # Architecture
//!
//! - [`Primitive`] - What an object must provide: bounds, centroid, ray test
//! - [`Aabb3`] - Axis-aligned bounding box
//! - [`Ray`] - Ray with precomputed slab-test data
//! - [`BvhNode`] - Flat node; children of an internal node are adjacent
//! - [`Bvh`] - Builder output plus nearest-hit and occlusion traversal
//! - [`shapes`] - Reference spheres and boxes
//!
//! # Example
//!
//! ```
//! use lumen_bvh::shapes::AxisBox;
//! use lumen_bvh::{Bvh, Ray};
//! use lumen_math::{Point3, Vec3};
//!
//! let cubes: Vec<AxisBox> = [0.0, 5.0, 10.0]
//!     .iter()
//!     .map(|&x| AxisBox::cube(Point3::new(x, 0.0, 0.0), 1.0))
//!     .collect();
//! let bvh = Bvh::build(&cubes);
//!
//! let ray = Ray::new(Point3::new(-1.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
//! let hit = bvh.closest_hit(&ray).unwrap();
//! assert!((hit.point.x + 0.5).abs() < 1e-9);
//!
//! // Shadow test towards a point 0.25 units ahead: nothing in the way.
//! assert!(!bvh.is_occluded(&ray.origin, &Vec3::new(0.25, 0.0, 0.0)));
//! ```

mod aabb;
mod builder;
mod bvh;
mod config;
mod error;
mod node;
mod primitive;
mod ray;
mod stats;
mod traverse;

pub mod shapes;

pub use aabb::Aabb3;
pub use bvh::Bvh;
pub use config::BvhConfig;
pub use error::{BvhError, Result};
pub use node::BvhNode;
pub use primitive::Primitive;
pub use ray::{Hit, Ray};
pub use stats::{BvhStats, TraversalStats};
