//! Bounding Volume Hierarchy over borrowed scene objects.
//!
//! The tree is stored flat: `nodes[0]` is the root and the children of an
//! internal node sit at `left` and `left + 1`. The hierarchy borrows the
//! objects and owns only their order; each leaf covers a contiguous run of
//! [`Bvh::objects`].

use lumen_math::{Point3, Vec3};
use rayon::prelude::*;

use crate::builder;
use crate::error::Result;
use crate::{Aabb3, BvhConfig, BvhNode, BvhStats, Hit, Primitive, Ray};

/// Bounding Volume Hierarchy for accelerated ray-object queries.
///
/// Built once, then read-only. Queries take `&self` and keep their pending
/// work on a stack private to the call, so one hierarchy can serve many
/// threads at once.
#[derive(Debug)]
pub struct Bvh<'a, P: ?Sized> {
    pub(crate) nodes: Vec<BvhNode>,
    pub(crate) objects: Vec<&'a P>,
}

impl<'a, P: Primitive + ?Sized> Bvh<'a, P> {
    /// Build a BVH with the default [`BvhConfig`].
    pub fn build<I>(objects: I) -> Self
    where
        I: IntoIterator<Item = &'a P>,
    {
        Self::build_unchecked(objects, &BvhConfig::default())
    }

    /// Build a BVH with explicit parameters.
    ///
    /// Fails only if `config` does not validate.
    pub fn build_with<I>(objects: I, config: &BvhConfig) -> Result<Self>
    where
        I: IntoIterator<Item = &'a P>,
    {
        config.validate()?;
        Ok(Self::build_unchecked(objects, config))
    }

    fn build_unchecked<I>(objects: I, config: &BvhConfig) -> Self
    where
        I: IntoIterator<Item = &'a P>,
    {
        let (nodes, objects) = builder::build(objects.into_iter().collect(), config);
        let bvh = Self { nodes, objects };

        if log::log_enabled!(log::Level::Debug) {
            log::debug!("built BVH: {}", bvh.stats());
        }

        bvh
    }
}

impl<'a, P: ?Sized> Bvh<'a, P> {
    /// The flat node sequence; index 0 is the root.
    pub fn nodes(&self) -> &[BvhNode] {
        &self.nodes
    }

    /// Objects in leaf order.
    pub fn objects(&self) -> &[&'a P] {
        &self.objects
    }

    /// Bounding box of the whole scene, padded.
    pub fn root_aabb(&self) -> &Aabb3 {
        self.nodes[0].aabb()
    }

    /// Number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True if the hierarchy holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Node, leaf and depth counts.
    pub fn stats(&self) -> BvhStats {
        let mut stats = BvhStats {
            objects: self.objects.len(),
            nodes: self.nodes.len(),
            ..Default::default()
        };

        let mut stack = vec![(0usize, 0usize)];
        while let Some((index, depth)) = stack.pop() {
            match self.nodes[index] {
                BvhNode::Leaf { count, .. } => {
                    stats.leaves += 1;
                    stats.max_depth = stats.max_depth.max(depth);
                    stats.max_leaf_size = stats.max_leaf_size.max(count);
                }
                BvhNode::Internal { left, .. } => {
                    stack.push((left + 1, depth + 1));
                    stack.push((left, depth + 1));
                }
            }
        }

        stats
    }
}

impl<P: ?Sized> Clone for Bvh<'_, P> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            objects: self.objects.clone(),
        }
    }
}

impl<'a, P: Primitive + Sync + ?Sized> Bvh<'a, P> {
    /// Nearest hit for every ray, traced in parallel.
    pub fn closest_hits(&self, rays: &[Ray]) -> Vec<Option<Hit<'a, P>>> {
        rays.par_iter().map(|ray| self.closest_hit(ray)).collect()
    }

    /// Occlusion for every `(origin, span)` segment, tested in parallel.
    pub fn occlusions(&self, segments: &[(Point3, Vec3)]) -> Vec<bool> {
        segments
            .par_iter()
            .map(|(origin, span)| self.is_occluded(origin, span))
            .collect()
    }
}
