//! Stack-based traversal: nearest hit and occlusion.
//!
//! Both queries walk the flat tree iteratively. Subtrees that still need a
//! visit are kept on a stack owned by the call, together with the ray's
//! entry distance into their box.

use lumen_math::{Point3, Vec3};

use crate::node::StackItem;
use crate::{Bvh, BvhNode, Hit, Primitive, Ray, TraversalStats};

impl<'a, P: Primitive + ?Sized> Bvh<'a, P> {
    /// Trace a ray and return the closest hit.
    pub fn closest_hit(&self, ray: &Ray) -> Option<Hit<'a, P>> {
        self.closest_hit_with_stats(ray, &mut TraversalStats::default())
    }

    /// [`closest_hit`](Self::closest_hit), counting the work done into `stats`.
    pub fn closest_hit_with_stats(
        &self,
        ray: &Ray,
        stats: &mut TraversalStats,
    ) -> Option<Hit<'a, P>> {
        if !self.enters_root(ray, stats) {
            return None;
        }

        let mut closest_t = f64::INFINITY;
        let mut closest: Option<&'a P> = None;
        let mut stack: Vec<StackItem> = Vec::new();
        let mut current = 0;

        loop {
            match self.nodes[current] {
                BvhNode::Internal { left, .. } => {
                    let right = left + 1;
                    let left_t = self.entry_distance(left, ray, stats);
                    let right_t = self.entry_distance(right, ray, stats);

                    match (left_t, right_t) {
                        (Some(lt), Some(rt)) => {
                            // Nearer child first; the other waits with its entry distance.
                            if lt < rt {
                                stack.push(StackItem { node: right, t: rt });
                                current = left;
                            } else {
                                stack.push(StackItem { node: left, t: lt });
                                current = right;
                            }
                            continue;
                        }
                        (Some(_), None) => {
                            current = left;
                            continue;
                        }
                        (None, Some(_)) => {
                            current = right;
                            continue;
                        }
                        (None, None) => {}
                    }
                }
                BvhNode::Leaf { first, count, .. } => {
                    stats.leaves_visited += 1;
                    for &object in &self.objects[first..first + count] {
                        stats.primitive_tests += 1;
                        if let Some(t) = object.intersect(ray) {
                            if t < closest_t {
                                closest_t = t;
                                closest = Some(object);
                            }
                        }
                    }
                }
            }

            // Resume at the first pending subtree that could still hold a
            // closer hit; the rest are already farther than the best one.
            match pop_nearer(&mut stack, closest_t) {
                Some(node) => current = node,
                None => break,
            }
        }

        closest.map(|object| Hit {
            object,
            t: closest_t,
            point: ray.at(closest_t),
        })
    }

    /// Check whether anything blocks the segment from `origin` to `origin + span`.
    ///
    /// The magnitude of `span` is the cutoff: only hits strictly closer than
    /// `span.norm()` count. A zero-length span is never occluded.
    pub fn is_occluded(&self, origin: &Point3, span: &Vec3) -> bool {
        self.is_occluded_with_stats(origin, span, &mut TraversalStats::default())
    }

    /// [`is_occluded`](Self::is_occluded), counting the work done into `stats`.
    pub fn is_occluded_with_stats(
        &self,
        origin: &Point3,
        span: &Vec3,
        stats: &mut TraversalStats,
    ) -> bool {
        match Ray::segment(*origin, *span) {
            Some((ray, length)) => self.occluded_within(&ray, length, stats),
            None => false,
        }
    }

    /// Check whether any object hits `ray` at a distance below `max_t`.
    pub fn occluded_within(&self, ray: &Ray, max_t: f64, stats: &mut TraversalStats) -> bool {
        if !self.enters_root(ray, stats) {
            return false;
        }

        let mut stack: Vec<StackItem> = Vec::new();
        let mut current = 0;

        loop {
            match self.nodes[current] {
                BvhNode::Internal { left, .. } => {
                    let right = left + 1;
                    // Early out: a box entered at or past the cutoff cannot hold
                    // a hit below it, so skipping it never changes the answer.
                    let left_t = self.entry_distance(left, ray, stats).filter(|&t| t < max_t);
                    let right_t = self.entry_distance(right, ray, stats).filter(|&t| t < max_t);

                    match (left_t, right_t) {
                        (Some(_), Some(rt)) => {
                            stack.push(StackItem { node: right, t: rt });
                            current = left;
                            continue;
                        }
                        (Some(_), None) => {
                            current = left;
                            continue;
                        }
                        (None, Some(_)) => {
                            current = right;
                            continue;
                        }
                        (None, None) => {}
                    }
                }
                BvhNode::Leaf { first, count, .. } => {
                    stats.leaves_visited += 1;
                    for object in &self.objects[first..first + count] {
                        stats.primitive_tests += 1;
                        if object.intersect(ray).is_some_and(|t| t < max_t) {
                            return true;
                        }
                    }
                }
            }

            match stack.pop() {
                Some(item) => current = item.node,
                None => return false,
            }
        }
    }

    fn enters_root(&self, ray: &Ray, stats: &mut TraversalStats) -> bool {
        if self.objects.is_empty() {
            return false;
        }
        stats.box_tests += 1;
        self.nodes[0].aabb().intersect_ray(ray).is_some()
    }

    /// Entry distance of `ray` into the box of `node`, 0 if the origin is inside.
    #[inline]
    fn entry_distance(&self, node: usize, ray: &Ray, stats: &mut TraversalStats) -> Option<f64> {
        stats.box_tests += 1;
        let aabb = self.nodes[node].aabb();
        aabb.intersect_ray(ray).map(|t| {
            if aabb.contains_point(&ray.origin) {
                0.0
            } else {
                t
            }
        })
    }
}

/// Pop until an entry nearer than `closest_t` turns up.
fn pop_nearer(stack: &mut Vec<StackItem>, closest_t: f64) -> Option<usize> {
    while let Some(item) = stack.pop() {
        if item.t < closest_t {
            return Some(item.node);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{AxisBox, Sphere};
    use crate::BvhConfig;
    use approx::assert_relative_eq;

    fn three_cubes() -> Vec<AxisBox> {
        vec![
            AxisBox::cube(Point3::new(0.0, 0.0, 0.0), 1.0),
            AxisBox::cube(Point3::new(5.0, 0.0, 0.0), 1.0),
            AxisBox::cube(Point3::new(10.0, 0.0, 0.0), 1.0),
        ]
    }

    fn split_config() -> BvhConfig {
        BvhConfig {
            max_leaf_size: 1,
            ..Default::default()
        }
    }

    #[test]
    fn test_closest_hit_first_cube_near_face() {
        let cubes = three_cubes();
        for config in [BvhConfig::default(), split_config()] {
            let bvh = Bvh::build_with(&cubes, &config).unwrap();
            let ray = Ray::new(Point3::new(-1.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
            let hit = bvh.closest_hit(&ray).unwrap();
            assert!(std::ptr::eq(hit.object, &cubes[0]));
            assert_relative_eq!(hit.t, 0.5, epsilon = 1e-10);
            assert_relative_eq!(hit.point.x, -0.5, epsilon = 1e-10);
            assert_relative_eq!(hit.point.y, 0.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_closest_hit_from_far_side() {
        let cubes = three_cubes();
        let bvh = Bvh::build_with(&cubes, &split_config()).unwrap();
        let ray = Ray::new(Point3::new(20.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0));
        let hit = bvh.closest_hit(&ray).unwrap();
        assert!(std::ptr::eq(hit.object, &cubes[2]));
        assert_relative_eq!(hit.point.x, 10.5, epsilon = 1e-10);
    }

    #[test]
    fn test_origin_inside_child_box() {
        // Origin inside the middle cube: its exit face is the nearest hit.
        let cubes = three_cubes();
        let bvh = Bvh::build_with(&cubes, &split_config()).unwrap();
        let ray = Ray::new(Point3::new(5.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        let hit = bvh.closest_hit(&ray).unwrap();
        assert!(std::ptr::eq(hit.object, &cubes[1]));
        assert_relative_eq!(hit.t, 0.5, epsilon = 1e-10);
    }

    #[test]
    fn test_root_miss_does_no_leaf_work() {
        let cubes = three_cubes();
        let bvh = Bvh::build_with(&cubes, &split_config()).unwrap();
        let ray = Ray::new(Point3::new(-1.0, 5.0, 0.0), Vec3::new(1.0, 0.0, 0.0));

        let mut stats = TraversalStats::default();
        assert!(bvh.closest_hit_with_stats(&ray, &mut stats).is_none());
        assert_eq!(stats.box_tests, 1);
        assert_eq!(stats.leaves_visited, 0);
        assert_eq!(stats.primitive_tests, 0);

        let mut stats = TraversalStats::default();
        let span = Vec3::new(100.0, 0.0, 0.0);
        assert!(!bvh.is_occluded_with_stats(&ray.origin, &span, &mut stats));
        assert_eq!(stats.leaves_visited, 0);
    }

    #[test]
    fn test_pruning_skips_farther_subtrees() {
        let cubes = three_cubes();
        let bvh = Bvh::build_with(&cubes, &split_config()).unwrap();
        let ray = Ray::new(Point3::new(-1.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        let mut stats = TraversalStats::default();
        bvh.closest_hit_with_stats(&ray, &mut stats).unwrap();
        // Only the first cube's leaf is opened.
        assert_eq!(stats.leaves_visited, 1);
        assert_eq!(stats.primitive_tests, 1);
    }

    #[test]
    fn test_occlusion_cutoff() {
        let cubes = three_cubes();
        let bvh = Bvh::build_with(&cubes, &split_config()).unwrap();
        // From just past the first cube, the second cube's near face is 3.5 away.
        let origin = Point3::new(1.0, 0.0, 0.0);
        assert!(!bvh.is_occluded(&origin, &Vec3::new(3.0, 0.0, 0.0)));
        assert!(!bvh.is_occluded(&origin, &Vec3::new(3.5, 0.0, 0.0)));
        assert!(bvh.is_occluded(&origin, &Vec3::new(4.0, 0.0, 0.0)));
    }

    #[test]
    fn test_occlusion_from_before_first_cube_is_blocked_at_its_face() {
        let cubes = three_cubes();
        let bvh = Bvh::build_with(&cubes, &split_config()).unwrap();
        let origin = Point3::new(-1.0, 0.0, 0.0);
        // The first cube starts 0.5 away, so length 4 is already blocked.
        assert!(!bvh.is_occluded(&origin, &Vec3::new(0.4, 0.0, 0.0)));
        assert!(bvh.is_occluded(&origin, &Vec3::new(4.0, 0.0, 0.0)));
        assert!(bvh.is_occluded(&origin, &Vec3::new(6.0, 0.0, 0.0)));
    }

    #[test]
    fn test_zero_length_span_not_occluded() {
        let cubes = three_cubes();
        let bvh = Bvh::build(&cubes);
        assert!(!bvh.is_occluded(&Point3::new(-1.0, 0.0, 0.0), &Vec3::zeros()));
    }

    #[test]
    fn test_nearest_and_occlusion_agree() {
        let spheres: Vec<Sphere> = (0..20)
            .map(|i| Sphere::new(Point3::new(i as f64 * 2.0, (i % 3) as f64, 0.0), 0.6))
            .collect();
        let bvh = Bvh::build_with(&spheres, &split_config()).unwrap();
        let origin = Point3::new(-3.0, 1.0, 0.0);
        let dir = Vec3::new(1.0, 0.0, 0.0);

        let hit = bvh.closest_hit(&Ray::new(origin, dir)).unwrap();
        let eps = 1e-6;
        assert!(bvh.is_occluded(&origin, &(dir * (hit.t + eps))));
        assert!(!bvh.is_occluded(&origin, &(dir * (hit.t - eps))));
    }

    #[test]
    fn test_empty_scene_queries() {
        let spheres: Vec<Sphere> = Vec::new();
        let bvh = Bvh::build(&spheres);
        let ray = Ray::new(Point3::origin(), Vec3::x());
        assert!(bvh.closest_hit(&ray).is_none());
        assert!(!bvh.is_occluded(&Point3::origin(), &Vec3::x()));
    }

    #[test]
    fn test_pop_nearer_discards_equal_distance() {
        let mut stack = vec![StackItem { node: 1, t: 2.0 }, StackItem { node: 2, t: 5.0 }];
        // An entry exactly as far as the best hit cannot improve on it.
        assert_eq!(pop_nearer(&mut stack, 5.0), Some(1));
        assert!(stack.is_empty());

        let mut stack = vec![StackItem { node: 3, t: 5.0 }];
        assert_eq!(pop_nearer(&mut stack, 5.0), None);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_pop_nearer_discards_farther() {
        let mut stack = vec![
            StackItem { node: 1, t: 0.5 },
            StackItem { node: 2, t: 9.0 },
            StackItem { node: 3, t: 7.0 },
        ];
        assert_eq!(pop_nearer(&mut stack, 5.0), Some(1));
        assert!(stack.is_empty());
        assert_eq!(pop_nearer(&mut stack, 5.0), None);
    }
}
