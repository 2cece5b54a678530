//! Hierarchy construction: largest-extent axis, spatial-midpoint split.

use std::ops::Range;

use lumen_math::Point3;

use crate::{Aabb3, BvhConfig, BvhNode, Primitive};

/// An object together with the bounds and centroid the builder sorts by.
struct BuildEntry<'a, P: ?Sized> {
    object: &'a P,
    aabb: Aabb3,
    centroid: Point3,
}

/// Build the node sequence and the reordered object sequence.
///
/// Node 0 is the root. Children of an internal node are appended as an
/// adjacent pair, left first, so the left index alone locates both.
pub(crate) fn build<'a, P>(objects: Vec<&'a P>, config: &BvhConfig) -> (Vec<BvhNode>, Vec<&'a P>)
where
    P: Primitive + ?Sized,
{
    let mut entries: Vec<BuildEntry<'a, P>> = objects
        .into_iter()
        .map(|object| BuildEntry {
            object,
            aabb: object.bounding_box(),
            centroid: object.centroid(),
        })
        .collect();

    let mut world = Aabb3::union_of(entries.iter().map(|e| e.aabb));
    if !world.is_empty() {
        world.expand(config.root_padding);
    }

    let mut nodes = Vec::with_capacity(2 * entries.len().max(1));
    nodes.push(BvhNode::Leaf {
        aabb: world,
        first: 0,
        count: entries.len(),
    });

    // LIFO work list: popping left before right yields the same node order
    // as depth-first recursion.
    let mut pending: Vec<(usize, Range<usize>)> = vec![(0, 0..entries.len())];

    while let Some((index, range)) = pending.pop() {
        let aabb = *nodes[index].aabb();

        if range.len() <= config.max_leaf_size {
            nodes[index] = BvhNode::Leaf {
                aabb,
                first: range.start,
                count: range.len(),
            };
            continue;
        }

        let split = range.start + split_range(&mut entries[range.clone()], &aabb);

        let left_box = Aabb3::union_of(entries[range.start..split].iter().map(|e| e.aabb));
        let right_box = Aabb3::union_of(entries[split..range.end].iter().map(|e| e.aabb));

        let left = nodes.len();
        nodes.push(BvhNode::Leaf {
            aabb: left_box,
            first: range.start,
            count: split - range.start,
        });
        nodes.push(BvhNode::Leaf {
            aabb: right_box,
            first: split,
            count: range.end - split,
        });
        nodes[index] = BvhNode::Internal { aabb, left };

        pending.push((left + 1, split..range.end));
        pending.push((left, range.start..split));
    }

    let objects = entries.into_iter().map(|e| e.object).collect();
    (nodes, objects)
}

/// Sort `entries` along the longest axis of `aabb` and pick a split point.
///
/// Returns an offset into `entries` in `1..entries.len()`. Requires at least
/// two entries.
fn split_range<P: ?Sized>(entries: &mut [BuildEntry<'_, P>], aabb: &Aabb3) -> usize {
    let axis = aabb.longest_axis();
    let i = axis.index();

    entries.sort_unstable_by(|a, b| a.centroid[i].total_cmp(&b.centroid[i]));

    let mid = aabb.mid(axis);
    let first = entries[0].centroid[i];
    let last = entries[entries.len() - 1].centroid[i];

    // Everything on one side of the midpoint: fall back to a median split so
    // neither child is empty.
    if first > mid || last <= mid {
        log::trace!(
            "median split of {} objects on {:?} (mid {mid}, centroids {first}..={last})",
            entries.len(),
            axis,
        );
        return entries.len() / 2;
    }

    entries.partition_point(|e| e.centroid[i] <= mid)
}
