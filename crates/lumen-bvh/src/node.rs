//! Flat BVH nodes.

use std::ops::Range;

use crate::Aabb3;

/// A BVH node - either a leaf over a run of objects or an internal node.
///
/// Nodes live in one flat `Vec`. An internal node stores only the index of
/// its left child; the right child is always the next entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BvhNode {
    /// Leaf node covering `first..first + count` of the object sequence.
    Leaf {
        /// Axis-aligned bounding box of this node.
        aabb: Aabb3,
        /// Index of the first object.
        first: usize,
        /// Number of objects.
        count: usize,
    },
    /// Internal node with two children at `left` and `left + 1`.
    Internal {
        /// Axis-aligned bounding box of this node.
        aabb: Aabb3,
        /// Index of the left child.
        left: usize,
    },
}

impl BvhNode {
    /// Bounding box of this node.
    #[inline]
    pub fn aabb(&self) -> &Aabb3 {
        match self {
            BvhNode::Leaf { aabb, .. } | BvhNode::Internal { aabb, .. } => aabb,
        }
    }

    /// True for leaf nodes.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, BvhNode::Leaf { .. })
    }

    /// Object range of a leaf.
    pub fn objects(&self) -> Option<Range<usize>> {
        match *self {
            BvhNode::Leaf { first, count, .. } => Some(first..first + count),
            BvhNode::Internal { .. } => None,
        }
    }

    /// Indices of the left and right child of an internal node.
    pub fn children(&self) -> Option<(usize, usize)> {
        match *self {
            BvhNode::Internal { left, .. } => Some((left, left + 1)),
            BvhNode::Leaf { .. } => None,
        }
    }
}

/// Pending subtree recorded during traversal: a node and the ray's entry
/// distance into its box.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StackItem {
    pub node: usize,
    pub t: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_accessors() {
        let node = BvhNode::Leaf {
            aabb: Aabb3::empty(),
            first: 3,
            count: 2,
        };
        assert!(node.is_leaf());
        assert_eq!(node.objects(), Some(3..5));
        assert_eq!(node.children(), None);
    }

    #[test]
    fn test_internal_children_are_adjacent() {
        let node = BvhNode::Internal {
            aabb: Aabb3::empty(),
            left: 7,
        };
        assert!(!node.is_leaf());
        assert_eq!(node.children(), Some((7, 8)));
        assert_eq!(node.objects(), None);
    }
}
