//! Tree shape and per-query counters.

use std::fmt;

/// Shape of a built hierarchy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BvhStats {
    /// Number of objects.
    pub objects: usize,
    /// Total number of nodes.
    pub nodes: usize,
    /// Number of leaf nodes.
    pub leaves: usize,
    /// Depth of the deepest leaf (the root has depth 0).
    pub max_depth: usize,
    /// Largest number of objects in one leaf.
    pub max_leaf_size: usize,
}

impl fmt::Display for BvhStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} objects, {} nodes, {} leaves, depth {}, largest leaf {}",
            self.objects, self.nodes, self.leaves, self.max_depth, self.max_leaf_size
        )
    }
}

/// Work done by one traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalStats {
    /// Ray-box slab tests, the root test included.
    pub box_tests: usize,
    /// Leaves whose objects were tested.
    pub leaves_visited: usize,
    /// Ray-object intersection tests.
    pub primitive_tests: usize,
}

impl std::ops::AddAssign for TraversalStats {
    fn add_assign(&mut self, rhs: Self) {
        self.box_tests += rhs.box_tests;
        self.leaves_visited += rhs.leaves_visited;
        self.primitive_tests += rhs.primitive_tests;
    }
}
