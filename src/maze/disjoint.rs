//! Union-find over cell indices

/// Forest of parent links, one node per cell. A node without a parent is the
/// representative of its set. Grids are console-sized and built once per
/// cycle, so there is no path compression or union by rank.
pub struct DisjointSet {
    parent: Vec<Option<usize>>,
}

impl DisjointSet {
    pub fn new(len: usize) -> Self {
        Self {
            parent: vec![None; len],
        }
    }

    /// Representative of the set containing `node`
    pub fn root(&self, node: usize) -> usize {
        let mut current = node;
        while let Some(parent) = self.parent[current] {
            current = parent;
        }
        current
    }

    pub fn is_connected(&self, a: usize, b: usize) -> bool {
        self.root(a) == self.root(b)
    }

    /// Hang `other`'s whole tree under `node`. Returns false (and changes
    /// nothing) when both are already in the same set.
    pub fn connect(&mut self, node: usize, other: usize) -> bool {
        let other_root = self.root(other);
        if self.root(node) == other_root {
            return false;
        }
        self.parent[other_root] = Some(node);
        true
    }
}
