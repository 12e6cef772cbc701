// src/group/forest.rs
use crate::load::RowId;

/// Disjoint-set forest over dense row identifiers.
///
/// Parents are stored as indices into one arena. Unions always hang the
/// larger root under the smaller one, so a set's representative is the
/// smallest identifier ever merged into it.
#[derive(Debug, Clone)]
pub struct Forest {
    parent: Vec<RowId>,
    /// Only meaningful at a representative.
    size: Vec<usize>,
    sets: usize,
}

impl Forest {
    /// `n` singleton sets `{0}`, `{1}`, … `{n-1}`.
    pub fn new(n: usize) -> Self {
        Forest {
            parent: (0..n).collect(),
            size: vec![1; n],
            sets: n,
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Number of disjoint sets currently in the forest.
    pub fn set_count(&self) -> usize {
        self.sets
    }

    /// Representative of `x`, compressing the path behind it.
    pub fn find(&mut self, x: RowId) -> RowId {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut cur = x;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    /// Merge the sets holding `a` and `b`. Returns false if they were
    /// already one set.
    pub fn union(&mut self, a: RowId, b: RowId) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }

        let (root, child) = if ra < rb { (ra, rb) } else { (rb, ra) };
        self.parent[child] = root;
        self.size[root] += self.size[child];
        self.sets -= 1;
        true
    }

    /// Size of the set holding `x`.
    pub fn set_size(&mut self, x: RowId) -> usize {
        let root = self.find(x);
        self.size[root]
    }
}
