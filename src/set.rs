//! A disjoint-set forest over a fixed universe of dense integers.

/// Union-find over the elements `0..n`, with path compression and union by
/// rank. The universe is fixed at construction; there is no growth or
/// removal.
///
/// # Examples
///
/// ```rust
/// use wugraph::DisjointSets;
///
/// let mut sets = DisjointSets::new(4);
/// assert_ne!(sets.find(0), sets.find(3));
/// sets.union(0, 1);
/// sets.union(1, 3);
/// assert_eq!(sets.find(0), sets.find(3));
/// assert_ne!(sets.find(0), sets.find(2));
/// ```
pub struct DisjointSets {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl DisjointSets {
    /// Creates `n` singleton sets, one per element of `0..n`.
    pub fn new(n: usize) -> Self {
        DisjointSets {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    /// Returns the representative of `x`'s set, compressing the path walked.
    pub fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            self.parent[x] = self.find(self.parent[x]);
        }
        self.parent[x]
    }

    /// Merges the sets containing `a` and `b`. Returns `true` if two
    /// distinct sets were joined, `false` if they were already one.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return false;
        }
        if self.rank[root_a] < self.rank[root_b] {
            self.parent[root_a] = root_b;
        } else if self.rank[root_a] > self.rank[root_b] {
            self.parent[root_b] = root_a;
        } else {
            self.parent[root_b] = root_a;
            self.rank[root_a] += 1;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singletons() {
        let mut sets = DisjointSets::new(3);
        assert_eq!(sets.find(0), 0);
        assert_eq!(sets.find(1), 1);
        assert_eq!(sets.find(2), 2);
    }

    #[test]
    fn test_union_merges() {
        let mut sets = DisjointSets::new(5);
        assert!(sets.union(0, 1));
        assert!(sets.union(2, 3));
        assert_eq!(sets.find(0), sets.find(1));
        assert_ne!(sets.find(1), sets.find(2));
        assert!(sets.union(1, 3));
        assert_eq!(sets.find(0), sets.find(2));
        assert_ne!(sets.find(0), sets.find(4));
    }

    #[test]
    fn test_union_same_set_is_noop() {
        let mut sets = DisjointSets::new(2);
        assert!(sets.union(0, 1));
        assert!(!sets.union(0, 1));
        assert!(!sets.union(1, 1));
    }

    #[test]
    fn test_long_chain_compresses() {
        let mut sets = DisjointSets::new(100);
        for i in 1..100 {
            sets.union(i - 1, i);
        }
        let root = sets.find(0);
        for i in 0..100 {
            assert_eq!(sets.find(i), root);
        }
    }
}
