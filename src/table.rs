//! A chained hash table with prime bucket counts and duplicate-key entries.
//!
//! Buckets are doubly linked lists of [`Entry`] values. The table maps a
//! key's full-range signed digest to a bucket through a two-stage compression
//! function: the digest is folded with a secondary prime roughly 23 times the
//! bucket count before the final reduction modulo the bucket count, which
//! breaks up clustering patterns in weak digests. Exceeding a load factor of
//! 0.7 doubles the bucket count (rounded up to the next prime) and
//! redistributes every entry.

use std::hash::BuildHasher;
use std::hash::Hash;

use crate::list::DList;
use crate::list::NodeId;

const DEFAULT_BUCKETS: usize = 103;

fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    let mut divisor = 2;
    while divisor * divisor <= n {
        if n % divisor == 0 {
            return false;
        }
        divisor += 1;
    }
    true
}

/// Smallest prime greater than or equal to `n` (and at least 2).
fn next_prime(n: usize) -> usize {
    let mut candidate = n.max(2);
    while !is_prime(candidate) {
        candidate += 1;
    }
    candidate
}

/// Secondary modulus for the compression fold.
fn spread_for(buckets: usize) -> i64 {
    next_prime(buckets * 23) as i64
}

/// Maps a signed digest into `0..buckets`, folding through the secondary
/// prime `spread` first and normalizing negative remainders into range.
fn fold_digest(digest: i64, spread: i64, buckets: usize) -> usize {
    let m = buckets as i64;
    let mut index = digest
        .wrapping_mul(13)
        .wrapping_add((0.342 * spread as f64) as i64)
        % spread
        % m;
    if index < 0 {
        index += m;
    }
    index as usize
}

/// One key/value pair stored in a [`ChainedTable`].
///
/// The key is immutable for the lifetime of the entry. Several entries with
/// equal keys may coexist in one table.
pub struct Entry<K, V> {
    key: K,
    value: V,
    // Handle of this entry's key in the table's insertion-order key list,
    // removed together with the entry.
    key_node: NodeId,
}

impl<K, V> Entry<K, V> {
    /// Borrows the entry's key.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Borrows the entry's value.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Consumes the entry, yielding its key and value.
    pub fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}

/// A chained hash table mapping keys to values, with duplicate keys allowed.
///
/// `insert` never overwrites: inserting an already-present key stores a
/// second entry, and `find`/`remove` pick an arbitrary one among equals. The
/// graph layered on top never creates duplicates; the semantics exist so the
/// table stays a general-purpose associative store.
///
/// # Examples
///
/// ```rust
/// use wugraph::ChainedTable;
///
/// let mut table: ChainedTable<&str, u32> = ChainedTable::new();
/// table.insert("answer", 42);
/// assert_eq!(table.find(&"answer").map(|e| *e.value()), Some(42));
/// assert_eq!(table.len(), 1);
///
/// let removed = table.remove(&"answer").map(|e| e.into_pair());
/// assert_eq!(removed, Some(("answer", 42)));
/// assert!(table.find(&"answer").is_none());
/// ```
pub struct ChainedTable<K, V, S = foldhash::fast::RandomState> {
    buckets: Vec<DList<Entry<K, V>>>,
    // Every inserted key in insertion order, one node per insertion. Drives
    // rehashing and survives it untouched.
    keys: DList<K>,
    len: usize,
    collisions: usize,
    spread: i64,
    hash_builder: S,
}

impl<K, V, S> ChainedTable<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher + Default,
{
    /// Creates a table with the fixed default bucket count (103).
    pub fn new() -> Self {
        Self::with_hasher(S::default())
    }

    /// Creates a table sized for roughly `estimate` entries: the bucket
    /// count is the smallest prime at or above the estimate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use wugraph::ChainedTable;
    ///
    /// let table: ChainedTable<u32, u32> = ChainedTable::with_capacity(100);
    /// assert_eq!(table.bucket_count(), 101);
    /// ```
    pub fn with_capacity(estimate: usize) -> Self {
        Self::with_capacity_and_hasher(estimate, S::default())
    }
}

impl<K, V, S> Default for ChainedTable<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> ChainedTable<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
{
    /// Creates a default-sized table with the given hasher builder.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_capacity_and_hasher(DEFAULT_BUCKETS, hash_builder)
    }

    /// Creates a table sized for roughly `estimate` entries with the given
    /// hasher builder.
    pub fn with_capacity_and_hasher(estimate: usize, hash_builder: S) -> Self {
        let buckets = next_prime(estimate);
        ChainedTable {
            buckets: (0..buckets).map(|_| DList::new()).collect(),
            keys: DList::new(),
            len: 0,
            collisions: 0,
            spread: spread_for(buckets),
            hash_builder,
        }
    }

    /// Returns the number of entries. Duplicate-key entries each count once.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current bucket count. Never shrinks.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Number of insertions that landed in a non-empty bucket. Diagnostics
    /// only; plays no part in correctness.
    pub fn collisions(&self) -> usize {
        self.collisions
    }

    /// Drops every entry, keeping the current bucket count.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.keys.clear();
        self.len = 0;
        self.collisions = 0;
    }

    fn digest(&self, key: &K) -> i64 {
        self.hash_builder.hash_one(key) as i64
    }

    fn bucket_index(&self, key: &K) -> usize {
        fold_digest(self.digest(key), self.spread, self.buckets.len())
    }

    /// Stores a new entry for `key`, returning a reference to it. An
    /// existing equal key is never overwritten; the entries coexist.
    /// Amortized O(1).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use wugraph::ChainedTable;
    ///
    /// let mut table: ChainedTable<u8, &str> = ChainedTable::new();
    /// table.insert(1, "first");
    /// table.insert(1, "second");
    /// assert_eq!(table.len(), 2);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> &Entry<K, V> {
        if (self.len + 1) as f64 / self.buckets.len() as f64 > 0.7 {
            self.rehash();
        }
        let index = self.bucket_index(&key);
        if !self.buckets[index].is_empty() {
            self.collisions += 1;
        }
        let key_node = self.keys.push_back(key.clone());
        let node = self.buckets[index].push_front(Entry {
            key,
            value,
            key_node,
        });
        self.len += 1;
        match self.buckets[index].get(node) {
            Some(entry) => entry,
            None => unreachable!("freshly inserted entry is live"),
        }
    }

    /// Doubles the bucket count (next prime) and redistributes every entry,
    /// walking the insertion-order key list and moving one matching entry
    /// per key node.
    fn rehash(&mut self) {
        let old_count = self.buckets.len();
        let old_spread = self.spread;
        let new_count = next_prime(old_count * 2);
        let new_spread = spread_for(new_count);

        let mut old_buckets = std::mem::replace(
            &mut self.buckets,
            (0..new_count).map(|_| DList::new()).collect(),
        );
        self.spread = new_spread;

        for key in self.keys.iter() {
            let digest = self.hash_builder.hash_one(key) as i64;
            let old_index = fold_digest(digest, old_spread, old_count);
            if let Some(entry) = take_matching(&mut old_buckets[old_index], key) {
                let new_index = fold_digest(digest, new_spread, new_count);
                if !self.buckets[new_index].is_empty() {
                    self.collisions += 1;
                }
                self.buckets[new_index].push_front(entry);
            }
        }
    }

    /// Returns an arbitrary entry whose key equals `key`, or `None`. O(1)
    /// expected.
    pub fn find(&self, key: &K) -> Option<&Entry<K, V>> {
        let index = self.bucket_index(key);
        self.buckets[index].iter().find(|entry| entry.key == *key)
    }

    /// Mutably borrows the value of an arbitrary entry whose key equals
    /// `key`. O(1) expected.
    pub fn find_mut(&mut self, key: &K) -> Option<&mut V> {
        let index = self.bucket_index(key);
        let mut cursor = self.buckets[index].front();
        while let Some(node) = cursor {
            cursor = self.buckets[index].next(node);
            let matches = self.buckets[index]
                .get(node)
                .is_some_and(|entry| entry.key == *key);
            if matches {
                return self.buckets[index]
                    .get_mut(node)
                    .map(|entry| &mut entry.value);
            }
        }
        None
    }

    /// Removes and returns an arbitrary entry whose key equals `key`, or
    /// `None`. O(1) expected: the entry carries the handle of its own node
    /// in the key list, so no scan is needed there either.
    pub fn remove(&mut self, key: &K) -> Option<Entry<K, V>> {
        let index = self.bucket_index(key);
        let entry = take_matching(&mut self.buckets[index], key)?;
        self.keys.remove(entry.key_node);
        self.len -= 1;
        Some(entry)
    }
}

/// Unlinks and returns the first entry in `bucket` whose key equals `key`.
fn take_matching<K: Eq, V>(bucket: &mut DList<Entry<K, V>>, key: &K) -> Option<Entry<K, V>> {
    let mut cursor = bucket.front();
    while let Some(node) = cursor {
        cursor = bucket.next(node);
        if bucket.get(node).is_some_and(|entry| entry.key == *key) {
            return bucket.remove(node);
        }
    }
    None
}
