//! A weighted, undirected graph over dual hash indexes.
//!
//! The graph composes two [`ChainedTable`]s behind one facade: a vertex
//! index mapping each caller-supplied identity to its node in a master
//! vertex sequence, and an edge index mapping an unordered [`VertexPair`] to
//! the authoritative record for that edge. Each non-self edge also lives as
//! two cross-linked records in the endpoints' adjacency lists, so removing a
//! vertex can unlink the matching slot on every neighbor in O(degree).
//!
//! The edge index is the single source of truth for weights. Updating an
//! existing edge's weight touches only the index; the adjacency copies are
//! deliberately left stale, and every weight read resolves through the
//! index.

use std::hash::BuildHasher;
use std::hash::Hash;
use std::hash::Hasher;

use foldhash::fast::FixedState;

use crate::list::DList;
use crate::list::NodeId;
use crate::table::ChainedTable;

/// An unordered pair of vertex identities, the canonical key for an
/// undirected edge.
///
/// Equality and hashing are symmetric: `VertexPair::new(u, v)` and
/// `VertexPair::new(v, u)` are equal and hash identically. The hash sorts
/// the two identities' digests (from a fixed-seed hasher) before combining
/// them, so the outer table's own seeded hasher sees the same input for
/// either argument order.
///
/// # Examples
///
/// ```rust
/// use wugraph::VertexPair;
///
/// assert_eq!(VertexPair::new("u", "v"), VertexPair::new("v", "u"));
/// assert_ne!(VertexPair::new("u", "v"), VertexPair::new("u", "w"));
/// ```
#[derive(Clone, Debug)]
pub struct VertexPair<V> {
    u: V,
    v: V,
}

impl<V> VertexPair<V> {
    /// Builds the canonical key for the edge between `u` and `v`.
    pub fn new(u: V, v: V) -> Self {
        VertexPair { u, v }
    }

    /// Borrows the two endpoints in the order they were supplied.
    pub fn endpoints(&self) -> (&V, &V) {
        (&self.u, &self.v)
    }
}

impl<V: Eq> PartialEq for VertexPair<V> {
    fn eq(&self, other: &Self) -> bool {
        (self.u == other.u && self.v == other.v) || (self.u == other.v && self.v == other.u)
    }
}

impl<V: Eq> Eq for VertexPair<V> {}

impl<V: Hash> Hash for VertexPair<V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let fixed = FixedState::default();
        let a = fixed.hash_one(&self.u);
        let b = fixed.hash_one(&self.v);
        state.write_u64(a.min(b));
        state.write_u64(a.max(b));
    }
}

/// One endpoint's view of an incident edge: a single adjacency slot.
struct EdgeRecord<V> {
    /// The opposite endpoint (equal to the owner for a self-edge).
    other: V,
    /// Handle of the twin record's slot in the opposite endpoint's
    /// adjacency list; a self-edge's twin is its own slot. Resolved through
    /// the opposite vertex's own list, never a shared reference.
    twin: NodeId,
    /// Weight copy taken at creation. May be stale after a weight update;
    /// readers must go through the edge index instead.
    weight: i32,
}

/// The edge index's value: the one record trusted for an edge's weight,
/// addressed as an owning endpoint plus that endpoint's adjacency slot.
struct AuthoritativeEdge<V> {
    owner: V,
    slot: NodeId,
    weight: i32,
}

/// A vertex identity together with its adjacency list.
struct VertexRecord<V> {
    id: V,
    adjacency: DList<EdgeRecord<V>>,
}

/// The neighbors of one vertex: parallel, freshly allocated vectors of
/// opposite identities and edge weights, one slot per incident edge.
pub struct Neighbors<V> {
    /// The opposite endpoint of each incident edge, in adjacency order.
    pub vertices: Vec<V>,
    /// The authoritative weight of each corresponding edge.
    pub weights: Vec<i32>,
}

/// A weighted, undirected graph. Self-edges are permitted.
///
/// Vertex identities are caller-supplied values compared by equality and
/// hashed; the graph stores its own clones and never mutates them. All
/// mutating and querying operations are O(1) except where noted.
///
/// # Examples
///
/// ```rust
/// use wugraph::WuGraph;
///
/// let mut graph = WuGraph::new();
/// graph.add_vertex("a");
/// graph.add_vertex("b");
/// graph.add_edge(&"a", &"b", 7);
///
/// assert!(graph.is_edge(&"b", &"a"));
/// assert_eq!(graph.weight(&"a", &"b"), 7);
/// assert_eq!(graph.degree(&"a"), 1);
///
/// graph.remove_vertex(&"b");
/// assert_eq!(graph.edge_count(), 0);
/// assert_eq!(graph.degree(&"a"), 0);
/// ```
pub struct WuGraph<V> {
    vertices: DList<VertexRecord<V>>,
    vertex_index: ChainedTable<V, NodeId>,
    edge_index: ChainedTable<VertexPair<V>, AuthoritativeEdge<V>>,
    num_vertices: usize,
    num_edges: usize,
}

impl<V: Hash + Eq + Clone> Default for WuGraph<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Hash + Eq + Clone> WuGraph<V> {
    /// Creates a graph with no vertices or edges.
    pub fn new() -> Self {
        WuGraph {
            vertices: DList::new(),
            vertex_index: ChainedTable::new(),
            edge_index: ChainedTable::new(),
            num_vertices: 0,
            num_edges: 0,
        }
    }

    /// Returns the number of vertices. O(1).
    pub fn vertex_count(&self) -> usize {
        self.num_vertices
    }

    /// Returns the number of edges. A self-edge counts once. O(1).
    pub fn edge_count(&self) -> usize {
        self.num_edges
    }

    /// Returns every vertex identity in insertion order, as a fresh vector
    /// of clones. O(|V|).
    pub fn vertices(&self) -> Vec<V> {
        self.vertices.iter().map(|record| record.id.clone()).collect()
    }

    /// Adds a vertex named by `vertex`. If the identity is already a vertex
    /// of the graph, the graph is unchanged. O(1).
    pub fn add_vertex(&mut self, vertex: V) {
        if self.is_vertex(&vertex) {
            return;
        }
        let node = self.vertices.push_back(VertexRecord {
            id: vertex.clone(),
            adjacency: DList::new(),
        });
        self.vertex_index.insert(vertex, node);
        self.num_vertices += 1;
    }

    /// Removes a vertex along with every edge incident on it. If `vertex`
    /// is not in the graph, the graph is unchanged. O(degree).
    pub fn remove_vertex(&mut self, vertex: &V) {
        let Some(node) = self.vertex_node(vertex) else {
            return;
        };
        // Snapshot the incident slots first: the walk below mutates the
        // neighbors' adjacency lists and the edge index.
        let incident: Vec<(V, NodeId)> = match self.vertices.get(node) {
            Some(record) => record
                .adjacency
                .iter()
                .map(|edge| (edge.other.clone(), edge.twin))
                .collect(),
            None => Vec::new(),
        };
        for (other, twin) in incident {
            if other != *vertex {
                // Unlink the twin slot on the opposite endpoint. A
                // self-edge's only slot goes away with this vertex's list.
                if let Some(other_node) = self.vertex_node(&other) {
                    if let Some(record) = self.vertices.get_mut(other_node) {
                        record.adjacency.remove(twin);
                    }
                }
            }
            self.edge_index
                .remove(&VertexPair::new(vertex.clone(), other));
            self.num_edges -= 1;
        }
        self.vertices.remove(node);
        self.vertex_index.remove(vertex);
        self.num_vertices -= 1;
    }

    /// Returns `true` if `vertex` is a vertex of the graph. O(1).
    pub fn is_vertex(&self, vertex: &V) -> bool {
        self.vertex_index.find(vertex).is_some()
    }

    /// Returns the degree of `vertex`, or 0 if it is not a vertex of the
    /// graph. A self-edge adds only one to the degree. O(1).
    pub fn degree(&self, vertex: &V) -> usize {
        self.vertex_node(vertex)
            .and_then(|node| self.vertices.get(node))
            .map_or(0, |record| record.adjacency.len())
    }

    /// Returns the neighbors of `vertex` with the weight of each connecting
    /// edge, or `None` if `vertex` has degree zero or is not a vertex of the
    /// graph. Both vectors are freshly allocated, and every weight is read
    /// through the edge index, never from an adjacency copy. O(degree).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use wugraph::WuGraph;
    ///
    /// let mut graph = WuGraph::new();
    /// graph.add_vertex(1);
    /// graph.add_vertex(2);
    /// graph.add_edge(&1, &2, 10);
    ///
    /// let neighbors = graph.neighbors(&1).unwrap();
    /// assert_eq!(neighbors.vertices, [2]);
    /// assert_eq!(neighbors.weights, [10]);
    /// assert!(graph.neighbors(&2).is_some());
    /// assert!(graph.neighbors(&3).is_none());
    /// ```
    pub fn neighbors(&self, vertex: &V) -> Option<Neighbors<V>> {
        let node = self.vertex_node(vertex)?;
        let record = self.vertices.get(node)?;
        if record.adjacency.is_empty() {
            return None;
        }
        let degree = record.adjacency.len();
        let mut vertices = Vec::with_capacity(degree);
        let mut weights = Vec::with_capacity(degree);
        for edge in record.adjacency.iter() {
            weights.push(self.weight(vertex, &edge.other));
            vertices.push(edge.other.clone());
        }
        Some(Neighbors { vertices, weights })
    }

    /// Adds the edge (`u`, `v`) with the given weight. If either endpoint is
    /// not a vertex of the graph, the graph is unchanged. If the edge is
    /// already present this is a weight update: only the authoritative
    /// edge-index record changes, and the two adjacency copies keep their
    /// old value. Self-edges (`u == v`) are allowed. O(1).
    pub fn add_edge(&mut self, u: &V, v: &V, weight: i32) {
        let (Some(u_node), Some(v_node)) = (self.vertex_node(u), self.vertex_node(v)) else {
            return;
        };
        let pair = VertexPair::new(u.clone(), v.clone());
        if let Some(existing) = self.edge_index.find_mut(&pair) {
            existing.weight = weight;
            return;
        }

        let Some(u_record) = self.vertices.get_mut(u_node) else {
            return;
        };
        let u_slot = u_record.adjacency.push_back(EdgeRecord {
            other: v.clone(),
            twin: NodeId::DANGLING,
            weight,
        });
        if u == v {
            if let Some(edge) = u_record.adjacency.get_mut(u_slot) {
                edge.twin = u_slot;
            }
        } else {
            let Some(v_record) = self.vertices.get_mut(v_node) else {
                return;
            };
            let v_slot = v_record.adjacency.push_back(EdgeRecord {
                other: u.clone(),
                twin: u_slot,
                weight,
            });
            if let Some(edge) = self
                .vertices
                .get_mut(u_node)
                .and_then(|record| record.adjacency.get_mut(u_slot))
            {
                edge.twin = v_slot;
            }
        }

        self.edge_index.insert(
            pair,
            AuthoritativeEdge {
                owner: u.clone(),
                slot: u_slot,
                weight,
            },
        );
        self.num_edges += 1;
    }

    /// Removes the edge (`u`, `v`). If either endpoint is not a vertex, or
    /// (`u`, `v`) is not an edge of the graph, the graph is unchanged. O(1).
    pub fn remove_edge(&mut self, u: &V, v: &V) {
        if !self.is_vertex(u) || !self.is_vertex(v) {
            return;
        }
        let pair = VertexPair::new(u.clone(), v.clone());
        let Some(entry) = self.edge_index.remove(&pair) else {
            return;
        };
        let (_, authoritative) = entry.into_pair();
        let Some(owner_node) = self.vertex_node(&authoritative.owner) else {
            return;
        };
        let Some((other, twin)) = self
            .vertices
            .get(owner_node)
            .and_then(|record| record.adjacency.get(authoritative.slot))
            .map(|edge| (edge.other.clone(), edge.twin))
        else {
            return;
        };
        if other != authoritative.owner {
            if let Some(other_node) = self.vertex_node(&other) {
                if let Some(record) = self.vertices.get_mut(other_node) {
                    record.adjacency.remove(twin);
                }
            }
        }
        if let Some(record) = self.vertices.get_mut(owner_node) {
            record.adjacency.remove(authoritative.slot);
        }
        self.num_edges -= 1;
    }

    /// Returns `true` if (`u`, `v`) is an edge of the graph. O(1).
    pub fn is_edge(&self, u: &V, v: &V) -> bool {
        self.edge_index
            .find(&VertexPair::new(u.clone(), v.clone()))
            .is_some()
    }

    /// Returns the weight of (`u`, `v`), or 0 if (`u`, `v`) is not an edge
    /// of the graph. O(1).
    ///
    /// Zero is a sentinel, not a guarantee: an edge of weight zero and a
    /// missing edge are indistinguishable through this method, so callers
    /// that care should check [`WuGraph::is_edge`] first.
    pub fn weight(&self, u: &V, v: &V) -> i32 {
        self.edge_index
            .find(&VertexPair::new(u.clone(), v.clone()))
            .map_or(0, |entry| entry.value().weight)
    }

    fn vertex_node(&self, vertex: &V) -> Option<NodeId> {
        self.vertex_index.find(vertex).map(|entry| *entry.value())
    }
}
