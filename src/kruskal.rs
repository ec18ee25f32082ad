//! Kruskal's minimum-spanning-tree algorithm over [`WuGraph`].
//!
//! Edges are gathered into a [`LinkedQueue`], quicksorted by weight with a
//! random pivot, and consumed ascending while a [`DisjointSets`] over dense
//! vertex ranks rejects anything that would close a cycle.

use std::hash::Hash;

use rand::Rng;

use crate::WuGraph;
use crate::queue::LinkedQueue;
use crate::set::DisjointSets;
use crate::table::ChainedTable;

/// One undirected edge lifted out of the graph for sorting. Comparison
/// during the sort is by weight alone; equal weights are interchangeable.
struct CandidateEdge<V> {
    u: V,
    v: V,
    weight: i32,
}

/// Computes a minimum spanning tree of `graph`, returned as a newly
/// constructed graph with the same vertex set and a subset of the edges.
/// `graph` itself is not modified.
///
/// If `graph` is connected the result is a spanning tree with exactly
/// `|V| - 1` edges; otherwise it is a minimum spanning forest, one tree per
/// connected component. Among equal-weight alternatives the edges chosen may
/// differ from run to run, but the total weight never does. Self-edges are
/// never selected: their two endpoints share a rank, so the cycle check
/// rejects them outright.
///
/// Runs in O(E log E) expected time for the sort plus near-linear union-find
/// work.
///
/// # Examples
///
/// ```rust
/// use wugraph::WuGraph;
/// use wugraph::min_spanning_tree;
///
/// let mut graph = WuGraph::new();
/// for v in ["a", "b", "c"] {
///     graph.add_vertex(v);
/// }
/// graph.add_edge(&"a", &"b", 1);
/// graph.add_edge(&"b", &"c", 2);
/// graph.add_edge(&"a", &"c", 5);
///
/// let mst = min_spanning_tree(&graph);
/// assert_eq!(mst.vertex_count(), 3);
/// assert_eq!(mst.edge_count(), 2);
/// assert!(!mst.is_edge(&"a", &"c"));
/// ```
pub fn min_spanning_tree<V: Hash + Eq + Clone>(graph: &WuGraph<V>) -> WuGraph<V> {
    let mut tree = WuGraph::new();
    let all_vertices = graph.vertices();
    for vertex in &all_vertices {
        tree.add_vertex(vertex.clone());
    }

    // Every non-self edge is enqueued twice, once per endpoint; the second
    // copy is harmless because the cycle check rejects it.
    let mut all_edges = LinkedQueue::new();
    for vertex in &all_vertices {
        let Some(neighbors) = graph.neighbors(vertex) else {
            continue;
        };
        for (other, weight) in neighbors.vertices.into_iter().zip(neighbors.weights) {
            all_edges.enqueue(CandidateEdge {
                u: vertex.clone(),
                v: other,
                weight,
            });
        }
    }

    quick_sort(&mut all_edges);

    // Dense 0-based ranks, the universe for the union-find.
    let mut ranks: ChainedTable<V, usize> = ChainedTable::with_capacity(all_vertices.len());
    for (rank, vertex) in all_vertices.iter().enumerate() {
        ranks.insert(vertex.clone(), rank);
    }

    let mut connections = DisjointSets::new(all_vertices.len());
    while !all_edges.is_empty() {
        let edge = all_edges
            .dequeue()
            .expect("queue checked non-empty before dequeue");
        let (Some(rank_u), Some(rank_v)) = (
            ranks.find(&edge.u).map(|entry| *entry.value()),
            ranks.find(&edge.v).map(|entry| *entry.value()),
        ) else {
            continue;
        };
        let root_u = connections.find(rank_u);
        let root_v = connections.find(rank_v);
        if root_u != root_v {
            tree.add_edge(&edge.u, &edge.v, edge.weight);
            connections.union(root_u, root_v);
        }
    }
    tree
}

/// Sorts the queue ascending by weight: random pivot, three-way partition,
/// recurse on the strictly-smaller and strictly-larger parts.
fn quick_sort<V>(queue: &mut LinkedQueue<CandidateEdge<V>>) {
    if queue.len() <= 1 {
        return;
    }
    let pivot_index = rand::rng().random_range(0..queue.len());
    let pivot = match queue.nth(pivot_index) {
        Some(edge) => edge.weight,
        None => unreachable!("pivot rank drawn below queue length"),
    };

    let mut smaller = LinkedQueue::new();
    let mut equal = LinkedQueue::new();
    let mut larger = LinkedQueue::new();
    partition(queue, pivot, &mut smaller, &mut equal, &mut larger);

    quick_sort(&mut smaller);
    quick_sort(&mut larger);
    queue.append(&mut smaller);
    queue.append(&mut equal);
    queue.append(&mut larger);
}

/// Drains `input`, distributing each edge by its weight relative to `pivot`.
fn partition<V>(
    input: &mut LinkedQueue<CandidateEdge<V>>,
    pivot: i32,
    smaller: &mut LinkedQueue<CandidateEdge<V>>,
    equal: &mut LinkedQueue<CandidateEdge<V>>,
    larger: &mut LinkedQueue<CandidateEdge<V>>,
) {
    while !input.is_empty() {
        // An empty dequeue here means the queue bookkeeping is broken;
        // abort rather than hand back a half-partitioned queue.
        let edge = input
            .dequeue()
            .expect("queue checked non-empty before dequeue");
        if edge.weight < pivot {
            smaller.enqueue(edge);
        } else if edge.weight > pivot {
            larger.enqueue(edge);
        } else {
            equal.enqueue(edge);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total_weight<V: Hash + Eq + Clone>(graph: &WuGraph<V>) -> i64 {
        let mut doubled: i64 = 0;
        for vertex in graph.vertices() {
            if let Some(neighbors) = graph.neighbors(&vertex) {
                doubled += neighbors.weights.iter().map(|w| i64::from(*w)).sum::<i64>();
            }
        }
        // Every non-self edge was seen from both endpoints.
        doubled / 2
    }

    fn chained_square() -> WuGraph<&'static str> {
        let mut graph = WuGraph::new();
        for v in ["a", "b", "c", "d"] {
            graph.add_vertex(v);
        }
        graph.add_edge(&"a", &"b", 1);
        graph.add_edge(&"b", &"c", 2);
        graph.add_edge(&"c", &"d", 3);
        graph.add_edge(&"a", &"d", 10);
        graph.add_edge(&"a", &"c", 7);
        graph
    }

    #[test]
    fn test_quick_sort_orders_by_weight() {
        let mut queue = LinkedQueue::new();
        for weight in [5, 3, 9, 3, 1, 7, 0, 3] {
            queue.enqueue(CandidateEdge { u: 0, v: 1, weight });
        }
        quick_sort(&mut queue);
        let mut weights = Vec::new();
        while let Ok(edge) = queue.dequeue() {
            weights.push(edge.weight);
        }
        assert_eq!(weights, [0, 1, 3, 3, 3, 5, 7, 9]);
    }

    #[test]
    fn test_mst_weight_and_shape() {
        let graph = chained_square();
        let mst = min_spanning_tree(&graph);
        assert_eq!(mst.vertex_count(), 4);
        assert_eq!(mst.edge_count(), 3);
        assert_eq!(total_weight(&mst), 6);
        assert!(mst.is_edge(&"a", &"b"));
        assert!(mst.is_edge(&"b", &"c"));
        assert!(mst.is_edge(&"c", &"d"));
        // The source graph is untouched.
        assert_eq!(graph.edge_count(), 5);
        assert_eq!(graph.weight(&"a", &"d"), 10);
    }

    #[test]
    fn test_mst_total_is_stable_across_runs() {
        let mut graph = WuGraph::new();
        for i in 0..6 {
            graph.add_vertex(i);
        }
        // Plenty of weight ties, so runs may pick different trees.
        for i in 0..6 {
            for j in (i + 1)..6 {
                graph.add_edge(&i, &j, ((i + j) % 3) + 1);
            }
        }
        let first = total_weight(&min_spanning_tree(&graph));
        let second = total_weight(&min_spanning_tree(&graph));
        assert_eq!(first, second);
        assert_eq!(min_spanning_tree(&graph).edge_count(), 5);
    }

    #[test]
    fn test_self_edges_never_selected() {
        let mut graph = WuGraph::new();
        graph.add_vertex("x");
        graph.add_vertex("y");
        graph.add_edge(&"x", &"x", -100);
        graph.add_edge(&"x", &"y", 4);
        let mst = min_spanning_tree(&graph);
        assert!(!mst.is_edge(&"x", &"x"));
        assert!(mst.is_edge(&"x", &"y"));
        assert_eq!(mst.edge_count(), 1);
    }

    #[test]
    fn test_disconnected_graph_yields_forest() {
        let mut graph = WuGraph::new();
        for i in 0..6 {
            graph.add_vertex(i);
        }
        graph.add_edge(&0, &1, 1);
        graph.add_edge(&1, &2, 2);
        graph.add_edge(&3, &4, 3);
        let mst = min_spanning_tree(&graph);
        assert_eq!(mst.vertex_count(), 6);
        // Three components: {0,1,2}, {3,4}, {5}.
        assert_eq!(mst.edge_count(), 3);
        assert!(!mst.is_edge(&2, &3));
    }

    #[test]
    fn test_empty_and_trivial_graphs() {
        let empty: WuGraph<u8> = WuGraph::new();
        let mst = min_spanning_tree(&empty);
        assert_eq!(mst.vertex_count(), 0);
        assert_eq!(mst.edge_count(), 0);

        let mut single = WuGraph::new();
        single.add_vertex("only");
        let mst = min_spanning_tree(&single);
        assert_eq!(mst.vertex_count(), 1);
        assert_eq!(mst.edge_count(), 0);
    }

    #[test]
    fn test_mst_prefers_light_edges() {
        let mut graph = WuGraph::new();
        for v in ["hub", "p", "q", "r"] {
            graph.add_vertex(v);
        }
        graph.add_edge(&"hub", &"p", 1);
        graph.add_edge(&"hub", &"q", 1);
        graph.add_edge(&"hub", &"r", 1);
        graph.add_edge(&"p", &"q", 50);
        graph.add_edge(&"q", &"r", 50);
        let mst = min_spanning_tree(&graph);
        assert_eq!(mst.edge_count(), 3);
        assert_eq!(total_weight(&mst), 3);
    }
}
