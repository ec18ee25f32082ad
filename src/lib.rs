#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

pub mod graph;
pub mod kruskal;
pub mod list;
pub mod queue;
pub mod set;
pub mod table;

pub use graph::Neighbors;
pub use graph::VertexPair;
pub use graph::WuGraph;
pub use kruskal::min_spanning_tree;
pub use list::DList;
pub use list::NodeId;
pub use queue::LinkedQueue;
pub use queue::QueueEmptyError;
pub use set::DisjointSets;
pub use table::ChainedTable;
pub use table::Entry;
