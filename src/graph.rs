//! Undirected weighted graph used for both the lattice and the maze.
//!
//! Every edge is stored once, keyed by its [edge_id], so the weight seen from
//! either endpoint is always the same.
//!
//! ```
//! use prim_maze::graph::WeightedGraph;
//!
//! let mut graph = WeightedGraph::<u16>::new(3);
//! graph.insert_edge(0, 1, 7);
//! graph.insert_edge(2, 1, 4);
//!
//! assert!(graph.is_neighbor(1, 0));
//! assert!(!graph.is_neighbor(0, 2));
//! assert_eq!(graph.neighbors_of(1).collect::<Vec<_>>(), vec![(0, 7), (2, 4)]);
//! ```

use crate::edge_id;
use std::{collections::HashMap, fmt};

/// Edge weight.
pub type Weight = u32;

#[derive(Debug, Clone)]
pub struct WeightedGraph<N: NodeId = u16> {
    nodes: Nodes<N>,

    /// key: edge_id
    ///
    /// value: weight of the edge
    edges: HashMap<(N, N), Weight>,
}

impl<N: NodeId> WeightedGraph<N> {
    /// Create an empty graph over `nodes_len` vertices.
    ///
    /// Panics if the number of nodes exceeds the limit of the NodeId type.
    #[inline]
    pub fn new(nodes_len: usize) -> Self {
        assert!(
            nodes_len <= N::MAX_NODES,
            "Number of nodes exceeds the limit; Specify `u32` as the NodeId type"
        );

        Self {
            nodes: Nodes::new(nodes_len),
            edges: HashMap::new(),
        }
    }

    /// Add an edge between `source` and `target` in both directions.
    ///
    /// Inserting the same pair again overwrites its weight.
    /// Self-loops are ignored.
    #[inline]
    pub fn insert_edge(&mut self, source: N, target: N, weight: Weight) {
        if !self.nodes.connect(source, target) {
            return;
        }

        self.edges.insert(edge_id(source, target), weight);
    }

    /// Check if there is an edge between `a` and `b`.
    #[inline]
    pub fn is_neighbor(&self, a: N, b: N) -> bool {
        self.check(a);
        self.check(b);
        self.edges.contains_key(&edge_id(a, b))
    }

    /// Weight of the edge between `a` and `b`, if any.
    #[inline]
    pub fn weight(&self, a: N, b: N) -> Option<Weight> {
        self.check(a);
        self.check(b);
        self.edges.get(&edge_id(a, b)).copied()
    }

    /// Return a list of all neighboring nodes of the given node.
    #[inline]
    pub fn neighbors(&self, node: N) -> &[N] {
        self.nodes.neighbors(node)
    }

    /// Iterate the neighbors of `node` along with the weight of the connecting edge,
    /// in insertion order.
    #[inline]
    pub fn neighbors_of(&self, node: N) -> impl Iterator<Item = (N, Weight)> + '_ {
        self.nodes.neighbors(node).iter().map(move |&n| {
            let weight = self.edges[&edge_id(node, n)];
            (n, weight)
        })
    }

    /// Iterate all edges as `(low, high, weight)`, in no particular order.
    #[inline]
    pub fn edges(&self) -> impl Iterator<Item = (N, N, Weight)> + '_ {
        self.edges.iter().map(|(&(a, b), &w)| (a, b, w))
    }

    /// Return the number of nodes in this graph.
    #[inline]
    pub fn nodes_len(&self) -> usize {
        self.nodes.len()
    }

    /// Return the number of edges in this graph.
    #[inline]
    pub fn edges_len(&self) -> usize {
        self.edges.len()
    }

    /// Sum of all edge weights.
    pub fn total_weight(&self) -> u64 {
        self.edges.values().map(|&w| w as u64).sum()
    }

    #[inline]
    fn check(&self, node: N) {
        assert!(
            node.as_usize() < self.nodes.len(),
            "node {node} is out of range for a graph of {} nodes",
            self.nodes.len()
        );
    }
}

impl<N: NodeId> fmt::Display for WeightedGraph<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "nodes: {}, edges: {}", self.nodes_len(), self.edges_len())?;

        for i in 0..self.nodes_len() {
            let node = N::from_usize(i);
            write!(f, "  {node}: [")?;

            for (j, (n, w)) in self.neighbors_of(node).enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{n}:{w}")?;
            }

            writeln!(f, "]")?;
        }

        Ok(())
    }
}

/// Map of nodes and their neighbors.
///
/// index: node_id
///
/// value: neighbors of node
#[derive(Debug, Clone)]
struct Nodes<N: NodeId> {
    inner: Vec<Vec<N>>,
}

impl<N: NodeId> Nodes<N> {
    #[inline]
    fn new(nodes_len: usize) -> Self {
        Self {
            inner: vec![vec![]; nodes_len],
        }
    }

    /// Get the neighboring nodes
    #[inline]
    fn neighbors(&self, node: N) -> &[N] {
        &self.inner[node.as_usize()]
    }

    /// Add a edge between node_a and node_b
    ///
    /// Returns `false` for self-loops.
    #[inline]
    fn connect(&mut self, a: N, b: N) -> bool {
        if a == b {
            return false;
        }

        if !self.inner[a.as_usize()].contains(&b) {
            self.inner[a.as_usize()].push(b);
        }
        if !self.inner[b.as_usize()].contains(&a) {
            self.inner[b.as_usize()].push(a);
        }

        true
    }

    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

/// Either u16 or u32.
pub trait NodeId: sealed::Sealed {
    /// Maximum number of nodes that can be stored
    const MAX_NODES: usize;

    /// Cast type as usize.
    /// For internal uses, we can assume this is safe.
    fn as_usize(self) -> usize;

    /// Convert usize to NodeId.
    fn from_usize(value: usize) -> Self;
}

mod sealed {
    use std::fmt;

    use super::*;

    pub trait Sealed:
        Ord + Eq + Clone + Copy + std::hash::Hash + Send + Sync + fmt::Display + fmt::Debug
    {
    }

    macro_rules! impl_node_id {
        ($($ty:ty),*) => {
            $(
                impl Sealed for $ty {}

                impl NodeId for $ty {
                    const MAX_NODES: usize = 1 << <$ty>::BITS;

                    #[inline]
                    fn as_usize(self) -> usize {
                        self as usize
                    }

                    #[inline]
                    fn from_usize(value: usize) -> Self {
                        value as $ty
                    }
                }
            )*
        };
    }

    impl_node_id!(u16, u32);
}
