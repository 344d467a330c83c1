//! Start and end selection over the spanning tree.
//!
//! Two breadth-first sweeps find a diameter of the tree: the farthest vertex
//! from vertex 0 becomes the end, and the farthest vertex from the end becomes
//! the start. On a tree this always yields the longest possible solution path.

use crate::graph::{NodeId, WeightedGraph};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Endpoints<N: NodeId = u16> {
    pub start: N,
    pub end: N,

    /// Number of hops between `start` and `end`.
    pub distance: usize,
}

/// Pick the start and end vertices of the maze.
///
/// Panics if the graph has no nodes.
pub fn prepare_endpoints<N: NodeId>(graph: &WeightedGraph<N>) -> Endpoints<N> {
    let (end, _) = farthest_from(graph, N::from_usize(0));
    let (start, distance) = farthest_from(graph, end);

    log::debug!("endpoints: start {start}, end {end}, distance {distance}");

    Endpoints {
        start,
        end,
        distance,
    }
}

/// Return the farthest vertex reachable from `source` and its distance.
///
/// Ties go to the vertex visited first.
pub fn farthest_from<N: NodeId>(graph: &WeightedGraph<N>, source: N) -> (N, usize) {
    let mut farthest = (source, 0);

    bfs(graph, source, |node, dist, _| {
        if dist > farthest.1 {
            farthest = (node, dist);
        }
    });

    farthest
}

/// Hop count from `source` to every vertex, `None` where unreachable.
pub fn distances_from<N: NodeId>(graph: &WeightedGraph<N>, source: N) -> Vec<Option<usize>> {
    let mut distances = vec![None; graph.nodes_len()];

    bfs(graph, source, |node, dist, _| {
        distances[node.as_usize()] = Some(dist);
    });

    distances
}

/// Vertices on the path from `from` to `to`, both included.
///
/// On a tree the path is unique. Returns an empty list if `to` is unreachable.
pub fn path_between<N: NodeId>(graph: &WeightedGraph<N>, from: N, to: N) -> Vec<N> {
    let mut parents = vec![None; graph.nodes_len()];

    bfs(graph, from, |node, _, parent| {
        parents[node.as_usize()] = parent;
    });

    if from != to && parents[to.as_usize()].is_none() {
        return vec![];
    }

    let mut path = vec![to];
    let mut curr = to;
    while let Some(parent) = parents[curr.as_usize()] {
        path.push(parent);
        curr = parent;
    }
    path.reverse();

    path
}

/// Visit every vertex reachable from `source` once, in breadth-first order,
/// calling `visit(node, distance, parent)`.
fn bfs<N: NodeId>(
    graph: &WeightedGraph<N>,
    source: N,
    mut visit: impl FnMut(N, usize, Option<N>),
) {
    let mut seen = vec![false; graph.nodes_len()];
    let mut queue = VecDeque::new();

    seen[source.as_usize()] = true;
    queue.push_back((source, 0, None));

    while let Some((node, dist, parent)) = queue.pop_front() {
        visit(node, dist, parent);

        for &n in graph.neighbors(node) {
            if !seen[n.as_usize()] {
                seen[n.as_usize()] = true;
                queue.push_back((n, dist + 1, Some(node)));
            }
        }
    }
}
