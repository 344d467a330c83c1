//! Maze construction.
//!
//! A maze is built in two steps:
//! 1. [build_adjacency_graph] connects every cell to its left and up neighbors
//!    with a random weight in `[0, N)`, giving the full 4-neighbor lattice.
//! 2. [prim] extracts a minimum spanning tree from the lattice.
//!    Its edges are the open passages of the maze.
//!
//! Because the result is a spanning tree, there is exactly one path between
//! any two cells.
//!
//! # Examples
//!
//! ```
//! use prim_maze::{grid::Direction, Maze};
//!
//! let maze = Maze::<u16>::builder(8, 12).seed([7; 32]).build().unwrap();
//!
//! assert_eq!(maze.maze_graph().edges_len(), 8 * 12 - 1);
//!
//! let start = maze.endpoints().start;
//! let open = Direction::ALL
//!     .into_iter()
//!     .filter(|&d| maze.can_move(start, d).is_some())
//!     .count();
//! assert!(open >= 1);
//! ```

use crate::{
    endpoints::{path_between, prepare_endpoints, Endpoints},
    error::{MazeError, Result},
    graph::{NodeId, Weight, WeightedGraph},
    grid::{Direction, Grid},
    heap::Heap,
};
use log::{debug, trace, warn};
use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};
use std::{fmt, marker::PhantomData};

/// Edges of the fixed 3x3 demo lattice, as `(a, b, weight)`.
///
/// Its minimum spanning tree is:
///
/// ```sh
/// 0   1   2
/// |   |   |
/// 3 - 4 - 5
///     |
/// 6 - 7 - 8
/// ```
pub const DEMO_EDGES: [(usize, usize, Weight); 12] = [
    (0, 1, 3),
    (1, 2, 5),
    (0, 3, 1),
    (3, 4, 1),
    (5, 8, 3),
    (4, 5, 2),
    (2, 5, 2),
    (6, 7, 4),
    (1, 4, 1),
    (3, 6, 5),
    (4, 7, 1),
    (7, 8, 2),
];

/// Builds a maze with the given number of rows and columns, seeded from entropy.
pub fn build_maze<N: NodeId>(rows: usize, columns: usize) -> Result<Maze<N>> {
    MazeBuilder::new(rows, columns).build()
}

/// Builds a maze with the provided seed.
///
/// Uses [StdRng] with the provided seed, so the same seed always builds the same maze.
pub fn build_maze_from_seed<N: NodeId>(
    rows: usize,
    columns: usize,
    seed: [u8; 32],
) -> Result<Maze<N>> {
    MazeBuilder::new(rows, columns).seed(seed).build()
}

/// Builds a maze with the provided Rng.
pub fn build_maze_with_rng<N: NodeId, R: RngCore>(
    rows: usize,
    columns: usize,
    rng: &mut R,
) -> Result<Maze<N>> {
    MazeBuilder::new(rows, columns).build_with_rng(rng)
}

/// Connect every cell of `grid` to its left and up neighbors,
/// each edge weighted independently and uniformly in `[0, N)`.
pub fn build_adjacency_graph<N: NodeId, R: RngCore>(grid: Grid, rng: &mut R) -> WeightedGraph<N> {
    let len = grid.len();
    let mut graph = WeightedGraph::new(len);

    for index in 0..len {
        let (row, column) = grid.coords(index);
        let node = N::from_usize(index);

        if column > 0 {
            let weight = rng.gen_range(0..len) as Weight;
            graph.insert_edge(node, N::from_usize(index - 1), weight);
        }
        if row > 0 {
            let weight = rng.gen_range(0..len) as Weight;
            graph.insert_edge(node, N::from_usize(index - grid.columns()), weight);
        }
    }

    debug!(
        "lattice {}x{}: {} nodes, {} edges",
        grid.rows(),
        grid.columns(),
        len,
        graph.edges_len()
    );

    graph
}

/// The fixed-weight 3x3 lattice described by [DEMO_EDGES].
pub fn demo_adjacency_graph<N: NodeId>() -> WeightedGraph<N> {
    let mut graph = WeightedGraph::new(9);

    for (a, b, weight) in DEMO_EDGES {
        graph.insert_edge(N::from_usize(a), N::from_usize(b), weight);
    }

    graph
}

/// Per-vertex state of one [prim] run.
#[derive(Debug, Clone, Copy)]
struct Visit<N> {
    /// cheapest known weight connecting this vertex to the tree; `None` is infinite
    cost: Option<Weight>,

    /// tree vertex offering that weight
    route: Option<N>,

    /// already absorbed into the tree
    used: bool,
}

/// Extract a minimum spanning tree from `graph`, growing it from vertex 0.
///
/// The queue is never decreased in place: a cheaper connection re-inserts
/// the vertex, and entries for vertices already in the tree are skipped.
/// Equal weights are resolved by heap order.
///
/// If `graph` is disconnected, only the component of vertex 0 is spanned.
pub fn prim<N: NodeId>(graph: &WeightedGraph<N>) -> WeightedGraph<N> {
    let len = graph.nodes_len();
    let mut tree = WeightedGraph::new(len);

    if len == 0 {
        return tree;
    }

    let mut visits = vec![
        Visit {
            cost: None,
            route: None,
            used: false,
        };
        len
    ];

    // cheapest cost at the root
    let mut queue = Heap::with_capacity(len, |a: &(Weight, N), b: &(Weight, N)| b.0.cmp(&a.0));

    let seed = N::from_usize(0);
    visits[0].cost = Some(0);
    queue.insert((0, seed));

    while let Some((cost, v)) = queue.extract() {
        let visit = &mut visits[v.as_usize()];
        if visit.used {
            continue;
        }
        visit.used = true;

        if let Some(route) = visit.route {
            trace!("absorb {v} via {route} ({cost})");
            tree.insert_edge(v, route, cost);
        }

        for (w, weight) in graph.neighbors_of(v) {
            let next = &mut visits[w.as_usize()];
            if next.used {
                continue;
            }

            if next.cost.map_or(true, |c| weight < c) {
                next.cost = Some(weight);
                next.route = Some(v);
                queue.insert((weight, w));
            }
        }
    }

    if tree.edges_len() + 1 != len {
        warn!(
            "spanning tree covers {} of {} nodes; graph is disconnected",
            tree.edges_len() + 1,
            len
        );
    }

    debug!(
        "spanning tree: {} edges, total weight {}",
        tree.edges_len(),
        tree.total_weight()
    );

    tree
}

/// A generated maze: the grid, its weighted lattice, the spanning tree
/// carved out of it, and the chosen start and end cells.
///
/// The maze is immutable; build a new one to get a different layout.
#[derive(Debug, Clone)]
pub struct Maze<N: NodeId = u16> {
    grid: Grid,
    adjacency: WeightedGraph<N>,
    maze: WeightedGraph<N>,
    endpoints: Endpoints<N>,
}

impl<N: NodeId> Maze<N> {
    /// Create a new MazeBuilder with the given dimensions.
    #[inline]
    pub fn builder(rows: usize, columns: usize) -> MazeBuilder<N> {
        MazeBuilder::new(rows, columns)
    }

    /// Run [prim] over an existing lattice and choose endpoints.
    ///
    /// Panics if `adjacency` does not have exactly `grid.len()` nodes.
    pub fn from_adjacency(grid: Grid, adjacency: WeightedGraph<N>) -> Self {
        assert_eq!(
            adjacency.nodes_len(),
            grid.len(),
            "lattice size does not match the grid"
        );

        let maze = prim(&adjacency);
        let endpoints = prepare_endpoints(&maze);

        Self {
            grid,
            adjacency,
            maze,
            endpoints,
        }
    }

    /// The maze built from the fixed-weight 3x3 [DEMO_EDGES] lattice.
    pub fn demo() -> Self {
        Self::from_adjacency(Grid::new(3, 3), demo_adjacency_graph())
    }

    #[inline]
    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// The full weighted lattice the maze was carved from.
    #[inline]
    pub fn adjacency_graph(&self) -> &WeightedGraph<N> {
        &self.adjacency
    }

    /// The spanning tree; its edges are the open passages.
    #[inline]
    pub fn maze_graph(&self) -> &WeightedGraph<N> {
        &self.maze
    }

    #[inline]
    pub fn endpoints(&self) -> Endpoints<N> {
        self.endpoints
    }

    /// Check if there is an open passage between `a` and `b`.
    #[inline]
    pub fn is_neighbor(&self, a: N, b: N) -> bool {
        self.maze.is_neighbor(a, b)
    }

    /// The cell next to `index` in `direction`, ignoring walls.
    #[inline]
    pub fn neighbor(&self, index: N, direction: Direction) -> Option<N> {
        self.grid.neighbor(index, direction)
    }

    /// The cell reached by moving from `index` in `direction`,
    /// or `None` if a wall or the grid boundary is in the way.
    #[inline]
    pub fn can_move(&self, index: N, direction: Direction) -> Option<N> {
        self.neighbor(index, direction)
            .filter(|&next| self.is_neighbor(index, next))
    }

    /// Directions with an open passage out of `index`.
    pub fn open_directions(&self, index: N) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL
            .into_iter()
            .filter(move |&d| self.can_move(index, d).is_some())
    }

    /// Cells on the path from start to end, both included.
    pub fn solution(&self) -> Vec<N> {
        path_between(&self.maze, self.endpoints.start, self.endpoints.end)
    }
}

impl<N: NodeId> fmt::Display for Maze<N> {
    /// Draws the maze with ASCII walls, marking the start `S` and end `E`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rows, columns) = (self.grid.rows(), self.grid.columns());

        writeln!(f, "+{}", "---+".repeat(columns))?;

        for row in 0..rows {
            let mut cells = String::from("|");
            let mut floor = String::from("+");

            for column in 0..columns {
                let node = N::from_usize(self.grid.index(row, column));

                cells.push_str(if node == self.endpoints.start {
                    " S "
                } else if node == self.endpoints.end {
                    " E "
                } else {
                    "   "
                });
                cells.push(if self.can_move(node, Direction::Right).is_some() {
                    ' '
                } else {
                    '|'
                });

                floor.push_str(if self.can_move(node, Direction::Down).is_some() {
                    "   +"
                } else {
                    "---+"
                });
            }

            writeln!(f, "{cells}")?;
            writeln!(f, "{floor}")?;
        }

        Ok(())
    }
}

/// A builder for generating a new [Maze].
#[derive(Debug, Clone)]
pub struct MazeBuilder<N: NodeId = u16> {
    rows: usize,
    columns: usize,
    seed: Option<[u8; 32]>,
    _node: PhantomData<N>,
}

impl<N: NodeId> MazeBuilder<N> {
    #[inline]
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            seed: None,
            _node: PhantomData,
        }
    }

    /// Use [StdRng] seeded with `seed` instead of entropy.
    #[inline]
    pub fn seed(mut self, seed: [u8; 32]) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self) -> Result<Maze<N>> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::from_seed(seed),
            None => StdRng::from_entropy(),
        };

        self.build_with_rng(&mut rng)
    }

    /// Build with the provided Rng; any configured seed is ignored.
    pub fn build_with_rng<R: RngCore>(self, rng: &mut R) -> Result<Maze<N>> {
        let grid = self.grid()?;
        let adjacency = build_adjacency_graph(grid, rng);

        Ok(Maze::from_adjacency(grid, adjacency))
    }

    fn grid(&self) -> Result<Grid> {
        let (rows, columns) = (self.rows, self.columns);

        if rows == 0 || columns == 0 {
            return Err(MazeError::EmptyGrid { rows, columns });
        }

        let nodes = rows.checked_mul(columns).unwrap_or(usize::MAX);
        if nodes > N::MAX_NODES {
            return Err(MazeError::TooManyNodes {
                nodes,
                max: N::MAX_NODES,
            });
        }

        Ok(Grid::new(rows, columns))
    }
}
