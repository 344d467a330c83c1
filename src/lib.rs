//! Random maze generation on rectangular grids.
//!
//! Every cell is connected to its four neighbors with a random weight, then a
//! minimum spanning tree is extracted with Prim's algorithm. The tree's edges
//! are the open passages, so every cell is reachable from every other cell
//! through exactly one path.
//!
//! See [maze] for building, [endpoints] for start/end selection and [game]
//! for playing a timed session on a maze.
//!
//! ```
//! use prim_maze::{build_maze_from_seed, Maze16};
//!
//! let maze: Maze16 = build_maze_from_seed(4, 6, [0; 32]).unwrap();
//! let endpoints = maze.endpoints();
//!
//! assert_eq!(maze.maze_graph().edges_len(), 23);
//! assert_eq!(maze.solution().len(), endpoints.distance + 1);
//! println!("{maze}");
//! ```

use paste::paste;

pub mod endpoints;
pub mod error;
pub mod game;
pub mod graph;
pub mod grid;
pub mod heap;
pub mod maze;
#[cfg(feature = "parallel")]
pub mod parallel;

pub use endpoints::{prepare_endpoints, Endpoints};
pub use error::{MazeError, Result};
pub use graph::{NodeId, WeightedGraph};
pub use maze::{build_maze, build_maze_from_seed, build_maze_with_rng, Maze, MazeBuilder};

macro_rules! node_aliases {
    ($($bits:literal),*) => {
        paste! {
            $(
                #[doc = "[Maze] with `u" $bits "` node ids."]
                pub type [<Maze $bits>] = Maze<[<u $bits>]>;

                #[doc = "[MazeBuilder] with `u" $bits "` node ids."]
                pub type [<Maze $bits Builder>] = MazeBuilder<[<u $bits>]>;

                #[doc = "[WeightedGraph] with `u" $bits "` node ids."]
                pub type [<WeightedGraph $bits>] = WeightedGraph<[<u $bits>]>;
            )*
        }
    };
}

node_aliases!(16, 32);

/// Given two node IDs, return a tuple of the two IDs in ascending order.
#[inline]
pub fn edge_id<T: Ord>(node_a_index: T, node_b_index: T) -> (T, T) {
    if node_a_index > node_b_index {
        (node_b_index, node_a_index)
    } else {
        (node_a_index, node_b_index)
    }
}
