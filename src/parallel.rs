//! Building many mazes at once.
//!
//! Each maze is still generated on a single thread; rayon only spreads
//! independent builds across the pool.

use crate::{
    error::Result,
    graph::NodeId,
    maze::{Maze, MazeBuilder},
};
use rayon::prelude::*;

/// Build `count` mazes of the same size in parallel.
///
/// Maze `i` is seeded from `seed` mixed with `i`, so the whole batch is
/// reproducible and the mazes differ from each other.
pub fn build_mazes<N: NodeId>(
    count: usize,
    rows: usize,
    columns: usize,
    seed: [u8; 32],
) -> Result<Vec<Maze<N>>> {
    log::debug!(
        "building {count} mazes of {rows}x{columns} on {} threads",
        rayon::current_num_threads()
    );

    (0..count)
        .into_par_iter()
        .map(|i| {
            MazeBuilder::new(rows, columns)
                .seed(batch_seed(seed, i))
                .build()
        })
        .collect()
}

#[inline]
fn batch_seed(seed: [u8; 32], i: usize) -> [u8; 32] {
    let mut seed = seed;
    for (byte, x) in seed.iter_mut().zip((i as u64).to_le_bytes()) {
        *byte ^= x;
    }
    seed
}
