//! Game session on top of a [Maze].
//!
//! The player starts at the maze's start cell and has to reach the end cell
//! before the countdown runs out, optionally picking up artifacts on the way.
//! Moves only succeed through open passages.
//!
//! Rendering, input decoding and timer display are left to the caller; the
//! session only tracks positions, collected artifacts and the remaining time.
//!
//! ```
//! use prim_maze::{game::{GameConfig, Session}, Maze};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let maze = Maze::<u16>::demo();
//! let config = GameConfig { artifacts: 0, ..GameConfig::default() };
//! let mut session = Session::new(maze, config, &mut StdRng::seed_from_u64(0)).unwrap();
//!
//! let grid = session.maze().grid();
//! for pair in session.maze().solution().windows(2) {
//!     let direction = grid.direction_between(pair[0] as usize, pair[1] as usize).unwrap();
//!     session.attempt_move(direction);
//! }
//! assert!(session.is_won());
//! ```

use crate::{
    error::{MazeError, Result},
    graph::NodeId,
    grid::{Direction, Grid},
    maze::Maze,
};
use log::{debug, info};
use rand::{seq::SliceRandom, RngCore};
use std::time::Duration;

/// Anything that occupies a single cell of the grid.
pub trait Positioned {
    /// Flat row-major index of the occupied cell.
    fn index(&self) -> usize;

    #[inline]
    fn coords(&self, grid: &Grid) -> (usize, usize) {
        grid.coords(self.index())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player {
    index: usize,
    collected: usize,
}

impl Player {
    /// Number of artifacts picked up so far.
    #[inline]
    pub fn collected(&self) -> usize {
        self.collected
    }
}

impl Positioned for Player {
    #[inline]
    fn index(&self) -> usize {
        self.index
    }
}

/// A bonus item waiting to be collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Artifact {
    index: usize,
}

impl Positioned for Artifact {
    #[inline]
    fn index(&self) -> usize {
        self.index
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Number of artifacts spawned on random cells other than start and end.
    pub artifacts: usize,

    /// Cells farther than this (chessboard distance) from the player are hidden.
    /// `None` shows the whole maze.
    pub visibility_radius: Option<usize>,

    pub time_limit: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            artifacts: 3,
            visibility_radius: None,
            time_limit: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Playing,
    Won,
    TimedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// A wall or the grid boundary is in the way; the player did not move.
    Blocked,
    Moved { from: usize, to: usize },
    /// Moved onto an artifact and picked it up.
    Collected { from: usize, to: usize },
    /// Moved onto the end cell.
    Won { from: usize, to: usize },
    /// The session is over; no more moves are accepted.
    Finished,
}

#[derive(Debug, Clone)]
pub struct Session<N: NodeId = u16> {
    maze: Maze<N>,
    config: GameConfig,
    player: Player,
    artifacts: Vec<Artifact>,
    remaining: Duration,
    status: Status,
}

impl<N: NodeId> Session<N> {
    /// Place the player on the start cell and spawn artifacts.
    ///
    /// Fails if there are fewer free cells than requested artifacts.
    pub fn new<R: RngCore>(maze: Maze<N>, config: GameConfig, rng: &mut R) -> Result<Self> {
        let endpoints = maze.endpoints();
        let (start, end) = (endpoints.start.as_usize(), endpoints.end.as_usize());

        let free = (0..maze.grid().len())
            .filter(|&i| i != start && i != end)
            .collect::<Vec<_>>();

        if config.artifacts > free.len() {
            return Err(MazeError::TooManyArtifacts {
                requested: config.artifacts,
                available: free.len(),
            });
        }

        let artifacts = free
            .choose_multiple(rng, config.artifacts)
            .map(|&index| Artifact { index })
            .collect::<Vec<_>>();

        debug!(
            "session: start {start}, end {end}, {} artifacts, {:?} to play",
            artifacts.len(),
            config.time_limit
        );

        // a single-cell maze is solved on arrival
        let status = if start == end {
            Status::Won
        } else if config.time_limit.is_zero() {
            Status::TimedOut
        } else {
            Status::Playing
        };

        Ok(Self {
            remaining: config.time_limit,
            maze,
            config,
            player: Player {
                index: start,
                collected: 0,
            },
            artifacts,
            status,
        })
    }

    /// Try to move the player one cell in `direction`.
    pub fn attempt_move(&mut self, direction: Direction) -> MoveOutcome {
        if self.status != Status::Playing {
            return MoveOutcome::Finished;
        }

        let from = self.player.index;
        let Some(to) = self.maze.can_move(N::from_usize(from), direction) else {
            return MoveOutcome::Blocked;
        };
        let to = to.as_usize();

        self.player.index = to;

        if to == self.maze.endpoints().end.as_usize() {
            self.status = Status::Won;
            info!(
                "maze solved with {:?} left, {} artifacts collected",
                self.remaining, self.player.collected
            );
            return MoveOutcome::Won { from, to };
        }

        if let Some(i) = self.artifacts.iter().position(|a| a.index == to) {
            self.artifacts.swap_remove(i);
            self.player.collected += 1;
            return MoveOutcome::Collected { from, to };
        }

        MoveOutcome::Moved { from, to }
    }

    /// Same as [attempt_move](Self::attempt_move) for a direction name;
    /// unknown names are treated as blocked moves.
    pub fn attempt_move_named(&mut self, direction: &str) -> MoveOutcome {
        match direction.parse() {
            Ok(direction) => self.attempt_move(direction),
            Err(_) if self.status != Status::Playing => MoveOutcome::Finished,
            Err(_) => MoveOutcome::Blocked,
        }
    }

    /// Advance the countdown by `elapsed`.
    pub fn tick(&mut self, elapsed: Duration) -> Status {
        if self.status == Status::Playing {
            self.remaining = self.remaining.saturating_sub(elapsed);

            if self.remaining.is_zero() {
                self.status = Status::TimedOut;
                info!(
                    "time is up at cell {}, {} artifacts collected",
                    self.player.index, self.player.collected
                );
            }
        }

        self.status
    }

    /// Check if `index` is within the visibility radius of the player.
    ///
    /// Panics if `index` is outside the grid.
    pub fn is_visible(&self, index: usize) -> bool {
        let grid = self.maze.grid();
        assert!(
            grid.contains(index),
            "index {index} is outside a {}x{} grid",
            grid.rows(),
            grid.columns()
        );

        match self.config.visibility_radius {
            Some(radius) => grid.chebyshev_distance(self.player.index, index) <= radius,
            None => true,
        }
    }

    /// All cells currently visible to the player, in row-major order.
    pub fn visible_cells(&self) -> Vec<usize> {
        (0..self.maze.grid().len())
            .filter(|&i| self.is_visible(i))
            .collect()
    }

    #[inline]
    pub fn maze(&self) -> &Maze<N> {
        &self.maze
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[inline]
    pub fn player(&self) -> &Player {
        &self.player
    }

    #[inline]
    pub fn collected(&self) -> usize {
        self.player.collected
    }

    /// Artifacts not collected yet.
    #[inline]
    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    #[inline]
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    #[inline]
    pub fn is_won(&self) -> bool {
        self.status == Status::Won
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn session(config: GameConfig) -> Session<u16> {
        Session::new(Maze::demo(), config, &mut StdRng::seed_from_u64(5)).unwrap()
    }

    fn walk_solution(session: &mut Session<u16>) -> Vec<MoveOutcome> {
        let grid = session.maze().grid();
        let solution = session.maze().solution();

        solution
            .windows(2)
            .map(|pair| {
                let direction = grid
                    .direction_between(pair[0] as usize, pair[1] as usize)
                    .unwrap();
                session.attempt_move(direction)
            })
            .collect()
    }

    #[test]
    fn test_starts_at_start() {
        let session = session(GameConfig::default());
        let endpoints = session.maze().endpoints();

        assert_eq!(session.player().index(), endpoints.start as usize);
        assert_eq!(session.status(), Status::Playing);
        assert_eq!(session.remaining(), Duration::from_secs(60));
    }

    #[test]
    fn test_artifacts_avoid_endpoints() {
        let config = GameConfig {
            artifacts: 7,
            ..GameConfig::default()
        };
        let session = session(config);
        let endpoints = session.maze().endpoints();

        let mut cells = session
            .artifacts()
            .iter()
            .map(Positioned::index)
            .collect::<Vec<_>>();
        cells.sort();
        cells.dedup();

        assert_eq!(cells.len(), 7);
        assert!(!cells.contains(&(endpoints.start as usize)));
        assert!(!cells.contains(&(endpoints.end as usize)));
    }

    #[test]
    fn test_too_many_artifacts() {
        let config = GameConfig {
            artifacts: 8,
            ..GameConfig::default()
        };
        let err = Session::new(Maze::<u16>::demo(), config, &mut StdRng::seed_from_u64(0))
            .unwrap_err();

        assert_eq!(
            err,
            MazeError::TooManyArtifacts {
                requested: 8,
                available: 7
            }
        );
    }

    #[test]
    fn test_walls_block_moves() {
        let mut session = session(GameConfig::default());
        let start = session.player().index();
        let grid = session.maze().grid();

        for direction in Direction::ALL {
            let target = grid.neighbor_index(start, direction);
            let open = target.map_or(false, |t| {
                session.maze().is_neighbor(start as u16, t as u16)
            });

            if !open {
                assert_eq!(session.attempt_move(direction), MoveOutcome::Blocked);
                assert_eq!(session.player().index(), start);
            }
        }

        assert_eq!(session.attempt_move_named("sideways"), MoveOutcome::Blocked);
    }

    #[test]
    fn test_reaching_end_wins() {
        let mut session = session(GameConfig {
            artifacts: 0,
            ..GameConfig::default()
        });

        let outcomes = walk_solution(&mut session);
        let end = session.maze().endpoints().end as usize;

        assert!(matches!(outcomes.last(), Some(&MoveOutcome::Won { to, .. }) if to == end));
        assert!(outcomes[..outcomes.len() - 1]
            .iter()
            .all(|o| matches!(o, MoveOutcome::Moved { .. })));
        assert!(session.is_won());
        assert_eq!(session.attempt_move(Direction::Up), MoveOutcome::Finished);
    }

    #[test]
    fn test_collects_each_artifact_once() {
        let mut session = session(GameConfig {
            artifacts: 7,
            ..GameConfig::default()
        });

        // every cell but start and end holds an artifact,
        // so each intermediate step of the solution collects one
        let outcomes = walk_solution(&mut session);
        let collected = outcomes
            .iter()
            .filter(|o| matches!(o, MoveOutcome::Collected { .. }))
            .count();

        assert_eq!(collected, 3);
        assert_eq!(session.collected(), 3);
        assert_eq!(session.artifacts().len(), 4);
        assert!(session.is_won());
    }

    #[test]
    fn test_timer_runs_out() {
        let mut session = session(GameConfig {
            time_limit: Duration::from_secs(2),
            ..GameConfig::default()
        });

        assert_eq!(session.tick(Duration::from_millis(1500)), Status::Playing);
        assert_eq!(session.remaining(), Duration::from_millis(500));
        assert_eq!(session.tick(Duration::from_secs(1)), Status::TimedOut);
        assert_eq!(session.remaining(), Duration::ZERO);

        assert_eq!(session.attempt_move(Direction::Down), MoveOutcome::Finished);
        assert_eq!(session.attempt_move_named("left"), MoveOutcome::Finished);
    }

    #[test]
    fn test_timer_stops_after_win() {
        let mut session = session(GameConfig {
            artifacts: 0,
            ..GameConfig::default()
        });
        walk_solution(&mut session);

        assert_eq!(session.tick(Duration::from_secs(120)), Status::Won);
        assert_eq!(session.remaining(), Duration::from_secs(60));
    }

    #[test]
    fn test_visibility_radius() {
        let maze = crate::maze::build_maze_from_seed::<u16>(5, 5, [1; 32]).unwrap();
        let config = GameConfig {
            artifacts: 0,
            visibility_radius: Some(1),
            ..GameConfig::default()
        };
        let session = Session::new(maze, config, &mut StdRng::seed_from_u64(0)).unwrap();

        let grid = session.maze().grid();
        let player = session.player().index();
        let visible = session.visible_cells();

        assert!(visible.contains(&player));
        assert!(visible.len() <= 9);
        for i in visible {
            assert!(grid.chebyshev_distance(player, i) <= 1);
        }

        let unlimited = Session::new(
            session.maze().clone(),
            GameConfig {
                visibility_radius: None,
                ..session.config().clone()
            },
            &mut StdRng::seed_from_u64(0),
        )
        .unwrap();
        assert_eq!(unlimited.visible_cells().len(), 25);
    }

    #[test]
    fn test_zero_time_limit_starts_timed_out() {
        let mut session = session(GameConfig {
            time_limit: Duration::ZERO,
            ..GameConfig::default()
        });

        assert_eq!(session.status(), Status::TimedOut);
        for direction in Direction::ALL {
            assert_eq!(session.attempt_move(direction), MoveOutcome::Finished);
        }
        assert_eq!(
            session.player().index(),
            session.maze().endpoints().start as usize
        );
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_is_visible_out_of_range_panics() {
        let session = session(GameConfig::default());
        session.is_visible(99);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_is_visible_out_of_range_panics_with_radius() {
        let session = session(GameConfig {
            visibility_radius: Some(2),
            ..GameConfig::default()
        });
        session.is_visible(9);
    }

    #[test]
    fn test_positioned_coords() {
        let session = session(GameConfig::default());
        let grid = session.maze().grid();
        let player = session.player();

        assert_eq!(
            grid.index(player.coords(&grid).0, player.coords(&grid).1),
            player.index()
        );
    }
}
