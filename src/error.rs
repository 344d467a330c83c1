use thiserror::Error;

/// Errors returned when configuring a maze or a game session.
///
/// Out-of-range vertex indices are not reported here; they are programming
/// errors and panic at the call site.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("grid must have at least one row and one column, got {rows}x{columns}")]
    EmptyGrid { rows: usize, columns: usize },

    #[error("grid has {nodes} cells but the node id type holds at most {max}; use `u32` node ids")]
    TooManyNodes { nodes: usize, max: usize },

    #[error("invalid direction: {0:?}")]
    InvalidDirection(String),

    #[error("cannot place {requested} artifacts, only {available} free cells")]
    TooManyArtifacts { requested: usize, available: usize },
}

pub type Result<T> = std::result::Result<T, MazeError>;
