use std::io;

use thiserror::Error;


/// Errors surfaced by the shortest path engines and path reconstruction
#[derive(Debug, Error)]
pub enum ShortestPathError {
    /// The requested source vertex does not exist on the graph
    #[error("source vertex {vertex} is out of range for a graph of order {order}")]
    SourceOutOfRange { vertex: usize, order: usize },

    /// The predecessor data contains a cycle or a broken chain.
    /// Distinct from ordinary unreachability, which reconstruction reports
    /// as an empty path.
    #[error("predecessor walk from vertex {target} did not reach the source within {max_steps} steps")]
    InconsistentPredecessors { target: usize, max_steps: usize },
}

/// Errors raised while loading, validating or writing terrain maps
#[derive(Debug, Error)]
pub enum MapError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("map is empty or contains no usable rows")]
    EmptyMap,

    #[error("map row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("unknown terrain symbol '{0}'")]
    UnknownTerrain(char),

    #[error("map must contain exactly one 'I' and one 'F' (found {starts} and {goals})")]
    BadEndpoints { starts: usize, goals: usize },
}
