
mod bellman_ford;
mod dijkstra;
mod floyd_warshall;
mod reconstruct;

pub use bellman_ford::bellman_ford;
pub use dijkstra::dijkstra;
pub use floyd_warshall::floyd_warshall;
pub use reconstruct::{reconstruct_path, reconstruct_path_all_pairs};

use num_traits::Float;

use crate::errors::ShortestPathError;


/// Distance from the source per vertex; unreached vertices stay at +infinity
pub type DistanceVector<W> = Vec<W>;

/// prev[v] is the vertex right before v on its shortest path from the source.
/// The source points at itself; None marks a vertex the search never reached.
pub type PredecessorVector = Vec<Option<usize>>;

/// distance[i][j] is the shortest distance from i to j
pub type DistanceMatrix<W> = Vec<Vec<W>>;

/// prev[i][j] is the vertex right before j on the shortest path from i
pub type PredecessorMatrix = Vec<Vec<Option<usize>>>;


/// Single-source searches fail fast on a source outside [0, order)
pub(crate) fn check_source(source: usize, order: usize) -> Result<(), ShortestPathError> {
    if source >= order {
        return Err(ShortestPathError::SourceOutOfRange { vertex: source, order });
    }
    Ok(())
}

/// Fresh distance/predecessor pair: every distance +infinity except the
/// source at zero, every predecessor None except the source at itself.
pub(crate) fn single_source_state<W: Float>(
    order: usize,
    source: usize,
) -> (DistanceVector<W>, PredecessorVector) {
    let mut distances = vec![W::infinity(); order];
    let mut predecessors: PredecessorVector = vec![None; order];
    distances[source] = W::zero();
    predecessors[source] = Some(source);
    (distances, predecessors)
}
