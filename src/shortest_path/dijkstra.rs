use num_traits::Float;
use tracing::debug;

use crate::errors::ShortestPathError;
use crate::graph::Graph;
use super::{DistanceVector, PredecessorVector, check_source, single_source_state};


/// Single-source shortest paths by label selection (Dijkstra's algorithm)
/// https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm
///
/// Edge weights must be non-negative; this is not validated, and negative
/// weights silently produce unreliable distances. The open set is scanned
/// linearly for its minimum, O(N) per round and O(N^2) overall, with ties
/// going to the lowest vertex index so runs are reproducible.
pub fn dijkstra<W, G>(
    graph: &G,
    source: usize,
) -> Result<(DistanceVector<W>, PredecessorVector), ShortestPathError>
where
    W: Float,
    G: Graph<W>,
{
    let order = graph.order();
    check_source(source, order)?;

    let (mut distances, mut predecessors) = single_source_state::<W>(order, source);

    // Open and closed vertex sets partition [0, order). A vertex moves to
    // closed once its distance is final; unreachable vertices get selected
    // eventually too, carrying their infinite distance.
    let mut open = vec![true; order];
    let mut remaining = order;

    while remaining > 0 {
        let mut current = usize::MAX;
        for vertex in 0..order {
            if open[vertex] && (current == usize::MAX || distances[vertex] < distances[current]) {
                current = vertex;
            }
        }

        open[current] = false;
        remaining -= 1;

        for (neighbor, weight) in graph.neighbors(current) {
            if !open[neighbor] {
                continue;
            }
            let candidate = distances[current] + weight;
            if candidate < distances[neighbor] {
                distances[neighbor] = candidate;
                predecessors[neighbor] = Some(current);
            }
        }
    }

    debug!(source, order, "label selection settled all vertices");
    Ok((distances, predecessors))
}
