use num_traits::Float;
use tracing::debug;

use crate::graph::Graph;
use super::{DistanceMatrix, PredecessorMatrix};


/// All-pairs shortest paths by dynamic programming (Floyd-Warshall)
/// https://en.wikipedia.org/wiki/Floyd%E2%80%93Warshall_algorithm
///
/// O(N^3) time, O(N^2) space. The predecessor update copies the entry of
/// the (k, j) pair, keeping every row self-consistent for backward walks
/// that stay on one source row. A negative diagonal after convergence
/// would mean a negative cycle; no such check is made.
pub fn floyd_warshall<W, G>(graph: &G) -> (DistanceMatrix<W>, PredecessorMatrix)
where
    W: Float,
    G: Graph<W>,
{
    let order = graph.order();
    let mut distances: DistanceMatrix<W> = vec![vec![W::infinity(); order]; order];
    let mut predecessors: PredecessorMatrix = vec![vec![None; order]; order];

    for vertex in 0..order {
        distances[vertex][vertex] = W::zero();
        predecessors[vertex][vertex] = Some(vertex);
    }

    for from in 0..order {
        for (to, weight) in graph.neighbors(from) {
            // Self loops never shorten a walk; parallel edges collapse to
            // the cheapest one.
            if to != from && weight < distances[from][to] {
                distances[from][to] = weight;
                predecessors[from][to] = Some(from);
            }
        }
    }

    for k in 0..order {
        for i in 0..order {
            let through_k = distances[i][k];
            if through_k.is_infinite() {
                continue;
            }
            for j in 0..order {
                let candidate = through_k + distances[k][j];
                if candidate < distances[i][j] {
                    distances[i][j] = candidate;
                    // j is now reached through k, so it inherits the
                    // predecessor k's row already holds for j
                    predecessors[i][j] = predecessors[k][j];
                }
            }
        }
    }

    debug!(order, "dynamic program converged");
    (distances, predecessors)
}
