use num_traits::Float;
use tracing::debug;

use crate::errors::ShortestPathError;
use crate::graph::Graph;
use super::{DistanceVector, PredecessorVector, check_source, single_source_state};


/// Single-source shortest paths by edge relaxation (Bellman-Ford)
/// https://en.wikipedia.org/wiki/Bellman%E2%80%93Ford_algorithm
///
/// Tolerates negative edge weights. Performs no negative-cycle detection:
/// with a reachable negative cycle the result is simply whatever the last
/// pass produced, with no inconsistency signal.
pub fn bellman_ford<W, G>(
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

    // A shortest path uses at most order - 1 edges, so order - 1 full passes
    // over the edge set suffice; a pass that relaxes nothing ends the run.
    for pass in 1..order {
        let mut updated = false;

        for from in 0..order {
            if distances[from].is_infinite() {
                continue;
            }
            for (to, weight) in graph.neighbors(from) {
                let candidate = distances[from] + weight;
                if candidate < distances[to] {
                    distances[to] = candidate;
                    predecessors[to] = Some(from);
                    updated = true;
                }
            }
        }

        if !updated {
            debug!(source, pass, "relaxation reached a fixed point early");
            break;
        }
    }

    Ok((distances, predecessors))
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::AdjacencyList;

    #[test]
    fn test_matches_hand_computed_distances() {
        let mut graph: AdjacencyList<f64> = AdjacencyList::new(4);
        graph.add_edge(0, 1, 1.0);
        graph.add_edge(1, 2, 1.0);
        graph.add_edge(0, 2, 5.0);
        graph.add_edge(2, 3, 1.0);

        let (distances, predecessors) = bellman_ford(&graph, 0).unwrap();
        assert_eq!(distances, vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(predecessors, vec![Some(0), Some(0), Some(1), Some(2)]);
    }

    #[test]
    fn test_negative_edge_improves_a_longer_route() {
        // The direct edge 0 -> 2 costs 5; going 0 -> 1 -> 2 with the
        // negative edge costs 0. Label selection is documented as
        // unreliable here; relaxation must find the improvement.
        let mut graph: AdjacencyList<f64> = AdjacencyList::new(3);
        graph.add_edge(0, 2, 5.0);
        graph.add_edge(0, 1, 2.0);
        graph.add_edge(1, 2, -2.0);

        let (distances, predecessors) = bellman_ford(&graph, 0).unwrap();
        assert_eq!(distances[2], 0.0);
        assert_eq!(predecessors[2], Some(1));
    }

    #[test]
    fn test_unreached_vertices_stay_infinite() {
        let mut graph: AdjacencyList<f64> = AdjacencyList::new(3);
        graph.add_edge(1, 2, 1.0);

        let (distances, predecessors) = bellman_ford(&graph, 0).unwrap();
        assert_eq!(distances[0], 0.0);
        assert!(distances[1].is_infinite());
        assert!(distances[2].is_infinite());
        assert_eq!(predecessors[1], None);
    }

    #[test]
    fn test_source_out_of_range_fails() {
        let graph: AdjacencyList<f64> = AdjacencyList::new(2);
        assert!(matches!(
            bellman_ford(&graph, 7),
            Err(ShortestPathError::SourceOutOfRange { vertex: 7, order: 2 })
        ));
    }

    #[test]
    fn test_long_chain_needs_every_pass() {
        // Edges run against the ascending scan order, so each pass can only
        // relax one further hop of the chain; the result must still settle
        // within the order - 1 pass budget.
        let mut graph: AdjacencyList<f64> = AdjacencyList::new(5);
        graph.add_edge(4, 3, 1.0);
        graph.add_edge(3, 2, 1.0);
        graph.add_edge(2, 1, 1.0);
        graph.add_edge(1, 0, 1.0);

        let (distances, _) = bellman_ford(&graph, 4).unwrap();
        assert_eq!(distances, vec![4.0, 3.0, 2.0, 1.0, 0.0]);
    }
}
