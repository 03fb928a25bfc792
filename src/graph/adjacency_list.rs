use num_traits::Float;

use super::Graph;


/// Sparse adjacency list representation
/// O(N+E) memory, O(degree) edge test and neighbor scan
///
/// `add_edge` always appends: inserting the same pair twice stores parallel
/// edges, and both count towards size and degree.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjacencyList<W> {
    size: usize,
    lists: Vec<Vec<(usize, W)>>,
}

impl<W: Float> AdjacencyList<W> {
    /// Create an edgeless graph with a fixed number of vertices
    pub fn new(order: usize) -> Self {
        Self {
            size: 0,
            lists: vec![Vec::new(); order],
        }
    }
}

impl<W: Float> Graph<W> for AdjacencyList<W> {
    fn order(&self) -> usize {
        self.lists.len()
    }

    fn size(&self) -> usize {
        self.size
    }

    fn add_edge(&mut self, from: usize, to: usize, weight: W) {
        self.lists[from].push((to, weight));
        self.size += 1;
    }

    fn has_edge(&self, from: usize, to: usize) -> bool {
        self.lists[from].iter().any(|&(vertex, _)| vertex == to)
    }

    fn neighbors(&self, vertex: usize) -> impl Iterator<Item = (usize, W)> + '_ {
        self.lists[vertex].iter().copied()
    }

    fn degree(&self, vertex: usize) -> usize {
        self.lists[vertex].len()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_edges() {
        let mut graph: AdjacencyList<f64> = AdjacencyList::new(3);
        graph.add_edge(0, 1, 1.5);
        graph.add_edge(0, 2, 2.5);

        assert_eq!(graph.order(), 3);
        assert_eq!(graph.size(), 2);
        assert_eq!(graph.degree(0), 2);
        assert!(graph.has_edge(0, 1));
        assert!(!graph.has_edge(1, 0));
        assert_eq!(graph.neighbors(0).collect::<Vec<_>>(), vec![(1, 1.5), (2, 2.5)]);
    }

    #[test]
    fn test_repeated_insertion_creates_parallel_edges() {
        let mut graph: AdjacencyList<f64> = AdjacencyList::new(2);
        graph.add_edge(0, 1, 1.0);
        graph.add_edge(0, 1, 9.0);

        // Both insertions are kept and inflate size and degree
        assert_eq!(graph.size(), 2);
        assert_eq!(graph.degree(0), 2);
        assert_eq!(graph.neighbors(0).collect::<Vec<_>>(), vec![(1, 1.0), (1, 9.0)]);
    }

    #[test]
    fn test_zero_weight_edges_are_representable() {
        // Unlike the dense representation, a zero weight is a real edge here
        let mut graph: AdjacencyList<f64> = AdjacencyList::new(2);
        graph.add_edge(0, 1, 0.0);

        assert!(graph.has_edge(0, 1));
        assert_eq!(graph.size(), 1);
    }

    #[test]
    fn test_density() {
        let mut graph: AdjacencyList<f64> = AdjacencyList::new(4);
        graph.add_edge(0, 1, 1.0);
        graph.add_edge(1, 2, 1.0);
        graph.add_edge(2, 3, 1.0);

        // 3 of the 4 * 3 possible directed edges
        assert!((graph.density() - 0.25).abs() < 1e-12);
    }
}
