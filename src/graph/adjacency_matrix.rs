use num_traits::Float;

use super::Graph;


/// Dense adjacency matrix representation
/// O(N^2) memory, O(1) edge test, O(N) neighbor scan
///
/// A zero weight doubles as the "no edge" sentinel, so this representation
/// cannot store zero-weight edges.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjacencyMatrix<W> {
    order: usize,
    size: usize,
    degrees: Vec<usize>,
    weights: Vec<W>, // row-major, order * order entries
}

impl<W: Float> AdjacencyMatrix<W> {
    /// Create an edgeless graph with a fixed number of vertices
    pub fn new(order: usize) -> Self {
        Self {
            order,
            size: 0,
            degrees: vec![0; order],
            weights: vec![W::zero(); order * order],
        }
    }

    #[inline]
    fn index(&self, from: usize, to: usize) -> usize {
        assert!(from < self.order && to < self.order);
        from * self.order + to
    }
}

impl<W: Float> Graph<W> for AdjacencyMatrix<W> {
    fn order(&self) -> usize {
        self.order
    }

    fn size(&self) -> usize {
        self.size
    }

    /// The first insertion of a pair counts towards size and degree;
    /// repeated insertion only overwrites the stored weight.
    fn add_edge(&mut self, from: usize, to: usize, weight: W) {
        let index = self.index(from, to);
        if self.weights[index] == W::zero() {
            self.size += 1;
            self.degrees[from] += 1;
        }
        self.weights[index] = weight;
    }

    fn has_edge(&self, from: usize, to: usize) -> bool {
        self.weights[self.index(from, to)] != W::zero()
    }

    fn neighbors(&self, vertex: usize) -> impl Iterator<Item = (usize, W)> + '_ {
        let row = &self.weights[vertex * self.order..(vertex + 1) * self.order];
        row.iter()
            .enumerate()
            .filter(|(_, weight)| **weight != W::zero())
            .map(|(to, weight)| (to, *weight))
    }

    fn degree(&self, vertex: usize) -> usize {
        self.degrees[vertex]
    }
}
