
mod adjacency_list;
mod adjacency_matrix;

pub use adjacency_list::AdjacencyList;
pub use adjacency_matrix::AdjacencyMatrix;

use num_traits::Float;


/// Capability set shared by the graph representations.
///
/// Vertices are integers in `[0, order)`; edges are directed and carry a
/// floating point weight. Vertex arguments must be in range - indexing
/// panics otherwise.
pub trait Graph<W: Float> {
    /// Number of vertices
    fn order(&self) -> usize;

    /// Number of edges
    fn size(&self) -> usize;

    /// Insert the directed edge `from -> to` with the given weight
    fn add_edge(&mut self, from: usize, to: usize, weight: W);

    /// Whether the directed edge `from -> to` exists
    fn has_edge(&self, from: usize, to: usize) -> bool;

    /// Outgoing `(neighbor, weight)` pairs of a vertex
    fn neighbors(&self, vertex: usize) -> impl Iterator<Item = (usize, W)> + '_;

    /// Out-degree of a vertex
    fn degree(&self, vertex: usize) -> usize;

    /// Ratio of edges to the N*(N-1) maximum of a directed graph.
    /// Not a number for graphs with fewer than two vertices - callers
    /// must guard the denominator themselves.
    fn density(&self) -> f64 {
        let order = self.order();
        self.size() as f64 / (order * order.saturating_sub(1)) as f64
    }
}
