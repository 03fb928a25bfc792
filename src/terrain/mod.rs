use std::fs;
use std::path::Path;

use tracing::info;

use crate::errors::MapError;
use crate::graph::{AdjacencyList, Graph};


const WALL: char = '#';
const START: char = 'I';
const GOAL: char = 'F';
const PATH_MARK: char = '*';

/// Up, down, left, right
const MOVES: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Cost of entering a cell of the given terrain type
fn entry_cost(symbol: char) -> Result<f64, MapError> {
    match symbol {
        'G' => Ok(1.0),           // ground
        'S' => Ok(3.0),           // sand
        'W' => Ok(5.0),           // water
        START | GOAL => Ok(0.0),  // endpoints add no cost
        other => Err(MapError::UnknownTerrain(other)),
    }
}


/// A rectangular terrain grid with exactly one start cell and one goal cell.
///
/// Cell (row, col) maps to vertex `row * cols + col`, so the grid doubles as
/// the vertex space of the graph built by [`TerrainMap::to_graph`].
#[derive(Debug, Clone)]
pub struct TerrainMap {
    grid: Vec<Vec<char>>,
    rows: usize,
    cols: usize,
    start: usize,
    goal: usize,
}

impl TerrainMap {
    /// Read and validate a map file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parse a map from text. Whitespace inside rows is stripped and blank
    /// lines are skipped; all remaining rows must have the same width.
    pub fn parse(text: &str) -> Result<Self, MapError> {
        let mut grid: Vec<Vec<char>> = Vec::new();
        for line in text.lines() {
            let cells: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if !cells.is_empty() {
                grid.push(cells);
            }
        }

        if grid.is_empty() {
            return Err(MapError::EmptyMap);
        }

        let rows = grid.len();
        let cols = grid[0].len();
        for (row, cells) in grid.iter().enumerate() {
            if cells.len() != cols {
                return Err(MapError::RaggedRow {
                    row,
                    found: cells.len(),
                    expected: cols,
                });
            }
        }

        let mut start = None;
        let mut goal = None;
        let mut starts = 0;
        let mut goals = 0;
        for (row, cells) in grid.iter().enumerate() {
            for (col, &cell) in cells.iter().enumerate() {
                if cell == START {
                    starts += 1;
                    start = Some(row * cols + col);
                } else if cell == GOAL {
                    goals += 1;
                    goal = Some(row * cols + col);
                }
            }
        }

        match (start, goal) {
            (Some(start), Some(goal)) if starts == 1 && goals == 1 => Ok(Self {
                grid,
                rows,
                cols,
                start,
                goal,
            }),
            _ => Err(MapError::BadEndpoints { starts, goals }),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Vertex index of the start cell
    pub fn start(&self) -> usize {
        self.start
    }

    /// Vertex index of the goal cell
    pub fn goal(&self) -> usize {
        self.goal
    }

    /// Build the movement graph: one vertex per cell, directed edges to the
    /// four orthogonal neighbors, weighted by the cost of entering the
    /// destination cell. Walls get no incident edges in either direction.
    pub fn to_graph(&self) -> Result<AdjacencyList<f64>, MapError> {
        let mut graph = AdjacencyList::new(self.rows * self.cols);

        for row in 0..self.rows {
            for col in 0..self.cols {
                if self.grid[row][col] == WALL {
                    continue;
                }
                let from = row * self.cols + col;

                for (row_step, col_step) in MOVES {
                    let next_row = row as isize + row_step;
                    let next_col = col as isize + col_step;
                    if next_row < 0
                        || next_col < 0
                        || next_row >= self.rows as isize
                        || next_col >= self.cols as isize
                    {
                        continue;
                    }

                    let (next_row, next_col) = (next_row as usize, next_col as usize);
                    let symbol = self.grid[next_row][next_col];
                    if symbol == WALL {
                        continue;
                    }
                    graph.add_edge(from, next_row * self.cols + next_col, entry_cost(symbol)?);
                }
            }
        }

        info!(
            rows = self.rows,
            cols = self.cols,
            order = graph.order(),
            size = graph.size(),
            "terrain graph built"
        );
        Ok(graph)
    }

    /// Copy of the map with the given vertex sequence marked '*', leaving
    /// the start and goal cells as they are
    pub fn mark_path(&self, path: &[usize]) -> Self {
        let mut marked = self.clone();
        for &vertex in path {
            let row = vertex / self.cols;
            let col = vertex % self.cols;
            let cell = &mut marked.grid[row][col];
            if *cell != START && *cell != GOAL {
                *cell = PATH_MARK;
            }
        }
        marked
    }

    /// Write the grid to a file, one row per line
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), MapError> {
        let mut text = String::with_capacity(self.rows * (self.cols + 1));
        for row in &self.grid {
            text.extend(row.iter());
            text.push('\n');
        }
        fs::write(path, text)?;
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::shortest_path::{dijkstra, reconstruct_path};

    const SMALL_MAP: &str = "\
I G S
# # G
G G F
";

    #[test]
    fn test_parse_locates_endpoints() {
        let map = TerrainMap::parse(SMALL_MAP).unwrap();
        assert_eq!((map.rows(), map.cols()), (3, 3));
        assert_eq!(map.start(), 0);
        assert_eq!(map.goal(), 8);
    }

    #[test]
    fn test_spaces_and_blank_lines_are_ignored() {
        let padded = "\n\nI  G\n\nGF\n";
        let map = TerrainMap::parse(padded).unwrap();
        assert_eq!((map.rows(), map.cols()), (2, 2));
    }

    #[test]
    fn test_empty_map_is_rejected() {
        assert!(matches!(TerrainMap::parse("\n  \n"), Err(MapError::EmptyMap)));
    }

    #[test]
    fn test_ragged_rows_are_rejected() {
        let result = TerrainMap::parse("IGG\nGF\n");
        assert!(matches!(
            result,
            Err(MapError::RaggedRow { row: 1, found: 2, expected: 3 })
        ));
    }

    #[test]
    fn test_endpoint_count_is_enforced() {
        assert!(matches!(
            TerrainMap::parse("IG\nGI\n"),
            Err(MapError::BadEndpoints { starts: 2, goals: 0 })
        ));
        assert!(matches!(
            TerrainMap::parse("GG\nGF\n"),
            Err(MapError::BadEndpoints { starts: 0, goals: 1 })
        ));
    }

    #[test]
    fn test_graph_routes_around_walls() {
        let map = TerrainMap::parse(SMALL_MAP).unwrap();
        let graph = map.to_graph().unwrap();

        // The wall row blocks the left side, forcing the sand detour:
        // I(0) -> G(1) -> S(2) -> G(5) -> F(8) entering costs 1 + 3 + 1 + 0
        let (distances, predecessors) = dijkstra(&graph, map.start()).unwrap();
        assert_eq!(distances[map.goal()], 5.0);
        assert_eq!(
            reconstruct_path(&predecessors, map.start(), map.goal()).unwrap(),
            vec![0, 1, 2, 5, 8]
        );

        // Walls have no incident edges
        assert_eq!(graph.degree(3), 0);
        assert!(!graph.has_edge(0, 3));
    }

    #[test]
    fn test_unknown_terrain_is_rejected_at_graph_build() {
        let map = TerrainMap::parse("IX\nGF\n").unwrap();
        assert!(matches!(map.to_graph(), Err(MapError::UnknownTerrain('X'))));
    }

    #[test]
    fn test_mark_path_spares_the_endpoints() {
        let map = TerrainMap::parse(SMALL_MAP).unwrap();
        let marked = map.mark_path(&[0, 1, 2, 5, 8]);

        assert_eq!(marked.grid[0], vec!['I', '*', '*']);
        assert_eq!(marked.grid[1], vec!['#', '#', '*']);
        assert_eq!(marked.grid[2], vec!['G', 'G', 'F']);
    }

    #[test]
    fn test_load_and_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let in_path = dir.path().join("map.txt");
        let out_path = dir.path().join("marked.txt");
        std::fs::write(&in_path, SMALL_MAP).unwrap();

        let map = TerrainMap::load(&in_path).unwrap();
        map.mark_path(&[1]).save(&out_path).unwrap();

        let written = std::fs::read_to_string(&out_path).unwrap();
        assert_eq!(written, "I*S\n##G\nGGF\n");
    }
}
