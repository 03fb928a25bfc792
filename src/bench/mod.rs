
mod report;

pub use report::{Reporter, fmt_cost};

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::collections::FxIndexMap;
use crate::errors::{MapError, ShortestPathError};
use crate::graph::AdjacencyList;
use crate::shortest_path::{bellman_ford, dijkstra, floyd_warshall};
use crate::terrain::TerrainMap;


/// The engines under comparison
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Dijkstra,
    BellmanFord,
    FloydWarshall,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [
        Algorithm::Dijkstra,
        Algorithm::BellmanFord,
        Algorithm::FloydWarshall,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "Dijkstra",
            Algorithm::BellmanFord => "Bellman-Ford",
            Algorithm::FloydWarshall => "Floyd-Warshall",
        }
    }

    /// Lowercase name for output file names
    pub fn slug(self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::BellmanFord => "bellman_ford",
            Algorithm::FloydWarshall => "floyd_warshall",
        }
    }
}


/// Outcome of one timed invocation
#[derive(Debug, Clone)]
pub enum RunOutcome {
    Finished { elapsed: Duration, cost: f64 },
    TimedOut,
    Failed(String),
}

/// Suite parameters: rounds per algorithm per map, and the per-invocation
/// wall-clock limit (None runs without one)
#[derive(Debug, Clone)]
pub struct BenchConfig {
    pub rounds: usize,
    pub timeout: Option<Duration>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            rounds: 10,
            timeout: Some(Duration::from_secs(300)),
        }
    }
}


fn run_once(
    algorithm: Algorithm,
    graph: &AdjacencyList<f64>,
    source: usize,
    target: usize,
) -> Result<(Duration, f64), ShortestPathError> {
    let started = Instant::now();
    let cost = match algorithm {
        Algorithm::Dijkstra => dijkstra(graph, source)?.0[target],
        Algorithm::BellmanFord => bellman_ford(graph, source)?.0[target],
        Algorithm::FloydWarshall => floyd_warshall(graph).0[source][target],
    };
    Ok((started.elapsed(), cost))
}

/// Run one invocation on a worker thread, giving up after the limit.
///
/// The engines expose no cancellation hook, so an expired worker cannot be
/// stopped - it is detached and left to finish against a disconnected
/// channel while the round is reported as timed out.
pub fn run_with_timeout(
    algorithm: Algorithm,
    graph: &Arc<AdjacencyList<f64>>,
    source: usize,
    target: usize,
    timeout: Option<Duration>,
) -> RunOutcome {
    let Some(limit) = timeout else {
        return match run_once(algorithm, graph, source, target) {
            Ok((elapsed, cost)) => RunOutcome::Finished { elapsed, cost },
            Err(error) => RunOutcome::Failed(error.to_string()),
        };
    };

    let (sender, receiver) = mpsc::channel();
    let worker_graph = Arc::clone(graph);
    let _detached = thread::spawn(move || {
        let outcome = run_once(algorithm, &worker_graph, source, target);
        let _ = sender.send(outcome);
    });

    match receiver.recv_timeout(limit) {
        Ok(Ok((elapsed, cost))) => RunOutcome::Finished { elapsed, cost },
        Ok(Err(error)) => RunOutcome::Failed(error.to_string()),
        Err(mpsc::RecvTimeoutError::Timeout) => {
            warn!(algorithm = algorithm.name(), ?limit, "invocation abandoned");
            RunOutcome::TimedOut
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => {
            RunOutcome::Failed("worker exited without a result".into())
        }
    }
}


/// Aggregated view of one algorithm's rounds on one map
#[derive(Debug, Clone)]
pub struct AlgorithmSummary {
    pub rounds: Vec<RunOutcome>,
}

/// Mean time and cost over finished rounds, or the terminal condition that
/// cut the rounds short
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Aggregate {
    Mean { time: Duration, cost: f64 },
    TimedOut,
    Failed,
    Empty,
}

impl AlgorithmSummary {
    pub fn aggregate(&self) -> Aggregate {
        if self.rounds.iter().any(|round| matches!(round, RunOutcome::TimedOut)) {
            return Aggregate::TimedOut;
        }
        if self.rounds.iter().any(|round| matches!(round, RunOutcome::Failed(_))) {
            return Aggregate::Failed;
        }

        let mut total_time = Duration::ZERO;
        let mut total_cost = 0.0;
        let mut finished = 0u32;
        let mut unreachable = false;
        for round in &self.rounds {
            if let RunOutcome::Finished { elapsed, cost } = round {
                total_time += *elapsed;
                total_cost += *cost;
                unreachable |= cost.is_infinite();
                finished += 1;
            }
        }

        if finished == 0 {
            return Aggregate::Empty;
        }
        Aggregate::Mean {
            time: total_time / finished,
            // A single unreachable round means there is no path at all
            cost: if unreachable {
                f64::INFINITY
            } else {
                total_cost / f64::from(finished)
            },
        }
    }
}

/// Repeat one algorithm on one map. A round that times out or fails ends
/// the series - it would not do better on the next try.
pub fn benchmark_algorithm(
    algorithm: Algorithm,
    graph: &Arc<AdjacencyList<f64>>,
    source: usize,
    target: usize,
    config: &BenchConfig,
) -> AlgorithmSummary {
    let mut rounds = Vec::with_capacity(config.rounds);
    for round in 0..config.rounds {
        let outcome = run_with_timeout(algorithm, graph, source, target, config.timeout);
        debug!(algorithm = algorithm.name(), round, ?outcome, "round finished");

        let terminal = !matches!(outcome, RunOutcome::Finished { .. });
        rounds.push(outcome);
        if terminal {
            break;
        }
    }
    AlgorithmSummary { rounds }
}

/// All `.txt` maps in a directory, lexicographically ordered for stable runs
pub fn list_maps(maps_dir: &Path) -> Result<Vec<PathBuf>, MapError> {
    let mut maps = Vec::new();
    for entry in std::fs::read_dir(maps_dir)? {
        let path = entry?.path();
        let is_map = path.is_file()
            && path
                .extension()
                .is_some_and(|extension| extension.eq_ignore_ascii_case("txt"));
        if is_map {
            maps.push(path);
        }
    }
    maps.sort();
    Ok(maps)
}

/// Benchmark every map in a directory and write the report through the
/// given reporter
pub fn run_suite(
    maps_dir: &Path,
    config: &BenchConfig,
    reporter: &mut Reporter,
) -> Result<(), MapError> {
    let maps = list_maps(maps_dir)?;
    if maps.is_empty() {
        reporter.line(&format!("no .txt maps found in {}", maps_dir.display()));
        return Ok(());
    }

    let mut comparison_rows = Vec::new();
    for map_path in &maps {
        let map_name = map_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| map_path.display().to_string());
        reporter.map_header(&map_name);

        // Loading and graph construction stay outside the measured time
        let map = TerrainMap::load(map_path)?;
        let graph = Arc::new(map.to_graph()?);

        let mut results: FxIndexMap<Algorithm, AlgorithmSummary> = FxIndexMap::default();
        for algorithm in Algorithm::ALL {
            reporter.line(&format!(
                "running {} ({} rounds)...",
                algorithm.name(),
                config.rounds
            ));
            let summary =
                benchmark_algorithm(algorithm, &graph, map.start(), map.goal(), config);
            reporter.rounds_table(algorithm, &summary);
            reporter.mean_line(algorithm, &summary);
            results.insert(algorithm, summary);
        }

        reporter.map_summary(&map_name, config.rounds, &results);
        comparison_rows.push(report::comparison_row(&map_name, &results));
    }

    reporter.comparison_table(&comparison_rows);
    reporter.flush();
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    fn line_graph(order: usize) -> Arc<AdjacencyList<f64>> {
        let mut graph = AdjacencyList::new(order);
        for vertex in 0..order - 1 {
            graph.add_edge(vertex, vertex + 1, 1.0);
        }
        Arc::new(graph)
    }

    #[test]
    fn test_run_without_timeout_finishes() {
        let graph = line_graph(5);
        for algorithm in Algorithm::ALL {
            match run_with_timeout(algorithm, &graph, 0, 4, None) {
                RunOutcome::Finished { cost, .. } => assert_eq!(cost, 4.0),
                other => panic!("expected a finished round, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_generous_timeout_still_finishes() {
        let graph = line_graph(5);
        let outcome =
            run_with_timeout(Algorithm::Dijkstra, &graph, 0, 4, Some(Duration::from_secs(60)));
        assert!(matches!(outcome, RunOutcome::Finished { .. }));
    }

    #[test]
    fn test_expired_worker_is_reported_as_timed_out() {
        // A cubic run over 500 vertices cannot beat a nanosecond budget
        let graph = line_graph(500);
        let outcome = run_with_timeout(
            Algorithm::FloydWarshall,
            &graph,
            0,
            499,
            Some(Duration::from_nanos(1)),
        );
        assert!(matches!(outcome, RunOutcome::TimedOut));
    }

    #[test]
    fn test_failed_round_carries_the_error() {
        let graph = line_graph(3);
        let outcome = run_with_timeout(Algorithm::Dijkstra, &graph, 9, 0, None);
        match outcome {
            RunOutcome::Failed(message) => assert!(message.contains("out of range")),
            other => panic!("expected a failed round, got {other:?}"),
        }
    }

    #[test]
    fn test_series_stops_at_the_first_terminal_round() {
        let graph = line_graph(3);
        let config = BenchConfig {
            rounds: 10,
            timeout: None,
        };
        // Out-of-range source fails every round; only the first one runs
        let summary = benchmark_algorithm(Algorithm::BellmanFord, &graph, 9, 0, &config);
        assert_eq!(summary.rounds.len(), 1);
        assert_eq!(summary.aggregate(), Aggregate::Failed);
    }

    #[test]
    fn test_aggregate_means_and_infinity_poisoning() {
        let summary = AlgorithmSummary {
            rounds: vec![
                RunOutcome::Finished { elapsed: Duration::from_secs(1), cost: 2.0 },
                RunOutcome::Finished { elapsed: Duration::from_secs(3), cost: 4.0 },
            ],
        };
        assert_eq!(
            summary.aggregate(),
            Aggregate::Mean { time: Duration::from_secs(2), cost: 3.0 }
        );

        let unreachable = AlgorithmSummary {
            rounds: vec![
                RunOutcome::Finished { elapsed: Duration::from_secs(1), cost: f64::INFINITY },
                RunOutcome::Finished { elapsed: Duration::from_secs(1), cost: 5.0 },
            ],
        };
        match unreachable.aggregate() {
            Aggregate::Mean { cost, .. } => assert!(cost.is_infinite()),
            other => panic!("expected a mean, got {other:?}"),
        }
    }

    #[test]
    fn test_aggregate_timeout_dominates() {
        let summary = AlgorithmSummary {
            rounds: vec![
                RunOutcome::Finished { elapsed: Duration::from_secs(1), cost: 2.0 },
                RunOutcome::TimedOut,
            ],
        };
        assert_eq!(summary.aggregate(), Aggregate::TimedOut);
        assert_eq!(AlgorithmSummary { rounds: vec![] }.aggregate(), Aggregate::Empty);
    }

    #[test]
    fn test_suite_reports_every_map_and_algorithm() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("small.txt"), "IG\nGF\n").unwrap();
        let log_path = dir.path().join("bench.log");

        let config = BenchConfig { rounds: 2, timeout: None };
        let mut reporter = Reporter::with_log(&log_path).unwrap();
        run_suite(dir.path(), &config, &mut reporter).unwrap();
        drop(reporter);

        let report = std::fs::read_to_string(&log_path).unwrap();
        assert!(report.contains("MAP: small.txt"));
        for algorithm in Algorithm::ALL {
            assert!(report.contains(algorithm.name()));
        }
        assert!(report.contains("COMPARISON"));
        // Both routes around the 2x2 grid cost one step onto ground
        assert!(report.contains("MEAN Dijkstra: time = "));
        assert!(report.contains("| cost = 1"));
    }

    #[test]
    fn test_list_maps_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.txt", "a.txt", "notes.md", "c.TXT"] {
            std::fs::write(dir.path().join(name), "IF\n").unwrap();
        }
        std::fs::create_dir(dir.path().join("sub.txt")).unwrap();

        let maps = list_maps(dir.path()).unwrap();
        let names: Vec<_> = maps
            .iter()
            .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "c.TXT"]);
    }
}
