use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use wayfinder::bench::{self, Algorithm, BenchConfig, Reporter, fmt_cost};
use wayfinder::shortest_path::{
    bellman_ford, dijkstra, floyd_warshall, reconstruct_path, reconstruct_path_all_pairs,
};
use wayfinder::social::{self, SocialConfig};
use wayfinder::terrain::TerrainMap;


#[derive(Parser)]
#[command(name = "wayfinder", version, about = "Shortest path engines over terrain maps and social networks")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Route a terrain map with every engine and write marked copies
    Route {
        /// Map file (text grid)
        map: PathBuf,

        /// Directory for the marked output maps
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Benchmark every map in a directory
    Bench {
        maps_dir: PathBuf,

        /// Rounds per algorithm per map
        #[arg(long, default_value_t = 10)]
        rounds: usize,

        /// Wall-clock limit per invocation, in seconds
        #[arg(long, default_value_t = 300, conflicts_with = "no_timeout")]
        timeout_secs: u64,

        /// Run without any time limit
        #[arg(long)]
        no_timeout: bool,

        /// Mirror the report into this file
        #[arg(long)]
        log: Option<PathBuf>,
    },

    /// Generate a synthetic social network and compare friction-optimal
    /// routing against hop-optimal routing
    Social {
        #[arg(long, default_value_t = 4000)]
        vertices: usize,

        #[arg(long, default_value_t = 4)]
        communities: usize,

        #[arg(long, default_value_t = 42)]
        seed: u64,

        #[arg(long, default_value_t = 0)]
        source: usize,

        /// Defaults to the highest vertex index
        #[arg(long)]
        target: Option<usize>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Route { map, out_dir } => route(&map, &out_dir),
        Command::Bench { maps_dir, rounds, timeout_secs, no_timeout, log } => {
            run_bench(&maps_dir, rounds, timeout_secs, no_timeout, log.as_deref())
        }
        Command::Social { vertices, communities, seed, source, target } => {
            compare_social_routes(vertices, communities, seed, source, target)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

/// Run all three engines over one map, reporting cost and wall time and
/// writing a marked map per engine
fn route(map_path: &Path, out_dir: &Path) -> Result<(), Box<dyn Error>> {
    let map = TerrainMap::load(map_path)?;
    let graph = map.to_graph()?;

    for algorithm in Algorithm::ALL {
        let started = Instant::now();
        let (cost, path) = match algorithm {
            Algorithm::Dijkstra => {
                let (distances, predecessors) = dijkstra(&graph, map.start())?;
                (
                    distances[map.goal()],
                    reconstruct_path(&predecessors, map.start(), map.goal())?,
                )
            }
            Algorithm::BellmanFord => {
                let (distances, predecessors) = bellman_ford(&graph, map.start())?;
                (
                    distances[map.goal()],
                    reconstruct_path(&predecessors, map.start(), map.goal())?,
                )
            }
            Algorithm::FloydWarshall => {
                let (distances, predecessors) = floyd_warshall(&graph);
                (
                    distances[map.start()][map.goal()],
                    reconstruct_path_all_pairs(&predecessors, map.start(), map.goal())?,
                )
            }
        };
        let elapsed = started.elapsed();

        if cost.is_infinite() {
            println!("{}: no path between I and F", algorithm.name());
            continue;
        }

        let out_path = out_dir.join(format!("route_{}.txt", algorithm.slug()));
        map.mark_path(&path).save(&out_path)?;
        println!(
            "{}: cost {} in {:.6} s -> {}",
            algorithm.name(),
            fmt_cost(cost),
            elapsed.as_secs_f64(),
            out_path.display()
        );
    }

    Ok(())
}

fn run_bench(
    maps_dir: &Path,
    rounds: usize,
    timeout_secs: u64,
    no_timeout: bool,
    log: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    let config = BenchConfig {
        rounds,
        timeout: (!no_timeout).then(|| Duration::from_secs(timeout_secs)),
    };
    let mut reporter = match log {
        Some(path) => Reporter::with_log(path)?,
        None => Reporter::stdout_only(),
    };
    bench::run_suite(maps_dir, &config, &mut reporter)?;
    Ok(())
}

fn compare_social_routes(
    vertices: usize,
    communities: usize,
    seed: u64,
    source: usize,
    target: Option<usize>,
) -> Result<(), Box<dyn Error>> {
    if vertices == 0 {
        return Err("the network needs at least one vertex".into());
    }
    let target = target.unwrap_or(vertices - 1);
    for (label, vertex) in [("source", source), ("target", target)] {
        if vertex >= vertices {
            return Err(format!("{label} {vertex} is out of range for {vertices} vertices").into());
        }
    }

    let config = SocialConfig {
        vertices,
        communities,
        seed,
        ..SocialConfig::default()
    };
    let network = social::generate(&config);
    println!(
        "network: {} users, {} communities, {} relationships",
        vertices,
        communities.max(2),
        network.relationships()
    );
    println!(
        "routing {} (community {}) -> {} (community {})",
        source, network.community[source], target, network.community[target]
    );

    let (friction_distances, friction_predecessors) = dijkstra(&network.friction, source)?;
    let (hop_distances, hop_predecessors) = dijkstra(&network.hops, source)?;

    if friction_distances[target].is_infinite() {
        println!("no route between the two users");
        return Ok(());
    }

    let friction_path = reconstruct_path(&friction_predecessors, source, target)?;
    let hop_path = reconstruct_path(&hop_predecessors, source, target)?;

    println!(
        "lowest friction: cost {} over {} hops, {} community crossings",
        fmt_cost(friction_distances[target]),
        friction_path.len().saturating_sub(1),
        community_crossings(&friction_path, &network.community)
    );
    println!(
        "fewest hops:     cost {} over {} hops, {} community crossings",
        fmt_cost(hop_distances[target]),
        hop_path.len().saturating_sub(1),
        community_crossings(&hop_path, &network.community)
    );

    Ok(())
}

/// How many consecutive path steps cross a community boundary
fn community_crossings(path: &[usize], community: &[usize]) -> usize {
    path.windows(2)
        .filter(|pair| community[pair[0]] != community[pair[1]])
        .count()
}
