use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashSet;
use tracing::info;

use crate::graph::{AdjacencyList, Graph};


/// Tuning knobs for the synthetic community network generator
#[derive(Debug, Clone)]
pub struct SocialConfig {
    /// Total number of users
    pub vertices: usize,
    /// Number of community blocks; raised to 2 when lower, since bridges
    /// need at least two blocks
    pub communities: usize,
    /// Probability of an edge between two users of the same community
    pub intra_probability: f64,
    /// Sampling factor for bridges between two communities
    pub inter_probability: f64,
    /// Hard cap on bridges per community pair
    pub max_bridges_per_pair: usize,
    pub seed: u64,
    /// Inclusive interaction range on intra-community edges
    pub intra_interaction: (u32, u32),
    /// Inclusive interaction range on bridges (weak by construction)
    pub inter_interaction: (u32, u32),
    /// How hard weak relationships are penalized
    pub friction_alpha: f64,
}

impl Default for SocialConfig {
    fn default() -> Self {
        Self {
            vertices: 4000,
            communities: 4,
            intra_probability: 0.06,
            inter_probability: 0.0005,
            max_bridges_per_pair: 10,
            seed: 42,
            intra_interaction: (20, 100),
            inter_interaction: (0, 5),
            friction_alpha: 8.0,
        }
    }
}

/// Routing cost of a relationship: strong interaction means low friction.
/// The additive model is `1 + alpha / (1 + interaction)`.
fn friction_weight(interaction: u32, alpha: f64) -> f64 {
    1.0 + alpha / (1.0 + f64::from(interaction))
}


/// One generated network, seen through two weightings of the same
/// undirected edge set: friction costs and plain hop counts.
#[derive(Debug, Clone)]
pub struct SocialNetwork {
    pub friction: AdjacencyList<f64>,
    pub hops: AdjacencyList<f64>,
    /// Community index per user
    pub community: Vec<usize>,
}

impl SocialNetwork {
    /// Number of undirected relationships
    pub fn relationships(&self) -> usize {
        self.friction.size() / 2
    }
}

/// Generate a community-structured network: blocks of contiguous vertex
/// indices with dense internal edges and a handful of weak bridges between
/// block pairs. The same seed always yields the same network.
pub fn generate(config: &SocialConfig) -> SocialNetwork {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let vertices = config.vertices;
    let communities = config.communities.max(2);

    // Contiguous index blocks as communities
    let mut community = vec![0usize; vertices];
    let mut members: Vec<Vec<usize>> = vec![Vec::new(); communities];
    for vertex in 0..vertices {
        let block = (vertex * communities / vertices).min(communities - 1);
        community[vertex] = block;
        members[block].push(vertex);
    }

    let mut network = EdgeSink {
        friction: AdjacencyList::new(vertices),
        hops: AdjacencyList::new(vertices),
        seen: FxHashSet::default(),
        alpha: config.friction_alpha,
    };

    // Dense edges inside each community
    for block in &members {
        for i in 0..block.len() {
            for j in (i + 1)..block.len() {
                if rng.random::<f64>() < config.intra_probability {
                    let interaction = rng
                        .random_range(config.intra_interaction.0..=config.intra_interaction.1);
                    network.link(block[i], block[j], interaction);
                }
            }
        }
    }

    // Weak bridges between every pair of communities
    for a in 0..communities {
        for b in (a + 1)..communities {
            let (left, right) = (&members[a], &members[b]);
            if left.is_empty() || right.is_empty() {
                continue;
            }

            let mut target =
                (config.inter_probability * (left.len() * right.len()) as f64) as usize;
            // At least one bridge keeps the pair connected; the cap keeps
            // the cut sparse
            if target < 1 {
                target = 1;
            }
            if target > config.max_bridges_per_pair {
                target = config.max_bridges_per_pair;
            }

            for _ in 0..target {
                let u = left[rng.random_range(0..left.len())];
                let v = right[rng.random_range(0..right.len())];
                let interaction =
                    rng.random_range(config.inter_interaction.0..=config.inter_interaction.1);
                network.link(u, v, interaction);
            }
        }
    }

    info!(
        vertices,
        communities,
        relationships = network.seen.len(),
        "social network generated"
    );

    SocialNetwork {
        friction: network.friction,
        hops: network.hops,
        community,
    }
}

/// Accumulates undirected relationships into both weightings at once,
/// dropping duplicate pairs and self loops
struct EdgeSink {
    friction: AdjacencyList<f64>,
    hops: AdjacencyList<f64>,
    seen: FxHashSet<(usize, usize)>,
    alpha: f64,
}

impl EdgeSink {
    fn link(&mut self, u: usize, v: usize, interaction: u32) {
        if u == v {
            return;
        }
        let key = (u.min(v), u.max(v));
        if !self.seen.insert(key) {
            return;
        }

        let weight = friction_weight(interaction, self.alpha);
        self.friction.add_edge(u, v, weight);
        self.friction.add_edge(v, u, weight);
        self.hops.add_edge(u, v, 1.0);
        self.hops.add_edge(v, u, 1.0);
    }
}
