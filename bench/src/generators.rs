// ---------------------------------------------------------------------------
// Synthetic graphs: all O(n + edges), single-threaded, deterministic.
// Every edge gets a random type and an integer weight in 1..=4 so the same
// graph exercises BFS, unit-cost Dijkstra and weighted Dijkstra.
// ---------------------------------------------------------------------------

use allpaths_core::{Graph, NodeId};

/// Simple LCG for deterministic, fast pseudo-random numbers.
pub struct FastRng(u64);

impl FastRng {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }

    pub fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

const REL_TYPES: [&str; 4] = ["ROAD", "RAIL", "FERRY", "TRAIL"];

fn link(graph: &mut Graph, rng: &mut FastRng, from: NodeId, to: NodeId) {
    let rt = graph.intern_rel_type(REL_TYPES[rng.next(REL_TYPES.len() as u64) as usize]);
    let weight = (rng.next(4) + 1) as f64;
    graph.add_weighted_edge(from, to, rt, weight);
}

fn add_nodes(graph: &mut Graph, range: std::ops::Range<NodeId>, label: &str) {
    for id in range {
        graph.add_node(id, label.into(), Some(format!("n{}", id)));
    }
}

/// L-system tree: every node spawns three children. Deep, tie-free paths.
pub fn lsystem(node_count: u64) -> Graph {
    let mut graph = Graph::with_capacity(node_count as usize, node_count as usize);
    let mut rng = FastRng::new(42);
    let branching = 3u64;

    add_nodes(&mut graph, 0..1, "Root");
    let mut next_id: u64 = 1;
    let mut frontier: Vec<u64> = vec![0];

    while next_id < node_count && !frontier.is_empty() {
        let mut next_frontier = Vec::with_capacity(frontier.len() * branching as usize);
        for &parent in &frontier {
            for _ in 0..branching {
                if next_id >= node_count {
                    break;
                }
                let child = next_id;
                next_id += 1;
                add_nodes(&mut graph, child..child + 1, "Branch");
                link(&mut graph, &mut rng, parent, child);
                next_frontier.push(child);
            }
        }
        frontier = next_frontier;
    }

    graph
}

/// Watts-Strogatz: ring lattice with `k` forward neighbours per node, each
/// edge rewired to a random endpoint with probability `p`.
pub fn small_world(node_count: u64) -> Graph {
    let k = 4u64;
    let p = 0.05f64;
    let mut graph = Graph::with_capacity(node_count as usize, (node_count * k) as usize);
    let mut rng = FastRng::new(67890);

    add_nodes(&mut graph, 0..node_count, "Place");
    for i in 0..node_count {
        for j in 1..=k {
            let mut target = (i + j) % node_count;
            if rng.next_f64() < p {
                let rewired = rng.next(node_count);
                if rewired != i {
                    target = rewired;
                }
            }
            link(&mut graph, &mut rng, i, target);
        }
    }

    graph
}

/// Erdos-Renyi: ~4 uniform random edges per node, no structure.
pub fn random(node_count: u64) -> Graph {
    let target_edges = node_count * 4;
    let mut graph = Graph::with_capacity(node_count as usize, target_edges as usize);
    let mut rng = FastRng::new(54321);

    add_nodes(&mut graph, 0..node_count, "Place");
    for _ in 0..target_edges {
        let from = rng.next(node_count);
        let to = rng.next(node_count);
        if from != to {
            link(&mut graph, &mut rng, from, to);
        }
    }

    graph
}

/// Two dense clusters joined by a chain of ten bridge nodes. Every path
/// between the clusters squeezes through the chain.
pub fn barbell(node_count: u64) -> Graph {
    let bridge_len = 10u64;
    let cluster = node_count.saturating_sub(bridge_len).max(4) / 2;
    let degree = 8u64.min(cluster - 1);
    let mut graph = Graph::with_capacity(
        (cluster * 2 + bridge_len) as usize,
        (cluster * 2 * degree + bridge_len + 1) as usize,
    );
    let mut rng = FastRng::new(99999);

    let b_start = cluster + bridge_len;
    add_nodes(&mut graph, 0..cluster, "ClusterA");
    add_nodes(&mut graph, cluster..b_start, "Bridge");
    add_nodes(&mut graph, b_start..b_start + cluster, "ClusterB");

    for base in [0, b_start] {
        for i in 0..cluster {
            for _ in 0..degree {
                let target = rng.next(cluster);
                if target != i {
                    link(&mut graph, &mut rng, base + i, base + target);
                }
            }
        }
    }

    // cluster A tail -> bridge -> cluster B head
    let bridges = graph.intern_rel_type("BRIDGE");
    for id in cluster..=b_start {
        graph.add_edge(id - 1, id, bridges);
    }

    graph
}

/// Square grid with edges right and down. Node 0 is a corner; the number of
/// shortest paths to the far corner grows as a central binomial coefficient.
pub fn lattice(node_count: u64) -> Graph {
    let side = ((node_count as f64).sqrt() as u64).max(2);
    let mut graph = Graph::with_capacity((side * side) as usize, (2 * side * side) as usize);
    let mut rng = FastRng::new(31337);

    add_nodes(&mut graph, 0..side * side, "Cell");
    for row in 0..side {
        for col in 0..side {
            let id = row * side + col;
            if col + 1 < side {
                link(&mut graph, &mut rng, id, id + 1);
            }
            if row + 1 < side {
                link(&mut graph, &mut rng, id, id + side);
            }
        }
    }

    graph
}
