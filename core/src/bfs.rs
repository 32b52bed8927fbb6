use std::collections::VecDeque;
use std::time::Instant;

use tracing::{debug, trace};

use crate::config::TraversalConfig;
use crate::cost::HopAlgebra;
use crate::engine::{SearchState, ShortestPaths};
use crate::error::Result;
use crate::view::GraphView;

/// Unweighted all-shortest-paths engine. Every relationship costs one hop.
///
/// Nodes are settled at first discovery, but every edge reaching a node from
/// the previous level is kept as a predecessor, so ties across the whole
/// level are retained. Edges into the same or an earlier level are ignored.
pub struct BfsShortestPaths<G: GraphView> {
    graph: G,
    config: TraversalConfig<G::RelType>,
    state: SearchState<G::Node, G::Relationship, u32>,
}

impl<G: GraphView> BfsShortestPaths<G> {
    pub fn new(graph: G, config: TraversalConfig<G::RelType>) -> Self {
        Self {
            graph,
            config,
            state: SearchState::new(),
        }
    }

    pub fn graph(&self) -> &G {
        &self.graph
    }

    /// Change the hop limit. Takes effect on the next run.
    pub fn limit_depth(&mut self, max_depth: Option<u32>) {
        self.config.max_depth = max_depth;
    }
}

impl<G: GraphView> ShortestPaths for BfsShortestPaths<G> {
    type Node = G::Node;
    type Relationship = G::Relationship;
    type RelType = G::RelType;
    type Cost = u32;
    type Algebra = HopAlgebra;

    fn state(&self) -> &SearchState<G::Node, G::Relationship, u32> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut SearchState<G::Node, G::Relationship, u32> {
        &mut self.state
    }

    fn config(&self) -> &TraversalConfig<G::RelType> {
        &self.config
    }

    fn config_mut(&mut self) -> &mut TraversalConfig<G::RelType> {
        &mut self.config
    }

    #[tracing::instrument(
        name = "bfs_run",
        skip(self),
        fields(direction = ?self.config.direction, max_depth = ?self.config.max_depth)
    )]
    fn run(&mut self) -> Result<()> {
        let start = self.state.require_start()?;
        let t = Instant::now();
        let max_depth = self.config.max_depth.unwrap_or(u32::MAX);

        // Levels leave the FIFO in order, so every node at depth d is expanded
        // before any node at d + 1.
        let mut queue: VecDeque<(G::Node, u32)> = VecDeque::new();
        queue.push_back((start, 0));
        let mut ties = 0usize;

        while let Some((current, depth)) = queue.pop_front() {
            if depth >= max_depth {
                continue;
            }
            let next_depth = depth + 1;

            let rels =
                self.graph
                    .relationships_of(current, self.config.direction, &self.config.rel_types);
            for (rel, _) in rels {
                let other = self.graph.other_endpoint(rel, current);
                match self.state.distances.get(&other) {
                    None => {
                        self.state.distances.insert(other, next_depth);
                        self.state.predecessors.insert(other, vec![(current, rel)]);
                        queue.push_back((other, next_depth));
                    }
                    Some(&d) if d == next_depth => {
                        trace!(node = ?other, via = ?current, depth = next_depth, "tie recorded");
                        self.state
                            .predecessors
                            .entry(other)
                            .or_default()
                            .push((current, rel));
                        ties += 1;
                    }
                    Some(_) => {}
                }
            }
        }

        debug!(
            settled = self.state.distances.len(),
            ties,
            elapsed = ?t.elapsed(),
            "bfs run complete"
        );
        Ok(())
    }
}
