use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashSet};
use std::marker::PhantomData;
use std::time::Instant;

use tracing::{debug, trace, warn};

use crate::config::TraversalConfig;
use crate::cost::{CostAlgebra, CostEvaluator};
use crate::engine::{SearchState, ShortestPaths};
use crate::error::{Result, TraversalError};
use crate::view::GraphView;

/// Priority queue entry ordered by accumulated cost under the algebra, then
/// by insertion sequence so equal costs pop in a stable order.
pub(crate) struct HeapEntry<A: CostAlgebra, N> {
    node: N,
    cost: A::Cost,
    seq: u64,
    _algebra: PhantomData<A>,
}

impl<A: CostAlgebra, N> HeapEntry<A, N> {
    fn new(node: N, cost: A::Cost, seq: u64) -> Self {
        Self {
            node,
            cost,
            seq,
            _algebra: PhantomData,
        }
    }
}

impl<A: CostAlgebra, N> PartialEq for HeapEntry<A, N> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<A: CostAlgebra, N> Eq for HeapEntry<A, N> {}

impl<A: CostAlgebra, N> PartialOrd for HeapEntry<A, N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<A: CostAlgebra, N> Ord for HeapEntry<A, N> {
    fn cmp(&self, other: &Self) -> Ordering {
        A::compare(&self.cost, &other.cost).then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Weighted all-shortest-paths engine over a pluggable cost algebra.
///
/// Uses lazy decrease-key: a node is re-inserted whenever its distance
/// improves and stale heap entries are skipped on extraction. Edges of equal
/// accumulated cost into an unsettled node are kept as extra predecessors;
/// edges into settled nodes are never relaxed. Negative edge costs are
/// rejected with [`TraversalError::UnsupportedCost`] when first met.
pub struct DijkstraShortestPaths<G, A, E>
where
    G: GraphView,
    A: CostAlgebra,
{
    graph: G,
    evaluator: E,
    config: TraversalConfig<G::RelType>,
    max_cost: Option<A::Cost>,
    state: SearchState<G::Node, G::Relationship, A::Cost>,
    _algebra: PhantomData<A>,
}

impl<G, A, E> DijkstraShortestPaths<G, A, E>
where
    G: GraphView,
    A: CostAlgebra,
    E: CostEvaluator<G::Relationship, A::Cost>,
{
    pub fn new(graph: G, evaluator: E, config: TraversalConfig<G::RelType>) -> Self {
        Self {
            graph,
            evaluator,
            config,
            max_cost: None,
            state: SearchState::new(),
            _algebra: PhantomData,
        }
    }

    /// Do not relax edges whose accumulated cost would exceed `max_cost`.
    pub fn with_max_cost(mut self, max_cost: A::Cost) -> Self {
        self.max_cost = Some(max_cost);
        self
    }

    /// Change the cost cap. Takes effect on the next run.
    pub fn limit_max_cost(&mut self, max_cost: Option<A::Cost>) {
        self.max_cost = max_cost;
    }

    pub fn graph(&self) -> &G {
        &self.graph
    }
}

impl<G, A, E> ShortestPaths for DijkstraShortestPaths<G, A, E>
where
    G: GraphView,
    A: CostAlgebra,
    E: CostEvaluator<G::Relationship, A::Cost>,
{
    type Node = G::Node;
    type Relationship = G::Relationship;
    type RelType = G::RelType;
    type Cost = A::Cost;
    type Algebra = A;

    fn state(&self) -> &SearchState<G::Node, G::Relationship, A::Cost> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut SearchState<G::Node, G::Relationship, A::Cost> {
        &mut self.state
    }

    fn config(&self) -> &TraversalConfig<G::RelType> {
        &self.config
    }

    fn config_mut(&mut self) -> &mut TraversalConfig<G::RelType> {
        &mut self.config
    }

    #[tracing::instrument(
        name = "dijkstra_run",
        skip(self),
        fields(direction = ?self.config.direction, max_cost = ?self.max_cost)
    )]
    fn run(&mut self) -> Result<()> {
        let start = self.state.require_start()?;
        let t = Instant::now();

        let mut heap: BinaryHeap<Reverse<HeapEntry<A, G::Node>>> = BinaryHeap::new();
        let mut settled: HashSet<G::Node> = HashSet::new();
        let mut seq = 0u64;
        let mut ties = 0usize;

        heap.push(Reverse(HeapEntry::new(start, A::zero(), seq)));

        while let Some(Reverse(entry)) = heap.pop() {
            let current = entry.node;
            if settled.contains(&current) {
                continue;
            }
            let base = match self.state.distances.get(&current) {
                Some(best) if A::compare(&entry.cost, best) != Ordering::Greater => best.clone(),
                // Stale: the node was re-inserted at a lower cost.
                _ => continue,
            };
            settled.insert(current);

            let rels =
                self.graph
                    .relationships_of(current, self.config.direction, &self.config.rel_types);
            for (rel, dir) in rels {
                let edge_cost = self.evaluator.cost(rel, dir);
                if A::is_negative(&edge_cost) {
                    warn!(
                        relationship = ?rel,
                        direction = dir.as_str(),
                        cost = ?edge_cost,
                        "unsupported edge cost rejected"
                    );
                    return Err(TraversalError::unsupported_cost(edge_cost));
                }

                let other = self.graph.other_endpoint(rel, current);
                if settled.contains(&other) {
                    continue;
                }

                let new_cost = A::add(&base, &edge_cost);
                if let Some(max) = &self.max_cost {
                    if A::compare(&new_cost, max) == Ordering::Greater {
                        continue;
                    }
                }

                let order = self
                    .state
                    .distances
                    .get(&other)
                    .map(|known| A::compare(&new_cost, known));
                match order {
                    None | Some(Ordering::Less) => {
                        self.state.distances.insert(other, new_cost.clone());
                        self.state.predecessors.insert(other, vec![(current, rel)]);
                        seq += 1;
                        heap.push(Reverse(HeapEntry::new(other, new_cost, seq)));
                    }
                    Some(Ordering::Equal) => {
                        trace!(node = ?other, via = ?current, "tie recorded");
                        self.state
                            .predecessors
                            .entry(other)
                            .or_default()
                            .push((current, rel));
                        ties += 1;
                    }
                    Some(Ordering::Greater) => {}
                }
            }
        }

        debug!(
            settled = settled.len(),
            ties,
            elapsed = ?t.elapsed(),
            "dijkstra run complete"
        );
        Ok(())
    }
}
