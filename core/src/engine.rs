//! Contract shared by the BFS and Dijkstra engines.
//!
//! An engine is configured with a direction and relationship-type filter,
//! given exactly one start node, and then queried for arbitrary targets.
//! The first query runs the traversal to exhaustion; later queries reuse the
//! resulting distance table and predecessor multimap until `reset()`.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::config::TraversalConfig;
use crate::cost::CostAlgebra;
use crate::error::{Result, TraversalError};
use crate::path::{self, Path, Predecessors};
use crate::view::{RelTypeFilter, TraversalDirection};

/// Distance table and predecessor multimap for one source.
#[derive(Debug, Clone)]
pub struct SearchState<N, R, C> {
    pub(crate) start: Option<N>,
    pub(crate) distances: HashMap<N, C>,
    pub(crate) predecessors: Predecessors<N, R>,
    calculated: bool,
    failed: bool,
}

impl<N, R, C> SearchState<N, R, C>
where
    N: Copy + Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            start: None,
            distances: HashMap::new(),
            predecessors: Predecessors::new(),
            calculated: false,
            failed: false,
        }
    }

    pub fn reset(&mut self) {
        self.start = None;
        self.distances.clear();
        self.predecessors.clear();
        self.calculated = false;
        self.failed = false;
    }

    /// Seed the source at cost `zero` with an empty predecessor set.
    pub fn set_start(&mut self, node: N, zero: C) -> Result<()> {
        if self.start.is_some() {
            return Err(TraversalError::invalid_state(
                "start node already set; call reset() first",
            ));
        }
        self.start = Some(node);
        self.distances.insert(node, zero);
        self.predecessors.insert(node, Vec::new());
        Ok(())
    }

    pub fn start(&self) -> Option<N> {
        self.start
    }

    pub fn distance(&self, node: N) -> Option<&C> {
        self.distances.get(&node)
    }

    pub fn predecessors(&self) -> &Predecessors<N, R> {
        &self.predecessors
    }

    /// True once a run has been attempted since the last reset.
    pub fn started(&self) -> bool {
        self.calculated || self.failed
    }

    pub(crate) fn require_start(&self) -> Result<N> {
        if self.failed {
            return Err(TraversalError::invalid_state(
                "previous run failed; call reset() before reuse",
            ));
        }
        self.start
            .ok_or_else(|| TraversalError::invalid_state("no start node set"))
    }
}

impl<N, R, C> Default for SearchState<N, R, C>
where
    N: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Single-source all-shortest-paths engine.
///
/// Implementors provide state access and `run`; every query is provided.
/// Not safe for concurrent use: queries mutate the engine's tables.
pub trait ShortestPaths {
    type Node: Copy + Eq + Hash + Debug;
    type Relationship: Copy + Eq + Hash + Debug;
    type RelType: Copy + Eq + Hash + Debug;
    type Cost: Clone + Debug;
    type Algebra: CostAlgebra<Cost = Self::Cost>;

    fn state(&self) -> &SearchState<Self::Node, Self::Relationship, Self::Cost>;

    fn state_mut(&mut self) -> &mut SearchState<Self::Node, Self::Relationship, Self::Cost>;

    fn config(&self) -> &TraversalConfig<Self::RelType>;

    fn config_mut(&mut self) -> &mut TraversalConfig<Self::RelType>;

    /// Expand from the start node until the frontier is exhausted, filling
    /// the distance table and predecessor multimap.
    fn run(&mut self) -> Result<()>;

    /// Change the relationship filters. Fails once a run has happened since
    /// the last reset.
    fn configure(
        &mut self,
        direction: TraversalDirection,
        rel_types: RelTypeFilter<Self::RelType>,
    ) -> Result<()> {
        if self.state().started() {
            return Err(TraversalError::invalid_state(
                "cannot reconfigure after traversal has begun; call reset() first",
            ));
        }
        let config = self.config_mut();
        config.direction = direction;
        config.rel_types = rel_types;
        Ok(())
    }

    /// Drop all distances and predecessors and forget the start node.
    fn reset(&mut self) {
        self.state_mut().reset();
    }

    fn set_start_node(&mut self, node: Self::Node) -> Result<()> {
        self.state_mut()
            .set_start(node, <Self::Algebra as CostAlgebra>::zero())
    }

    fn start_node(&self) -> Option<Self::Node> {
        self.state().start()
    }

    fn direction(&self) -> TraversalDirection {
        self.config().direction
    }

    fn relationship_types(&self) -> &RelTypeFilter<Self::RelType> {
        &self.config().rel_types
    }

    /// Nodes with a distance entry (the source included).
    fn settled_count(&self) -> usize {
        self.state().distances.len()
    }

    /// Run the traversal now if it has not run yet.
    fn calculate(&mut self) -> Result<()> {
        self.state().require_start()?;
        if self.state().calculated {
            return Ok(());
        }
        match self.run() {
            Ok(()) => {
                self.state_mut().calculated = true;
                Ok(())
            }
            Err(err) => {
                self.state_mut().failed = true;
                Err(err)
            }
        }
    }

    /// Minimum cost to `target`, or `None` when it is unreached. With no
    /// start node every target is unreached.
    fn get_cost(&mut self, target: Self::Node) -> Result<Option<Self::Cost>> {
        if self.state().start.is_none() && !self.state().failed {
            return Ok(None);
        }
        self.calculate()?;
        Ok(self.state().distance(target).cloned())
    }

    /// Every minimum-cost path to `target`, one per distinct relationship
    /// sequence.
    fn get_paths(
        &mut self,
        target: Self::Node,
    ) -> Result<Vec<Path<Self::Node, Self::Relationship>>> {
        self.calculate()?;
        let state = self.state();
        match state.start {
            Some(start) if state.distances.contains_key(&target) => {
                Ok(path::all_paths(&state.predecessors, start, target))
            }
            _ => Ok(Vec::new()),
        }
    }

    /// Every minimum-cost path to `target` as a node sequence. Paths that
    /// differ only in parallel or reciprocal relationships are reported once.
    fn get_paths_as_nodes(&mut self, target: Self::Node) -> Result<Vec<Vec<Self::Node>>> {
        self.calculate()?;
        let state = self.state();
        match state.start {
            Some(start) if state.distances.contains_key(&target) => {
                Ok(path::all_node_paths(&state.predecessors, start, target))
            }
            _ => Ok(Vec::new()),
        }
    }

    fn get_paths_as_relationships(
        &mut self,
        target: Self::Node,
    ) -> Result<Vec<Vec<Self::Relationship>>> {
        let paths = self.get_paths(target)?;
        Ok(paths.into_iter().map(Path::into_relationships).collect())
    }

    /// One minimum-cost path to `target`.
    fn get_path(
        &mut self,
        target: Self::Node,
    ) -> Result<Option<Path<Self::Node, Self::Relationship>>> {
        self.calculate()?;
        let state = self.state();
        match state.start {
            Some(start) if state.distances.contains_key(&target) => {
                Ok(path::first_path(&state.predecessors, start, target))
            }
            _ => Ok(None),
        }
    }

    fn get_path_as_nodes(&mut self, target: Self::Node) -> Result<Option<Vec<Self::Node>>> {
        Ok(self.get_path(target)?.map(Path::into_nodes))
    }

    /// Distinct nodes immediately before `target` on some shortest path.
    fn get_predecessor_nodes(&mut self, target: Self::Node) -> Result<Vec<Self::Node>> {
        self.calculate()?;
        Ok(path::predecessor_nodes(&self.state().predecessors, target))
    }

    /// How many paths [`get_paths`](Self::get_paths) would return, saturating
    /// at `u64::MAX`.
    fn count_paths(&mut self, target: Self::Node) -> Result<u64> {
        self.calculate()?;
        let state = self.state();
        match state.start {
            Some(start) if state.distances.contains_key(&target) => {
                Ok(path::count_paths(&state.predecessors, start, target))
            }
            _ => Ok(0),
        }
    }

    /// How many node sequences [`get_paths_as_nodes`](Self::get_paths_as_nodes)
    /// would return, saturating at `u64::MAX`.
    fn count_node_paths(&mut self, target: Self::Node) -> Result<u64> {
        self.calculate()?;
        let state = self.state();
        match state.start {
            Some(start) if state.distances.contains_key(&target) => {
                Ok(path::count_node_paths(&state.predecessors, start, target))
            }
            _ => Ok(0),
        }
    }
}
