use std::hash::Hash;

use crate::view::{RelTypeFilter, TraversalDirection};

/// Which relationships an engine follows, and how far.
///
/// Defaults to every relationship type in both directions with no depth
/// limit, which is what a plain undirected all-pairs comparison wants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalConfig<T: Eq + Hash> {
    pub direction: TraversalDirection,
    pub rel_types: RelTypeFilter<T>,
    /// Hop limit. Nodes further away are reported as unreached. Only the
    /// BFS engine honors it; Dijkstra is capped by cost instead.
    pub max_depth: Option<u32>,
}

impl<T: Eq + Hash> Default for TraversalConfig<T> {
    fn default() -> Self {
        Self {
            direction: TraversalDirection::Both,
            rel_types: RelTypeFilter::All,
            max_depth: None,
        }
    }
}

impl<T: Eq + Hash> TraversalConfig<T> {
    pub fn new(direction: TraversalDirection, rel_types: RelTypeFilter<T>) -> Self {
        Self {
            direction,
            rel_types,
            max_depth: None,
        }
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}
