//! The read-only graph contract the engines traverse.

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;
use std::str::FromStr;

use crate::error::TraversalError;

/// Which stored edges a traversal follows from a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TraversalDirection {
    /// Follow edges from source to target only.
    Outgoing,
    /// Follow edges from target to source only.
    Incoming,
    /// Follow edges in both directions (undirected).
    #[default]
    Both,
}

impl FromStr for TraversalDirection {
    type Err = TraversalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "outgoing" | "out" => Ok(TraversalDirection::Outgoing),
            "incoming" | "in" => Ok(TraversalDirection::Incoming),
            "both" => Ok(TraversalDirection::Both),
            other => Err(TraversalError::invalid_config("direction", other)),
        }
    }
}

/// Direction a single relationship was traversed in, relative to the node
/// it was reached from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Outgoing,
    Incoming,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Outgoing => "outgoing",
            Direction::Incoming => "incoming",
        }
    }
}

/// Relationship type filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelTypeFilter<T: Eq + Hash> {
    All,
    Only(HashSet<T>),
}

impl<T: Eq + Hash> RelTypeFilter<T> {
    pub fn only<I: IntoIterator<Item = T>>(types: I) -> Self {
        RelTypeFilter::Only(types.into_iter().collect())
    }

    pub fn allows(&self, rel_type: &T) -> bool {
        match self {
            RelTypeFilter::All => true,
            RelTypeFilter::Only(set) => set.contains(rel_type),
        }
    }
}

impl<T: Eq + Hash> Default for RelTypeFilter<T> {
    fn default() -> Self {
        RelTypeFilter::All
    }
}

/// A materialized graph the engines can traverse.
///
/// Identifiers must keep stable equality and hashing for the lifetime of one
/// traversal run. Implementations that are shared across threads must make
/// concurrent reads safe themselves.
pub trait GraphView {
    type Node: Copy + Eq + Hash + Debug;
    type Relationship: Copy + Eq + Hash + Debug;
    type RelType: Copy + Eq + Hash + Debug;

    fn all_relationship_types(&self) -> Vec<Self::RelType>;

    /// Relationships incident to `node` that pass both filters, each paired
    /// with the direction it is traversed in when leaving `node`.
    fn relationships_of(
        &self,
        node: Self::Node,
        direction: TraversalDirection,
        types: &RelTypeFilter<Self::RelType>,
    ) -> Vec<(Self::Relationship, Direction)>;

    fn other_endpoint(&self, relationship: Self::Relationship, from: Self::Node) -> Self::Node;
}

impl<G: GraphView + ?Sized> GraphView for &G {
    type Node = G::Node;
    type Relationship = G::Relationship;
    type RelType = G::RelType;

    fn all_relationship_types(&self) -> Vec<Self::RelType> {
        (**self).all_relationship_types()
    }

    fn relationships_of(
        &self,
        node: Self::Node,
        direction: TraversalDirection,
        types: &RelTypeFilter<Self::RelType>,
    ) -> Vec<(Self::Relationship, Direction)> {
        (**self).relationships_of(node, direction, types)
    }

    fn other_endpoint(&self, relationship: Self::Relationship, from: Self::Node) -> Self::Node {
        (**self).other_endpoint(relationship, from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_direction() {
        assert_eq!("out".parse::<TraversalDirection>().unwrap(), TraversalDirection::Outgoing);
        assert_eq!("Incoming".parse::<TraversalDirection>().unwrap(), TraversalDirection::Incoming);
        assert_eq!("BOTH".parse::<TraversalDirection>().unwrap(), TraversalDirection::Both);
        assert!("sideways".parse::<TraversalDirection>().is_err());
    }

    #[test]
    fn test_filter_allows() {
        let all: RelTypeFilter<u16> = RelTypeFilter::All;
        assert!(all.allows(&7));

        let only = RelTypeFilter::only([1u16, 2]);
        assert!(only.allows(&1));
        assert!(!only.allows(&3));
    }
}
