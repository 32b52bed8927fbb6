use std::collections::{HashMap, HashSet};

use crate::error::{Result, TraversalError};
use crate::view::{Direction, GraphView, RelTypeFilter, TraversalDirection};

/// Node identifier.
pub type NodeId = u64;

/// Relationship identifier. Dense, assigned in insertion order.
pub type EdgeId = u64;

/// Interned relationship type index (avoids storing duplicate strings per edge).
pub type RelTypeId = u16;

/// Upper bound on distinct relationship types a graph can intern.
pub const MAX_REL_TYPES: usize = RelTypeId::MAX as usize;

/// Metadata about a node.
#[derive(Debug, Clone)]
pub struct NodeInfo {
    pub label: String,
    /// Human-facing name, indexed for [`Graph::resolve_name`].
    pub name: Option<String>,
}

/// An adjacency list entry. `target` is the far endpoint as seen from the
/// list's owner.
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    pub id: EdgeId,
    pub target: NodeId,
    pub rel_type: RelTypeId,
}

/// A stored relationship with both endpoints.
#[derive(Debug, Clone, Copy)]
pub struct Relationship {
    pub from: NodeId,
    pub to: NodeId,
    pub rel_type: RelTypeId,
    pub weight: f64,
}

impl Relationship {
    pub const DEFAULT_WEIGHT: f64 = 1.0;
}

/// One edge for bulk loading via [`Graph::load_edges`].
#[derive(Debug, Clone)]
pub struct EdgeRecord {
    pub from_id: NodeId,
    pub to_id: NodeId,
    pub rel_type: String,
    pub from_label: String,
    pub to_label: String,
    pub from_name: Option<String>,
    pub to_name: Option<String>,
    pub weight: f64,
}

/// In-memory graph: adjacency lists + node metadata + relationship type interning.
///
/// Edges are stored bidirectionally: `outgoing[a]` contains edges from a,
/// `incoming[b]` contains edges into b. Both are populated on insert, and the
/// relationship table keeps the canonical endpoints for `other_endpoint`.
pub struct Graph {
    outgoing: HashMap<NodeId, Vec<Edge>>,
    incoming: HashMap<NodeId, Vec<Edge>>,
    relationships: Vec<Relationship>,
    nodes: HashMap<NodeId, NodeInfo>,
    name_index: HashMap<String, NodeId>,
    rel_types: Vec<String>,
    rel_type_map: HashMap<String, RelTypeId>,
}

impl Graph {
    pub fn new() -> Self {
        Self {
            outgoing: HashMap::new(),
            incoming: HashMap::new(),
            relationships: Vec::new(),
            nodes: HashMap::new(),
            name_index: HashMap::new(),
            rel_types: Vec::new(),
            rel_type_map: HashMap::new(),
        }
    }

    /// Pre-allocate for a known graph size.
    pub fn with_capacity(node_count: usize, edge_count: usize) -> Self {
        Self {
            outgoing: HashMap::with_capacity(node_count),
            incoming: HashMap::with_capacity(node_count),
            relationships: Vec::with_capacity(edge_count),
            nodes: HashMap::with_capacity(node_count),
            name_index: HashMap::with_capacity(node_count),
            rel_types: Vec::new(),
            rel_type_map: HashMap::new(),
        }
    }

    /// Intern a relationship type string, returning its compact ID.
    ///
    /// Panics once more than [`MAX_REL_TYPES`] distinct types are interned.
    pub fn intern_rel_type(&mut self, rel_type: &str) -> RelTypeId {
        if let Some(&id) = self.rel_type_map.get(rel_type) {
            return id;
        }
        assert!(
            self.rel_types.len() < MAX_REL_TYPES,
            "relationship type count exceeded maximum of {}",
            MAX_REL_TYPES
        );
        let id = self.rel_types.len() as RelTypeId;
        self.rel_types.push(rel_type.to_string());
        self.rel_type_map.insert(rel_type.to_string(), id);
        id
    }

    /// Resolve a RelTypeId back to its string name.
    pub fn rel_type_name(&self, id: RelTypeId) -> Option<&str> {
        self.rel_types.get(id as usize).map(|s| s.as_str())
    }

    /// Look up an already-interned relationship type.
    pub fn rel_type_id(&self, name: &str) -> Option<RelTypeId> {
        self.rel_type_map.get(name).copied()
    }

    pub fn rel_type_count(&self) -> usize {
        self.rel_types.len()
    }

    /// Parse a relationship type filter: `*` (or empty) selects every type,
    /// otherwise a comma-separated list of type names.
    pub fn rel_type_filter(&self, list: &str) -> Result<RelTypeFilter<RelTypeId>> {
        let list = list.trim();
        if list.is_empty() || list == "*" {
            return Ok(RelTypeFilter::All);
        }

        let mut ids = HashSet::new();
        for name in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let id = self
                .rel_type_id(name)
                .ok_or_else(|| TraversalError::invalid_config("relationship type", name))?;
            ids.insert(id);
        }
        Ok(RelTypeFilter::Only(ids))
    }

    /// Register a node with metadata. Re-registering replaces the metadata
    /// and the node's old name stops resolving. A name already held by
    /// another node moves to this one.
    pub fn add_node(&mut self, id: NodeId, label: String, name: Option<String>) {
        if let Some(old) = self.nodes.get(&id).and_then(|n| n.name.as_ref()) {
            if self.name_index.get(old) == Some(&id) {
                self.name_index.remove(old);
            }
        }
        if let Some(ref n) = name {
            if let Some(prev) = self.name_index.insert(n.clone(), id) {
                if prev != id {
                    tracing::warn!(name = %n, previous = prev, node = id, "node name reassigned");
                    if let Some(info) = self.nodes.get_mut(&prev) {
                        info.name = None;
                    }
                }
            }
        }
        self.nodes.insert(id, NodeInfo { label, name });
    }

    /// Add a directed edge with the default weight.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, rel_type: RelTypeId) -> EdgeId {
        self.add_weighted_edge(from, to, rel_type, Relationship::DEFAULT_WEIGHT)
    }

    /// Add a directed edge. Also inserts into the incoming adjacency list.
    pub fn add_weighted_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        rel_type: RelTypeId,
        weight: f64,
    ) -> EdgeId {
        let id = self.relationships.len() as EdgeId;
        self.relationships.push(Relationship {
            from,
            to,
            rel_type,
            weight,
        });
        self.outgoing.entry(from).or_default().push(Edge {
            id,
            target: to,
            rel_type,
        });
        self.incoming.entry(to).or_default().push(Edge {
            id,
            target: from,
            rel_type,
        });
        id
    }

    /// Bulk load edge records, creating endpoint nodes on first sight.
    pub fn load_edges<I>(&mut self, edges: I)
    where
        I: IntoIterator<Item = EdgeRecord>,
    {
        for rec in edges {
            if !self.nodes.contains_key(&rec.from_id) {
                self.add_node(rec.from_id, rec.from_label, rec.from_name);
            }
            if !self.nodes.contains_key(&rec.to_id) {
                self.add_node(rec.to_id, rec.to_label, rec.to_name);
            }

            let rt = self.intern_rel_type(&rec.rel_type);
            self.add_weighted_edge(rec.from_id, rec.to_id, rt, rec.weight);
        }
    }

    /// Look up a node by its name.
    pub fn resolve_name(&self, name: &str) -> Option<NodeId> {
        self.name_index.get(name).copied()
    }

    /// Get node metadata.
    pub fn node(&self, id: NodeId) -> Option<&NodeInfo> {
        self.nodes.get(&id)
    }

    /// Display name for a node: its name, falling back to the numeric id.
    pub fn display_name(&self, id: NodeId) -> String {
        self.node(id)
            .and_then(|n| n.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    pub fn nodes_iter(&self) -> impl Iterator<Item = (&NodeId, &NodeInfo)> {
        self.nodes.iter()
    }

    /// Get a stored relationship by id.
    pub fn relationship(&self, id: EdgeId) -> Option<&Relationship> {
        self.relationships.get(id as usize)
    }

    /// Get outgoing edges for a node.
    pub fn neighbors_out(&self, id: NodeId) -> &[Edge] {
        self.outgoing.get(&id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Get incoming edges for a node.
    pub fn neighbors_in(&self, id: NodeId) -> &[Edge] {
        self.incoming.get(&id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.relationships.len()
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let nodes_mem = self.nodes.len() * (size_of::<NodeId>() + size_of::<NodeInfo>() + 40);
        let out_edges: usize = self.outgoing.values().map(|v| v.len() * size_of::<Edge>()).sum();
        let in_edges: usize = self.incoming.values().map(|v| v.len() * size_of::<Edge>()).sum();
        let rels = self.relationships.len() * size_of::<Relationship>();
        let index_mem = self.name_index.len() * 80;

        nodes_mem + out_edges + in_edges + rels + index_mem
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterate adjacency entries according to a direction filter and type filter.
/// A self-loop shows up once per matching side.
fn iter_neighbors<'a>(
    graph: &'a Graph,
    node: NodeId,
    dir: TraversalDirection,
    types: &'a RelTypeFilter<RelTypeId>,
) -> impl Iterator<Item = (&'a Edge, Direction)> {
    let (use_out, use_inc) = match dir {
        TraversalDirection::Outgoing => (true, false),
        TraversalDirection::Incoming => (false, true),
        TraversalDirection::Both => (true, true),
    };

    let out_iter = graph
        .neighbors_out(node)
        .iter()
        .map(|e| (e, Direction::Outgoing))
        .filter(move |_| use_out);

    let in_iter = graph
        .neighbors_in(node)
        .iter()
        .map(|e| (e, Direction::Incoming))
        .filter(move |_| use_inc);

    out_iter
        .chain(in_iter)
        .filter(move |(e, _)| types.allows(&e.rel_type))
}

impl GraphView for Graph {
    type Node = NodeId;
    type Relationship = EdgeId;
    type RelType = RelTypeId;

    fn all_relationship_types(&self) -> Vec<RelTypeId> {
        (0..self.rel_types.len()).map(|i| i as RelTypeId).collect()
    }

    fn relationships_of(
        &self,
        node: NodeId,
        direction: TraversalDirection,
        types: &RelTypeFilter<RelTypeId>,
    ) -> Vec<(EdgeId, Direction)> {
        iter_neighbors(self, node, direction, types)
            .map(|(e, d)| (e.id, d))
            .collect()
    }

    fn other_endpoint(&self, relationship: EdgeId, from: NodeId) -> NodeId {
        match self.relationship(relationship) {
            Some(rel) if rel.from == from => rel.to,
            Some(rel) => rel.from,
            None => from,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(from: u64, to: u64, rel: &str) -> EdgeRecord {
        EdgeRecord {
            from_id: from,
            to_id: to,
            rel_type: rel.to_string(),
            from_label: "Node".to_string(),
            to_label: "Node".to_string(),
            from_name: None,
            to_name: None,
            weight: Relationship::DEFAULT_WEIGHT,
        }
    }

    fn make_star(center: u64, leaves: u64) -> Graph {
        let mut g = Graph::new();
        g.load_edges((1..=leaves).map(|i| EdgeRecord {
            from_label: "Hub".to_string(),
            to_label: "Leaf".to_string(),
            ..edge(center, i, "HAS")
        }));
        g
    }

    #[test]
    fn test_name_resolution() {
        let mut g = Graph::new();
        g.add_node(42, "Person".into(), Some("Node 7".into()));
        assert_eq!(g.resolve_name("Node 7"), Some(42));
        assert_eq!(g.resolve_name("nonexistent"), None);
        assert_eq!(g.display_name(42), "Node 7");
        assert_eq!(g.display_name(9), "9");
    }

    #[test]
    fn test_rename_drops_old_name() {
        let mut g = Graph::new();
        g.add_node(1, "Person".into(), Some("alice".into()));
        g.add_node(1, "Person".into(), Some("alicia".into()));
        assert_eq!(g.resolve_name("alice"), None);
        assert_eq!(g.resolve_name("alicia"), Some(1));

        g.add_node(1, "Person".into(), None);
        assert_eq!(g.resolve_name("alicia"), None);
        assert_eq!(g.display_name(1), "1");
    }

    #[test]
    fn test_name_moves_between_nodes() {
        let mut g = Graph::new();
        g.add_node(1, "Person".into(), Some("sam".into()));
        g.add_node(2, "Person".into(), Some("sam".into()));
        assert_eq!(g.resolve_name("sam"), Some(2));
        assert_eq!(g.node(1).unwrap().name, None);
        assert_eq!(g.display_name(1), "1");

        // re-registering node 1 must not steal the name back from node 2
        g.add_node(1, "Person".into(), Some("sky".into()));
        assert_eq!(g.resolve_name("sam"), Some(2));
        assert_eq!(g.resolve_name("sky"), Some(1));
    }

    #[test]
    fn test_graph_counts() {
        let g = make_star(0, 50);
        assert_eq!(g.node_count(), 51);
        assert_eq!(g.edge_count(), 50);
        assert_eq!(g.rel_type_count(), 1);
    }

    #[test]
    fn test_rel_type_name_valid() {
        let mut g = Graph::new();
        let id = g.intern_rel_type("KNOWS");
        assert_eq!(g.rel_type_name(id), Some("KNOWS"));
        assert_eq!(g.intern_rel_type("KNOWS"), id);
    }

    #[test]
    fn test_rel_type_name_invalid() {
        let g = Graph::new();
        assert_eq!(g.rel_type_name(999), None);
    }

    #[test]
    #[should_panic(expected = "exceeded maximum")]
    fn test_rel_type_overflow() {
        let mut g = Graph::new();
        for i in 0..=u16::MAX as u32 {
            g.intern_rel_type(&format!("REL_{}", i));
        }
    }

    #[test]
    fn test_edge_record_loading() {
        let mut g = Graph::new();
        g.load_edges(vec![EdgeRecord {
            from_name: Some("a".to_string()),
            to_name: Some("b".to_string()),
            weight: 2.5,
            ..edge(1, 2, "KNOWS")
        }]);
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.resolve_name("a"), Some(1));
        assert_eq!(g.resolve_name("b"), Some(2));
        let rel = g.relationship(0).unwrap();
        assert_eq!((rel.from, rel.to), (1, 2));
        assert_eq!(rel.weight, 2.5);
    }

    #[test]
    fn test_other_endpoint() {
        let mut g = Graph::new();
        let t = g.intern_rel_type("KNOWS");
        let id = g.add_edge(1, 2, t);
        assert_eq!(g.other_endpoint(id, 1), 2);
        assert_eq!(g.other_endpoint(id, 2), 1);
    }

    #[test]
    fn test_relationships_of_direction_filter() {
        let mut g = Graph::new();
        g.load_edges(vec![edge(0, 1, "A"), edge(2, 0, "B")]);

        let out = g.relationships_of(0, TraversalDirection::Outgoing, &RelTypeFilter::All);
        assert_eq!(out, vec![(0, Direction::Outgoing)]);

        let inc = g.relationships_of(0, TraversalDirection::Incoming, &RelTypeFilter::All);
        assert_eq!(inc, vec![(1, Direction::Incoming)]);

        let both = g.relationships_of(0, TraversalDirection::Both, &RelTypeFilter::All);
        assert_eq!(both.len(), 2);
    }

    #[test]
    fn test_relationships_of_type_filter() {
        let mut g = Graph::new();
        g.load_edges(vec![edge(0, 1, "A"), edge(0, 2, "B"), edge(0, 3, "A")]);
        let filter = g.rel_type_filter("A").unwrap();
        let rels = g.relationships_of(0, TraversalDirection::Both, &filter);
        let targets: Vec<NodeId> = rels.iter().map(|&(r, _)| g.other_endpoint(r, 0)).collect();
        assert_eq!(targets, vec![1, 3]);
    }

    #[test]
    fn test_self_loop_listed_per_direction() {
        let mut g = Graph::new();
        g.load_edges(vec![edge(0, 0, "SELF")]);
        let both = g.relationships_of(0, TraversalDirection::Both, &RelTypeFilter::All);
        assert_eq!(both, vec![(0, Direction::Outgoing), (0, Direction::Incoming)]);
        assert_eq!(g.other_endpoint(0, 0), 0);
    }

    #[test]
    fn test_rel_type_filter_parsing() {
        let mut g = Graph::new();
        g.load_edges(vec![edge(0, 1, "A"), edge(1, 2, "B")]);
        assert_eq!(g.rel_type_filter("*").unwrap(), RelTypeFilter::All);
        assert_eq!(g.rel_type_filter("").unwrap(), RelTypeFilter::All);

        let filter = g.rel_type_filter("A, B").unwrap();
        assert!(filter.allows(&0));
        assert!(filter.allows(&1));

        let err = g.rel_type_filter("A,MISSING").unwrap_err();
        assert!(matches!(err, TraversalError::InvalidConfig { .. }));
    }

    #[test]
    fn test_all_relationship_types() {
        let mut g = Graph::new();
        g.load_edges(vec![edge(0, 1, "A"), edge(1, 2, "B"), edge(2, 3, "A")]);
        assert_eq!(g.all_relationship_types(), vec![0, 1]);
    }

    #[test]
    fn test_memory_usage_nonzero() {
        let g = make_star(0, 100);
        assert!(g.memory_usage() > 0);
    }
}
