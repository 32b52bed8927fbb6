//! Property-based tests for the shortest-path engines.
//!
//! Random small graphs are checked against exhaustive enumeration of simple
//! paths: every reported path must be minimal (soundness) and every minimal
//! path must be reported (completeness).

use std::collections::{BTreeSet, HashSet};

use allpaths_core::{
    BfsShortestPaths, DijkstraShortestPaths, EdgeWeight, FloatAlgebra, Graph, GraphView,
    IntegerAlgebra, NodeId, RelTypeFilter, RelTypeId, ShortestPaths, TraversalConfig,
    TraversalDirection, UnitCost,
};
use proptest::prelude::*;

// -----------------------------------------------------------------------------
// Graph generation
// -----------------------------------------------------------------------------

/// (node count, edges as (from, to, type index, weight)). Weights are
/// strictly positive so every minimal walk is a simple path.
fn graph_strategy() -> impl Strategy<Value = (u64, Vec<(u64, u64, u8, u8)>)> {
    (1u64..7).prop_flat_map(|n| {
        let edges = prop::collection::vec((0..n, 0..n, 0u8..2, 1u8..5), 0..14);
        (Just(n), edges)
    })
}

fn direction_strategy() -> impl Strategy<Value = TraversalDirection> {
    prop_oneof![
        Just(TraversalDirection::Outgoing),
        Just(TraversalDirection::Incoming),
        Just(TraversalDirection::Both),
    ]
}

fn build_graph(n: u64, edges: &[(u64, u64, u8, u8)]) -> Graph {
    let mut g = Graph::new();
    for id in 0..n {
        g.add_node(id, "Node".into(), Some(format!("Node {}", id)));
    }
    let types = [g.intern_rel_type("T0"), g.intern_rel_type("T1")];
    for &(from, to, t, w) in edges {
        g.add_weighted_edge(from, to, types[t as usize], f64::from(w));
    }
    g
}

fn filter_for(g: &Graph, restrict: bool) -> RelTypeFilter<RelTypeId> {
    if restrict {
        RelTypeFilter::only(g.rel_type_id("T0"))
    } else {
        RelTypeFilter::All
    }
}

// -----------------------------------------------------------------------------
// Brute force
// -----------------------------------------------------------------------------

/// Minimum cost over all simple paths and the node sequences achieving it.
/// With `weighted == false` every relationship costs one hop.
fn brute_force(
    g: &Graph,
    direction: TraversalDirection,
    types: &RelTypeFilter<RelTypeId>,
    source: NodeId,
    target: NodeId,
    weighted: bool,
) -> Option<(f64, BTreeSet<Vec<NodeId>>)> {
    fn walk(
        g: &Graph,
        direction: TraversalDirection,
        types: &RelTypeFilter<RelTypeId>,
        target: NodeId,
        weighted: bool,
        path: &mut Vec<NodeId>,
        cost: f64,
        found: &mut Vec<(f64, Vec<NodeId>)>,
    ) {
        let current = path[path.len() - 1];
        if current == target {
            found.push((cost, path.clone()));
            return;
        }
        for (rel, _) in g.relationships_of(current, direction, types) {
            let next = g.other_endpoint(rel, current);
            if path.contains(&next) {
                continue;
            }
            let step = if weighted {
                g.relationship(rel).map(|r| r.weight).unwrap_or(1.0)
            } else {
                1.0
            };
            path.push(next);
            walk(g, direction, types, target, weighted, path, cost + step, found);
            path.pop();
        }
    }

    let mut found = Vec::new();
    walk(g, direction, types, target, weighted, &mut vec![source], 0.0, &mut found);

    let best = found.iter().map(|(c, _)| *c).fold(None, |acc: Option<f64>, c| {
        Some(acc.map_or(c, |a| a.min(c)))
    })?;
    let paths = found
        .into_iter()
        .filter(|(c, _)| *c == best)
        .map(|(_, p)| p)
        .collect();
    Some((best, paths))
}

fn as_set(paths: Vec<Vec<NodeId>>) -> BTreeSet<Vec<NodeId>> {
    paths.into_iter().collect()
}

// -----------------------------------------------------------------------------
// Engines against brute force
// -----------------------------------------------------------------------------

proptest! {
    /// Dijkstra reports exactly the minimal simple paths and their cost.
    #[test]
    fn dijkstra_matches_brute_force(
        (n, edges) in graph_strategy(),
        direction in direction_strategy(),
        restrict in any::<bool>(),
    ) {
        let g = build_graph(n, &edges);
        let types = filter_for(&g, restrict);
        let mut engine: DijkstraShortestPaths<_, FloatAlgebra, _> = DijkstraShortestPaths::new(
            &g,
            EdgeWeight(&g),
            TraversalConfig::new(direction, types.clone()),
        );
        engine.set_start_node(0).unwrap();

        for target in 0..n {
            let expected = brute_force(&g, direction, &types, 0, target, true);
            let cost = engine.get_cost(target).unwrap();
            let listed = engine.get_paths_as_nodes(target).unwrap();
            prop_assert_eq!(listed.len() as u64, engine.count_node_paths(target).unwrap());
            let paths = as_set(listed.clone());
            prop_assert_eq!(paths.len(), listed.len());
            match expected {
                Some((best, expected_paths)) => {
                    prop_assert_eq!(cost, Some(best));
                    prop_assert_eq!(paths, expected_paths);
                }
                None => {
                    prop_assert_eq!(cost, None);
                    prop_assert!(paths.is_empty());
                }
            }
        }
    }

    /// BFS reports exactly the minimal-hop simple paths.
    #[test]
    fn bfs_matches_brute_force(
        (n, edges) in graph_strategy(),
        direction in direction_strategy(),
        restrict in any::<bool>(),
    ) {
        let g = build_graph(n, &edges);
        let types = filter_for(&g, restrict);
        let mut engine = BfsShortestPaths::new(&g, TraversalConfig::new(direction, types.clone()));
        engine.set_start_node(0).unwrap();

        for target in 0..n {
            let expected = brute_force(&g, direction, &types, 0, target, false);
            let cost = engine.get_cost(target).unwrap();
            let paths = as_set(engine.get_paths_as_nodes(target).unwrap());
            match expected {
                Some((best, expected_paths)) => {
                    prop_assert_eq!(cost.map(f64::from), Some(best));
                    prop_assert_eq!(paths, expected_paths);
                }
                None => {
                    prop_assert_eq!(cost, None);
                    prop_assert!(paths.is_empty());
                }
            }
        }
    }

    /// BFS and Dijkstra with unit costs agree on distances and path sets.
    #[test]
    fn bfs_equals_unit_dijkstra(
        (n, edges) in graph_strategy(),
        direction in direction_strategy(),
        source_pick in any::<prop::sample::Index>(),
    ) {
        let g = build_graph(n, &edges);
        let source = source_pick.index(n as usize) as NodeId;
        let config = TraversalConfig::new(direction, RelTypeFilter::All);

        let mut bfs = BfsShortestPaths::new(&g, config.clone());
        let mut dijkstra: DijkstraShortestPaths<_, IntegerAlgebra, _> =
            DijkstraShortestPaths::new(&g, UnitCost, config);
        bfs.set_start_node(source).unwrap();
        dijkstra.set_start_node(source).unwrap();

        for target in 0..n {
            prop_assert_eq!(
                bfs.get_cost(target).unwrap().map(i64::from),
                dijkstra.get_cost(target).unwrap()
            );
            prop_assert_eq!(
                as_set(bfs.get_paths_as_nodes(target).unwrap()),
                as_set(dijkstra.get_paths_as_nodes(target).unwrap())
            );
            prop_assert_eq!(bfs.count_paths(target).unwrap(), dijkstra.count_paths(target).unwrap());
        }
    }

    /// Every returned path runs source → target over relationships that pass
    /// the filters, and all of them cost exactly the reported minimum.
    #[test]
    fn paths_are_valid_and_equal_cost(
        (n, edges) in graph_strategy(),
        direction in direction_strategy(),
        restrict in any::<bool>(),
    ) {
        let g = build_graph(n, &edges);
        let types = filter_for(&g, restrict);
        let mut engine: DijkstraShortestPaths<_, FloatAlgebra, _> = DijkstraShortestPaths::new(
            &g,
            EdgeWeight(&g),
            TraversalConfig::new(direction, types.clone()),
        );
        engine.set_start_node(0).unwrap();

        for target in 0..n {
            let cost = engine.get_cost(target).unwrap();
            let paths = engine.get_paths(target).unwrap();
            prop_assert_eq!(paths.len() as u64, engine.count_paths(target).unwrap());
            for path in paths {
                prop_assert_eq!(path.start(), 0);
                prop_assert_eq!(path.end(), target);
                prop_assert_eq!(path.nodes().len(), path.relationships().len() + 1);

                let mut total = 0.0;
                for (i, &rel) in path.relationships().iter().enumerate() {
                    let from = path.nodes()[i];
                    let allowed: HashSet<_> = g
                        .relationships_of(from, direction, &types)
                        .into_iter()
                        .map(|(r, _)| r)
                        .collect();
                    prop_assert!(allowed.contains(&rel));
                    prop_assert_eq!(g.other_endpoint(rel, from), path.nodes()[i + 1]);
                    total += g.relationship(rel).unwrap().weight;
                }
                prop_assert_eq!(Some(total), cost);
            }
        }
    }

    /// Repeated queries without reset return identical results.
    #[test]
    fn queries_are_idempotent(
        (n, edges) in graph_strategy(),
        direction in direction_strategy(),
    ) {
        let g = build_graph(n, &edges);
        let mut engine = BfsShortestPaths::new(&g, TraversalConfig::new(direction, RelTypeFilter::All));
        engine.set_start_node(0).unwrap();

        for target in 0..n {
            let first = engine.get_paths_as_nodes(target).unwrap();
            let second = engine.get_paths_as_nodes(target).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
