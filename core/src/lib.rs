//! allpaths-core: single-source all-shortest-paths engines.
//!
//! Two traversal strategies over a read-only [`GraphView`]: unweighted BFS
//! (hop counts) and weighted Dijkstra over a pluggable [`CostAlgebra`].
//! Both keep every tied predecessor, so queries return *all* minimum-cost
//! paths between the start node and a target, not just one.
//!
//! Ships an in-memory [`Graph`] implementing the view; any other store can
//! implement [`GraphView`] as an adapter.

mod bfs;
mod config;
mod cost;
mod dijkstra;
mod engine;
mod error;
mod graph;
mod path;
mod view;

pub use bfs::BfsShortestPaths;
pub use config::TraversalConfig;
pub use cost::{
    CostAlgebra, CostEvaluator, EdgeWeight, FloatAlgebra, HopAlgebra, IntegerAlgebra, UnitCost,
};
pub use dijkstra::DijkstraShortestPaths;
pub use engine::{SearchState, ShortestPaths};
pub use error::{Result, TraversalError};
pub use graph::{
    Edge, EdgeId, EdgeRecord, Graph, NodeId, NodeInfo, RelTypeId, Relationship, MAX_REL_TYPES,
};
pub use path::{
    all_node_paths, all_paths, count_node_paths, count_paths, first_path, Path, Predecessors,
};
pub use view::{Direction, GraphView, RelTypeFilter, TraversalDirection};
