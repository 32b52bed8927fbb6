//! Shortest-path enumeration over a predecessor multimap.
//!
//! Both engines record, for every reached node, each incoming
//! `(predecessor, relationship)` pair that achieves the node's best cost.
//! Predecessor edges always point at nodes settled earlier in the run, so
//! walking them backwards from any target terminates at the source.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Node → every `(predecessor, relationship)` achieving the node's best cost.
/// The source maps to an empty list.
pub type Predecessors<N, R> = HashMap<N, Vec<(N, R)>>;

/// One minimum-cost path, source first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path<N, R> {
    nodes: Vec<N>,
    relationships: Vec<R>,
}

impl<N: Copy, R: Copy> Path<N, R> {
    /// Path consisting of the source alone.
    pub fn single(node: N) -> Self {
        Self {
            nodes: vec![node],
            relationships: Vec::new(),
        }
    }

    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    /// `relationships()[i]` connects `nodes()[i]` and `nodes()[i + 1]`.
    pub fn relationships(&self) -> &[R] {
        &self.relationships
    }

    pub fn start(&self) -> N {
        self.nodes[0]
    }

    pub fn end(&self) -> N {
        self.nodes[self.nodes.len() - 1]
    }

    /// Number of relationships (hops).
    pub fn len(&self) -> usize {
        self.relationships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relationships.is_empty()
    }

    pub fn into_nodes(self) -> Vec<N> {
        self.nodes
    }

    pub fn into_relationships(self) -> Vec<R> {
        self.relationships
    }
}

/// Enumerate every predecessor chain from `target` back to `source`.
///
/// Produces the full cross product of tied predecessors; there is no cap.
/// Callers that cannot afford that should check [`count_paths`] first.
/// Returns nothing when `target` has no chain to `source`.
pub fn all_paths<N, R>(preds: &Predecessors<N, R>, source: N, target: N) -> Vec<Path<N, R>>
where
    N: Copy + Eq + Hash,
    R: Copy,
{
    let mut out = Vec::new();

    // Backtracking walk: each frame holds a node and the index of the next
    // predecessor to try. `rels[i]` links `stack[i + 1]` to `stack[i]`.
    let mut stack: Vec<(N, usize)> = vec![(target, 0)];
    let mut rels: Vec<R> = Vec::new();

    while let Some(&(node, next)) = stack.last() {
        if node == source {
            out.push(Path {
                nodes: stack.iter().rev().map(|&(n, _)| n).collect(),
                relationships: rels.iter().rev().copied().collect(),
            });
            stack.pop();
            rels.pop();
            continue;
        }

        match preds.get(&node).and_then(|choices| choices.get(next)) {
            Some(&(pred, rel)) => {
                let top = stack.len() - 1;
                stack[top].1 += 1;
                stack.push((pred, 0));
                rels.push(rel);
            }
            None => {
                stack.pop();
                rels.pop();
            }
        }
    }

    out
}

/// Follow the first recorded predecessor at every step.
pub fn first_path<N, R>(preds: &Predecessors<N, R>, source: N, target: N) -> Option<Path<N, R>>
where
    N: Copy + Eq + Hash,
    R: Copy,
{
    let mut nodes = vec![target];
    let mut relationships = Vec::new();
    let mut current = target;

    while current != source {
        let &(pred, rel) = preds.get(&current)?.first()?;
        nodes.push(pred);
        relationships.push(rel);
        current = pred;
    }

    nodes.reverse();
    relationships.reverse();
    Some(Path {
        nodes,
        relationships,
    })
}

/// Enumerate every node sequence from `source` to `target`.
///
/// Walks distinct predecessor nodes, so parallel or reciprocal relationships
/// between the same pair of nodes cost nothing extra. Each sequence appears
/// once. Check [`count_node_paths`] first when the result may be large.
pub fn all_node_paths<N, R>(preds: &Predecessors<N, R>, source: N, target: N) -> Vec<Vec<N>>
where
    N: Copy + Eq + Hash,
{
    let mut out = Vec::new();
    let mut distinct: HashMap<N, Vec<N>> = HashMap::new();
    let mut stack: Vec<(N, usize)> = vec![(target, 0)];

    while let Some(&(node, next)) = stack.last() {
        if node == source {
            out.push(stack.iter().rev().map(|&(n, _)| n).collect());
            stack.pop();
            continue;
        }

        let choices = distinct
            .entry(node)
            .or_insert_with(|| predecessor_nodes(preds, node));
        match choices.get(next) {
            Some(&pred) => {
                let top = stack.len() - 1;
                stack[top].1 += 1;
                stack.push((pred, 0));
            }
            None => {
                stack.pop();
            }
        }
    }

    out
}

/// Number of distinct predecessor chains from `target` to `source`,
/// saturating at `u64::MAX`, without enumerating them. Equals the length of
/// [`all_paths`].
pub fn count_paths<N, R>(preds: &Predecessors<N, R>, source: N, target: N) -> u64
where
    N: Copy + Eq + Hash,
{
    count_chains(source, target, |node| {
        preds
            .get(&node)
            .map(|choices| choices.iter().map(|&(p, _)| p).collect())
            .unwrap_or_default()
    })
}

/// Number of distinct node sequences from `target` to `source`, saturating
/// at `u64::MAX`. Equals the length of [`all_node_paths`].
pub fn count_node_paths<N, R>(preds: &Predecessors<N, R>, source: N, target: N) -> u64
where
    N: Copy + Eq + Hash,
{
    count_chains(source, target, |node| predecessor_nodes(preds, node))
}

/// Memoized DP over the predecessor DAG. `choices` lists one entry per way
/// of stepping back from a node.
fn count_chains<N, F>(source: N, target: N, choices: F) -> u64
where
    N: Copy + Eq + Hash,
    F: Fn(N) -> Vec<N>,
{
    let mut memo: HashMap<N, u64> = HashMap::new();
    memo.insert(source, 1);

    let mut stack = vec![target];
    while let Some(&node) = stack.last() {
        if memo.contains_key(&node) {
            stack.pop();
            continue;
        }

        let steps = choices(node);
        let pending: Vec<N> = steps
            .iter()
            .copied()
            .filter(|p| !memo.contains_key(p))
            .collect();

        if pending.is_empty() {
            let total = steps.iter().fold(0u64, |acc, p| {
                acc.saturating_add(memo.get(p).copied().unwrap_or(0))
            });
            memo.insert(node, total);
            stack.pop();
        } else {
            stack.extend(pending);
        }
    }

    memo.get(&target).copied().unwrap_or(0)
}

/// Distinct predecessor nodes of `node`, in recording order.
pub fn predecessor_nodes<N, R>(preds: &Predecessors<N, R>, node: N) -> Vec<N>
where
    N: Copy + Eq + Hash,
{
    let mut seen = HashSet::new();
    preds
        .get(&node)
        .map(|choices| {
            choices
                .iter()
                .map(|&(p, _)| p)
                .filter(|p| seen.insert(*p))
                .collect()
        })
        .unwrap_or_default()
}
