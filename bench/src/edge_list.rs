//! Tab/whitespace separated edge lists: `from to type [weight]` per line,
//! `#` starts a comment. Nodes are named by the first two columns and get
//! ids in order of first appearance.

use std::collections::HashMap;
use std::path::Path;

use allpaths_core::{EdgeRecord, Graph, NodeId, Relationship};
use anyhow::{bail, Context};

const NODE_LABEL: &str = "Node";

pub fn read_graph(path: &Path) -> anyhow::Result<Graph> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read edge list {}", path.display()))?;
    let records = parse_edge_list(&text)
        .with_context(|| format!("malformed edge list {}", path.display()))?;

    let mut graph = Graph::with_capacity(records.len(), records.len());
    graph.load_edges(records);
    tracing::debug!(
        nodes = graph.node_count(),
        relationships = graph.edge_count(),
        "edge list loaded"
    );
    Ok(graph)
}

pub fn parse_edge_list(text: &str) -> anyhow::Result<Vec<EdgeRecord>> {
    let mut ids: HashMap<String, NodeId> = HashMap::new();
    let mut records = Vec::new();

    for (lineno, raw) in text.lines().enumerate() {
        let line = match raw.find('#') {
            Some(at) => &raw[..at],
            None => raw,
        };
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        if fields.len() < 3 || fields.len() > 4 {
            bail!(
                "line {}: expected `from to type [weight]`, got {} fields",
                lineno + 1,
                fields.len()
            );
        }

        let weight = match fields.get(3) {
            Some(w) => w
                .parse::<f64>()
                .with_context(|| format!("line {}: bad weight {:?}", lineno + 1, w))?,
            None => Relationship::DEFAULT_WEIGHT,
        };
        if weight.is_nan() {
            bail!("line {}: weight must be a number, got {:?}", lineno + 1, fields[3]);
        }

        let mut intern = |name: &str| -> NodeId {
            let next = ids.len() as NodeId;
            *ids.entry(name.to_string()).or_insert(next)
        };
        let from_id = intern(fields[0]);
        let to_id = intern(fields[1]);

        records.push(EdgeRecord {
            from_id,
            to_id,
            rel_type: fields[2].to_string(),
            from_label: NODE_LABEL.into(),
            to_label: NODE_LABEL.into(),
            from_name: Some(fields[0].to_string()),
            to_name: Some(fields[1].to_string()),
            weight,
        });
    }

    Ok(records)
}
