//! Shapes a raw `/plot` payload into a bounded, referentially consistent
//! graph.
//!
//! The server decides relevance order; the processor keeps the first
//! `max_nodes` nodes and drops every link with an endpoint outside them.
//! Node size is the degree over the raw link list, so it still counts
//! links that were dropped for pointing at truncated nodes.

use std::collections::HashSet;

use serde_json::Value;
use tracing::debug;

use synapse_core::types::{GraphData, GraphLink, GraphNode};

pub const MAX_GRAPH_NODES: usize = 75;

#[derive(Debug, Clone)]
pub struct GraphDataProcessor {
    max_nodes: usize,
}

impl Default for GraphDataProcessor {
    fn default() -> Self {
        Self { max_nodes: MAX_GRAPH_NODES }
    }
}

impl GraphDataProcessor {
    pub fn new(max_nodes: usize) -> Self {
        Self { max_nodes: max_nodes.max(1) }
    }

    pub fn max_nodes(&self) -> usize {
        self.max_nodes
    }

    /// Never fails: anything that is not a usable payload becomes an empty
    /// graph.
    pub fn normalize(&self, raw: &Value) -> GraphData {
        let raw_nodes = raw.get("nodes").and_then(Value::as_array).map(Vec::as_slice).unwrap_or_default();
        let raw_links = raw
            .get("links")
            .or_else(|| raw.get("edges"))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        let endpoints: Vec<(Option<String>, Option<String>)> = raw_links
            .iter()
            .map(|l| (field(l, &["source", "from"]), field(l, &["target", "to"])))
            .collect();

        let nodes: Vec<GraphNode> = raw_nodes
            .iter()
            .take(self.max_nodes)
            .enumerate()
            .map(|(index, n)| {
                let id = field(n, &["id", "name"]).unwrap_or_else(|| format!("node_{index}"));
                let size = endpoints
                    .iter()
                    .filter(|(s, t)| s.as_deref() == Some(id.as_str()) || t.as_deref() == Some(id.as_str()))
                    .count();
                GraphNode {
                    color: field(n, &["color"]).unwrap_or_else(|| self.hue(index)),
                    group: field(n, &["group"]).unwrap_or_else(|| index.to_string()),
                    size,
                    id,
                }
            })
            .collect();

        let known: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
        let links: Vec<GraphLink> = raw_links
            .iter()
            .zip(endpoints.iter())
            .enumerate()
            .filter_map(|(index, (l, (source, target)))| {
                let (source, target) = (source.as_deref()?, target.as_deref()?);
                if !known.contains(source) || !known.contains(target) {
                    return None;
                }
                Some(GraphLink {
                    source: source.to_string(),
                    target: target.to_string(),
                    relation: field(l, &["relation", "label"]).unwrap_or_else(|| format!("relation_{index}")),
                })
            })
            .collect();

        debug!(
            raw_nodes = raw_nodes.len(),
            raw_links = raw_links.len(),
            nodes = nodes.len(),
            links = links.len(),
            "normalized graph payload"
        );
        GraphData { nodes, links }
    }

    fn hue(&self, index: usize) -> String {
        let hue = (index * 360) as f64 / self.max_nodes as f64;
        format!("hsl({hue}, 70%, 50%)")
    }
}

/// Normalize with the default node cap.
pub fn normalize(raw: &Value) -> GraphData {
    GraphDataProcessor::default().normalize(raw)
}

/// First of `keys` holding a non-empty string or a number.
fn field(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| match value.get(*k)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}
