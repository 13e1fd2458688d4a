#![allow(dead_code)]

use flowscope::{GraphEdge, GraphNode, GraphSnapshot, WorkflowMeta};
use serde_json::{json, Value};

pub fn snapshot(nodes: Value, edges: Value) -> GraphSnapshot {
    snapshot_with_meta(nodes, edges, json!({}))
}

pub fn snapshot_with_meta(nodes: Value, edges: Value, meta: Value) -> GraphSnapshot {
    let nodes: Vec<GraphNode> = serde_json::from_value(nodes).expect("nodes fixture");
    let edges: Vec<GraphEdge> = serde_json::from_value(edges).expect("edges fixture");
    let meta: WorkflowMeta = serde_json::from_value(meta).expect("meta fixture");
    GraphSnapshot::new(nodes, edges, meta)
}

pub fn ids<'a>(nodes: &'a [&GraphNode]) -> Vec<&'a str> {
    nodes.iter().map(|n| n.id.as_str()).collect()
}
