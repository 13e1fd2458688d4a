use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::graph::{GraphNode, GraphSnapshot, VarDecl};
use crate::model::{NodeType, ValueSelector, VarType, CONVERSATION_ROOT, ENV_ROOT, SYS_ROOT};

use super::sys;

/// One addressable variable inside a catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub variable: String,
    #[serde(rename = "type")]
    pub var_type: VarType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Variable>,
}

impl Variable {
    pub fn from_decl(decl: &VarDecl) -> Self {
        Variable {
            variable: decl.name.clone(),
            var_type: decl.var_type,
            children: decl.children.iter().map(Variable::from_decl).collect(),
        }
    }
}

/// One catalog entry: the variables a single source offers to the consuming
/// node. `node_type` is `None` for the synthetic namespace entries
/// (`sys`, `env`, `conversation`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeOutputVar {
    pub node_id: String,
    pub node_title: String,
    pub node_type: Option<NodeType>,
    pub is_start_node: bool,
    pub vars: Vec<Variable>,
}

/// Per-variable predicate: `(variable, its selector) -> keep?`.
pub type VarFilter<'a> = &'a dyn Fn(&Variable, &ValueSelector) -> bool;

pub struct AvailableVarsOptions<'a> {
    /// Take the node set from the leaf nodes of the enclosing container
    /// instead of the backward history (container output picker).
    pub only_leaf_node_var: bool,
    /// Applied per variable, recursively into children. `None` keeps all.
    pub filter_var: Option<VarFilter<'a>>,
}

impl Default for AvailableVarsOptions<'_> {
    fn default() -> Self {
        Self {
            only_leaf_node_var: false,
            filter_var: None,
        }
    }
}

/// The resolved catalog for one consuming node.
#[derive(Debug, Clone, PartialEq)]
pub struct AvailableVars {
    pub available_vars: Vec<NodeOutputVar>,
    pub available_nodes: Vec<GraphNode>,
}

/// Build the catalog of variables `node_id` is allowed to reference.
///
/// Rebuilt from the snapshot on every call; nothing is cached, so the result
/// is always consistent with the latest graph edit.
pub fn available_vars(
    snapshot: &GraphSnapshot,
    node_id: &str,
    options: &AvailableVarsOptions,
) -> AvailableVars {
    let default_filter: VarFilter = &super::filters::any_var;
    let filter = options.filter_var.unwrap_or(default_filter);

    // Node set per mode.
    let node_set: Vec<&GraphNode> = if options.only_leaf_node_var {
        leaf_scope_nodes(snapshot, node_id)
    } else {
        snapshot.before_nodes_in_same_branch(node_id)
    };

    // The enclosing container is a pseudo-source for its inner nodes: it is
    // not a data-flow predecessor but still exposes the current loop scope.
    let container = snapshot
        .get_node(node_id)
        .and_then(|n| n.parent_id.as_deref())
        .and_then(|pid| snapshot.get_node(pid))
        .filter(|c| c.node_type.is_container());

    let mut entries: Vec<NodeOutputVar> = Vec::new();
    let mut available_nodes: Vec<GraphNode> = Vec::new();
    let mut start_seen = false;

    for node in &node_set {
        available_nodes.push((*node).clone());
        let is_start = node.node_type == NodeType::Start;
        let mut vars: Vec<Variable> = node.outputs.iter().map(Variable::from_decl).collect();
        if is_start {
            start_seen = true;
            vars.extend(sys::system_vars(snapshot.meta.app_mode));
        }
        push_entry(
            &mut entries,
            &node.id,
            &node.title,
            Some(node.node_type),
            is_start,
            vars,
            filter,
        );
    }

    if let Some(container) = container {
        if !available_nodes.iter().any(|n| n.id == container.id) {
            available_nodes.push(container.clone());
            push_entry(
                &mut entries,
                &container.id,
                &container.title,
                Some(container.node_type),
                false,
                container_scope_vars(container),
                filter,
            );
        }
    }

    // System variables stay visible even when the start node is not part of
    // the resolved history (e.g. leaf mode).
    if !start_seen {
        push_entry(
            &mut entries,
            SYS_ROOT,
            SYS_ROOT,
            None,
            false,
            sys::system_vars(snapshot.meta.app_mode),
            filter,
        );
    }
    push_entry(
        &mut entries,
        ENV_ROOT,
        ENV_ROOT,
        None,
        false,
        sys::env_vars(&snapshot.meta),
        filter,
    );
    push_entry(
        &mut entries,
        CONVERSATION_ROOT,
        CONVERSATION_ROOT,
        None,
        false,
        sys::conversation_vars(&snapshot.meta),
        filter,
    );

    tracing::trace!(
        node_id,
        entries = entries.len(),
        nodes = available_nodes.len(),
        "built variable catalog"
    );

    AvailableVars {
        available_vars: entries,
        available_nodes,
    }
}

/// Node set for the container output picker: every leaf of the enclosing
/// container plus the leaf's in-container history.
fn leaf_scope_nodes<'a>(snapshot: &'a GraphSnapshot, node_id: &str) -> Vec<&'a GraphNode> {
    let Some(node) = snapshot.get_node(node_id) else {
        return Vec::new();
    };
    // A container picks from its own interior; an inner node resolves the
    // container that holds it.
    let container_id = if node.node_type.is_container() {
        node.id.as_str()
    } else {
        match node.parent_id.as_deref() {
            Some(pid) => pid,
            None => return Vec::new(),
        }
    };

    let mut result: Vec<&GraphNode> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    for leaf in snapshot.tree_leaf_nodes(container_id) {
        if seen.insert(leaf.id.as_str()) {
            result.push(leaf);
        }
        for pred in snapshot.before_nodes_in_same_branch(&leaf.id) {
            // Restrict the closure to the container interior.
            if pred.parent_id.as_deref() != Some(container_id) {
                continue;
            }
            if seen.insert(pred.id.as_str()) {
                result.push(pred);
            }
        }
    }
    result
}

/// Scope variables a container exposes to its interior: the current element
/// and index for iteration, the declared loop variables for loop.
fn container_scope_vars(container: &GraphNode) -> Vec<Variable> {
    match container.node_type {
        NodeType::Iteration => {
            let item = container
                .outputs
                .iter()
                .find(|d| d.name == "item")
                .map(Variable::from_decl)
                .unwrap_or(Variable {
                    variable: "item".to_string(),
                    var_type: VarType::Any,
                    children: Vec::new(),
                });
            let index = Variable {
                variable: "index".to_string(),
                var_type: VarType::Number,
                children: Vec::new(),
            };
            vec![item, index]
        }
        NodeType::Loop => container.outputs.iter().map(Variable::from_decl).collect(),
        _ => Vec::new(),
    }
}

/// Selector a top-level catalog variable is addressed by. System variables
/// are spelled `sys.<name>` but addressed under the `sys` root.
fn top_level_selector(entry_id: &str, var_name: &str) -> ValueSelector {
    if let Some(rest) = var_name.strip_prefix("sys.") {
        ValueSelector::new(SYS_ROOT, rest)
    } else {
        ValueSelector::new(entry_id, var_name)
    }
}

fn push_entry(
    entries: &mut Vec<NodeOutputVar>,
    node_id: &str,
    title: &str,
    node_type: Option<NodeType>,
    is_start_node: bool,
    vars: Vec<Variable>,
    filter: VarFilter,
) {
    let kept: Vec<Variable> = vars
        .iter()
        .filter_map(|v| filter_variable(v, top_level_selector(node_id, &v.variable), filter))
        .collect();
    // A source whose every variable is filtered out is omitted entirely.
    if kept.is_empty() {
        return;
    }
    entries.push(NodeOutputVar {
        node_id: node_id.to_string(),
        node_title: title.to_string(),
        node_type,
        is_start_node,
        vars: kept,
    });
}

fn filter_variable(var: &Variable, selector: ValueSelector, filter: VarFilter) -> Option<Variable> {
    let mut kept_children = Vec::new();
    for child in &var.children {
        let mut parts = selector.parts().to_vec();
        parts.push(child.variable.clone());
        if let Some(kept) = filter_variable(child, ValueSelector::from_parts(parts), filter) {
            kept_children.push(kept);
        }
    }
    // An object survives either on its own merits or because some of its
    // children do, in which case only the surviving children are kept.
    if filter(var, &selector) || !kept_children.is_empty() {
        Some(Variable {
            variable: var.variable.clone(),
            var_type: var.var_type,
            children: kept_children,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphEdge;
    use crate::model::WorkflowMeta;

    fn node(id: &str, node_type: NodeType, outputs: Vec<VarDecl>) -> GraphNode {
        GraphNode {
            id: id.to_string(),
            node_type,
            title: String::new(),
            parent_id: None,
            outputs,
        }
    }

    fn edge(source: &str, target: &str) -> GraphEdge {
        GraphEdge {
            id: format!("{}-{}", source, target),
            source: source.to_string(),
            target: target.to_string(),
            source_handle: None,
        }
    }

    fn entry<'a>(result: &'a AvailableVars, node_id: &str) -> Option<&'a NodeOutputVar> {
        result.available_vars.iter().find(|e| e.node_id == node_id)
    }

    #[test]
    fn test_catalog_excludes_self() {
        let snapshot = GraphSnapshot::new(
            vec![
                node("start", NodeType::Start, vec![]),
                node("a", NodeType::Llm, vec![VarDecl::new("text", VarType::String)]),
            ],
            vec![edge("start", "a")],
            WorkflowMeta::default(),
        );

        let result = available_vars(&snapshot, "a", &AvailableVarsOptions::default());
        assert!(entry(&result, "a").is_none());
    }

    #[test]
    fn test_empty_entries_omitted() {
        // `end` declares nothing, so no entry may appear for it.
        let snapshot = GraphSnapshot::new(
            vec![
                node("start", NodeType::Start, vec![]),
                node("end", NodeType::End, vec![]),
                node("b", NodeType::Code, vec![]),
            ],
            vec![edge("start", "end"), edge("end", "b")],
            WorkflowMeta::default(),
        );

        let result = available_vars(&snapshot, "b", &AvailableVarsOptions::default());
        assert!(entry(&result, "end").is_none());
        // start still carries the sys namespace
        assert!(entry(&result, "start").is_some());
    }

    #[test]
    fn test_filter_recurses_into_children() {
        let decl = VarDecl::new("result", VarType::Object).with_children(vec![
            VarDecl::new("name", VarType::String),
            VarDecl::new("attachment", VarType::File),
        ]);
        let snapshot = GraphSnapshot::new(
            vec![
                node("extract", NodeType::ParameterExtractor, vec![decl]),
                node("b", NodeType::Code, vec![]),
            ],
            vec![edge("extract", "b")],
            WorkflowMeta::default(),
        );

        let options = AvailableVarsOptions {
            filter_var: Some(&super::super::filters::file_var),
            ..Default::default()
        };
        let result = available_vars(&snapshot, "b", &options);
        let extract = entry(&result, "extract").unwrap();

        // the object survives through its file child only
        assert_eq!(extract.vars.len(), 1);
        assert_eq!(extract.vars[0].variable, "result");
        assert_eq!(extract.vars[0].children.len(), 1);
        assert_eq!(extract.vars[0].children[0].variable, "attachment");
    }

    #[test]
    fn test_filter_receives_full_selector() {
        let decl = VarDecl::new("result", VarType::Object)
            .with_children(vec![VarDecl::new("name", VarType::String)]);
        let snapshot = GraphSnapshot::new(
            vec![
                node("extract", NodeType::ParameterExtractor, vec![decl]),
                node("b", NodeType::Code, vec![]),
            ],
            vec![edge("extract", "b")],
            WorkflowMeta::default(),
        );

        let deep_only = |_: &Variable, sel: &ValueSelector| sel.parts().len() > 2;
        let options = AvailableVarsOptions {
            filter_var: Some(&deep_only),
            ..Default::default()
        };
        let result = available_vars(&snapshot, "b", &options);
        let extract = entry(&result, "extract").unwrap();
        assert_eq!(extract.vars[0].children[0].variable, "name");
    }

    #[test]
    fn test_container_pseudo_source_never_shadows() {
        // A true predecessor also declares `item`; both stay addressable
        // under their own node ids.
        let mut producer = node(
            "producer",
            NodeType::Code,
            vec![VarDecl::new("item", VarType::String)],
        );
        producer.parent_id = Some("iter".to_string());
        let mut consumer = node("consumer", NodeType::Llm, vec![]);
        consumer.parent_id = Some("iter".to_string());

        let snapshot = GraphSnapshot::new(
            vec![
                node("iter", NodeType::Iteration, vec![]),
                producer,
                consumer,
            ],
            vec![edge("producer", "consumer")],
            WorkflowMeta::default(),
        );

        let result = available_vars(&snapshot, "consumer", &AvailableVarsOptions::default());
        let from_producer = entry(&result, "producer").unwrap();
        assert!(from_producer.vars.iter().any(|v| v.variable == "item"));

        let from_container = entry(&result, "iter").unwrap();
        assert!(from_container.vars.iter().any(|v| v.variable == "item"));
        assert!(from_container.vars.iter().any(|v| v.variable == "index"));
    }

    #[test]
    fn test_loop_container_exposes_declared_vars() {
        let mut inner = node("inner", NodeType::Code, vec![]);
        inner.parent_id = Some("loop".to_string());
        let snapshot = GraphSnapshot::new(
            vec![
                node(
                    "loop",
                    NodeType::Loop,
                    vec![VarDecl::new("counter", VarType::Number)],
                ),
                inner,
            ],
            vec![],
            WorkflowMeta::default(),
        );

        let result = available_vars(&snapshot, "inner", &AvailableVarsOptions::default());
        let from_loop = entry(&result, "loop").unwrap();
        assert_eq!(from_loop.vars.len(), 1);
        assert_eq!(from_loop.vars[0].variable, "counter");
    }

    #[test]
    fn test_deterministic_output() {
        let snapshot = GraphSnapshot::new(
            vec![
                node("start", NodeType::Start, vec![]),
                node("a", NodeType::Llm, vec![VarDecl::new("text", VarType::String)]),
                node("b", NodeType::Code, vec![]),
            ],
            vec![edge("start", "a"), edge("a", "b")],
            WorkflowMeta::default(),
        );

        let first = available_vars(&snapshot, "b", &AvailableVarsOptions::default());
        let second = available_vars(&snapshot, "b", &AvailableVarsOptions::default());
        assert_eq!(first, second);
    }
}
