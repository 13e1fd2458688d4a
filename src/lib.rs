//! # Flowscope — Workflow Variable Scope Resolution
//!
//! `flowscope` is the variable reference and dependency-resolution engine
//! behind a node-based workflow editor. Given a node placed inside a directed
//! graph of workflow steps — some nested inside iteration/loop containers,
//! some inside mutually exclusive branches — it determines:
//!
//! - **Visibility**: which upstream variables the node is allowed to reference
//!   ([`GraphSnapshot::before_nodes_in_same_branch`], [`available_vars`]).
//! - **Typing**: what type each addressable variable carries ([`VarType`],
//!   with one level of structured sub-variables addressed by dotted path).
//! - **Validity**: whether a `{{#node.var#}}` reference in a text template or
//!   a stored [`ValueSelector`] still resolves after the graph has been edited
//!   ([`not_exist_vars_in_text`], [`not_exist_vars_in_selectors`]).
//! - **Rename propagation**: rewriting references elsewhere in the graph when
//!   an upstream node renames a declared output ([`VarChange`],
//!   [`rename_in_selectors`]).
//!
//! Every resolver is a pure, synchronous function over an immutable
//! [`GraphSnapshot`] the host passes in. Nothing is cached: the graph changes
//! on every keystroke, so each call rebuilds its result from the current
//! snapshot and is guaranteed consistent with the latest edit.
//!
//! # Quick Start
//!
//! ```rust
//! use flowscope::{
//!     available_vars, AvailableVarsOptions, GraphEdge, GraphNode, GraphSnapshot,
//!     NodeType, VarDecl, VarType, WorkflowMeta,
//! };
//!
//! let nodes = vec![
//!     GraphNode {
//!         id: "start".into(),
//!         node_type: NodeType::Start,
//!         title: "Start".into(),
//!         parent_id: None,
//!         outputs: vec![],
//!     },
//!     GraphNode {
//!         id: "llm".into(),
//!         node_type: NodeType::Llm,
//!         title: "LLM".into(),
//!         parent_id: None,
//!         outputs: vec![VarDecl::new("text", VarType::String)],
//!     },
//!     GraphNode {
//!         id: "answer".into(),
//!         node_type: NodeType::Answer,
//!         title: "Answer".into(),
//!         parent_id: None,
//!         outputs: vec![],
//!     },
//! ];
//! let edges = vec![
//!     GraphEdge {
//!         id: "e1".into(),
//!         source: "start".into(),
//!         target: "llm".into(),
//!         source_handle: None,
//!     },
//!     GraphEdge {
//!         id: "e2".into(),
//!         source: "llm".into(),
//!         target: "answer".into(),
//!         source_handle: None,
//!     },
//! ];
//! let snapshot = GraphSnapshot::new(nodes, edges, WorkflowMeta::default());
//!
//! let catalog = available_vars(&snapshot, "answer", &AvailableVarsOptions::default());
//! assert!(catalog
//!     .available_vars
//!     .iter()
//!     .any(|entry| entry.node_id == "llm"));
//! ```

pub mod error;
pub mod graph;
pub mod model;
pub mod refs;
pub mod vars;

pub use crate::error::ScopeError;
pub use crate::graph::{GraphEdge, GraphNode, GraphSnapshot, NodeIndexMap, VarDecl};
pub use crate::model::{
    AppMode, ConversationVariable, EnvironmentVariable, NodeType, ValueSelector, VarType,
    WorkflowMeta, CONVERSATION_ROOT, ENV_ROOT, SYS_ROOT,
};
pub use crate::refs::{
    apply_change, apply_change_to_text, extract_refs, not_exist_vars_in_selectors,
    not_exist_vars_in_text, rename_in_selectors, rename_in_text, selector_resolves,
    selectors_affected_by_remove, VarChange,
};
pub use crate::vars::{
    any_var, available_vars, conversation_vars, env_vars, file_var, system_vars, AvailableVars,
    AvailableVarsOptions, NodeOutputVar, VarFilter, Variable,
};
