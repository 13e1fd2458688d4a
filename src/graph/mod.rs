//! 图快照模型与作用域遍历

mod snapshot;
mod traversal;
mod types;

pub use snapshot::GraphSnapshot;
pub use types::{GraphEdge, GraphNode, NodeIndexMap, VarDecl};
