use std::collections::{HashMap, HashSet};

use petgraph::stable_graph::{NodeIndex, StableDiGraph};

use crate::error::ScopeError;
use crate::model::{NodeType, WorkflowMeta};

use super::types::*;

/// 图快照 - 一次解析调用所读取的不可变图结构
///
/// 由外部编辑器在每次解析前构建；引擎只读，从不修改。
#[derive(Debug)]
pub struct GraphSnapshot {
    /// 图结构
    pub graph: StableDiGraph<GraphNode, GraphEdge>,

    /// 节点 ID 到 NodeIndex 的映射
    pub node_index_map: NodeIndexMap,

    /// 工作流元数据
    pub meta: WorkflowMeta,

    /// 构建时跳过的重复节点 ID（validate 时报告）
    duplicate_node_ids: Vec<String>,
}

impl GraphSnapshot {
    /// 从节点和边列表构建快照
    ///
    /// 端点缺失的边直接跳过（编辑中途的状态不是错误）；
    /// 重复 ID 的节点保留第一个，重复项记录下来供 validate 报告。
    pub fn new(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>, meta: WorkflowMeta) -> Self {
        let mut graph = StableDiGraph::<GraphNode, GraphEdge>::new();
        let mut node_index_map: HashMap<String, NodeIndex> = HashMap::new();
        let mut duplicate_node_ids = Vec::new();

        // 1. 添加所有节点
        for mut node in nodes {
            if node_index_map.contains_key(&node.id) {
                duplicate_node_ids.push(node.id.clone());
                continue;
            }
            if node.title.is_empty() {
                node.title = node.id.clone();
            }
            let id = node.id.clone();
            let idx = graph.add_node(node);
            node_index_map.insert(id, idx);
        }

        // 2. 添加所有边
        for edge in edges {
            let (Some(&source_idx), Some(&target_idx)) = (
                node_index_map.get(&edge.source),
                node_index_map.get(&edge.target),
            ) else {
                tracing::debug!(
                    source = %edge.source,
                    target = %edge.target,
                    "skipping edge with missing endpoint"
                );
                continue;
            };
            graph.add_edge(source_idx, target_idx, edge);
        }

        Self {
            graph,
            node_index_map,
            meta,
            duplicate_node_ids,
        }
    }

    /// 根据节点 ID 获取图节点；不存在返回 None
    pub fn get_node(&self, node_id: &str) -> Option<&GraphNode> {
        let idx = self.node_index_map.get(node_id)?;
        self.graph.node_weight(*idx)
    }

    pub fn node_index(&self, node_id: &str) -> Option<NodeIndex> {
        self.node_index_map.get(node_id).copied()
    }

    pub fn contains(&self, node_id: &str) -> bool {
        self.node_index_map.contains_key(node_id)
    }

    /// 按任意顺序遍历所有节点
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.graph
            .node_indices()
            .filter_map(|idx| self.graph.node_weight(idx))
    }

    /// Start 节点（没有则返回 None）
    pub fn start_node(&self) -> Option<&GraphNode> {
        self.nodes().find(|n| n.node_type == NodeType::Start)
    }

    /// 从里向外的容器链：最近的容器排最前
    pub fn parent_chain(&self, node_id: &str) -> Vec<&GraphNode> {
        let mut chain = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        let mut current = self.get_node(node_id);
        while let Some(node) = current {
            let Some(parent_id) = node.parent_id.as_deref() else {
                break;
            };
            // 环保护：包含关系数据损坏时不至于死循环
            if !seen.insert(parent_id) {
                break;
            }
            match self.get_node(parent_id) {
                Some(parent) => {
                    chain.push(parent);
                    current = Some(parent);
                }
                None => break,
            }
        }
        chain
    }

    /// 验证快照的合法性
    ///
    /// 解析调用本身从不因数据形态报错；本方法供宿主在保存前做结构检查。
    pub fn validate(&self) -> Result<(), ScopeError> {
        // 1. 重复节点 ID
        if let Some(id) = self.duplicate_node_ids.first() {
            return Err(ScopeError::DuplicateNodeId(id.clone()));
        }

        // 2. 检测环（DAG 验证）
        if petgraph::algo::is_cyclic_directed(&self.graph) {
            return Err(ScopeError::CycleDetected);
        }

        // 3. 同一节点的输出变量不允许重名
        for node in self.nodes() {
            let mut names: HashSet<&str> = HashSet::new();
            for decl in &node.outputs {
                if !names.insert(decl.name.as_str()) {
                    return Err(ScopeError::DuplicateVarName {
                        node_id: node.id.clone(),
                        name: decl.name.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}
